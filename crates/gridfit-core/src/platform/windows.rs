//! Windows backend: Win32 top-level windows and the target's console.

use std::ptr;

use tracing::{debug, warn};
use windows_sys::Win32::Foundation::{
    BOOL, CloseHandle, GENERIC_READ, GENERIC_WRITE, GetLastError, HANDLE, HWND,
    INVALID_HANDLE_VALUE, LPARAM, RECT, TRUE,
};
use windows_sys::Win32::Storage::FileSystem::{
    CreateFileW, FILE_SHARE_READ, FILE_SHARE_WRITE, OPEN_EXISTING,
};
use windows_sys::Win32::System::Console::{
    AttachConsole, CONSOLE_SCREEN_BUFFER_INFO, COORD, FreeConsole, GetConsoleScreenBufferInfo,
    SMALL_RECT, SetConsoleScreenBufferSize, SetConsoleWindowInfo,
};
use windows_sys::Win32::UI::WindowsAndMessaging::{
    EnumWindows, GetClientRect, GetWindowRect, GetWindowTextW, GetWindowThreadProcessId,
    IsWindowVisible, SW_HIDE, SWP_NOACTIVATE, SWP_NOREDRAW, SWP_NOZORDER, SetWindowPos,
    ShowWindow,
};

use super::traits::Platform;
use crate::geometry::{CharacterGrid, PixelSize};
use crate::process::Pid;
use crate::resize::{ConsoleBuffer, ResizeError, TerminalBinding};
use crate::window::{WindowError, WindowHandle};

#[derive(Debug, Default)]
pub struct WindowsPlatform;

impl Platform for WindowsPlatform {
    fn name(&self) -> &'static str {
        "windows"
    }

    fn enumerate_windows(&self) -> Result<Vec<Box<dyn WindowHandle>>, WindowError> {
        let mut hwnds: Vec<HWND> = Vec::new();
        // SAFETY: the callback only runs during this call and `hwnds` outlives it.
        let ok = unsafe { EnumWindows(Some(collect_visible), &mut hwnds as *mut _ as LPARAM) };
        if ok == 0 {
            return Err(WindowError::EnumerationFailed {
                message: format!("EnumWindows failed (error {})", last_error()),
            });
        }

        debug!(
            event = "core.platform.windows_enumerated",
            platform = "windows",
            count = hwnds.len()
        );
        Ok(hwnds
            .into_iter()
            .map(|hwnd| Box::new(Win32Window { hwnd }) as Box<dyn WindowHandle>)
            .collect())
    }

    fn open_terminal(&self, pid: Pid) -> Result<TerminalBinding, ResizeError> {
        let console = AttachedConsole::attach(pid)?;
        Ok(TerminalBinding::Console(Box::new(console)))
    }
}

unsafe extern "system" fn collect_visible(hwnd: HWND, lparam: LPARAM) -> BOOL {
    // SAFETY: lparam is the `Vec<HWND>` passed by `enumerate_windows`.
    let hwnds = unsafe { &mut *(lparam as *mut Vec<HWND>) };
    if unsafe { IsWindowVisible(hwnd) } != 0 {
        hwnds.push(hwnd);
    }
    TRUE
}

fn last_error() -> u32 {
    // SAFETY: no preconditions.
    unsafe { GetLastError() }
}

#[derive(Debug)]
struct Win32Window {
    hwnd: HWND,
}

impl Win32Window {
    fn failed(&self, operation: &'static str) -> WindowError {
        WindowError::OperationFailed {
            operation,
            window_id: self.hwnd as usize as u64,
            message: format!("error {}", last_error()),
        }
    }

    fn rect(&self, operation: &'static str, client: bool) -> Result<PixelSize, WindowError> {
        let mut rect = RECT {
            left: 0,
            top: 0,
            right: 0,
            bottom: 0,
        };
        // SAFETY: `rect` is a valid out pointer for the duration of the call.
        let ok = unsafe {
            if client {
                GetClientRect(self.hwnd, &mut rect)
            } else {
                GetWindowRect(self.hwnd, &mut rect)
            }
        };
        if ok == 0 {
            return Err(self.failed(operation));
        }
        Ok(PixelSize::new(rect.right - rect.left, rect.bottom - rect.top))
    }
}

impl WindowHandle for Win32Window {
    fn id(&self) -> u64 {
        self.hwnd as usize as u64
    }

    fn title(&self) -> Option<String> {
        let mut buffer = [0u16; 512];
        // SAFETY: the buffer length passed matches the buffer.
        let len = unsafe { GetWindowTextW(self.hwnd, buffer.as_mut_ptr(), buffer.len() as i32) };
        (len > 0).then(|| String::from_utf16_lossy(&buffer[..len as usize]))
    }

    fn owning_process(&self) -> Result<Pid, WindowError> {
        let mut pid: u32 = 0;
        // SAFETY: `pid` is a valid out pointer.
        let thread = unsafe { GetWindowThreadProcessId(self.hwnd, &mut pid) };
        if thread == 0 || pid == 0 {
            return Err(WindowError::OwnerQueryFailed {
                window_id: self.id(),
                message: format!("GetWindowThreadProcessId failed (error {})", last_error()),
            });
        }
        Ok(Pid::from_raw(pid))
    }

    fn client_frame(&self) -> Result<PixelSize, WindowError> {
        self.rect("GetClientRect", true)
    }

    fn outer_size(&self) -> Result<PixelSize, WindowError> {
        self.rect("GetWindowRect", false)
    }

    fn hide(&self) -> Result<(), WindowError> {
        // ShowWindow returns the previous visibility, not success.
        // SAFETY: hwnd came from EnumWindows; a stale handle makes this a no-op.
        unsafe { ShowWindow(self.hwnd, SW_HIDE) };
        Ok(())
    }

    fn set_position_and_size(&self, x: i32, y: i32, size: PixelSize) -> Result<(), WindowError> {
        // SAFETY: plain Win32 call on a window handle; no pointers passed.
        let ok = unsafe {
            SetWindowPos(
                self.hwnd,
                ptr::null_mut(),
                x,
                y,
                size.width,
                size.height,
                SWP_NOACTIVATE | SWP_NOREDRAW | SWP_NOZORDER,
            )
        };
        if ok == 0 {
            return Err(self.failed("SetWindowPos"));
        }
        Ok(())
    }
}

/// The target process's console, attached to this process for the
/// session's lifetime. Dropping it closes the handle and detaches.
#[derive(Debug)]
struct AttachedConsole {
    pid: Pid,
    output: HANDLE,
}

impl AttachedConsole {
    fn attach(pid: Pid) -> Result<Self, ResizeError> {
        let open_failed = |message: String| ResizeError::TerminalOpenFailed {
            pid: pid.as_u32(),
            message,
        };

        // A process can be attached to at most one console.
        // SAFETY: no preconditions.
        unsafe { FreeConsole() };
        // SAFETY: no preconditions.
        if unsafe { AttachConsole(pid.as_u32()) } == 0 {
            return Err(open_failed(format!(
                "AttachConsole failed (error {})",
                last_error()
            )));
        }

        let name: Vec<u16> = "CONOUT$\0".encode_utf16().collect();
        // SAFETY: `name` is NUL-terminated and outlives the call.
        let output = unsafe {
            CreateFileW(
                name.as_ptr(),
                GENERIC_READ | GENERIC_WRITE,
                FILE_SHARE_READ | FILE_SHARE_WRITE,
                ptr::null(),
                OPEN_EXISTING,
                0,
                ptr::null_mut(),
            )
        };
        if output == INVALID_HANDLE_VALUE {
            let error = last_error();
            // SAFETY: no preconditions.
            unsafe { FreeConsole() };
            return Err(open_failed(format!("CreateFileW(CONOUT$) failed (error {})", error)));
        }

        debug!(event = "core.platform.console_attached", pid = pid.as_u32());
        Ok(Self { pid, output })
    }
}

fn to_coord(grid: CharacterGrid) -> Result<COORD, ResizeError> {
    let convert = |value: u16| {
        i16::try_from(value).map_err(|_| {
            ResizeError::primitive("COORD", format!("{} exceeds console limits", grid))
        })
    };
    Ok(COORD {
        X: convert(grid.columns())?,
        Y: convert(grid.rows())?,
    })
}

impl ConsoleBuffer for AttachedConsole {
    fn view_grid(&self) -> Result<CharacterGrid, ResizeError> {
        // SAFETY: all-zero is a valid CONSOLE_SCREEN_BUFFER_INFO.
        let mut info: CONSOLE_SCREEN_BUFFER_INFO = unsafe { std::mem::zeroed() };
        // SAFETY: `info` is a valid out pointer; the handle is open.
        if unsafe { GetConsoleScreenBufferInfo(self.output, &mut info) } == 0 {
            return Err(ResizeError::primitive(
                "GetConsoleScreenBufferInfo",
                format!("error {}", last_error()),
            ));
        }
        let window = info.srWindow;
        let columns = (window.Right - window.Left + 1).max(0) as u16;
        let rows = (window.Bottom - window.Top + 1).max(0) as u16;
        CharacterGrid::new(columns, rows)
            .map_err(|e| ResizeError::primitive("GetConsoleScreenBufferInfo", e))
    }

    fn set_view_rect(&mut self, view: CharacterGrid) -> Result<(), ResizeError> {
        let coord = to_coord(view)?;
        let rect = SMALL_RECT {
            Left: 0,
            Top: 0,
            Right: coord.X - 1,
            Bottom: coord.Y - 1,
        };
        // SAFETY: `rect` is valid for the call; the handle is open.
        if unsafe { SetConsoleWindowInfo(self.output, TRUE, &rect) } == 0 {
            return Err(ResizeError::primitive(
                "SetConsoleWindowInfo",
                format!("error {}", last_error()),
            ));
        }
        Ok(())
    }

    fn set_buffer_size(&mut self, size: CharacterGrid) -> Result<(), ResizeError> {
        let coord = to_coord(size)?;
        // SAFETY: the handle is open.
        if unsafe { SetConsoleScreenBufferSize(self.output, coord) } == 0 {
            return Err(ResizeError::primitive(
                "SetConsoleScreenBufferSize",
                format!("error {}", last_error()),
            ));
        }
        Ok(())
    }
}

impl Drop for AttachedConsole {
    fn drop(&mut self) {
        // SAFETY: the handle was opened by `attach` and is closed once here.
        if unsafe { CloseHandle(self.output) } == 0 {
            warn!(
                event = "core.platform.console_close_failed",
                pid = self.pid.as_u32(),
                error = last_error()
            );
        }
        // SAFETY: no preconditions.
        unsafe { FreeConsole() };
        debug!(event = "core.platform.console_detached", pid = self.pid.as_u32());
    }
}
