//! Linux backend.
//!
//! Windows are enumerated through xcap (X11 client list with `_NET_WM_PID`)
//! and manipulated with `xdotool`. The terminal is the window owner's stdin
//! tty, reached through `/proc`.

use std::path::PathBuf;
use std::process::Command;

use tracing::{debug, warn};

use super::traits::Platform;
use super::tty::TtyDevice;
use crate::geometry::PixelSize;
use crate::process::Pid;
use crate::resize::{ResizeError, TerminalBinding};
use crate::window::{WindowError, WindowHandle};

const XDOTOOL: &str = "xdotool";

#[derive(Debug, Default)]
pub struct LinuxPlatform;

impl Platform for LinuxPlatform {
    fn name(&self) -> &'static str {
        "linux"
    }

    fn enumerate_windows(&self) -> Result<Vec<Box<dyn WindowHandle>>, WindowError> {
        let windows = xcap::Window::all().map_err(|e| WindowError::EnumerationFailed {
            message: format!("Failed to enumerate X11 windows: {}", e),
        })?;

        let mut handles: Vec<Box<dyn WindowHandle>> = Vec::with_capacity(windows.len());
        for w in windows {
            let id = match w.id() {
                Ok(id) => id,
                Err(e) => {
                    debug!(
                        event = "core.platform.window_skipped",
                        reason = "id_unavailable",
                        error = %e
                    );
                    continue;
                }
            };

            handles.push(Box::new(X11Window {
                id,
                // 0 means the client does not set _NET_WM_PID
                pid: w.pid().ok().filter(|&pid| pid != 0),
                title: w.title().unwrap_or_default(),
                size: match (w.width(), w.height()) {
                    (Ok(width), Ok(height)) => Some(pixel_size(width, height)),
                    _ => None,
                },
            }));
        }

        debug!(
            event = "core.platform.windows_enumerated",
            platform = "linux",
            count = handles.len()
        );
        Ok(handles)
    }

    fn open_terminal(&self, pid: Pid) -> Result<TerminalBinding, ResizeError> {
        let path = stdin_path(pid);
        let device = TtyDevice::open(&path).map_err(|e| ResizeError::TerminalOpenFailed {
            pid: pid.as_u32(),
            message: format!("{}: {}", path.display(), e),
        })?;
        Ok(TerminalBinding::PseudoTerminal(Box::new(device)))
    }
}

fn stdin_path(pid: Pid) -> PathBuf {
    PathBuf::from(format!("/proc/{}/fd/0", pid.as_u32()))
}

fn pixel_size(width: u32, height: u32) -> PixelSize {
    PixelSize::new(
        i32::try_from(width).unwrap_or(i32::MAX),
        i32::try_from(height).unwrap_or(i32::MAX),
    )
}

/// An X11 client window captured at enumeration time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct X11Window {
    id: u32,
    pid: Option<u32>,
    title: String,
    size: Option<PixelSize>,
}

fn run_tool(tool: &'static str, args: &[&str]) -> Result<String, WindowError> {
    if which::which(tool).is_err() {
        return Err(WindowError::ToolNotFound {
            tool: tool.to_string(),
        });
    }

    let output = Command::new(tool)
        .args(args)
        .output()
        .map_err(|e| WindowError::OperationFailed {
            operation: tool,
            window_id: 0,
            message: e.to_string(),
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        warn!(
            event = "core.platform.tool_failed",
            tool = tool,
            args = ?args,
            stderr = %stderr
        );
        return Err(WindowError::OperationFailed {
            operation: tool,
            window_id: 0,
            message: format!("{} exited with {}: {}", tool, output.status, stderr),
        });
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

impl X11Window {
    fn xdotool(&self, operation: &'static str, args: &[&str]) -> Result<(), WindowError> {
        run_tool(XDOTOOL, args)
            .map(|_| ())
            .map_err(|e| match e {
                WindowError::OperationFailed { message, .. } => WindowError::OperationFailed {
                    operation,
                    window_id: self.id.into(),
                    message,
                },
                other => other,
            })
    }

    /// The window manager's frame is not reported, so client and outer
    /// sizes are the same.
    fn bounds(&self) -> Result<PixelSize, WindowError> {
        self.size.ok_or_else(|| WindowError::OperationFailed {
            operation: "window_bounds",
            window_id: self.id.into(),
            message: "X server did not report window geometry".to_string(),
        })
    }
}

impl WindowHandle for X11Window {
    fn id(&self) -> u64 {
        self.id.into()
    }

    fn title(&self) -> Option<String> {
        (!self.title.is_empty()).then(|| self.title.clone())
    }

    fn owning_process(&self) -> Result<Pid, WindowError> {
        self.pid
            .map(Pid::from_raw)
            .ok_or_else(|| WindowError::OwnerQueryFailed {
                window_id: self.id.into(),
                message: "window does not set _NET_WM_PID".to_string(),
            })
    }

    fn client_frame(&self) -> Result<PixelSize, WindowError> {
        self.bounds()
    }

    fn outer_size(&self) -> Result<PixelSize, WindowError> {
        self.bounds()
    }

    fn hide(&self) -> Result<(), WindowError> {
        let id = self.id.to_string();
        self.xdotool("windowminimize", &["windowminimize", &id])
    }

    fn set_position_and_size(&self, x: i32, y: i32, size: PixelSize) -> Result<(), WindowError> {
        let id = self.id.to_string();
        self.xdotool(
            "windowmove",
            &["windowmove", &id, &x.to_string(), &y.to_string()],
        )?;
        self.xdotool(
            "windowsize",
            &[
                "windowsize",
                &id,
                &size.width.to_string(),
                &size.height.to_string(),
            ],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn window(pid: Option<u32>, size: Option<PixelSize>) -> X11Window {
        X11Window {
            id: 0x03a0_0007,
            pid,
            title: "vim - notes.txt".to_string(),
            size,
        }
    }

    #[test]
    fn test_window_reports_owner_and_title() {
        let window = window(Some(12345), None);
        assert_eq!(window.id(), 0x03a0_0007);
        assert_eq!(window.title().as_deref(), Some("vim - notes.txt"));
        assert_eq!(window.owning_process().unwrap(), Pid::from_raw(12345));
    }

    #[test]
    fn test_window_without_pid() {
        let window = window(None, None);
        assert!(matches!(
            window.owning_process(),
            Err(WindowError::OwnerQueryFailed {
                window_id: 0x03a0_0007,
                ..
            })
        ));
    }

    #[test]
    fn test_empty_title_is_none() {
        let window = X11Window {
            title: String::new(),
            ..window(Some(1), None)
        };
        assert_eq!(window.title(), None);
    }

    #[test]
    fn test_bounds_from_snapshot() {
        let window = window(Some(1), Some(PixelSize::new(660, 410)));
        assert_eq!(window.client_frame().unwrap(), PixelSize::new(660, 410));
        assert_eq!(window.outer_size().unwrap(), PixelSize::new(660, 410));
    }

    #[test]
    fn test_missing_bounds_fail() {
        let window = window(Some(1), None);
        assert!(matches!(
            window.client_frame(),
            Err(WindowError::OperationFailed {
                operation: "window_bounds",
                ..
            })
        ));
    }

    #[test]
    fn test_pixel_size_saturates() {
        assert_eq!(pixel_size(800, 600), PixelSize::new(800, 600));
        assert_eq!(pixel_size(u32::MAX, 1), PixelSize::new(i32::MAX, 1));
    }

    #[test]
    fn test_stdin_path() {
        assert_eq!(
            stdin_path(Pid::from_raw(4242)),
            PathBuf::from("/proc/4242/fd/0")
        );
    }

    #[test]
    fn test_open_terminal_for_missing_process_fails() {
        let result = LinuxPlatform.open_terminal(Pid::from_raw(999_999_999));
        assert!(matches!(
            result,
            Err(ResizeError::TerminalOpenFailed {
                pid: 999_999_999,
                ..
            })
        ));
    }
}
