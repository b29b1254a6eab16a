//! macOS backend.
//!
//! Windows come from Core Graphics (via xcap) and are hidden through the
//! Accessibility API, falling back to System Events. The terminal is the
//! controlling tty of the target process as reported by `ps`.

use std::ffi::c_void;
use std::path::PathBuf;
use std::process::Command;
use std::ptr;

use accessibility_sys::{
    AXError, AXUIElementCopyAttributeValue, AXUIElementCreateApplication, AXUIElementRef,
    AXUIElementSetAttributeValue, AXUIElementSetMessagingTimeout, kAXErrorSuccess,
    kAXMinimizedAttribute, kAXTitleAttribute, kAXWindowsAttribute,
};
use core_foundation::array::CFArray;
use core_foundation::base::{CFType, TCFType};
use core_foundation::boolean::CFBoolean;
use core_foundation::string::CFString;
use tracing::{debug, warn};

use super::traits::Platform;
use super::tty::TtyDevice;
use crate::geometry::PixelSize;
use crate::process::Pid;
use crate::resize::{ResizeError, TerminalBinding};
use crate::window::{WindowError, WindowHandle};

/// Timeout for AX messaging (seconds)
const AX_MESSAGING_TIMEOUT: f32 = 1.0;

#[derive(Debug, Default)]
pub struct MacPlatform;

impl Platform for MacPlatform {
    fn name(&self) -> &'static str {
        "macos"
    }

    fn enumerate_windows(&self) -> Result<Vec<Box<dyn WindowHandle>>, WindowError> {
        let windows = xcap::Window::all().map_err(|e| WindowError::EnumerationFailed {
            message: format!("Failed to enumerate windows via Core Graphics: {}", e),
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

            handles.push(Box::new(MacWindow {
                id,
                pid: w.pid().ok(),
                title: w.title().unwrap_or_default(),
                app_name: w.app_name().unwrap_or_default(),
                size: match (w.width(), w.height()) {
                    (Ok(width), Ok(height)) => Some(PixelSize::new(
                        i32::try_from(width).unwrap_or(i32::MAX),
                        i32::try_from(height).unwrap_or(i32::MAX),
                    )),
                    _ => None,
                },
            }));
        }

        debug!(
            event = "core.platform.windows_enumerated",
            platform = "macos",
            count = handles.len()
        );
        Ok(handles)
    }

    fn open_terminal(&self, pid: Pid) -> Result<TerminalBinding, ResizeError> {
        let open_failed = |message: String| ResizeError::TerminalOpenFailed {
            pid: pid.as_u32(),
            message,
        };

        let output = Command::new("ps")
            .args(["-o", "tty=", "-p", &pid.to_string()])
            .output()
            .map_err(|e| open_failed(format!("Failed to run ps: {}", e)))?;

        let path = controlling_tty_path(&String::from_utf8_lossy(&output.stdout))
            .ok_or_else(|| open_failed("process has no controlling terminal".to_string()))?;

        let device =
            TtyDevice::open(&path).map_err(|e| open_failed(format!("{}: {}", path.display(), e)))?;
        Ok(TerminalBinding::PseudoTerminal(Box::new(device)))
    }
}

/// Map `ps -o tty=` output to a device path. `??` means no terminal.
fn controlling_tty_path(ps_output: &str) -> Option<PathBuf> {
    let name = ps_output.trim();
    if name.is_empty() || name.starts_with('?') {
        return None;
    }
    Some(PathBuf::from("/dev").join(name))
}

/// A window captured at enumeration time.
#[derive(Debug, Clone)]
struct MacWindow {
    id: u32,
    pid: Option<u32>,
    title: String,
    app_name: String,
    size: Option<PixelSize>,
}

impl MacWindow {
    fn bounds(&self) -> Result<PixelSize, WindowError> {
        self.size.ok_or_else(|| WindowError::OperationFailed {
            operation: "window_bounds",
            window_id: self.id.into(),
            message: "Core Graphics did not report window bounds".to_string(),
        })
    }
}

impl WindowHandle for MacWindow {
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
                message: "Core Graphics did not report an owner PID".to_string(),
            })
    }

    // Core Graphics reports the full frame only.
    fn client_frame(&self) -> Result<PixelSize, WindowError> {
        self.bounds()
    }

    fn outer_size(&self) -> Result<PixelSize, WindowError> {
        self.bounds()
    }

    fn hide(&self) -> Result<(), WindowError> {
        let pid = self.owning_process()?;
        let ax_pid = i32::try_from(pid.as_u32()).map_err(|e| WindowError::OperationFailed {
            operation: "hide",
            window_id: self.id.into(),
            message: format!("PID {} out of range for the Accessibility API: {}", pid, e),
        })?;

        match ax_minimize_window(ax_pid, &self.title) {
            Ok(()) => {
                debug!(
                    event = "core.platform.minimize_ax_succeeded",
                    window_id = self.id,
                    pid = ax_pid
                );
                return Ok(());
            }
            Err(e) => {
                warn!(
                    event = "core.platform.minimize_ax_failed_fallback",
                    window_id = self.id,
                    pid = ax_pid,
                    error = %e,
                    message = "Accessibility API failed, hiding every window of the app via System Events"
                );
            }
        }

        hide_app_via_system_events(&self.app_name).map_err(|message| {
            WindowError::OperationFailed {
                operation: "hide",
                window_id: self.id.into(),
                message,
            }
        })
    }

    fn set_position_and_size(&self, _x: i32, _y: i32, _size: PixelSize) -> Result<(), WindowError> {
        Err(WindowError::Unsupported {
            operation: "set_position_and_size",
            platform: "macos",
        })
    }
}

/// Minimize a window via the Accessibility API by matching its title.
fn ax_minimize_window(pid: i32, title: &str) -> Result<(), String> {
    // SAFETY: AXUIElementCreateApplication creates a +1 retained AXUIElementRef.
    let app_element = unsafe { AXUIElementCreateApplication(pid) };
    if app_element.is_null() {
        return Err(format!("Failed to create AX element for PID {}", pid));
    }

    // SAFETY: app_element is a valid AXUIElementRef we just created.
    unsafe {
        AXUIElementSetMessagingTimeout(app_element, AX_MESSAGING_TIMEOUT);
    }

    let result = ax_minimize_matching(app_element, title);

    // SAFETY: Release the app element (Create Rule, we own it).
    unsafe {
        core_foundation::base::CFRelease(app_element as *mut c_void);
    }

    result
}

/// Find the first AX window whose title contains `title` and minimize it.
/// An empty title matches the app's first window.
fn ax_minimize_matching(app_element: AXUIElementRef, title: &str) -> Result<(), String> {
    let cf_windows_attr = CFString::new(kAXWindowsAttribute);
    let mut windows_value: core_foundation::base::CFTypeRef = ptr::null();

    // SAFETY: Standard AXUIElementCopyAttributeValue call (Copy Rule: +1 retained ref).
    let result = unsafe {
        AXUIElementCopyAttributeValue(
            app_element,
            cf_windows_attr.as_concrete_TypeRef(),
            &mut windows_value,
        )
    };

    if result != kAXErrorSuccess || windows_value.is_null() {
        return Err(format!(
            "Failed to get windows attribute (AXError: {})",
            result
        ));
    }

    // SAFETY: windows_value is a +1 retained CFArrayRef; the wrapper releases it.
    let cf_array: CFArray<CFType> = unsafe {
        CFArray::wrap_under_create_rule(windows_value as core_foundation::array::CFArrayRef)
    };

    let title_lower = title.to_lowercase();
    let window_count = cf_array.len();

    for i in 0..window_count {
        let Some(item) = cf_array.get(i) else {
            continue;
        };
        let window_element = item.as_CFTypeRef() as AXUIElementRef;

        let matches = title_lower.is_empty()
            || ax_get_string_attribute(window_element, kAXTitleAttribute)
                .is_some_and(|t| t.to_lowercase().contains(&title_lower));
        if matches {
            return ax_set_minimized(window_element);
        }
    }

    Err(format!(
        "No AX window found matching title '{}' (checked {} AX windows)",
        title, window_count
    ))
}

fn ax_set_minimized(window_element: AXUIElementRef) -> Result<(), String> {
    let cf_attr = CFString::new(kAXMinimizedAttribute);
    let cf_value = CFBoolean::true_value();

    // SAFETY: Setting attribute value on a valid window element.
    let result = unsafe {
        AXUIElementSetAttributeValue(
            window_element,
            cf_attr.as_concrete_TypeRef(),
            cf_value.as_CFTypeRef(),
        )
    };

    if result != kAXErrorSuccess {
        return Err(format!("Failed to minimize window (AXError: {})", result));
    }

    Ok(())
}

fn ax_get_string_attribute(element: AXUIElementRef, attribute: &str) -> Option<String> {
    let cf_attr = CFString::new(attribute);
    let mut value: core_foundation::base::CFTypeRef = ptr::null();

    // SAFETY: Standard AXUIElementCopyAttributeValue (Copy Rule: +1 retained on success).
    let result = unsafe {
        AXUIElementCopyAttributeValue(element, cf_attr.as_concrete_TypeRef(), &mut value)
    };

    if result != kAXErrorSuccess as AXError || value.is_null() {
        return None;
    }

    // SAFETY: value is a +1 retained CFTypeRef. wrap_under_create_rule takes ownership.
    let cf_type: CFType = unsafe { TCFType::wrap_under_create_rule(value) };

    cf_type.downcast::<CFString>().map(|s| s.to_string())
}

/// Hide an application via System Events (hides all of its windows).
fn hide_app_via_system_events(app_name: &str) -> Result<(), String> {
    if app_name.is_empty() {
        return Err("Cannot hide via System Events: app name unknown".to_string());
    }

    let script = format!(
        r#"tell application "System Events" to set visible of process "{}" to false"#,
        app_name
    );

    match Command::new("osascript").arg("-e").arg(&script).output() {
        Ok(output) if output.status.success() => Ok(()),
        Ok(output) => {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            let hint = if stderr.contains("not allowed") || stderr.contains("permission") {
                " (check System Settings > Privacy & Security > Automation)"
            } else {
                ""
            };
            Err(format!(
                "Failed to hide {} via System Events: {}{}",
                app_name, stderr, hint
            ))
        }
        Err(e) => Err(format!("Failed to run osascript for {}: {}", app_name, e)),
    }
}
