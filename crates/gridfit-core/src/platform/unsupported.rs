//! Fallback for operating systems without a window backend.

use super::traits::Platform;
use crate::process::Pid;
use crate::resize::{ResizeError, TerminalBinding};
use crate::window::{WindowError, WindowHandle};

#[derive(Debug, Default)]
pub struct UnsupportedPlatform;

impl Platform for UnsupportedPlatform {
    fn name(&self) -> &'static str {
        std::env::consts::OS
    }

    /// No windows can be found, so every session resolves to no window.
    fn enumerate_windows(&self) -> Result<Vec<Box<dyn WindowHandle>>, WindowError> {
        Ok(Vec::new())
    }

    fn open_terminal(&self, pid: Pid) -> Result<TerminalBinding, ResizeError> {
        Err(ResizeError::TerminalOpenFailed {
            pid: pid.as_u32(),
            message: format!("terminals are not supported on {}", std::env::consts::OS),
        })
    }
}
