use std::collections::HashSet;

use crate::process::{self, Pid, ProcessError};
use crate::resize::{ResizeError, TerminalBinding};
use crate::window::{WindowError, WindowHandle};

/// Per-OS capability set used by a resize session.
///
/// One implementation exists per supported operating system; the session
/// only talks to the OS through this trait.
pub trait Platform {
    /// Short platform name for logs and messages.
    fn name(&self) -> &'static str;

    /// All top-level windows, in platform enumeration order.
    fn enumerate_windows(&self) -> Result<Vec<Box<dyn WindowHandle>>, WindowError>;

    /// Open the terminal of `pid` for repeated resizing.
    fn open_terminal(&self, pid: Pid) -> Result<TerminalBinding, ResizeError>;

    fn is_process_running(&self, pid: Pid) -> Result<bool, ProcessError> {
        process::is_process_running(pid)
    }

    fn descendant_processes(&self, pid: Pid) -> Result<HashSet<Pid>, ProcessError> {
        process::descendant_processes(pid)
    }
}
