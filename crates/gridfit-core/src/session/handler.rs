use tracing::{debug, error, info, warn};

use crate::config::SessionConfig;
use crate::geometry::{
    CharacterGrid, ConsoleGeometrySnapshot, Regime, TargetOSDimensions, translate,
};
use crate::platform::Platform;
use crate::process::{Pid, ProcessError, ProcessTree};
use crate::resize::{self, ConsoleBuffer, ResizeError, ResizeOutcome, TerminalBinding};
use crate::session::types::SessionState;
use crate::window::{self, WindowHandle};

/// The located window and the terminal opened for it.
struct Target {
    window: Box<dyn WindowHandle>,
    /// The open error is kept and returned for every request.
    terminal: Result<TerminalBinding, ResizeError>,
}

/// Long-lived resize context for one target process.
///
/// Locates the window once, holds the terminal open, and applies a stream
/// of requested grids one at a time. Resources are released on `close` or
/// drop.
pub struct ResizeSession {
    pid: Pid,
    tree: ProcessTree,
    target: Option<Target>,
    state: SessionState,
    config: SessionConfig,
    last_dimensions: Option<TargetOSDimensions>,
}

/// The process tree of a target and the window it owns, if any.
pub struct LocatedTarget {
    pub tree: ProcessTree,
    /// Member of `tree` that owns `window`.
    pub owner: Option<Pid>,
    pub window: Option<Box<dyn WindowHandle>>,
}

/// Compute the process tree of `pid` and find its window.
///
/// Read-only: nothing is hidden or opened. Fails only when `pid` is not
/// running; a failed descendant walk falls back to the root process alone.
pub fn locate_target(
    platform: &dyn Platform,
    pid: Pid,
    match_descendants: bool,
) -> Result<LocatedTarget, ProcessError> {
    if !platform.is_process_running(pid)? {
        error!(
            event = "core.session.locate_failed",
            pid = pid.as_u32(),
            reason = "not_running"
        );
        return Err(ProcessError::NotFound { pid: pid.as_u32() });
    }

    let mut tree = ProcessTree::root_only(pid);
    if match_descendants {
        match platform.descendant_processes(pid) {
            Ok(descendants) => tree = ProcessTree::new(pid, descendants),
            Err(e) => warn!(
                event = "core.session.descendants_failed",
                pid = pid.as_u32(),
                error = %e
            ),
        }
    }

    let (owner, window) = window::locate(&tree, platform.enumerate_windows()).unzip();
    Ok(LocatedTarget {
        tree,
        owner,
        window,
    })
}

/// Start a session for `pid`.
///
/// Computes the process tree, locates the window and, when one is found,
/// hides it once and opens the terminal. A missing window is not an error:
/// the session is ready and reports `NoWindow` for every request.
pub fn create_session(
    platform: &dyn Platform,
    pid: Pid,
    config: SessionConfig,
) -> Result<ResizeSession, ProcessError> {
    info!(
        event = "core.session.create_started",
        pid = pid.as_u32(),
        platform = platform.name()
    );

    let mut session = ResizeSession {
        pid,
        tree: ProcessTree::root_only(pid),
        target: None,
        state: SessionState::Uninitialized,
        config,
        last_dimensions: None,
    };

    let located = locate_target(platform, pid, config.match_descendants)?;
    session.tree = located.tree;
    session.state = SessionState::Located;

    if let Some(window) = located.window {
        // The window may belong to a descendant; its terminal is the one to resize.
        let owner = located.owner.unwrap_or(pid);

        if config.hide_before_resize
            && let Err(e) = window.hide()
        {
            warn!(
                event = "core.session.hide_failed",
                pid = pid.as_u32(),
                window_id = window.id(),
                error = %e
            );
        }

        let terminal = platform.open_terminal(owner);
        match &terminal {
            Ok(binding) => debug!(
                event = "core.session.terminal_opened",
                pid = pid.as_u32(),
                owner = owner.as_u32(),
                kind = binding.kind()
            ),
            Err(e) => warn!(
                event = "core.session.terminal_open_failed",
                pid = pid.as_u32(),
                owner = owner.as_u32(),
                error = %e
            ),
        }
        session.target = Some(Target { window, terminal });
    }

    session.state = SessionState::Ready;
    info!(
        event = "core.session.create_completed",
        pid = pid.as_u32(),
        tree_size = session.tree.len(),
        has_window = session.target.is_some()
    );
    Ok(session)
}

impl ResizeSession {
    pub fn pid(&self) -> Pid {
        self.pid
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn tree(&self) -> &ProcessTree {
        &self.tree
    }

    pub fn window(&self) -> Option<&dyn WindowHandle> {
        self.target.as_ref().map(|t| t.window.as_ref())
    }

    pub fn config(&self) -> SessionConfig {
        self.config
    }

    /// Dimensions computed for the most recent request that reached translation.
    pub fn last_dimensions(&self) -> Option<&TargetOSDimensions> {
        self.last_dimensions.as_ref()
    }

    /// Apply one requested grid.
    ///
    /// A failed request leaves the session ready for the next one.
    pub fn apply(&mut self, requested: CharacterGrid) -> Result<ResizeOutcome, ResizeError> {
        if self.state == SessionState::Closed {
            return Err(ResizeError::SessionClosed {
                pid: self.pid.as_u32(),
            });
        }

        let Some(target) = self.target.as_mut() else {
            debug!(
                event = "core.session.apply_skipped",
                pid = self.pid.as_u32(),
                reason = "no_window"
            );
            return Ok(ResizeOutcome::NoWindow);
        };

        let binding = match &mut target.terminal {
            Ok(binding) => binding,
            Err(e) => return Err(e.clone()),
        };

        info!(
            event = "core.session.apply_started",
            pid = self.pid.as_u32(),
            requested = %requested
        );
        self.state = SessionState::Resizing;

        let result = match &*binding {
            TerminalBinding::Console(console) => {
                capture_snapshot(self.pid, target.window.as_ref(), &**console).map(
                    |snapshot| {
                        translate(
                            requested,
                            Regime::WindowedConsole(&snapshot),
                            self.config.rounding,
                        )
                    },
                )
            }
            TerminalBinding::PseudoTerminal(_) => Ok(translate(
                requested,
                Regime::PseudoTerminal,
                self.config.rounding,
            )),
        }
        .and_then(|dims| {
            let outcome = resize::execute(self.pid, Some(target.window.as_ref()), binding, &dims);
            self.last_dimensions = Some(dims);
            outcome
        });

        self.state = SessionState::Ready;

        match &result {
            Ok(outcome) => info!(
                event = "core.session.apply_completed",
                pid = self.pid.as_u32(),
                requested = %requested,
                outcome = %outcome
            ),
            Err(e) => error!(
                event = "core.session.apply_failed",
                pid = self.pid.as_u32(),
                requested = %requested,
                error = %e
            ),
        }
        result
    }

    /// Release the window and terminal. Calling it again does nothing.
    pub fn close(&mut self) {
        if self.state == SessionState::Closed {
            return;
        }
        self.target = None;
        self.state = SessionState::Closed;
        info!(event = "core.session.closed", pid = self.pid.as_u32());
    }
}

impl Drop for ResizeSession {
    fn drop(&mut self) {
        self.close();
    }
}

impl std::fmt::Debug for ResizeSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResizeSession")
            .field("pid", &self.pid)
            .field("state", &self.state)
            .field("tree", &self.tree)
            .field("window", &self.window())
            .finish_non_exhaustive()
    }
}

/// Read the current view grid and window sizes in one pass.
fn capture_snapshot(
    pid: Pid,
    window: &dyn WindowHandle,
    console: &dyn ConsoleBuffer,
) -> Result<ConsoleGeometrySnapshot, ResizeError> {
    let failed = |message: String| ResizeError::SnapshotFailed {
        pid: pid.as_u32(),
        message,
    };

    let grid = console.view_grid().map_err(|e| failed(e.to_string()))?;
    let client = window.client_frame().map_err(|e| failed(e.to_string()))?;
    let outer = window.outer_size().map_err(|e| failed(e.to_string()))?;
    Ok(ConsoleGeometrySnapshot::new(grid, client, outer))
}
