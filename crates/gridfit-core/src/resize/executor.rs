use tracing::{debug, info, warn};

use crate::geometry::TargetOSDimensions;
use crate::process::Pid;
use crate::resize::errors::ResizeError;
use crate::resize::plan::plan_console_steps;
use crate::resize::traits::{ConsoleBuffer, PseudoTerminal};
use crate::resize::types::{ResizeOutcome, ResizeStep, SET_TERMINAL_SIZE, TerminalBinding};
use crate::window::WindowHandle;

/// Apply translated dimensions to a window and its terminal.
///
/// Windowed consoles run the planned step sequence and keep going past
/// failed steps; pseudo-terminals have a single step whose failure is
/// returned as an error.
pub fn execute(
    pid: Pid,
    window: Option<&dyn WindowHandle>,
    binding: &mut TerminalBinding,
    dims: &TargetOSDimensions,
) -> Result<ResizeOutcome, ResizeError> {
    let Some(window) = window else {
        debug!(event = "core.resize.no_window", pid = pid.as_u32());
        return Ok(ResizeOutcome::NoWindow);
    };

    match (dims, binding) {
        (
            TargetOSDimensions::WindowedConsole {
                window_pixels,
                previous,
                requested,
            },
            TerminalBinding::Console(console),
        ) => {
            let steps = plan_console_steps(*window_pixels, *previous, *requested);
            Ok(run_console_steps(pid, window, console.as_mut(), &steps))
        }
        (
            TargetOSDimensions::PseudoTerminal { rows, columns },
            TerminalBinding::PseudoTerminal(pty),
        ) => resize_pseudo_terminal(pid, pty.as_mut(), *rows, *columns),
        (dims, binding) => Err(ResizeError::RegimeMismatch {
            dims: match dims {
                TargetOSDimensions::PseudoTerminal { .. } => "pseudo_terminal",
                TargetOSDimensions::WindowedConsole { .. } => "windowed_console",
            },
            binding: binding.kind(),
        }),
    }
}

/// Run every step, recording failures instead of stopping at them.
pub fn run_console_steps(
    pid: Pid,
    window: &dyn WindowHandle,
    console: &mut dyn ConsoleBuffer,
    steps: &[ResizeStep],
) -> ResizeOutcome {
    let mut failed: Vec<&'static str> = Vec::new();

    for step in steps {
        let result = match *step {
            ResizeStep::SetWindowPixels(size) => window
                .set_position_and_size(0, 0, size)
                .map_err(|e| e.to_string()),
            ResizeStep::SetViewRect(view) => {
                console.set_view_rect(view).map_err(|e| e.to_string())
            }
            ResizeStep::SetBufferSize(size) => {
                console.set_buffer_size(size).map_err(|e| e.to_string())
            }
        };

        match result {
            Ok(()) => debug!(
                event = "core.resize.step_applied",
                pid = pid.as_u32(),
                step = step.name(),
                detail = ?step
            ),
            Err(message) => {
                let error = ResizeError::StepFailed {
                    step: step.name(),
                    message,
                };
                warn!(
                    event = "core.resize.step_failed",
                    pid = pid.as_u32(),
                    step = step.name(),
                    error = %error
                );
                if !failed.contains(&step.name()) {
                    failed.push(step.name());
                }
            }
        }
    }

    let outcome = if failed.is_empty() {
        ResizeOutcome::Success
    } else {
        ResizeOutcome::PartiallyApplied(failed)
    };
    info!(
        event = "core.resize.console_completed",
        pid = pid.as_u32(),
        outcome = %outcome
    );
    outcome
}

fn resize_pseudo_terminal(
    pid: Pid,
    pty: &mut dyn PseudoTerminal,
    rows: u16,
    columns: u16,
) -> Result<ResizeOutcome, ResizeError> {
    match pty.set_size(rows, columns) {
        Ok(()) => {
            info!(
                event = "core.resize.terminal_completed",
                pid = pid.as_u32(),
                device = %pty.describe(),
                rows = rows,
                columns = columns
            );
            Ok(ResizeOutcome::Success)
        }
        Err(e) => {
            warn!(
                event = "core.resize.terminal_failed",
                pid = pid.as_u32(),
                step = SET_TERMINAL_SIZE,
                device = %pty.describe(),
                error = %e
            );
            Err(ResizeError::TerminalResizeFailed {
                pid: pid.as_u32(),
                message: e.to_string(),
            })
        }
    }
}
