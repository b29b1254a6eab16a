use serde::Serialize;

use crate::geometry::{CharacterGrid, PixelSize};
use crate::resize::traits::{ConsoleBuffer, PseudoTerminal};

/// Result of one resize request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "failed_steps", rename_all = "snake_case")]
pub enum ResizeOutcome {
    Success,
    /// Some steps failed; holds their distinct names in first-failure order.
    PartiallyApplied(Vec<&'static str>),
    /// The session has no window, nothing was touched.
    NoWindow,
}

impl ResizeOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, ResizeOutcome::Success)
    }
}

impl std::fmt::Display for ResizeOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResizeOutcome::Success => write!(f, "resized"),
            ResizeOutcome::PartiallyApplied(steps) => {
                write!(f, "partially resized (failed: {})", steps.join(", "))
            }
            ResizeOutcome::NoWindow => write!(f, "no window, nothing to resize"),
        }
    }
}

/// One OS operation in a windowed-console resize.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizeStep {
    /// Outer window frame, in pixels. Approximate, cosmetic.
    SetWindowPixels(PixelSize),
    /// Visible region of the console buffer.
    SetViewRect(CharacterGrid),
    /// Console screen buffer dimensions.
    SetBufferSize(CharacterGrid),
}

impl ResizeStep {
    pub fn name(&self) -> &'static str {
        match self {
            ResizeStep::SetWindowPixels(_) => "set_window_pixels",
            ResizeStep::SetViewRect(_) => "set_view_rect",
            ResizeStep::SetBufferSize(_) => "set_buffer_size",
        }
    }
}

/// Name of the single pseudo-terminal step.
pub const SET_TERMINAL_SIZE: &str = "set_terminal_size";

/// The terminal a session holds open for its whole lifetime.
pub enum TerminalBinding {
    Console(Box<dyn ConsoleBuffer>),
    PseudoTerminal(Box<dyn PseudoTerminal>),
}

impl TerminalBinding {
    pub fn kind(&self) -> &'static str {
        match self {
            TerminalBinding::Console(_) => "console",
            TerminalBinding::PseudoTerminal(_) => "pseudo_terminal",
        }
    }
}

impl std::fmt::Debug for TerminalBinding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TerminalBinding::Console(_) => f.write_str("TerminalBinding::Console"),
            TerminalBinding::PseudoTerminal(pty) => {
                write!(f, "TerminalBinding::PseudoTerminal({})", pty.describe())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_display() {
        assert_eq!(ResizeOutcome::Success.to_string(), "resized");
        assert_eq!(
            ResizeOutcome::PartiallyApplied(vec!["set_view_rect", "set_window_pixels"])
                .to_string(),
            "partially resized (failed: set_view_rect, set_window_pixels)"
        );
        assert!(ResizeOutcome::Success.is_success());
        assert!(!ResizeOutcome::NoWindow.is_success());
    }

    #[test]
    fn test_step_names() {
        let grid = CharacterGrid::new(80, 24).unwrap();
        assert_eq!(
            ResizeStep::SetWindowPixels(PixelSize::new(1, 1)).name(),
            "set_window_pixels"
        );
        assert_eq!(ResizeStep::SetViewRect(grid).name(), "set_view_rect");
        assert_eq!(ResizeStep::SetBufferSize(grid).name(), "set_buffer_size");
    }
}
