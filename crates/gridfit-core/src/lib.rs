//! gridfit-core: resize another process's terminal window to a character grid
//!
//! Given a process ID, a [`session`] finds the top-level window owned by that
//! process (or one of its descendants), keeps its terminal open, and applies
//! a stream of requested column/row counts to it.
//!
//! # Main Entry Points
//!
//! - [`session`] - Create a resize session and apply grids
//! - [`geometry`] - Translate grids into native dimensions
//! - [`resize`] - Step planning and execution against a terminal
//! - [`platform`] - Per-OS window and terminal backends
//! - [`config`] - Configuration management

pub mod config;
pub mod errors;
pub mod events;
pub mod geometry;
pub mod logging;
pub mod platform;
pub mod process;
pub mod resize;
pub mod session;
pub mod window;

#[cfg(test)]
mod test_support;

// Re-export commonly used types at crate root for convenience
pub use config::{GridfitConfig, SessionConfig};
pub use errors::GridfitError;
pub use geometry::{CharacterGrid, PixelSize, RoundingMode, TargetOSDimensions};
pub use platform::Platform;
pub use process::{Pid, ProcessTree};
pub use resize::{ResizeError, ResizeOutcome};
pub use session::{LocatedTarget, ResizeSession, SessionState, create_session, locate_target};
pub use window::WindowHandle;

// Re-export logging initialization
pub use logging::init_logging;
