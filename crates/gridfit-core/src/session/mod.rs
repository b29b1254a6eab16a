pub mod handler;
pub mod types;

pub use handler::{LocatedTarget, ResizeSession, create_session, locate_target};
pub use types::SessionState;
