pub mod errors;
pub mod executor;
pub mod plan;
pub mod traits;
pub mod types;

pub use errors::ResizeError;
pub use executor::execute;
pub use plan::{AxisDirection, AxisStep, plan_console_steps};
pub use traits::{ConsoleBuffer, PseudoTerminal};
pub use types::{ResizeOutcome, ResizeStep, SET_TERMINAL_SIZE, TerminalBinding};
