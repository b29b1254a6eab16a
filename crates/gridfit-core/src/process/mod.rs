pub mod errors;
pub mod operations;
pub mod types;

pub use errors::ProcessError;
pub use operations::{descendant_processes, is_process_running};
pub use types::{Pid, ProcessTree};
