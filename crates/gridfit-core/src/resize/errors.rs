use crate::errors::GridfitError;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResizeError {
    #[error("Resize step '{step}' failed: {message}")]
    StepFailed { step: &'static str, message: String },

    #[error("{primitive} failed: {message}")]
    PrimitiveFailed {
        primitive: &'static str,
        message: String,
    },

    #[error("Failed to resize terminal of process {pid}: {message}")]
    TerminalResizeFailed { pid: u32, message: String },

    #[error("Failed to open terminal of process {pid}: {message}")]
    TerminalOpenFailed { pid: u32, message: String },

    #[error("Failed to capture console geometry of process {pid}: {message}")]
    SnapshotFailed { pid: u32, message: String },

    #[error("Resize session for process {pid} is closed")]
    SessionClosed { pid: u32 },

    #[error("Cannot apply {dims} dimensions to a {binding} terminal")]
    RegimeMismatch {
        dims: &'static str,
        binding: &'static str,
    },
}

impl ResizeError {
    pub fn primitive(primitive: &'static str, message: impl std::fmt::Display) -> Self {
        Self::PrimitiveFailed {
            primitive,
            message: message.to_string(),
        }
    }
}

impl GridfitError for ResizeError {
    fn error_code(&self) -> &'static str {
        match self {
            ResizeError::StepFailed { .. } => "RESIZE_STEP_FAILED",
            ResizeError::PrimitiveFailed { .. } => "RESIZE_PRIMITIVE_FAILED",
            ResizeError::TerminalResizeFailed { .. } => "TERMINAL_RESIZE_FAILED",
            ResizeError::TerminalOpenFailed { .. } => "TERMINAL_OPEN_FAILED",
            ResizeError::SnapshotFailed { .. } => "RESIZE_SNAPSHOT_FAILED",
            ResizeError::SessionClosed { .. } => "SESSION_CLOSED",
            ResizeError::RegimeMismatch { .. } => "RESIZE_REGIME_MISMATCH",
        }
    }

    fn is_user_error(&self) -> bool {
        matches!(
            self,
            ResizeError::SessionClosed { .. } | ResizeError::TerminalOpenFailed { .. }
        )
    }
}
