use crate::errors::GridfitError;

#[derive(Debug, thiserror::Error)]
pub enum WindowError {
    #[error("Failed to enumerate windows: {message}")]
    EnumerationFailed { message: String },

    #[error("Could not determine owning process of window {window_id}: {message}")]
    OwnerQueryFailed { window_id: u64, message: String },

    #[error("Required tool '{tool}' not found in PATH")]
    ToolNotFound { tool: String },

    #[error("'{operation}' is not supported on {platform}")]
    Unsupported {
        operation: &'static str,
        platform: &'static str,
    },

    #[error("{operation} failed for window {window_id}: {message}")]
    OperationFailed {
        operation: &'static str,
        window_id: u64,
        message: String,
    },
}

impl GridfitError for WindowError {
    fn error_code(&self) -> &'static str {
        match self {
            WindowError::EnumerationFailed { .. } => "WINDOW_ENUMERATION_FAILED",
            WindowError::OwnerQueryFailed { .. } => "WINDOW_OWNER_QUERY_FAILED",
            WindowError::ToolNotFound { .. } => "WINDOW_TOOL_NOT_FOUND",
            WindowError::Unsupported { .. } => "WINDOW_OPERATION_UNSUPPORTED",
            WindowError::OperationFailed { .. } => "WINDOW_OPERATION_FAILED",
        }
    }

    fn is_user_error(&self) -> bool {
        matches!(self, WindowError::ToolNotFound { .. })
    }
}
