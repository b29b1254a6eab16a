use crate::errors::GridfitError;

#[derive(Debug, thiserror::Error)]
pub enum ProcessError {
    #[error("Process '{pid}' not found")]
    NotFound { pid: u32 },

    #[error("Invalid PID: {pid}")]
    InvalidPid { pid: u32 },
}

impl GridfitError for ProcessError {
    fn error_code(&self) -> &'static str {
        match self {
            ProcessError::NotFound { .. } => "PROCESS_NOT_FOUND",
            ProcessError::InvalidPid { .. } => "PROCESS_INVALID_PID",
        }
    }

    fn is_user_error(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_process_error_codes() {
        let error = ProcessError::NotFound { pid: 42 };
        assert_eq!(error.to_string(), "Process '42' not found");
        assert_eq!(error.error_code(), "PROCESS_NOT_FOUND");
        assert!(error.is_user_error());

        let error = ProcessError::InvalidPid { pid: 0 };
        assert_eq!(error.error_code(), "PROCESS_INVALID_PID");
    }
}
