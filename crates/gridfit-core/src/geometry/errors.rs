use crate::errors::GridfitError;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GeometryError {
    #[error("Invalid size '{input}': expected COLUMNSxROWS (e.g. 120x40)")]
    MalformedGrid { input: String },

    #[error("Invalid size '{input}': {reason}")]
    InvalidDimension { input: String, reason: String },

    #[error("Grid dimensions must be positive (got {columns}x{rows})")]
    ZeroDimension { columns: u16, rows: u16 },
}

impl GridfitError for GeometryError {
    fn error_code(&self) -> &'static str {
        match self {
            GeometryError::MalformedGrid { .. } => "GRID_MALFORMED",
            GeometryError::InvalidDimension { .. } => "GRID_INVALID_DIMENSION",
            GeometryError::ZeroDimension { .. } => "GRID_ZERO_DIMENSION",
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
    fn test_zero_dimension_display() {
        let error = GeometryError::ZeroDimension {
            columns: 0,
            rows: 24,
        };
        assert_eq!(
            error.to_string(),
            "Grid dimensions must be positive (got 0x24)"
        );
        assert_eq!(error.error_code(), "GRID_ZERO_DIMENSION");
        assert!(error.is_user_error());
    }
}
