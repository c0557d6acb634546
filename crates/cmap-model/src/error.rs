//! Error types for mapping operations.

use thiserror::Error;

/// Errors from editing a [`Mapping`](crate::Mapping).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MappingError {
    /// Caption is already held by another column.
    #[error("caption '{caption}' already mapped from '{column}'")]
    CaptionAlreadyUsed { caption: String, column: String },
    /// Column not found in source data.
    #[error("column not found: {0}")]
    ColumnNotFound(String),
    /// Caption not found in the caption set.
    #[error("caption not found: {0}")]
    CaptionNotFound(String),
}

/// Result type for mapping operations.
pub type Result<T> = std::result::Result<T, MappingError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = MappingError::CaptionAlreadyUsed {
            caption: "Email".to_string(),
            column: "email_address".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "caption 'Email' already mapped from 'email_address'"
        );
        assert_eq!(
            MappingError::ColumnNotFound("x".to_string()).to_string(),
            "column not found: x"
        );
    }
}
