//! Error types for upload reading.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading an uploaded file.
///
/// Parsing and profiling never fail; only getting the text off disk can.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    /// Upload file not found.
    #[error("file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // === Validation Errors ===
    /// File extension is not one of the accepted kinds.
    #[error("unsupported file {path}: expected one of {expected}")]
    UnsupportedFile { path: PathBuf, expected: String },

    /// File exceeds the configured size limit.
    #[error("file {path} is too large ({size} bytes, limit {max_size})")]
    FileTooLarge {
        path: PathBuf,
        size: u64,
        max_size: u64,
    },

    /// File uses an encoding other than UTF-8.
    #[error("unsupported encoding {encoding} in {path}")]
    UnsupportedEncoding {
        path: PathBuf,
        encoding: &'static str,
    },

    /// File bytes are not valid UTF-8.
    #[error("file {path} is not valid UTF-8")]
    InvalidUtf8 { path: PathBuf },

    /// File has no non-blank content.
    #[error("file is empty: {path}")]
    EmptyFile { path: PathBuf },
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = IngestError::FileNotFound {
            path: PathBuf::from("/path/to/file.csv"),
        };
        assert_eq!(err.to_string(), "file not found: /path/to/file.csv");

        let err = IngestError::UnsupportedFile {
            path: PathBuf::from("people.xlsx"),
            expected: ".csv, .tsv".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "unsupported file people.xlsx: expected one of .csv, .tsv"
        );
    }
}
