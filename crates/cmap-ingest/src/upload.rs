//! Reading an uploaded file into text.

use std::path::Path;

use cmap_model::Grid;

use crate::error::{IngestError, Result};
use crate::parse::{Delimiter, parse};

/// Maximum upload size (50 MB default).
pub const MAX_UPLOAD_SIZE: u64 = 50 * 1024 * 1024;

/// Extensions accepted by default.
pub const DEFAULT_EXTENSIONS: &[&str] = &["csv", "tsv", "txt"];

/// Wide grids beyond this column count get a warning.
const WIDE_GRID_COLUMNS: usize = 500;

/// Caller-side validation rules for uploads.
#[derive(Debug, Clone)]
pub struct UploadOptions {
    /// Accepted file extensions, compared case-insensitively, without the dot.
    pub accepted_extensions: Vec<String>,
    /// Size limit in bytes.
    pub max_size: u64,
}

impl Default for UploadOptions {
    fn default() -> Self {
        Self {
            accepted_extensions: DEFAULT_EXTENSIONS.iter().map(|e| (*e).to_string()).collect(),
            max_size: MAX_UPLOAD_SIZE,
        }
    }
}

impl UploadOptions {
    #[must_use]
    pub fn with_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.accepted_extensions = extensions.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_max_size(mut self, max_size: u64) -> Self {
        self.max_size = max_size;
        self
    }

    fn accepts(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| {
                self.accepted_extensions
                    .iter()
                    .any(|accepted| accepted.eq_ignore_ascii_case(ext))
            })
    }

    fn expected(&self) -> String {
        self.accepted_extensions
            .iter()
            .map(|e| format!(".{e}"))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Text content of an accepted upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Upload {
    /// File name without directories.
    pub file_name: String,
    /// Decoded text with any UTF-8 BOM removed.
    pub text: String,
}

impl Upload {
    pub fn parse(&self, delimiter: Delimiter) -> Grid {
        let grid = parse(&self.text, delimiter.as_char());
        if grid.width() > WIDE_GRID_COLUMNS {
            tracing::warn!(
                file = %self.file_name,
                columns = grid.width(),
                "Upload has more than 500 columns - may be hard to map"
            );
        }
        grid
    }
}

/// Reads and validates an uploaded file.
///
/// Rejects unknown extensions, oversized files, UTF-16 content, invalid
/// UTF-8 and blank files. A leading UTF-8 BOM is stripped.
pub fn read_upload(path: &Path, options: &UploadOptions) -> Result<Upload> {
    if !options.accepts(path) {
        return Err(IngestError::UnsupportedFile {
            path: path.to_path_buf(),
            expected: options.expected(),
        });
    }

    let metadata = std::fs::metadata(path).map_err(|e| io_error(path, e))?;
    if metadata.len() > options.max_size {
        return Err(IngestError::FileTooLarge {
            path: path.to_path_buf(),
            size: metadata.len(),
            max_size: options.max_size,
        });
    }

    let bytes = std::fs::read(path).map_err(|e| io_error(path, e))?;
    check_encoding(path, &bytes)?;

    let text = String::from_utf8(bytes).map_err(|_| IngestError::InvalidUtf8 {
        path: path.to_path_buf(),
    })?;
    let text = match text.strip_prefix('\u{feff}') {
        Some(stripped) => stripped.to_string(),
        None => text,
    };

    if text.trim().is_empty() {
        return Err(IngestError::EmptyFile {
            path: path.to_path_buf(),
        });
    }

    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    tracing::info!(file = %file_name, bytes = text.len(), "read upload");

    Ok(Upload { file_name, text })
}

fn io_error(path: &Path, e: std::io::Error) -> IngestError {
    if e.kind() == std::io::ErrorKind::NotFound {
        IngestError::FileNotFound {
            path: path.to_path_buf(),
        }
    } else {
        IngestError::FileRead {
            path: path.to_path_buf(),
            source: e,
        }
    }
}

/// Rejects UTF-16 byte order marks.
fn check_encoding(path: &Path, bytes: &[u8]) -> Result<()> {
    let encoding = match bytes.get(0..2) {
        Some([0xFF, 0xFE]) => "UTF-16 LE",
        Some([0xFE, 0xFF]) => "UTF-16 BE",
        _ => return Ok(()),
    };
    Err(IngestError::UnsupportedEncoding {
        path: path.to_path_buf(),
        encoding,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::Builder;

    fn create_temp(suffix: &str, content: &[u8]) -> tempfile::NamedTempFile {
        let mut file = Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(content).unwrap();
        file
    }

    #[test]
    fn test_read_upload_strips_bom() {
        let file = create_temp(".csv", "\u{feff}A,B\n1,2\n".as_bytes());
        let upload = read_upload(file.path(), &UploadOptions::default()).unwrap();

        assert_eq!(upload.text, "A,B\n1,2\n");
        assert!(upload.file_name.ends_with(".csv"));
        assert_eq!(upload.parse(Delimiter::Comma).rows()[0], vec!["A", "B"]);
    }

    #[test]
    fn test_read_upload_extension_case_insensitive() {
        let file = create_temp(".CSV", b"A\n1\n");
        assert!(read_upload(file.path(), &UploadOptions::default()).is_ok());
    }

    #[test]
    fn test_read_upload_rejects_extension() {
        let file = create_temp(".xlsx", b"A,B\n");
        let result = read_upload(file.path(), &UploadOptions::default());
        assert!(matches!(result, Err(IngestError::UnsupportedFile { .. })));
    }

    #[test]
    fn test_read_upload_empty() {
        let file = create_temp(".csv", b"  \n\n");
        let result = read_upload(file.path(), &UploadOptions::default());
        assert!(matches!(result, Err(IngestError::EmptyFile { .. })));
    }

    #[test]
    fn test_read_upload_utf16() {
        let file = create_temp(".csv", &[0xFF, 0xFE, b'A', 0]);
        let result = read_upload(file.path(), &UploadOptions::default());
        assert!(matches!(
            result,
            Err(IngestError::UnsupportedEncoding {
                encoding: "UTF-16 LE",
                ..
            })
        ));
    }

    #[test]
    fn test_read_upload_invalid_utf8() {
        let file = create_temp(".csv", &[b'A', 0xC3, 0x28]);
        let result = read_upload(file.path(), &UploadOptions::default());
        assert!(matches!(result, Err(IngestError::InvalidUtf8 { .. })));
    }

    #[test]
    fn test_read_upload_too_large() {
        let file = create_temp(".csv", b"A,B,C\n1,2,3\n");
        let options = UploadOptions::default().with_max_size(4);
        let result = read_upload(file.path(), &options);
        assert!(matches!(
            result,
            Err(IngestError::FileTooLarge { max_size: 4, .. })
        ));
    }

    #[test]
    fn test_read_upload_missing() {
        let result = read_upload(Path::new("/no/such/dir/people.csv"), &UploadOptions::default());
        assert!(matches!(result, Err(IngestError::FileNotFound { .. })));
    }

    #[test]
    fn test_custom_extensions() {
        let file = create_temp(".dat", b"A|B\n");
        let options = UploadOptions::default().with_extensions(["dat"]);
        assert!(read_upload(file.path(), &options).is_ok());
    }
}
