//! Ingestion for caption mapping.
//!
//! This crate turns raw uploaded text into a [`Grid`](cmap_model::Grid) and
//! derives [`Column`](cmap_model::Column) profiles from it.
//!
//! # Features
//!
//! - **Parsing**: quote-aware splitting on a comma or tab delimiter
//! - **Profiling**: column names, sample values, and type inference
//! - **Upload reading**: extension, size, and encoding checks before parsing
//! - **Demo datasets**: bundled sample grids
//!
//! # Example
//!
//! ```
//! use cmap_ingest::{parse, profile};
//!
//! let grid = parse("Email,Age\nx@y.com,30\n", ',');
//! let columns = profile(&grid, true);
//! assert_eq!(columns[0].inferred_type.as_str(), "email");
//! ```

mod demo;
mod error;
mod parse;
mod profile;
mod upload;

// === Error Types ===
pub use error::{IngestError, Result};

// === Parsing ===
pub use parse::{Delimiter, parse, parse_line};

// === Profiling ===
pub use profile::{SAMPLE_LIMIT, infer_type, profile};

// === Upload Reading ===
pub use upload::{DEFAULT_EXTENSIONS, MAX_UPLOAD_SIZE, Upload, UploadOptions, read_upload};

// === Demo Data ===
pub use demo::DemoDataset;
