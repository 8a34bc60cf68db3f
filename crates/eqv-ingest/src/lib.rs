//! Upload ingestion utilities.
//!
//! This crate turns an uploaded delimited text file into a [`RawTable`]
//! of text cells, ready for column classification.
//!
//! # Features
//!
//! - **Upload checks**: `.csv` extension, size limit, UTF-16 rejection
//! - **CSV Loading**: Polars CSV reader with every column kept as text
//! - **Source hashing**: SHA-256 of the uploaded bytes for provenance
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use eqv_ingest::{IngestOptions, read_upload};
//!
//! let upload = read_upload(Path::new("equipment.csv"), &IngestOptions::default())?;
//! println!("{} rows", upload.table.row_count());
//! ```
//!
//! [`RawTable`]: eqv_model::RawTable

mod csv;
mod error;
mod upload;

// === Error Types ===
pub use error::{IngestError, Result};

// === CSV Reading ===
pub use csv::{MAX_CSV_FILE_SIZE, check_file_size_with_limit, read_csv_table, validate_encoding};

// === Uploads ===
pub use upload::{IngestOptions, Upload, read_upload, validate_upload_name};
