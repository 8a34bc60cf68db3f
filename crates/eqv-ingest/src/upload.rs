//! Validated upload loading.

use std::fs::File;
use std::io;
use std::path::Path;

use eqv_model::RawTable;
use sha2::{Digest, Sha256};

use crate::csv::{MAX_CSV_FILE_SIZE, check_file_size_with_limit, read_csv_table, validate_encoding};
use crate::error::{IngestError, Result};

/// Limits applied to uploaded files.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IngestOptions {
    /// Largest accepted file, in bytes.
    pub max_file_size: u64,
}

impl Default for IngestOptions {
    fn default() -> Self {
        Self {
            max_file_size: MAX_CSV_FILE_SIZE,
        }
    }
}

/// An uploaded file, parsed.
#[derive(Debug, Clone)]
pub struct Upload {
    /// File name as uploaded (dataset name).
    pub file_name: String,
    /// SHA-256 of the file contents.
    pub source_hash: String,
    pub table: RawTable,
}

/// Rejects files whose name does not end in `.csv` (case-insensitive).
pub fn validate_upload_name(path: &Path) -> Result<()> {
    let is_csv = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
    if is_csv {
        Ok(())
    } else {
        Err(IngestError::NotCsv {
            path: path.to_path_buf(),
        })
    }
}

/// Hex SHA-256 of the file, streamed from disk.
fn source_digest(path: &Path) -> Result<String> {
    let mut file = File::open(path).map_err(|e| IngestError::io(path, e))?;
    let mut hasher = Sha256::new();
    io::copy(&mut file, &mut hasher).map_err(|e| IngestError::io(path, e))?;
    Ok(hex::encode(hasher.finalize()))
}

/// Validates and parses an uploaded CSV file.
pub fn read_upload(path: &Path, options: &IngestOptions) -> Result<Upload> {
    validate_upload_name(path)?;
    check_file_size_with_limit(path, options.max_file_size)?;
    validate_encoding(path)?;

    let table = read_csv_table(path)?;
    let source_hash = source_digest(path)?;
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    tracing::debug!(
        file = %file_name,
        rows = table.row_count(),
        columns = table.column_count(),
        "Read upload"
    );

    Ok(Upload {
        file_name,
        source_hash,
        table,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_validate_upload_name() {
        assert!(validate_upload_name(Path::new("data.csv")).is_ok());
        assert!(validate_upload_name(Path::new("DATA.CSV")).is_ok());
        assert!(matches!(
            validate_upload_name(Path::new("data.xlsx")),
            Err(IngestError::NotCsv { .. })
        ));
        assert!(validate_upload_name(Path::new("csv")).is_err());
    }

    #[test]
    fn test_read_upload() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("pumps.csv");
        fs::write(&path, "Name,Type,Flow\nPump-1,Centrifugal,12.5\n").unwrap();

        let upload = read_upload(&path, &IngestOptions::default()).unwrap();

        assert_eq!(upload.file_name, "pumps.csv");
        assert_eq!(upload.source_hash.len(), 64);
        assert!(upload.source_hash.chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(upload.table.row_count(), 1);
    }

    #[test]
    fn test_read_upload_rejects_large_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("pumps.csv");
        fs::write(&path, "Name,Type,Flow\nPump-1,Centrifugal,12.5\n").unwrap();

        let options = IngestOptions { max_file_size: 8 };
        assert!(matches!(
            read_upload(&path, &options),
            Err(IngestError::FileTooLarge { .. })
        ));
    }

    #[test]
    fn test_source_digest_known_value() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("empty.csv");
        fs::write(&path, "").unwrap();

        assert_eq!(
            source_digest(&path).unwrap(),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn test_same_content_same_digest() {
        let dir = tempdir().unwrap();
        let first = dir.path().join("a.csv");
        let second = dir.path().join("b.csv");
        fs::write(&first, "Name,Flow\nP-1,1\n").unwrap();
        fs::write(&second, "Name,Flow\nP-1,1\n").unwrap();

        let a = read_upload(&first, &IngestOptions::default()).unwrap();
        let b = read_upload(&second, &IngestOptions::default()).unwrap();
        assert_eq!(a.source_hash, b.source_hash);
        assert_ne!(a.file_name, b.file_name);
    }
}
