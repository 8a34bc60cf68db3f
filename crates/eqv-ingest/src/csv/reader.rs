//! CSV file reading into raw text tables.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use polars::prelude::*;

use eqv_model::RawTable;

use crate::error::{IngestError, Result};

use super::header::read_csv_header;

/// Maximum file size for CSV loading (500 MB default).
pub const MAX_CSV_FILE_SIZE: u64 = 500 * 1024 * 1024;

/// Column count above which a warning is logged.
const WIDE_TABLE_COLUMNS: usize = 500;

/// Check file size against a limit.
pub fn check_file_size_with_limit(path: &Path, max_size: u64) -> Result<()> {
    let metadata = std::fs::metadata(path).map_err(|e| IngestError::io(path, e))?;

    if metadata.len() > max_size {
        return Err(IngestError::FileTooLarge {
            path: path.to_path_buf(),
            size: metadata.len(),
            max_size,
        });
    }

    Ok(())
}

/// Detect encoding and validate it's supported (UTF-8 only).
///
/// Checks for UTF-16 BOM markers which are not supported.
pub fn validate_encoding(path: &Path) -> Result<()> {
    let mut file = File::open(path).map_err(|e| IngestError::io(path, e))?;

    let mut buffer = [0u8; 4];
    let bytes_read = file
        .read(&mut buffer)
        .map_err(|e| IngestError::io(path, e))?;

    if bytes_read >= 2 {
        if buffer[0..2] == [0xFF, 0xFE] {
            return Err(IngestError::UnsupportedEncoding {
                path: path.to_path_buf(),
                encoding: "UTF-16 LE",
            });
        }
        if buffer[0..2] == [0xFE, 0xFF] {
            return Err(IngestError::UnsupportedEncoding {
                path: path.to_path_buf(),
                encoding: "UTF-16 BE",
            });
        }
    }

    Ok(())
}

/// Reads a CSV file into a [`RawTable`] with every cell kept as text.
///
/// Type inference is disabled so that numeric coercion is left entirely to
/// the classifier. Missing cells become empty strings. A file holding only
/// a header yields a table with zero rows.
pub fn read_csv_table(path: &Path) -> Result<RawTable> {
    // Rejects empty files and blank headers before Polars sees them.
    read_csv_header(path)?;

    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?
        .finish()
        .map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    if df.width() > WIDE_TABLE_COLUMNS {
        tracing::warn!(
            path = %path.display(),
            columns = df.width(),
            "Upload has more than {WIDE_TABLE_COLUMNS} columns"
        );
    }

    dataframe_to_table(&df)
}

/// Converts a DataFrame into row-major text cells.
fn dataframe_to_table(df: &DataFrame) -> Result<RawTable> {
    let columns: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|name| name.to_string())
        .collect();
    let mut rows: Vec<Vec<String>> = vec![Vec::with_capacity(columns.len()); df.height()];

    for col in df.get_columns() {
        let series = col.as_materialized_series();
        let str_col = series.cast(&DataType::String)?;
        let chunked = str_col.str()?;
        for (row, value) in rows.iter_mut().zip(chunked.iter()) {
            row.push(value.unwrap_or_default().to_string());
        }
    }

    Ok(RawTable::new(columns, rows))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", content).unwrap();
        file
    }

    #[test]
    fn test_read_csv_table_keeps_text() {
        let file = create_temp_csv("Name,Type,Flow\nPump-1,Centrifugal,12.50\nValve-1,Control,abc\n");
        let table = read_csv_table(file.path()).unwrap();

        assert_eq!(table.columns(), ["Name", "Type", "Flow"]);
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.cell(0, "Flow"), Some("12.50"));
        assert_eq!(table.cell(1, "Flow"), Some("abc"));
    }

    #[test]
    fn test_read_csv_table_missing_cells_are_empty() {
        let file = create_temp_csv("Name,Flow\nPump-1,\nPump-2,3\n");
        let table = read_csv_table(file.path()).unwrap();

        assert_eq!(table.cell(0, "Flow"), Some(""));
        assert_eq!(table.cell(1, "Flow"), Some("3"));
    }

    #[test]
    fn test_read_csv_table_header_only() {
        let file = create_temp_csv("Name,Flow\n");
        let table = read_csv_table(file.path()).unwrap();

        assert_eq!(table.column_count(), 2);
        assert!(table.is_empty());
    }

    #[test]
    fn test_read_csv_table_empty_file() {
        let file = create_temp_csv("");
        assert!(matches!(
            read_csv_table(file.path()),
            Err(IngestError::EmptyCsv { .. })
        ));
    }

    #[test]
    fn test_validate_encoding_rejects_utf16() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(&[0xFF, 0xFE, b'N', 0x00]).unwrap();
        assert!(matches!(
            validate_encoding(file.path()),
            Err(IngestError::UnsupportedEncoding { .. })
        ));
    }

    #[test]
    fn test_check_file_size_with_limit() {
        let file = create_temp_csv("Name,Flow\nP,1\n");
        assert!(check_file_size_with_limit(file.path(), 1024).is_ok());
        assert!(matches!(
            check_file_size_with_limit(file.path(), 4),
            Err(IngestError::FileTooLarge { .. })
        ));
    }
}
