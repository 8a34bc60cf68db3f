//! CSV header line parsing.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::{IngestError, Result};

/// Reads and parses the header line of a CSV file.
///
/// A leading UTF-8 BOM is stripped. Fails when the file is empty or the
/// header has no named column at all.
pub fn read_csv_header(path: &Path) -> Result<Vec<String>> {
    let file = File::open(path).map_err(|e| IngestError::io(path, e))?;
    let mut reader = BufReader::new(file);
    let mut line = String::new();
    let bytes = reader
        .read_line(&mut line)
        .map_err(|e| IngestError::io(path, e))?;

    if bytes == 0 {
        return Err(IngestError::EmptyCsv {
            path: path.to_path_buf(),
        });
    }

    let line = line.trim_end_matches(['\r', '\n']);
    let line = line.strip_prefix('\u{feff}').unwrap_or(line);
    let columns = parse_csv_line(line);
    if columns.iter().all(String::is_empty) {
        return Err(IngestError::NoHeaderDetected {
            path: path.to_path_buf(),
        });
    }
    if columns.iter().any(String::is_empty) {
        return Err(IngestError::EmptyColumnName {
            path: path.to_path_buf(),
        });
    }
    Ok(columns)
}

/// Normalizes a header value by trimming whitespace.
fn normalize_header(value: &str) -> String {
    value.trim().to_string()
}

/// Parses a CSV line into fields, handling quoted values.
fn parse_csv_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if !in_quotes => {
                in_quotes = true;
            }
            '"' if in_quotes => {
                // Check for escaped quote ("")
                if chars.peek() == Some(&'"') {
                    current.push('"');
                    chars.next();
                } else {
                    in_quotes = false;
                }
            }
            ',' if !in_quotes => {
                fields.push(normalize_header(&current));
                current.clear();
            }
            _ => {
                current.push(c);
            }
        }
    }

    fields.push(normalize_header(&current));
    fields
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
    fn test_parse_csv_line_quoted() {
        let result = parse_csv_line("\"Flow, m3/h\",Name");
        assert_eq!(result, vec!["Flow, m3/h", "Name"]);
    }

    #[test]
    fn test_parse_csv_line_escaped_quotes() {
        let result = parse_csv_line("\"he said \"\"hi\"\"\",b");
        assert_eq!(result, vec!["he said \"hi\"", "b"]);
    }

    #[test]
    fn test_read_header_with_bom_and_crlf() {
        let file = create_temp_csv("\u{feff}Name,Type,Flow\r\nP1,Pump,1\r\n");
        let header = read_csv_header(file.path()).unwrap();
        assert_eq!(header, vec!["Name", "Type", "Flow"]);
    }

    #[test]
    fn test_read_header_empty_file() {
        let file = create_temp_csv("");
        let result = read_csv_header(file.path());
        assert!(matches!(result, Err(IngestError::EmptyCsv { .. })));
    }

    #[test]
    fn test_read_header_blank_line() {
        let file = create_temp_csv(" , \n1,2\n");
        let result = read_csv_header(file.path());
        assert!(matches!(result, Err(IngestError::NoHeaderDetected { .. })));
    }

    #[test]
    fn test_read_header_empty_column_name() {
        let file = create_temp_csv("Name,,Flow\nP1,x,1\n");
        let result = read_csv_header(file.path());
        assert!(matches!(result, Err(IngestError::EmptyColumnName { .. })));
    }
}
