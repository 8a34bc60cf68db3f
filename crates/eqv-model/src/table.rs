//! Parsed tabular upload.

/// An uploaded table as text cells.
///
/// Columns are exactly the header row, in file order. Every row holds one
/// cell per column; missing cells are stored as empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawTable {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl RawTable {
    /// Creates a table, padding or truncating each row to the header width.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        let width = columns.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, String::new());
                row
            })
            .collect();
        Self { columns, rows }
    }

    /// Builds a table from string slices (mostly useful in tests).
    pub fn from_rows(columns: &[&str], rows: &[&[&str]]) -> Self {
        Self::new(
            columns.iter().map(|c| (*c).to_string()).collect(),
            rows.iter()
                .map(|row| row.iter().map(|c| (*c).to_string()).collect())
                .collect(),
        )
    }

    /// Column names in header order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// All data rows.
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Number of columns.
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Number of data rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if there are no data rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of a column in the header.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Iterates over a column's cells, top to bottom.
    ///
    /// Yields nothing for an unknown column.
    pub fn column_values<'a>(&'a self, name: &str) -> impl Iterator<Item = &'a str> + 'a {
        let index = self.column_index(name);
        self.rows
            .iter()
            .filter_map(move |row| index.and_then(|i| row.get(i)).map(String::as_str))
    }

    /// Cell at a row for the named column.
    pub fn cell(&self, row: usize, column: &str) -> Option<&str> {
        let index = self.column_index(column)?;
        self.rows
            .get(row)
            .and_then(|r| r.get(index))
            .map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rows_are_padded_to_header_width() {
        let table = RawTable::new(
            vec!["A".into(), "B".into(), "C".into()],
            vec![vec!["1".into()], vec!["1".into(), "2".into(), "3".into(), "4".into()]],
        );
        assert_eq!(table.rows()[0], vec!["1", "", ""]);
        assert_eq!(table.rows()[1], vec!["1", "2", "3"]);
    }

    #[test]
    fn test_column_values() {
        let table = RawTable::from_rows(&["Name", "Flow"], &[&["P1", "1"], &["P2", "2"]]);
        let flows: Vec<&str> = table.column_values("Flow").collect();
        assert_eq!(flows, vec!["1", "2"]);
        assert_eq!(table.column_values("Missing").count(), 0);
    }

    #[test]
    fn test_cell_lookup() {
        let table = RawTable::from_rows(&["Name", "Flow"], &[&["P1", "1"]]);
        assert_eq!(table.cell(0, "Name"), Some("P1"));
        assert_eq!(table.cell(1, "Name"), None);
        assert_eq!(table.cell(0, "Other"), None);
    }
}
