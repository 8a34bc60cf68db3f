//! Report rendering options.

/// Default report title.
pub const DEFAULT_TITLE: &str = "Equipment Analysis Report";

/// Default number of records in the equipment table.
pub const DEFAULT_TABLE_ROWS: usize = 50;

/// Default number of records in the parameter trend charts.
pub const DEFAULT_TREND_ROWS: usize = 15;

/// Options controlling report content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportOptions {
    pub title: String,
    /// Maximum records listed in the equipment table.
    pub table_rows: usize,
    /// Maximum records drawn in the trend charts.
    pub trend_rows: usize,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            table_rows: DEFAULT_TABLE_ROWS,
            trend_rows: DEFAULT_TREND_ROWS,
        }
    }
}
