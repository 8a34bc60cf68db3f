//! PDF analysis reports for stored equipment datasets.
//!
//! A report holds, in order: a cover page, the dataset overview with slot
//! averages, the category distribution (table and bar chart), parameter
//! trend bars for the first records, statistics and quartile tables, and an
//! equipment table. Every page carries a "Page i of n" footer.
//!
//! Pages are drawn with the standard Type1 fonts only, so the output needs
//! no embedded font data.

mod error;
mod layout;
mod options;
mod render;

pub use error::{ReportError, Result};
pub use options::{DEFAULT_TABLE_ROWS, DEFAULT_TITLE, DEFAULT_TREND_ROWS, ReportOptions};
pub use render::{render_report, report_file_name};
