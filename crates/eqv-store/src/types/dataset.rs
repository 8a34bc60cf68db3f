//! Dataset snapshots.

use chrono::{DateTime, Utc};
use rkyv::{Archive, Deserialize, Serialize};

/// A stored upload with its slot-reduced records.
#[derive(Debug, Clone, PartialEq, Archive, Serialize, Deserialize)]
pub struct DatasetSnapshot {
    pub id: u64,
    /// Username of the owning account.
    pub owner: String,
    /// Uploaded file name.
    pub name: String,
    /// RFC 3339 upload timestamp (microsecond precision).
    pub uploaded_at: String,
    /// Hex SHA-256 of the uploaded file.
    pub source_hash: String,
    pub total_count: u64,
    /// Rounded slot averages.
    pub averages: [f64; 3],
    pub column_summary: ColumnSummarySnapshot,
    pub records: Vec<RecordSnapshot>,
}

impl DatasetSnapshot {
    /// Parse the uploaded_at timestamp.
    pub fn uploaded_at(&self) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(&self.uploaded_at)
            .ok()
            .map(|dt| dt.with_timezone(&Utc))
    }
}

/// Column roles and header of an upload.
#[derive(Debug, Clone, PartialEq, Archive, Serialize, Deserialize)]
pub struct ColumnSummarySnapshot {
    pub name_column: String,
    pub category_column: Option<String>,
    pub numeric_columns: Vec<String>,
    pub all_columns: Vec<String>,
}

/// One stored equipment row.
#[derive(Debug, Clone, PartialEq, Archive, Serialize, Deserialize)]
pub struct RecordSnapshot {
    pub name: String,
    pub category: String,
    pub values: [f64; 3],
}
