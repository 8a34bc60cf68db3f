//! Dataset-level views returned to clients.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::record::SlottedRecord;
use crate::roles::ColumnSummary;
use crate::slots::{ParameterSlotMapping, PerSlot};
use crate::statistics::Quartiles;

/// Listing entry for a stored dataset (no records).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatasetInfo {
    pub id: u64,
    /// Uploaded file name.
    pub name: String,
    pub owner: String,
    pub uploaded_at: DateTime<Utc>,
    pub total_count: usize,
    /// Slot averages rounded to two decimals at upload time.
    pub averages: PerSlot<f64>,
    /// SHA-256 of the uploaded file.
    pub source_hash: String,
}

/// A stored dataset with every record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatasetDetail {
    #[serde(flatten)]
    pub info: DatasetInfo,
    pub column_summary: ColumnSummary,
    pub records: Vec<SlottedRecord>,
}

/// Min/max and dispersion of one slot as shown to clients.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SlotRange {
    pub min: f64,
    pub max: f64,
    pub std: f64,
    pub variance: f64,
    /// Coefficient of variation in percent.
    pub cv: f64,
}

/// Consumer-facing summary of a stored dataset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryView {
    pub id: u64,
    pub name: String,
    pub uploaded_at: DateTime<Utc>,
    pub total_count: usize,
    pub column_mapping: ParameterSlotMapping,
    /// Persisted (rounded) averages.
    pub averages: PerSlot<f64>,
    pub ranges: PerSlot<SlotRange>,
    pub quartiles: PerSlot<Option<Quartiles>>,
    pub category_counts: BTreeMap<String, usize>,
    pub category_percentages: BTreeMap<String, f64>,
}

/// Range statistics of one source column in an upload response.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ColumnRange {
    pub min: f64,
    pub max: f64,
    pub std: f64,
}

/// Response to a successful upload.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UploadOutcome {
    pub message: String,
    pub dataset: DatasetInfo,
    pub column_summary: ColumnSummary,
    pub column_mapping: ParameterSlotMapping,
    /// Full-precision averages of the mapped columns, keyed by column name.
    pub averages: BTreeMap<String, f64>,
    pub ranges: BTreeMap<String, ColumnRange>,
}
