//! Upload processing pipeline.

use std::collections::BTreeMap;

use eqv_model::{
    ColumnRange, ColumnRoles, ColumnSummary, DatasetSummary, EquipmentRecord,
    ParameterSlotMapping, PerSlot, RawTable, SlottedRecord, round2,
};

use crate::aggregate::{RecordAggregate, aggregate_records, summarize_slots};
use crate::classify::classify;
use crate::error::Result;
use crate::normalize::normalize_rows;
use crate::slots::{map_parameter_slots, slot_records};

/// Everything derived from an accepted upload, ready to persist.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessedUpload {
    pub roles: ColumnRoles,
    pub column_summary: ColumnSummary,
    pub mapping: ParameterSlotMapping,
    /// Normalized rows with every numeric column.
    pub records: Vec<EquipmentRecord>,
    /// Rows reduced to the three slots.
    pub rows: Vec<SlottedRecord>,
    /// Statistics of the mapped source columns.
    pub aggregate: RecordAggregate,
    /// Full-precision slot statistics.
    pub summary: DatasetSummary,
    /// Slot averages rounded to two decimals, as persisted.
    pub averages: PerSlot<f64>,
}

impl ProcessedUpload {
    pub fn total_count(&self) -> usize {
        self.rows.len()
    }

    /// Full-precision averages of the mapped columns.
    pub fn column_averages(&self) -> BTreeMap<String, f64> {
        self.aggregate
            .columns
            .iter()
            .map(|(column, stats)| (column.clone(), stats.average))
            .collect()
    }

    /// Min, max and population std of the mapped columns.
    pub fn column_ranges(&self) -> BTreeMap<String, ColumnRange> {
        self.aggregate
            .columns
            .iter()
            .map(|(column, stats)| {
                let range = ColumnRange {
                    min: stats.min,
                    max: stats.max,
                    std: stats.std,
                };
                (column.clone(), range)
            })
            .collect()
    }
}

/// Classifies, normalizes and aggregates an uploaded table.
///
/// # Errors
///
/// Returns the classifier's error when the table is empty or has no
/// numeric column. Malformed cells never fail the upload.
pub fn process_table(table: &RawTable) -> Result<ProcessedUpload> {
    let roles = classify(table)?;
    let column_summary = ColumnSummary::new(&roles, table.columns());
    let records = normalize_rows(table, &roles);
    let mapping = map_parameter_slots(&roles.numeric_columns);
    let rows = slot_records(&records, &mapping);

    let mapped_columns: Vec<String> = mapping
        .bound_columns()
        .map(|(_, column)| column.to_string())
        .collect();
    let aggregate = aggregate_records(&records, &mapped_columns);
    let summary = summarize_slots(&rows, &mapping);
    let averages = summary.parameters.each_ref().map(|p| round2(p.statistics.average));

    tracing::info!(
        rows = rows.len(),
        numeric_columns = roles.numeric_columns.len(),
        categories = summary.category_counts.len(),
        "Processed upload"
    );

    Ok(ProcessedUpload {
        roles,
        column_summary,
        mapping,
        records,
        rows,
        aggregate,
        summary,
        averages,
    })
}
