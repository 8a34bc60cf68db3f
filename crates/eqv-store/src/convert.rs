//! Conversion between model types and persistence snapshots.

use eqv_model::{ColumnSummary, DatasetDetail, DatasetInfo, PerSlot, SlottedRecord};

use crate::types::{ColumnSummarySnapshot, DatasetSnapshot, RecordSnapshot};

/// Trait for types that can be converted to a persistence snapshot.
pub trait ToSnapshot {
    /// The snapshot type.
    type Snapshot;

    /// Convert to a snapshot for persistence.
    fn to_snapshot(&self) -> Self::Snapshot;
}

/// Trait for types that can be created from a persistence snapshot.
pub trait FromSnapshot: Sized {
    /// The snapshot type.
    type Snapshot;

    /// Create from a snapshot.
    fn from_snapshot(snapshot: &Self::Snapshot) -> Self;
}

impl ToSnapshot for SlottedRecord {
    type Snapshot = RecordSnapshot;

    fn to_snapshot(&self) -> RecordSnapshot {
        RecordSnapshot {
            name: self.name.clone(),
            category: self.category.clone(),
            values: self.values.into_array(),
        }
    }
}

impl FromSnapshot for SlottedRecord {
    type Snapshot = RecordSnapshot;

    fn from_snapshot(snapshot: &RecordSnapshot) -> Self {
        Self {
            name: snapshot.name.clone(),
            category: snapshot.category.clone(),
            values: PerSlot::new(snapshot.values),
        }
    }
}

impl ToSnapshot for ColumnSummary {
    type Snapshot = ColumnSummarySnapshot;

    fn to_snapshot(&self) -> ColumnSummarySnapshot {
        ColumnSummarySnapshot {
            name_column: self.name_column.clone(),
            category_column: self.category_column.clone(),
            numeric_columns: self.numeric_columns.clone(),
            all_columns: self.all_columns.clone(),
        }
    }
}

impl FromSnapshot for ColumnSummary {
    type Snapshot = ColumnSummarySnapshot;

    fn from_snapshot(snapshot: &ColumnSummarySnapshot) -> Self {
        Self {
            total_columns: snapshot.all_columns.len(),
            name_column: snapshot.name_column.clone(),
            category_column: snapshot.category_column.clone(),
            numeric_columns: snapshot.numeric_columns.clone(),
            all_columns: snapshot.all_columns.clone(),
        }
    }
}

impl FromSnapshot for DatasetInfo {
    type Snapshot = DatasetSnapshot;

    fn from_snapshot(snapshot: &DatasetSnapshot) -> Self {
        Self {
            id: snapshot.id,
            name: snapshot.name.clone(),
            owner: snapshot.owner.clone(),
            uploaded_at: snapshot.uploaded_at().unwrap_or_default(),
            total_count: usize::try_from(snapshot.total_count).unwrap_or(usize::MAX),
            averages: PerSlot::new(snapshot.averages),
            source_hash: snapshot.source_hash.clone(),
        }
    }
}

impl FromSnapshot for DatasetDetail {
    type Snapshot = DatasetSnapshot;

    fn from_snapshot(snapshot: &DatasetSnapshot) -> Self {
        Self {
            info: DatasetInfo::from_snapshot(snapshot),
            column_summary: ColumnSummary::from_snapshot(&snapshot.column_summary),
            records: snapshot
                .records
                .iter()
                .map(SlottedRecord::from_snapshot)
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_summary_total_from_header() {
        let snapshot = ColumnSummarySnapshot {
            name_column: "Name".into(),
            category_column: None,
            numeric_columns: vec!["Flow".into()],
            all_columns: vec!["Name".into(), "Flow".into(), "Notes".into()],
        };
        let summary = ColumnSummary::from_snapshot(&snapshot);

        assert_eq!(summary.total_columns, 3);
        assert_eq!(summary.to_snapshot(), snapshot);
    }

    #[test]
    fn test_record_values_keep_slot_order() {
        let record = SlottedRecord {
            name: "P-1".into(),
            category: "Pump".into(),
            values: PerSlot::new([1.0, 2.0, 3.0]),
        };
        let snapshot = record.to_snapshot();

        assert_eq!(snapshot.values, [1.0, 2.0, 3.0]);
        assert_eq!(SlottedRecord::from_snapshot(&snapshot), record);
    }
}
