//! Descriptive statistics over normalized records.

use std::collections::BTreeMap;

use eqv_model::{
    ColumnStatistics, DatasetSummary, EquipmentRecord, ParameterSlotMapping, PerSlot, Quartiles,
    SlotStatistics, SlottedRecord,
};

/// Computes full-precision statistics over a list of values.
///
/// Uses population variance, which is defined as 0 for fewer than two
/// values. An empty list yields all-zero statistics without quartiles.
pub fn column_statistics(values: &[f64]) -> ColumnStatistics {
    let count = values.len();
    if count == 0 {
        return ColumnStatistics::default();
    }

    let n = count as f64;
    let average = values.iter().sum::<f64>() / n;
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let variance = if count < 2 {
        0.0
    } else {
        values.iter().map(|v| (v - average).powi(2)).sum::<f64>() / n
    };

    ColumnStatistics {
        count,
        average,
        min,
        max,
        std: variance.sqrt(),
        variance,
        quartiles: quartiles(values),
    }
}

/// Order-statistic quartiles at indices `n/4`, `n/2` and `3n/4` of the
/// ascending-sorted values, without interpolation.
pub fn quartiles(values: &[f64]) -> Option<Quartiles> {
    if values.is_empty() {
        return None;
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let n = sorted.len();
    let q1 = sorted[n / 4];
    let q3 = sorted[3 * n / 4];

    Some(Quartiles {
        q1,
        median: sorted[n / 2],
        q3,
        iqr: q3 - q1,
    })
}

/// Counts records per observed category.
pub fn category_counts<'a>(categories: impl IntoIterator<Item = &'a str>) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for category in categories {
        *counts.entry(category.to_string()).or_insert(0) += 1;
    }
    counts
}

/// Statistics over a set of equipment records.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordAggregate {
    pub total_count: usize,
    /// Per-column statistics in the requested column order.
    pub columns: Vec<(String, ColumnStatistics)>,
    pub category_counts: BTreeMap<String, usize>,
}

impl RecordAggregate {
    /// Statistics for one column, if it was aggregated.
    pub fn column(&self, name: &str) -> Option<&ColumnStatistics> {
        self.columns
            .iter()
            .find(|(column, _)| column == name)
            .map(|(_, stats)| stats)
    }
}

/// Aggregates the given numeric columns over every record.
///
/// Columns missing from a record contribute `0.0`.
pub fn aggregate_records(records: &[EquipmentRecord], columns: &[String]) -> RecordAggregate {
    let columns = columns
        .iter()
        .map(|column| {
            let values: Vec<f64> = records.iter().map(|r| r.value(column)).collect();
            (column.clone(), column_statistics(&values))
        })
        .collect();

    RecordAggregate {
        total_count: records.len(),
        columns,
        category_counts: category_counts(records.iter().map(|r| r.category.as_str())),
    }
}

/// Aggregates slotted records into a labelled [`DatasetSummary`].
///
/// Unbound slots hold `0.0` in every record and summarize accordingly.
pub fn summarize_slots(rows: &[SlottedRecord], mapping: &ParameterSlotMapping) -> DatasetSummary {
    let parameters = PerSlot::from_fn(|slot| {
        let values: Vec<f64> = rows.iter().map(|row| row.value(slot)).collect();
        SlotStatistics {
            slot,
            label: mapping.label(slot).to_string(),
            statistics: column_statistics(&values),
        }
    });

    DatasetSummary {
        total_count: rows.len(),
        parameters,
        category_counts: category_counts(rows.iter().map(|r| r.category.as_str())),
    }
}
