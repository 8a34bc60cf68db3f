//! Aggregate statistics types.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::slots::{ParameterSlot, PerSlot};

/// Order-statistic quartiles of an ascending-sorted value list.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quartiles {
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub iqr: f64,
}

/// Full-precision statistics for one numeric column.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ColumnStatistics {
    pub count: usize,
    pub average: f64,
    pub min: f64,
    pub max: f64,
    /// Population standard deviation (0 for fewer than two values).
    pub std: f64,
    /// Population variance (0 for fewer than two values).
    pub variance: f64,
    /// `None` for an empty column.
    pub quartiles: Option<Quartiles>,
}

impl ColumnStatistics {
    /// Coefficient of variation in percent against the given average.
    ///
    /// Returns 0 when the average is 0.
    pub fn coefficient_of_variation(&self, average: f64) -> f64 {
        if average == 0.0 {
            0.0
        } else {
            self.std / average * 100.0
        }
    }
}

/// Statistics for one parameter slot, labelled for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlotStatistics {
    pub slot: ParameterSlot,
    pub label: String,
    pub statistics: ColumnStatistics,
}

/// Aggregate over all records of one dataset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatasetSummary {
    pub total_count: usize,
    pub parameters: PerSlot<SlotStatistics>,
    /// Observed categories only.
    pub category_counts: BTreeMap<String, usize>,
}

impl DatasetSummary {
    /// Statistics of a single slot.
    pub fn slot(&self, slot: ParameterSlot) -> &ColumnStatistics {
        &self.parameters[slot].statistics
    }

    /// Share of each category in percent of `total_count`.
    pub fn category_percentages(&self) -> BTreeMap<String, f64> {
        self.category_counts
            .iter()
            .map(|(category, count)| {
                let share = if self.total_count == 0 {
                    0.0
                } else {
                    *count as f64 / self.total_count as f64 * 100.0
                };
                (category.clone(), share)
            })
            .collect()
    }
}

/// Rounds to two decimal places (half away from zero).
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
