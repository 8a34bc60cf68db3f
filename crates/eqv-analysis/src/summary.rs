//! Summary statistics for stored datasets.

use std::collections::BTreeMap;

use eqv_model::{DatasetDetail, SlotRange, SlottedRecord, SummaryView, round2};

use crate::aggregate::{category_counts, summarize_slots};
use crate::slots::map_parameter_slots;

/// Counts stored records per category.
pub fn category_distribution(rows: &[SlottedRecord]) -> BTreeMap<String, usize> {
    category_counts(rows.iter().map(|r| r.category.as_str()))
}

/// Recomputes the consumer-facing summary of a stored dataset.
///
/// Averages are the persisted rounded values. Std, variance and the
/// coefficient of variation are rounded to two decimals, the CV taken
/// against the persisted average. Min, max and quartiles keep full
/// precision.
pub fn build_summary_view(detail: &DatasetDetail) -> SummaryView {
    let mapping = map_parameter_slots(&detail.column_summary.numeric_columns);
    let summary = summarize_slots(&detail.records, &mapping);
    let averages = detail.info.averages;

    let ranges = summary.parameters.each_ref().map(|parameter| {
        let stats = &parameter.statistics;
        SlotRange {
            min: stats.min,
            max: stats.max,
            std: round2(stats.std),
            variance: round2(stats.variance),
            cv: round2(stats.coefficient_of_variation(averages[parameter.slot])),
        }
    });
    let quartiles = summary.parameters.each_ref().map(|p| p.statistics.quartiles);
    let category_percentages = summary
        .category_percentages()
        .into_iter()
        .map(|(category, share)| (category, round2(share)))
        .collect();

    SummaryView {
        id: detail.info.id,
        name: detail.info.name.clone(),
        uploaded_at: detail.info.uploaded_at,
        total_count: detail.info.total_count,
        column_mapping: mapping,
        averages,
        ranges,
        quartiles,
        category_counts: summary.category_counts,
        category_percentages,
    }
}
