//! Equipment upload analysis.
//!
//! Turns a parsed [`RawTable`] into typed records and statistics in four
//! stages:
//!
//! 1. **Column classification** ([`classify`]): name column, category
//!    column and numeric columns, from headers and value distributions
//! 2. **Row normalization** ([`normalize_rows`]): one [`EquipmentRecord`]
//!    per row, malformed numeric cells coerced to `0.0`
//! 3. **Aggregation** ([`column_statistics`], [`summarize_slots`]): mean,
//!    min, max, population std/variance, order-statistic quartiles and
//!    category counts
//! 4. **Slot mapping** ([`map_parameter_slots`]): the first three numeric
//!    columns onto the three fixed parameter slots
//!
//! [`process_table`] runs all four for an upload; [`build_summary_view`]
//! recomputes statistics for a stored dataset.
//!
//! # Example
//!
//! ```
//! use eqv_analysis::process_table;
//! use eqv_model::{ParameterSlot, RawTable};
//!
//! let table = RawTable::from_rows(
//!     &["Name", "Type", "Flow"],
//!     &[&["Pump-1", "Centrifugal", "12.5"], &["Valve-1", "Control", "0.5"]],
//! );
//! let processed = process_table(&table).unwrap();
//! assert_eq!(processed.mapping.label(ParameterSlot::Slot1), "Flow");
//! assert_eq!(processed.mapping.label(ParameterSlot::Slot2), "Parameter 2");
//! ```
//!
//! [`RawTable`]: eqv_model::RawTable
//! [`EquipmentRecord`]: eqv_model::EquipmentRecord

mod aggregate;
mod classify;
mod error;
mod normalize;
mod numeric;
mod pipeline;
mod slots;
mod summary;

pub use aggregate::{
    RecordAggregate, aggregate_records, category_counts, column_statistics, quartiles,
    summarize_slots,
};
pub use classify::{CATEGORY_KEYWORDS, NAME_KEYWORDS, classify, infer_roles};
pub use error::{AnalysisError, Result};
pub use normalize::normalize_rows;
pub use numeric::{is_numeric, parse_numeric};
pub use pipeline::{ProcessedUpload, process_table};
pub use slots::{map_parameter_slots, slot_records};
pub use summary::{build_summary_view, category_distribution};
