//! Data model types for equipment dataset analysis.
//!
//! This crate holds the plain data structures shared by the ingestion,
//! analysis, storage and reporting crates:
//!
//! - [`RawTable`]: a parsed upload, header order preserved
//! - [`ColumnRoles`] / [`ColumnSummary`]: which column plays which role
//! - [`EquipmentRecord`] / [`SlottedRecord`]: one normalized row
//! - [`ParameterSlot`] / [`ParameterSlotMapping`] / [`PerSlot`]: the three fixed
//!   parameter positions every upload is mapped onto
//! - [`ColumnStatistics`] / [`DatasetSummary`]: aggregates over a record set
//! - [`DatasetInfo`], [`SummaryView`], [`UploadOutcome`]: consumer-facing views
//!
//! # Example
//!
//! ```
//! use eqv_model::{ParameterSlot, PerSlot};
//!
//! let averages = PerSlot::new([9.17, 2.6, 0.0]);
//! assert_eq!(averages[ParameterSlot::Slot2], 2.6);
//! ```

mod dataset;
mod record;
mod roles;
mod slots;
mod statistics;
mod table;

pub use dataset::{ColumnRange, DatasetDetail, DatasetInfo, SlotRange, SummaryView, UploadOutcome};
pub use record::{DEFAULT_CATEGORY, EquipmentRecord, SlottedRecord};
pub use roles::{ColumnRoles, ColumnSummary};
pub use slots::{ParameterSlot, ParameterSlotMapping, PerSlot, SlotBinding};
pub use statistics::{ColumnStatistics, DatasetSummary, Quartiles, SlotStatistics, round2};
pub use table::RawTable;
