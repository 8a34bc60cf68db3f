//! Persistence types (rkyv-serializable snapshots).

mod account;
mod dataset;
mod store_file;

pub use account::AccountSnapshot;
pub use dataset::{ColumnSummarySnapshot, DatasetSnapshot, RecordSnapshot};
pub use store_file::{CURRENT_SCHEMA_VERSION, MAGIC_BYTES, StoreFile};
