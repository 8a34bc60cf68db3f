//! Durable store for accounts and uploaded equipment datasets.
//!
//! # Features
//!
//! - **Atomic writes**: every mutation is written to a temp file and renamed
//!   into place before it becomes visible
//! - **Cross-process locking**: mutations reload and rewrite the file under
//!   an exclusive `.eqv.lock` file, so concurrent invocations never drop
//!   each other's uploads
//! - **Retention**: each owner keeps only their newest datasets
//!   ([`StoreConfig::retention`], default 5)
//! - **Cascade delete**: deleting an account or dataset removes its records
//! - **PBKDF2-SHA256 password hashes** with per-account salts
//!
//! # File Format
//!
//! `.eqv` files use a simple binary format:
//!
//! ```text
//! +------------------+
//! | Magic: "EQV\x01" | 4 bytes - file identification
//! +------------------+
//! | Version: 1       | 4 bytes - u32 little-endian schema version
//! +------------------+
//! | rkyv Payload     | Variable
//! +------------------+
//! ```
//!
//! # Example
//!
//! ```
//! use eqv_store::{NewAccount, Store, StoreConfig};
//!
//! let store = Store::in_memory(StoreConfig {
//!     password_rounds: 1_000,
//!     ..StoreConfig::default()
//! });
//! store.register_account(&NewAccount {
//!     username: "alice".into(),
//!     email: "alice@plant.io".into(),
//!     password: "Secret#123".into(),
//! })?;
//! assert!(store.list_datasets("alice")?.is_empty());
//! # Ok::<(), eqv_store::StoreError>(())
//! ```

mod accounts;
mod convert;
mod error;
mod io;
mod store;
mod types;

pub use accounts::{Account, NewAccount, validate_registration};
pub use convert::{FromSnapshot, ToSnapshot};
pub use error::{Result, StoreError};
pub use io::{load_store, save_store};
pub use store::{DEFAULT_RETENTION, NewDataset, Store, StoreConfig};
pub use types::{
    AccountSnapshot, CURRENT_SCHEMA_VERSION, ColumnSummarySnapshot, DatasetSnapshot, MAGIC_BYTES,
    RecordSnapshot, StoreFile,
};
