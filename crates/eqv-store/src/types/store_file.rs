//! Root store file type.

use rkyv::{Archive, Deserialize, Serialize};

use super::{AccountSnapshot, DatasetSnapshot};

/// Magic bytes identifying a store file.
pub const MAGIC_BYTES: [u8; 4] = *b"EQV\x01";

/// Current schema version.
pub const CURRENT_SCHEMA_VERSION: u32 = 1;

/// Top-level structure serialized to `.eqv` files.
#[derive(Debug, Clone, PartialEq, Archive, Serialize, Deserialize)]
pub struct StoreFile {
    /// Schema version (for future migrations).
    pub schema_version: u32,

    /// Id handed to the next created dataset.
    pub next_dataset_id: u64,

    pub accounts: Vec<AccountSnapshot>,

    pub datasets: Vec<DatasetSnapshot>,
}

impl StoreFile {
    /// An empty store.
    pub fn new() -> Self {
        Self {
            schema_version: CURRENT_SCHEMA_VERSION,
            next_dataset_id: 1,
            accounts: Vec::new(),
            datasets: Vec::new(),
        }
    }

    pub fn account(&self, username: &str) -> Option<&AccountSnapshot> {
        self.accounts.iter().find(|a| a.username == username)
    }

    /// Datasets of one owner, in insertion order.
    pub fn datasets_of<'a>(&'a self, owner: &'a str) -> impl Iterator<Item = &'a DatasetSnapshot> + 'a {
        self.datasets.iter().filter(move |d| d.owner == owner)
    }
}

impl Default for StoreFile {
    fn default() -> Self {
        Self::new()
    }
}
