//! The account and dataset store.

use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, SecondsFormat, Utc};

use eqv_model::{ColumnSummary, DatasetDetail, DatasetInfo, PerSlot, SlottedRecord};

use crate::accounts::{
    Account, DEFAULT_PASSWORD_ROUNDS, NewAccount, hash_password, new_salt, validate_registration,
    verify_password,
};
use crate::convert::{FromSnapshot, ToSnapshot};
use crate::error::{Result, StoreError};
use crate::io::{StoreLock, load_store, save_store};
use crate::types::{AccountSnapshot, DatasetSnapshot, StoreFile};

/// Number of datasets kept per owner by default.
pub const DEFAULT_RETENTION: usize = 5;

/// Store behaviour settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreConfig {
    /// Datasets kept per owner; older ones are purged on upload.
    pub retention: usize,
    /// PBKDF2 rounds for newly registered passwords.
    pub password_rounds: u32,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            retention: DEFAULT_RETENTION,
            password_rounds: DEFAULT_PASSWORD_ROUNDS,
        }
    }
}

/// A dataset ready to be persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct NewDataset {
    /// Uploaded file name.
    pub name: String,
    pub source_hash: String,
    pub uploaded_at: DateTime<Utc>,
    pub column_summary: ColumnSummary,
    /// Rounded slot averages.
    pub averages: PerSlot<f64>,
    pub records: Vec<SlottedRecord>,
}

impl NewDataset {
    /// Dataset stamped with the current time.
    pub fn new(
        name: impl Into<String>,
        source_hash: impl Into<String>,
        column_summary: ColumnSummary,
        averages: PerSlot<f64>,
        records: Vec<SlottedRecord>,
    ) -> Self {
        Self {
            name: name.into(),
            source_hash: source_hash.into(),
            uploaded_at: Utc::now(),
            column_summary,
            averages,
            records,
        }
    }
}

/// Durable store of accounts and their datasets.
///
/// Every mutation runs under an exclusive lock file: the state is reloaded
/// from disk, changed, written atomically and only then made visible. Other
/// processes sharing the file therefore never lose each other's changes. A
/// failed write leaves the file unchanged. Reads reload the file, which is
/// always complete because saves replace it by rename.
#[derive(Debug)]
pub struct Store {
    path: Option<PathBuf>,
    config: StoreConfig,
    state: Mutex<StoreFile>,
}

impl Store {
    /// Opens the store at `path`, starting empty if the file does not exist.
    ///
    /// The file is created on the first mutation.
    pub fn open(path: impl Into<PathBuf>, config: StoreConfig) -> Result<Self> {
        let path = path.into();
        let state = if path.exists() {
            load_store(&path)?
        } else {
            tracing::debug!(path = %path.display(), "Store file missing, starting empty");
            StoreFile::new()
        };

        Ok(Self {
            path: Some(path),
            config,
            state: Mutex::new(state),
        })
    }

    /// A store that is never written to disk.
    pub fn in_memory(config: StoreConfig) -> Self {
        Self {
            path: None,
            config,
            state: Mutex::new(StoreFile::new()),
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn config(&self) -> StoreConfig {
        self.config
    }

    fn lock(&self) -> MutexGuard<'_, StoreFile> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Latest committed state of the backing file.
    fn load_current(path: &Path) -> Result<StoreFile> {
        if path.exists() {
            load_store(path)
        } else {
            Ok(StoreFile::new())
        }
    }

    /// State for a read, refreshed from disk for file-backed stores.
    fn read(&self) -> Result<MutexGuard<'_, StoreFile>> {
        let mut state = self.lock();
        if let Some(path) = &self.path {
            *state = Self::load_current(path)?;
        }
        Ok(state)
    }

    /// Applies `change` to the latest state and commits it.
    fn mutate<T>(&self, change: impl FnOnce(&mut StoreFile) -> Result<T>) -> Result<T> {
        let mut state = self.lock();
        let Some(path) = &self.path else {
            let mut next = state.clone();
            let output = change(&mut next)?;
            *state = next;
            return Ok(output);
        };

        let _file_lock = StoreLock::acquire(path)?;
        let mut next = Self::load_current(path)?;
        *state = next.clone();
        let output = change(&mut next)?;
        save_store(&next, path)?;
        *state = next;
        Ok(output)
    }

    // === Accounts ===

    /// Registers a new account.
    ///
    /// # Errors
    ///
    /// [`StoreError::InvalidRegistration`] when a rule is violated,
    /// [`StoreError::UsernameTaken`] / [`StoreError::EmailTaken`] on
    /// duplicates (emails compare case-insensitively).
    pub fn register_account(&self, account: &NewAccount) -> Result<Account> {
        validate_registration(account)?;
        let salt = new_salt();
        let password_hash = hash_password(&salt, &account.password, self.config.password_rounds);

        self.mutate(move |state| {
            if state.account(&account.username).is_some() {
                return Err(StoreError::UsernameTaken {
                    username: account.username.clone(),
                });
            }
            if state
                .accounts
                .iter()
                .any(|a| a.email.eq_ignore_ascii_case(&account.email))
            {
                return Err(StoreError::EmailTaken {
                    email: account.email.clone(),
                });
            }

            let snapshot = AccountSnapshot {
                username: account.username.clone(),
                email: account.email.clone(),
                password_hash,
                salt,
                created_at: Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true),
            };
            let created = Account::from(&snapshot);
            state.accounts.push(snapshot);

            tracing::info!(username = %created.username, "Registered account");
            Ok(created)
        })
    }

    /// Checks credentials; `login` is a username or an email address.
    pub fn authenticate(&self, login: &str, password: &str) -> Result<Account> {
        let state = self.read()?;
        let account = state
            .accounts
            .iter()
            .find(|a| a.username == login || a.email.eq_ignore_ascii_case(login))
            .filter(|a| verify_password(a, password))
            .ok_or(StoreError::InvalidCredentials)?;

        Ok(Account::from(account))
    }

    pub fn account(&self, username: &str) -> Result<Account> {
        self.read()?
            .account(username)
            .map(Account::from)
            .ok_or_else(|| StoreError::AccountNotFound {
                username: username.to_string(),
            })
    }

    /// Deletes an account and every dataset it owns.
    ///
    /// Returns the number of datasets removed.
    pub fn delete_account(&self, username: &str, password: &str) -> Result<usize> {
        self.mutate(|state| {
            let account = state
                .account(username)
                .filter(|a| verify_password(a, password))
                .ok_or(StoreError::InvalidCredentials)?;
            let username = account.username.clone();

            state.accounts.retain(|a| a.username != username);
            let before = state.datasets.len();
            state.datasets.retain(|d| d.owner != username);
            let removed = before - state.datasets.len();

            tracing::info!(username = %username, datasets = removed, "Deleted account");
            Ok(removed)
        })
    }

    // === Datasets ===

    /// Persists a dataset for `owner` and enforces the retention limit.
    ///
    /// After the insert the owner keeps only their `retention` newest
    /// datasets (by upload time, then id). Older ones are purged with
    /// their records.
    pub fn create_dataset(&self, owner: &str, dataset: NewDataset) -> Result<DatasetInfo> {
        let retention = self.config.retention;

        self.mutate(|state| {
            if state.account(owner).is_none() {
                return Err(StoreError::AccountNotFound {
                    username: owner.to_string(),
                });
            }

            let id = state.next_dataset_id;
            state.next_dataset_id += 1;

            let snapshot = DatasetSnapshot {
                id,
                owner: owner.to_string(),
                name: dataset.name,
                uploaded_at: dataset
                    .uploaded_at
                    .to_rfc3339_opts(SecondsFormat::Micros, true),
                source_hash: dataset.source_hash,
                total_count: dataset.records.len() as u64,
                averages: dataset.averages.into_array(),
                column_summary: dataset.column_summary.to_snapshot(),
                records: dataset.records.iter().map(ToSnapshot::to_snapshot).collect(),
            };
            let info = DatasetInfo::from_snapshot(&snapshot);
            state.datasets.push(snapshot);

            let purged = purge_expired(state, owner, retention);
            if !purged.is_empty() {
                tracing::info!(owner, purged = ?purged, "Purged datasets beyond retention");
            }

            tracing::info!(owner, id, rows = info.total_count, "Stored dataset");
            Ok(info)
        })
    }

    /// The owner's datasets, newest first, at most `retention` entries.
    pub fn list_datasets(&self, owner: &str) -> Result<Vec<DatasetInfo>> {
        let state = self.read()?;
        let mut datasets: Vec<&DatasetSnapshot> = state.datasets_of(owner).collect();
        sort_newest_first(&mut datasets);

        Ok(datasets
            .into_iter()
            .take(self.config.retention)
            .map(DatasetInfo::from_snapshot)
            .collect())
    }

    /// A dataset with every record.
    ///
    /// # Errors
    ///
    /// [`StoreError::DatasetNotFound`] if the id does not exist or belongs
    /// to another owner.
    pub fn get_dataset(&self, owner: &str, id: u64) -> Result<DatasetDetail> {
        let state = self.read()?;
        state
            .datasets_of(owner)
            .find(|d| d.id == id)
            .map(DatasetDetail::from_snapshot)
            .ok_or(StoreError::DatasetNotFound { id })
    }

    /// Deletes one of the owner's datasets with its records.
    pub fn delete_dataset(&self, owner: &str, id: u64) -> Result<()> {
        self.mutate(|state| {
            let index = state
                .datasets
                .iter()
                .position(|d| d.id == id && d.owner == owner)
                .ok_or(StoreError::DatasetNotFound { id })?;
            state.datasets.remove(index);

            tracing::info!(owner, id, "Deleted dataset");
            Ok(())
        })
    }
}

fn sort_newest_first(datasets: &mut [&DatasetSnapshot]) {
    datasets.sort_by(|a, b| {
        b.uploaded_at()
            .cmp(&a.uploaded_at())
            .then_with(|| b.id.cmp(&a.id))
    });
}

/// Removes the owner's datasets beyond the newest `retention`, returning
/// their ids.
fn purge_expired(state: &mut StoreFile, owner: &str, retention: usize) -> Vec<u64> {
    let mut owned: Vec<&DatasetSnapshot> = state.datasets_of(owner).collect();
    sort_newest_first(&mut owned);
    let expired: Vec<u64> = owned.iter().skip(retention).map(|d| d.id).collect();

    if !expired.is_empty() {
        state.datasets.retain(|d| !expired.contains(&d.id));
    }
    expired
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn config() -> StoreConfig {
        StoreConfig {
            password_rounds: 10,
            ..StoreConfig::default()
        }
    }

    fn store() -> Store {
        let store = Store::in_memory(config());
        store.register_account(&new_account("alice")).unwrap();
        store
    }

    fn new_account(username: &str) -> NewAccount {
        NewAccount {
            username: username.into(),
            email: format!("{username}@plant.io"),
            password: "Secret#123".into(),
        }
    }

    fn dataset(name: &str, minute: u32) -> NewDataset {
        let summary = ColumnSummary {
            total_columns: 2,
            name_column: "Name".into(),
            category_column: None,
            numeric_columns: vec!["Flow".into()],
            all_columns: vec!["Name".into(), "Flow".into()],
        };
        let mut dataset = NewDataset::new(
            name,
            "hash",
            summary,
            PerSlot::new([1.0, 0.0, 0.0]),
            vec![SlottedRecord {
                name: "P-1".into(),
                category: "Equipment".into(),
                values: PerSlot::new([1.0, 0.0, 0.0]),
            }],
        );
        dataset.uploaded_at = Utc.with_ymd_and_hms(2026, 3, 1, 12, minute, 0).unwrap();
        dataset
    }

    #[test]
    fn test_duplicate_username_and_email() {
        let store = store();

        let mut same_name = new_account("alice");
        same_name.email = "other@plant.io".into();
        assert!(matches!(
            store.register_account(&same_name),
            Err(StoreError::UsernameTaken { .. })
        ));

        let mut same_email = new_account("bob");
        same_email.email = "ALICE@plant.io".into();
        assert!(matches!(
            store.register_account(&same_email),
            Err(StoreError::EmailTaken { .. })
        ));
    }

    #[test]
    fn test_authenticate_by_username_or_email() {
        let store = store();

        assert_eq!(store.authenticate("alice", "Secret#123").unwrap().username, "alice");
        assert_eq!(store.authenticate("alice@plant.io", "Secret#123").unwrap().username, "alice");
        assert!(matches!(
            store.authenticate("alice", "wrong"),
            Err(StoreError::InvalidCredentials)
        ));
        assert!(matches!(
            store.authenticate("nobody", "Secret#123"),
            Err(StoreError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_retention_keeps_five_newest() {
        let store = store();
        for minute in 0..6 {
            store.create_dataset("alice", dataset(&format!("d{minute}.csv"), minute)).unwrap();
        }

        let names: Vec<String> = store
            .list_datasets("alice")
            .unwrap()
            .into_iter()
            .map(|d| d.name)
            .collect();
        assert_eq!(names, ["d5.csv", "d4.csv", "d3.csv", "d2.csv", "d1.csv"]);
        assert!(matches!(
            store.get_dataset("alice", 1),
            Err(StoreError::DatasetNotFound { id: 1 })
        ));
    }

    #[test]
    fn test_retention_ties_broken_by_id() {
        let store = store();
        for i in 0..6 {
            store.create_dataset("alice", dataset(&format!("d{i}.csv"), 0)).unwrap();
        }

        let ids: Vec<u64> = store.list_datasets("alice").unwrap().iter().map(|d| d.id).collect();
        assert_eq!(ids, [6, 5, 4, 3, 2]);
    }

    #[test]
    fn test_retention_is_per_owner() {
        let store = store();
        store.register_account(&new_account("bob")).unwrap();
        store.create_dataset("bob", dataset("bob.csv", 0)).unwrap();
        for minute in 1..7 {
            store.create_dataset("alice", dataset("a.csv", minute)).unwrap();
        }

        assert_eq!(store.list_datasets("bob").unwrap().len(), 1);
        assert_eq!(store.list_datasets("alice").unwrap().len(), 5);
    }

    #[test]
    fn test_datasets_are_owner_scoped() {
        let store = store();
        store.register_account(&new_account("bob")).unwrap();
        let info = store.create_dataset("alice", dataset("a.csv", 0)).unwrap();

        assert!(matches!(
            store.get_dataset("bob", info.id),
            Err(StoreError::DatasetNotFound { .. })
        ));
        assert!(matches!(
            store.delete_dataset("bob", info.id),
            Err(StoreError::DatasetNotFound { .. })
        ));
        assert!(store.get_dataset("alice", info.id).is_ok());
    }

    #[test]
    fn test_delete_dataset() {
        let store = store();
        let info = store.create_dataset("alice", dataset("a.csv", 0)).unwrap();

        store.delete_dataset("alice", info.id).unwrap();
        assert!(store.list_datasets("alice").unwrap().is_empty());
    }

    #[test]
    fn test_delete_account_cascades() {
        let store = store();
        store.create_dataset("alice", dataset("a.csv", 0)).unwrap();
        store.create_dataset("alice", dataset("b.csv", 1)).unwrap();

        assert!(matches!(
            store.delete_account("alice", "wrong"),
            Err(StoreError::InvalidCredentials)
        ));
        assert_eq!(store.delete_account("alice", "Secret#123").unwrap(), 2);
        assert!(store.list_datasets("alice").unwrap().is_empty());
        assert!(matches!(
            store.account("alice"),
            Err(StoreError::AccountNotFound { .. })
        ));
    }

    #[test]
    fn test_create_dataset_requires_account() {
        let store = store();
        assert!(matches!(
            store.create_dataset("ghost", dataset("a.csv", 0)),
            Err(StoreError::AccountNotFound { .. })
        ));
    }

    #[test]
    fn test_detail_round_trips_records() {
        let store = store();
        let info = store.create_dataset("alice", dataset("a.csv", 0)).unwrap();
        let detail = store.get_dataset("alice", info.id).unwrap();

        assert_eq!(detail.info, info);
        assert_eq!(detail.records.len(), 1);
        assert_eq!(detail.records[0].values.into_array(), [1.0, 0.0, 0.0]);
        assert_eq!(detail.column_summary.total_columns, 2);
    }
}
