//! Store behaviour across reopen, failed writes and concurrent writers.

use std::fs;
use std::path::Path;
use std::thread;

use chrono::{TimeZone, Utc};
use eqv_model::{ColumnSummary, PerSlot, SlottedRecord};
use eqv_store::{NewAccount, NewDataset, Store, StoreConfig, StoreError};
use tempfile::tempdir;

fn config() -> StoreConfig {
    StoreConfig {
        password_rounds: 10,
        ..StoreConfig::default()
    }
}

fn open(path: &Path) -> Store {
    Store::open(path, config()).unwrap()
}

fn alice() -> NewAccount {
    NewAccount {
        username: "alice".into(),
        email: "alice@plant.io".into(),
        password: "Secret#123".into(),
    }
}

fn dataset(name: &str, minute: u32) -> NewDataset {
    let summary = ColumnSummary {
        total_columns: 3,
        name_column: "Name".into(),
        category_column: Some("Type".into()),
        numeric_columns: vec!["Flow".into()],
        all_columns: vec!["Name".into(), "Type".into(), "Flow".into()],
    };
    let records = vec![
        SlottedRecord {
            name: "Pump-1".into(),
            category: "Pump".into(),
            values: PerSlot::new([12.5, 0.0, 0.0]),
        },
        SlottedRecord {
            name: "Valve-1".into(),
            category: "Valve".into(),
            values: PerSlot::new([0.0, 0.0, 0.0]),
        },
    ];
    let mut dataset = NewDataset::new(name, "abc123", summary, PerSlot::new([6.25, 0.0, 0.0]), records);
    dataset.uploaded_at = Utc.with_ymd_and_hms(2026, 3, 1, 9, minute, 0).unwrap();
    dataset
}

#[test]
fn reopened_store_keeps_accounts_and_datasets() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("store.eqv");

    let id = {
        let store = open(&path);
        store.register_account(&alice()).unwrap();
        store.create_dataset("alice", dataset("plant.csv", 0)).unwrap().id
    };

    let store = open(&path);
    assert!(store.authenticate("alice", "Secret#123").is_ok());

    let detail = store.get_dataset("alice", id).unwrap();
    assert_eq!(detail.info.name, "plant.csv");
    assert_eq!(detail.info.total_count, 2);
    assert_eq!(detail.info.averages.into_array(), [6.25, 0.0, 0.0]);
    assert_eq!(detail.info.uploaded_at, Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0).unwrap());
    assert_eq!(detail.column_summary.category_column.as_deref(), Some("Type"));
    assert_eq!(detail.records[1].name, "Valve-1");
}

#[test]
fn ids_keep_increasing_after_reopen() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("store.eqv");

    let first = {
        let store = open(&path);
        store.register_account(&alice()).unwrap();
        let info = store.create_dataset("alice", dataset("a.csv", 0)).unwrap();
        store.delete_dataset("alice", info.id).unwrap();
        info.id
    };

    let store = open(&path);
    let second = store.create_dataset("alice", dataset("b.csv", 1)).unwrap().id;
    assert!(second > first);
}

#[test]
fn failed_write_leaves_nothing_behind() {
    let dir = tempdir().unwrap();
    let store_dir = dir.path().join("data");
    fs::create_dir(&store_dir).unwrap();
    let path = store_dir.join("store.eqv");

    let store = open(&path);
    store.register_account(&alice()).unwrap();

    // Occupy the temp file path with a directory so the next write fails.
    fs::create_dir(path.with_extension(format!("eqv.{}.tmp", std::process::id()))).unwrap();

    let result = store.create_dataset("alice", dataset("a.csv", 0));
    assert!(matches!(result, Err(StoreError::Io { .. })));
    assert!(store.list_datasets("alice").unwrap().is_empty());

    let reopened = open(&path);
    assert!(reopened.list_datasets("alice").unwrap().is_empty());
    assert!(reopened.account("alice").is_ok());
}

#[test]
fn custom_retention() {
    let store = Store::in_memory(StoreConfig {
        retention: 2,
        ..config()
    });
    store.register_account(&alice()).unwrap();
    for minute in 0..4 {
        store.create_dataset("alice", dataset("d.csv", minute)).unwrap();
    }

    let ids: Vec<u64> = store.list_datasets("alice").unwrap().iter().map(|d| d.id).collect();
    assert_eq!(ids, [4, 3]);
}

#[test]
fn two_handles_on_one_file_keep_both_uploads() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("store.eqv");
    open(&path).register_account(&alice()).unwrap();

    let first = open(&path);
    let second = open(&path);
    let a = first.create_dataset("alice", dataset("a.csv", 0)).unwrap();
    let b = second.create_dataset("alice", dataset("b.csv", 1)).unwrap();
    assert_ne!(a.id, b.id);

    let names: Vec<String> = open(&path)
        .list_datasets("alice")
        .unwrap()
        .into_iter()
        .map(|d| d.name)
        .collect();
    assert_eq!(names, ["b.csv", "a.csv"]);

    // A handle opened before the other write still reads it.
    assert_eq!(first.get_dataset("alice", b.id).unwrap().info.name, "b.csv");
}

#[test]
fn concurrent_writers_serialize() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("store.eqv");
    open(&path).register_account(&alice()).unwrap();
    let roomy = StoreConfig {
        retention: 100,
        ..config()
    };

    let workers: Vec<_> = (0..4)
        .map(|worker| {
            let path = path.clone();
            thread::spawn(move || {
                let store = Store::open(&path, roomy).unwrap();
                (0..3)
                    .map(|upload| {
                        let name = format!("w{worker}_{upload}.csv");
                        store.create_dataset("alice", dataset(&name, 0)).unwrap().id
                    })
                    .collect::<Vec<u64>>()
            })
        })
        .collect();

    let mut ids: Vec<u64> = workers
        .into_iter()
        .flat_map(|worker| worker.join().unwrap())
        .collect();
    ids.sort_unstable();
    assert_eq!(ids, (1..=12).collect::<Vec<u64>>());

    let stored = Store::open(&path, roomy).unwrap().list_datasets("alice").unwrap();
    assert_eq!(stored.len(), 12);
}

#[test]
fn retention_applies_across_handles() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("store.eqv");
    open(&path).register_account(&alice()).unwrap();

    for minute in 0..6 {
        open(&path).create_dataset("alice", dataset("d.csv", minute)).unwrap();
    }

    let ids: Vec<u64> = open(&path).list_datasets("alice").unwrap().iter().map(|d| d.id).collect();
    assert_eq!(ids, [6, 5, 4, 3, 2]);
}
