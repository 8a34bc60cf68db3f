//! Cross-process write lock for a store file.

use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};

use crate::error::{Result, StoreError};

/// Exclusive lock on the `.eqv.lock` file next to a store.
///
/// Held for the whole read-modify-write of a mutation, so concurrent
/// processes apply their changes one after another. Released on drop.
#[derive(Debug)]
pub struct StoreLock {
    file: File,
    path: PathBuf,
}

impl StoreLock {
    /// Blocks until the lock for `store_path` is acquired.
    pub fn acquire(store_path: &Path) -> Result<Self> {
        let path = lock_path(store_path);
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| StoreError::Io {
                operation: "create directory",
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(&path)
            .map_err(|e| StoreError::Io {
                operation: "open lock",
                path: path.clone(),
                source: e,
            })?;
        file.lock().map_err(|e| StoreError::Io {
            operation: "lock",
            path: path.clone(),
            source: e,
        })?;

        tracing::trace!(path = %path.display(), "Acquired store lock");
        Ok(Self { file, path })
    }
}

impl Drop for StoreLock {
    fn drop(&mut self) {
        if let Err(error) = self.file.unlock() {
            tracing::warn!(path = %self.path.display(), %error, "Failed to release store lock");
        }
    }
}

/// Lock file used for `store_path`.
fn lock_path(store_path: &Path) -> PathBuf {
    store_path.with_extension("eqv.lock")
}

/// Temp file a save writes before renaming it over `store_path`.
///
/// Unique per process; writers inside one process are serialized by
/// [`StoreLock`].
pub fn temp_path(store_path: &Path) -> PathBuf {
    store_path.with_extension(format!("eqv.{}.tmp", std::process::id()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;
    use std::thread;
    use std::time::Duration;
    use tempfile::tempdir;

    #[test]
    fn test_lock_file_is_created_next_to_store() {
        let dir = tempdir().unwrap();
        let store_path = dir.path().join("nested").join("store.eqv");

        let _lock = StoreLock::acquire(&store_path).unwrap();
        assert!(dir.path().join("nested").join("store.eqv.lock").exists());
    }

    #[test]
    fn test_second_holder_waits_for_release() {
        let dir = tempdir().unwrap();
        let store_path = dir.path().join("store.eqv");
        let first = StoreLock::acquire(&store_path).unwrap();

        let (sender, receiver) = mpsc::channel();
        let waiter_path = store_path.clone();
        let waiter = thread::spawn(move || {
            let _second = StoreLock::acquire(&waiter_path).unwrap();
            sender.send(()).unwrap();
        });

        assert!(receiver.recv_timeout(Duration::from_millis(200)).is_err());
        drop(first);
        assert!(receiver.recv_timeout(Duration::from_secs(5)).is_ok());
        waiter.join().unwrap();
    }

    #[test]
    fn test_temp_path_is_per_process() {
        let path = temp_path(Path::new("/data/store.eqv"));
        assert_eq!(
            path,
            PathBuf::from(format!("/data/store.eqv.{}.tmp", std::process::id()))
        );
    }
}
