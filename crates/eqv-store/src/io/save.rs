//! Store saving operations.

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use super::temp_path;
use crate::error::{Result, StoreError};
use crate::types::{CURRENT_SCHEMA_VERSION, MAGIC_BYTES, StoreFile};

/// Save the store to an `.eqv` file.
///
/// Uses atomic write (temp file + rename) so a failed save leaves the
/// previous file untouched. Concurrent writers must hold a
/// [`StoreLock`](super::StoreLock).
pub fn save_store(store: &StoreFile, path: &Path) -> Result<()> {
    let bytes = serialize_store(store)?;

    let temp_path = temp_path(path);

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| StoreError::Io {
            operation: "create directory",
            path: parent.to_path_buf(),
            source: e,
        })?;
    }

    let mut file = File::create(&temp_path).map_err(|e| StoreError::Io {
        operation: "create",
        path: temp_path.clone(),
        source: e,
    })?;

    file.write_all(&bytes).map_err(|e| StoreError::Io {
        operation: "write",
        path: temp_path.clone(),
        source: e,
    })?;

    file.sync_all().map_err(|e| StoreError::Io {
        operation: "sync",
        path: temp_path.clone(),
        source: e,
    })?;

    if let Err(e) = fs::rename(&temp_path, path) {
        let _ = fs::remove_file(&temp_path);
        return Err(StoreError::AtomicWriteFailed {
            temp_path,
            target_path: path.to_path_buf(),
            source: e,
        });
    }

    tracing::debug!(
        path = %path.display(),
        bytes = bytes.len(),
        datasets = store.datasets.len(),
        "Saved store"
    );
    Ok(())
}

/// Serialize the store to bytes.
///
/// Format:
/// - 4 bytes: Magic ("EQV\x01")
/// - 4 bytes: Schema version (u32 little-endian)
/// - N bytes: rkyv payload
fn serialize_store(store: &StoreFile) -> Result<Vec<u8>> {
    let rkyv_bytes = rkyv::to_bytes::<rkyv::rancor::Error>(store).map_err(|e| {
        StoreError::Serialization {
            source: Box::new(std::io::Error::other(format!(
                "rkyv serialization failed: {e}"
            ))),
        }
    })?;

    let mut output = Vec::with_capacity(8 + rkyv_bytes.len());
    output.extend_from_slice(&MAGIC_BYTES);
    output.extend_from_slice(&CURRENT_SCHEMA_VERSION.to_le_bytes());
    output.extend_from_slice(&rkyv_bytes);

    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_save_store() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("store.eqv");

        save_store(&StoreFile::new(), &path).unwrap();

        assert!(path.exists());
        assert!(!temp_path(&path).exists());
        let bytes = fs::read(&path).unwrap();
        assert_eq!(&bytes[0..4], &MAGIC_BYTES);
    }

    #[test]
    fn test_save_into_missing_directory_fails() {
        let dir = tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, b"file").unwrap();

        let result = save_store(&StoreFile::new(), &blocker.join("store.eqv"));
        assert!(matches!(result, Err(StoreError::Io { .. })));
    }
}
