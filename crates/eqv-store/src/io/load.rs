//! Store loading operations.

use std::fs;
use std::path::Path;

use crate::error::{Result, StoreError};
use crate::types::{CURRENT_SCHEMA_VERSION, MAGIC_BYTES, StoreFile};

/// Load a store from an `.eqv` file.
pub fn load_store(path: &Path) -> Result<StoreFile> {
    let bytes = fs::read(path).map_err(|e| StoreError::Io {
        operation: "read",
        path: path.to_path_buf(),
        source: e,
    })?;

    parse_store_bytes(&bytes, path)
}

/// Parse store bytes and validate the format.
fn parse_store_bytes(bytes: &[u8], path: &Path) -> Result<StoreFile> {
    // Minimum size: magic (4) + version (4) + some payload
    if bytes.len() < 12 {
        return Err(StoreError::InvalidFormat {
            path: path.to_path_buf(),
            reason: "File too small".to_string(),
        });
    }

    if bytes[0..4] != MAGIC_BYTES {
        return Err(StoreError::InvalidFormat {
            path: path.to_path_buf(),
            reason: "Not an equipment store file (invalid magic bytes)".to_string(),
        });
    }

    let version = u32::from_le_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]);

    if version > CURRENT_SCHEMA_VERSION {
        return Err(StoreError::UnsupportedVersion {
            found: version,
            max_supported: CURRENT_SCHEMA_VERSION,
            path: path.to_path_buf(),
        });
    }

    let payload = &bytes[8..];

    let store: StoreFile = rkyv::from_bytes::<StoreFile, rkyv::rancor::Error>(payload).map_err(
        |e| StoreError::Deserialization {
            source: Box::new(std::io::Error::other(format!(
                "rkyv deserialization failed: {e}"
            ))),
        },
    )?;

    tracing::debug!(
        path = %path.display(),
        accounts = store.accounts.len(),
        datasets = store.datasets.len(),
        "Loaded store"
    );
    Ok(store)
}
