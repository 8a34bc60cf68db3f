//! Store error types.
//!
//! All store operations return structured errors that provide
//! user-friendly messages and optional remediation hints.

use std::path::PathBuf;
use thiserror::Error;

/// Store operation error.
#[derive(Debug, Error)]
pub enum StoreError {
    // === File Errors ===
    /// File I/O error.
    #[error("Failed to {operation} file: {path}")]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Invalid file format (not a store file).
    #[error("Invalid store file format")]
    InvalidFormat { path: PathBuf, reason: String },

    /// Unsupported schema version.
    #[error("Store file version {found} is not supported (maximum: {max_supported})")]
    UnsupportedVersion {
        found: u32,
        max_supported: u32,
        path: PathBuf,
    },

    /// Serialization error.
    #[error("Failed to serialize store data")]
    Serialization {
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Deserialization error.
    #[error("Failed to deserialize store data")]
    Deserialization {
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Atomic write failed (temp file couldn't be renamed).
    #[error("Failed to complete save operation")]
    AtomicWriteFailed {
        temp_path: PathBuf,
        target_path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // === Account Errors ===
    /// Registration input rejected.
    #[error("{reason}")]
    InvalidRegistration { reason: &'static str },

    /// Username already registered.
    #[error("Username already exists: {username}")]
    UsernameTaken { username: String },

    /// Email already registered.
    #[error("Email already registered: {email}")]
    EmailTaken { email: String },

    /// Unknown account or wrong password.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// No account with this username.
    #[error("Account not found: {username}")]
    AccountNotFound { username: String },

    // === Dataset Errors ===
    /// Dataset missing or owned by another account.
    #[error("Dataset not found: {id}")]
    DatasetNotFound { id: u64 },
}

impl StoreError {
    /// Get a user-friendly message for this error.
    pub fn user_message(&self) -> String {
        match self {
            Self::Io {
                operation, path, ..
            } => {
                format!("Could not {} the file at {}", operation, path.display())
            }
            Self::InvalidFormat { path, reason } => {
                format!(
                    "The file at {} is not a valid store file: {}",
                    path.display(),
                    reason
                )
            }
            Self::UnsupportedVersion {
                found,
                max_supported,
                ..
            } => {
                format!(
                    "This store was written by a newer version \
                    (file version {}, your version supports up to {}). \
                    Please update the application.",
                    found, max_supported
                )
            }
            Self::Serialization { .. } => "An error occurred while saving the store.".to_string(),
            Self::Deserialization { .. } => {
                "An error occurred while reading the store. The file may be corrupted.".to_string()
            }
            Self::AtomicWriteFailed { target_path, .. } => {
                format!(
                    "Could not save the file to {}. Please check disk space and permissions.",
                    target_path.display()
                )
            }
            Self::InvalidRegistration { reason } => (*reason).to_string(),
            Self::UsernameTaken { .. } => "Username already exists".to_string(),
            Self::EmailTaken { .. } => "Email already registered".to_string(),
            Self::InvalidCredentials => "Invalid credentials".to_string(),
            Self::AccountNotFound { username } => format!("No account named '{username}'"),
            Self::DatasetNotFound { id } => format!("Dataset {id} not found"),
        }
    }

    /// Get a suggestion for how to resolve this error.
    pub fn suggestion(&self) -> Option<String> {
        match self {
            Self::Io { operation, .. } => {
                if *operation == "read" {
                    Some("Check that the file exists and you have permission to read it.".into())
                } else {
                    Some("Check that you have permission to write to this location.".into())
                }
            }
            Self::UnsupportedVersion { .. } => {
                Some("Download the latest version of the application.".into())
            }
            Self::Deserialization { .. } | Self::InvalidFormat { .. } => {
                Some("Point --store at a different file or restore a backup.".into())
            }
            Self::AtomicWriteFailed { .. } => {
                Some("Ensure you have enough disk space and write permissions.".into())
            }
            Self::InvalidCredentials | Self::AccountNotFound { .. } => {
                Some("Run `eqv register` to create an account.".into())
            }
            Self::DatasetNotFound { .. } => Some("Run `eqv list` to see your datasets.".into()),
            _ => None,
        }
    }

    /// Returns true if the error was caused by invalid caller input rather
    /// than by the store itself.
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            Self::InvalidRegistration { .. }
                | Self::UsernameTaken { .. }
                | Self::EmailTaken { .. }
                | Self::InvalidCredentials
                | Self::AccountNotFound { .. }
                | Self::DatasetNotFound { .. }
        )
    }
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
