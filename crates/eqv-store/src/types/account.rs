//! Account snapshot.

use chrono::{DateTime, Utc};
use rkyv::{Archive, Deserialize, Serialize};

/// A registered account with its salted password digest.
#[derive(Debug, Clone, PartialEq, Archive, Serialize, Deserialize)]
pub struct AccountSnapshot {
    pub username: String,
    pub email: String,
    /// Hex random salt.
    pub salt: String,
    /// `pbkdf2_sha256$<rounds>$<hex digest>` of salt and password.
    pub password_hash: String,
    /// RFC 3339 creation timestamp.
    pub created_at: String,
}

impl AccountSnapshot {
    /// Parse the created_at timestamp.
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(&self.created_at)
            .ok()
            .map(|dt| dt.with_timezone(&Utc))
    }
}
