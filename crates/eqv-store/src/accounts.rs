//! Account validation and password digests.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sha2::Sha256;
use subtle::ConstantTimeEq;

use crate::error::{Result, StoreError};
use crate::types::AccountSnapshot;

/// Characters accepted as the special character of a password.
const PASSWORD_SPECIALS: &str = "!@#$%^&*(),.?\":{}|<>";

const MIN_PASSWORD_LEN: usize = 8;

/// Registration input.
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// A registered account as shown to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Account {
    pub username: String,
    pub email: String,
    pub created_at: Option<DateTime<Utc>>,
}

impl From<&AccountSnapshot> for Account {
    fn from(snapshot: &AccountSnapshot) -> Self {
        Self {
            username: snapshot.username.clone(),
            email: snapshot.email.clone(),
            created_at: snapshot.created_at(),
        }
    }
}

/// Checks the registration rules for username, email and password.
pub fn validate_registration(account: &NewAccount) -> Result<()> {
    let reject = |reason| Err(StoreError::InvalidRegistration { reason });

    if account.username.is_empty() || account.email.is_empty() || account.password.is_empty() {
        return reject("Username, email and password are required");
    }
    if !is_valid_username(&account.username) {
        return reject("Username must be 3-20 characters (letters, numbers, underscore only)");
    }
    if !is_valid_email(&account.email) {
        return reject("Invalid email format");
    }

    let password = &account.password;
    if password.chars().count() < MIN_PASSWORD_LEN {
        return reject("Password must be at least 8 characters");
    }
    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        return reject("Password must contain at least one uppercase letter");
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        return reject("Password must contain at least one number");
    }
    if !password.chars().any(|c| PASSWORD_SPECIALS.contains(c)) {
        return reject("Password must contain at least one special character");
    }

    Ok(())
}

fn is_valid_username(username: &str) -> bool {
    (3..=20).contains(&username.len())
        && username
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// `local@domain.tld` with no whitespace and a single `@`.
fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && !tld.is_empty(),
        None => false,
    }
}

/// Fresh random salt as hex.
pub(crate) fn new_salt() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}

/// Digest algorithm tag stored in front of every password hash.
const HASH_ALGORITHM: &str = "pbkdf2_sha256";

/// PBKDF2-HMAC-SHA256 rounds for new password hashes.
pub const DEFAULT_PASSWORD_ROUNDS: u32 = 600_000;

/// Encodes `pbkdf2_sha256$<rounds>$<hex digest>` for `password` under `salt`.
pub(crate) fn hash_password(salt: &str, password: &str, rounds: u32) -> String {
    let rounds = rounds.max(1);
    let digest = derive_key(salt, password, rounds);
    format!("{HASH_ALGORITHM}${rounds}${}", hex::encode(digest))
}

/// Checks `password` against the stored hash in constant time.
///
/// The round count is read from the stored hash, so accounts hashed under
/// an older setting keep verifying.
pub(crate) fn verify_password(account: &AccountSnapshot, password: &str) -> bool {
    let mut parts = account.password_hash.splitn(3, '$');
    let (Some(HASH_ALGORITHM), Some(rounds), Some(expected)) =
        (parts.next(), parts.next(), parts.next())
    else {
        return false;
    };
    let (Ok(rounds), Ok(expected)) = (rounds.parse::<u32>(), hex::decode(expected)) else {
        return false;
    };
    if rounds == 0 {
        return false;
    }

    let derived = derive_key(&account.salt, password, rounds);
    derived.as_slice().ct_eq(expected.as_slice()).into()
}

fn derive_key(salt: &str, password: &str, rounds: u32) -> [u8; 32] {
    pbkdf2::pbkdf2_hmac_array::<Sha256, 32>(password.as_bytes(), salt.as_bytes(), rounds)
}
