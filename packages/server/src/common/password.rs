//! Salted password hashing.
//!
//! Stored format is `<salt>$<hex digest>` where the digest is
//! SHA-256 over salt then password.

use sha2::{Digest, Sha256};
use uuid::Uuid;

/// Hash a password with a fresh random salt.
pub fn hash_password(password: &str) -> String {
    let salt = Uuid::new_v4().simple().to_string();
    format!("{}${}", salt, digest(&salt, password))
}

/// Verify a password against a stored `salt$digest` hash.
pub fn verify_password(password: &str, stored: &str) -> bool {
    match stored.split_once('$') {
        Some((salt, expected)) => digest(salt, password) == expected,
        None => false,
    }
}

fn digest(salt: &str, password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(password.as_bytes());
    hex::encode(hasher.finalize())
}
