//! Password hashing and token key generation.
//!
//! Passwords are stored as Argon2id PHC strings; the plaintext never leaves
//! the call that hashes it.

use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use rand::distributions::{Alphanumeric, DistString};
use rand::rngs::OsRng;

use crate::error::ModelError;

/// Length of an authentication token key.
pub const TOKEN_KEY_LENGTH: usize = 40;

/// Hash a password using Argon2id with a random salt.
pub fn hash_password(password: &str) -> Result<String, ModelError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| ModelError::Password(e.to_string()))?;

    Ok(hash.to_string())
}

/// Verify a password against a stored PHC string.
///
/// Malformed hashes never verify.
pub fn verify_password(password: &str, phc_hash: &str) -> bool {
    match PasswordHash::new(phc_hash) {
        Ok(hash) => Argon2::default()
            .verify_password(password.as_bytes(), &hash)
            .is_ok(),
        Err(_) => false,
    }
}

/// Generate a random alphanumeric token key.
pub fn generate_token_key() -> String {
    Alphanumeric.sample_string(&mut OsRng, TOKEN_KEY_LENGTH)
}
