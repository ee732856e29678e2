//! Password hashing and verification

use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier, password_hash::SaltString};

use crate::error::{AppError, AppResult};

/// Hash a password with a freshly generated salt
pub fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut rand::thread_rng());
    let argon2 = Argon2::default();
    let password_hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AppError::internal(format!("Failed to hash password: {}", e)))?
        .to_string();

    Ok(password_hash)
}

/// Check `candidate` against a stored hash.
///
/// A mismatch is `Unauthorized`; a hash that cannot be parsed means the
/// stored state is corrupt and is reported as `Internal`.
pub fn compare_password(password_hash: &str, candidate: &str) -> AppResult<()> {
    let parsed_hash = PasswordHash::new(password_hash)
        .map_err(|e| AppError::internal(format!("Failed to parse password hash: {}", e)))?;

    Argon2::default()
        .verify_password(candidate.as_bytes(), &parsed_hash)
        .map_err(|_| AppError::Unauthorized)
}
