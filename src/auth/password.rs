use crate::error::AppError;
use bcrypt::{hash, verify, DEFAULT_COST};

/// Hashes a plaintext password with bcrypt (per-record salt baked into the
/// output). Callers persist only the result; the plaintext is dropped here.
pub fn hash_password(password: &str) -> Result<String, AppError> {
    hash(password, DEFAULT_COST)
        .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))
}

/// Checks a plaintext attempt against a stored bcrypt hash.
///
/// This is always hash-and-compare; the stored value is never decrypted and
/// plaintexts are never compared directly. bcrypt's comparison is not
/// guaranteed constant-time with respect to the stored hash.
pub fn verify_password(password: &str, hashed_password: &str) -> Result<bool, AppError> {
    verify(password, hashed_password)
        .map_err(|e| AppError::Internal(format!("Failed to verify password: {}", e)))
}
