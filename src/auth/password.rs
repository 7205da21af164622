//! Salted password hashing.
//!
//! bcrypt is deliberately slow, so hashing and verification run on the
//! blocking pool instead of stalling the async workers.

use super::AuthError;

/// Hash a password with a fresh salt at the given bcrypt cost.
pub async fn hash_password(password: &str, cost: u32) -> Result<String, AuthError> {
    let password = password.to_string();
    tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
        .await
        .map_err(|e| AuthError::Hashing(e.to_string()))?
        .map_err(|e| AuthError::Hashing(e.to_string()))
}

/// Check a password against a stored hash.
///
/// A malformed stored hash counts as a mismatch rather than an error, so a
/// corrupted row can never log anyone in.
pub async fn verify_password(password: &str, hash: &str) -> Result<bool, AuthError> {
    let password = password.to_string();
    let hash = hash.to_string();
    let matched = tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
        .await
        .map_err(|e| AuthError::Hashing(e.to_string()))?;

    Ok(matched.unwrap_or(false))
}
