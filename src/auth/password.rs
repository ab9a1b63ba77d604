//! One-way password hashing (argon2, fresh salt per digest).

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

use crate::error::{AppError, AppResult};

/// Hash a plaintext secret into a PHC-format digest. The salt is generated
/// fresh per call, so hashing the same input twice yields different digests.
pub fn hash(plaintext: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let digest = Argon2::default()
        .hash_password(plaintext.as_bytes(), &salt)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("hash: {}", e)))?
        .to_string();
    Ok(digest)
}

/// Verify a plaintext secret against a stored digest.
/// A malformed digest is a verification failure, not a fault.
pub fn verify(plaintext: &str, digest: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(digest) else {
        return false;
    };
    Argon2::default()
        .verify_password(plaintext.as_bytes(), &parsed)
        .is_ok()
}
