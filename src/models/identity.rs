//! A registered account: email plus the salted digest of its secret.

/// Created at registration, never mutated, never deleted.
/// The plaintext password is dropped as soon as the digest is computed.
#[derive(Debug, Clone)]
pub struct Identity {
    pub email: String,
    pub secret_hash: String,
}
