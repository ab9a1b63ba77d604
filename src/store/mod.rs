//! In-memory credential store: the only shared mutable state in the service.
//!
//! Append-only for the lifetime of the process; no delete or update surface.
//! The write lock covers the presence check and the insert together, so two
//! concurrent registrations for the same email cannot both succeed.

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

use thiserror::Error;

use crate::models::Identity;

#[derive(Debug, Error)]
#[error("account already exists")]
pub struct AlreadyExists;

/// Concurrency-safe registry of identities keyed by email (case-sensitive).
#[derive(Clone, Default)]
pub struct CredentialStore {
    inner: Arc<RwLock<BTreeMap<String, Identity>>>,
}

impl CredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn exists(&self, email: &str) -> bool {
        self.inner
            .read()
            .expect("credential store lock poisoned")
            .contains_key(email)
    }

    /// Compare-and-insert: fails with `AlreadyExists` if the email is taken.
    pub fn insert(&self, email: String, secret_hash: String) -> Result<(), AlreadyExists> {
        let mut map = self.inner.write().expect("credential store lock poisoned");
        match map.entry(email) {
            Entry::Occupied(_) => Err(AlreadyExists),
            Entry::Vacant(slot) => {
                let email = slot.key().clone();
                slot.insert(Identity { email, secret_hash });
                Ok(())
            }
        }
    }

    pub fn lookup(&self, email: &str) -> Option<Identity> {
        self.inner
            .read()
            .expect("credential store lock poisoned")
            .get(email)
            .cloned()
    }
}
