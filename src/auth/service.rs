// AuthService — registration and login on top of a CredentialStore.
//
// Failed logins never say whether the id or the password was wrong: an
// unknown id is checked against a dummy hash so it costs the same as a
// wrong password. Key derivation runs on the blocking pool.

use std::sync::Arc;

use anyhow::Result;
use tracing::{info, warn};

use super::password::{dummy_hash, hash_password, verify_password};
use super::traits::CredentialStore;

pub struct AuthService {
    store: Arc<dyn CredentialStore>,
}

impl AuthService {
    pub fn new(store: Arc<dyn CredentialStore>) -> Self {
        Self { store }
    }

    /// Register a new user. Returns `false` if the id is already taken.
    pub async fn register(&self, id: &str, password: &str) -> Result<bool> {
        if self.store.lookup(id).await?.is_some() {
            warn!(user = id, "Registration rejected: user already exists");
            return Ok(false);
        }
        let password = password.to_string();
        let hash = tokio::task::spawn_blocking(move || hash_password(&password)).await?;
        let created = self.store.insert(id, &hash).await?;
        if created {
            info!(user = id, "Registered new user");
        }
        Ok(created)
    }

    /// Check a user's password.
    pub async fn authenticate(&self, id: &str, password: &str) -> Result<bool> {
        let stored = self.store.lookup(id).await?;
        let known = stored.is_some();
        let hash = hash_to_verify(stored);
        let password = password.to_string();
        let matches =
            tokio::task::spawn_blocking(move || verify_password(&hash, &password)).await?;
        Ok(known && matches)
    }
}

/// The hash a login attempt is checked against: the stored one, or the
/// dummy hash when the id is unknown.
fn hash_to_verify(stored: Option<String>) -> String {
    stored.unwrap_or_else(|| dummy_hash().to_string())
}
