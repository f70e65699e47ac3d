// JsonFileStore — flat-file credential store.
//
// File format: a single JSON object mapping user id -> password hash.
//
//   { "someone@example.com": "pbkdf2:sha256:100000$<salt>$<hash>" }
//
// The whole map is loaded on open and held in memory behind a Mutex. Every
// successful insert rewrites the file. The lock is held across the write so
// two concurrent registrations can't interleave their saves.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::{debug, info};

use super::traits::CredentialStore;

pub struct JsonFileStore {
    path: PathBuf,
    users: Mutex<BTreeMap<String, String>>,
}

impl JsonFileStore {
    /// Open the store at `path`, creating an empty `{}` file if it doesn't exist.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        let users = if tokio::fs::try_exists(&path).await? {
            let raw = tokio::fs::read_to_string(&path)
                .await
                .with_context(|| format!("Failed to read credential file {}", path.display()))?;
            let users: BTreeMap<String, String> = serde_json::from_str(&raw)
                .with_context(|| format!("Credential file {} is not a JSON object", path.display()))?;
            debug!(users = users.len(), path = %path.display(), "Loaded credential store");
            users
        } else {
            let empty = BTreeMap::new();
            write_users(&path, &empty).await?;
            info!(path = %path.display(), "Created empty credential store");
            empty
        };

        Ok(Self {
            path,
            users: Mutex::new(users),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl CredentialStore for JsonFileStore {
    async fn lookup(&self, id: &str) -> Result<Option<String>> {
        let users = self.users.lock().await;
        Ok(users.get(id).cloned())
    }

    async fn insert(&self, id: &str, password_hash: &str) -> Result<bool> {
        let mut users = self.users.lock().await;
        if users.contains_key(id) {
            return Ok(false);
        }
        users.insert(id.to_string(), password_hash.to_string());
        if let Err(e) = write_users(&self.path, &users).await {
            // Keep memory consistent with disk
            users.remove(id);
            return Err(e);
        }
        Ok(true)
    }
}

async fn write_users(path: &Path, users: &BTreeMap<String, String>) -> Result<()> {
    let json = serde_json::to_string_pretty(users)?;
    tokio::fs::write(path, json)
        .await
        .with_context(|| format!("Failed to write credential file {}", path.display()))
}
