// MemoryStore — in-process credential store. Nothing survives a restart.

use std::collections::HashMap;

use anyhow::Result;
use async_trait::async_trait;
use tokio::sync::Mutex;

use super::traits::CredentialStore;

#[derive(Default)]
pub struct MemoryStore {
    users: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CredentialStore for MemoryStore {
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
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_insert_then_lookup() {
        let store = MemoryStore::new();
        assert!(store.insert("a@example.com", "hash").await.unwrap());
        assert_eq!(
            store.lookup("a@example.com").await.unwrap().as_deref(),
            Some("hash")
        );
        assert!(store.lookup("b@example.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_insert_rejected() {
        let store = MemoryStore::new();
        assert!(store.insert("a", "first").await.unwrap());
        assert!(!store.insert("a", "second").await.unwrap());
        assert_eq!(store.lookup("a").await.unwrap().as_deref(), Some("first"));
    }
}
