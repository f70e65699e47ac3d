// Unit tests for accounts: password hashing, the JSON credential file,
// and the register/authenticate flow on top of it.

use std::path::PathBuf;
use std::sync::Arc;

use textsim::auth::password::{hash_password, verify_password};
use textsim::auth::{AuthService, CredentialStore, JsonFileStore, MemoryStore};

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!(
        "textsim_it_{name}_{}_{}.json",
        std::process::id(),
        chrono::Utc::now().timestamp_nanos_opt().unwrap_or_default()
    ))
}

#[test]
fn default_hash_verifies() {
    let hash = hash_password("hunter2");
    assert!(hash.starts_with("pbkdf2:sha256:"));
    assert!(verify_password(&hash, "hunter2"));
    assert!(!verify_password(&hash, "hunter3"));
}

#[tokio::test]
async fn file_backed_registration_survives_restart() {
    let path = temp_path("restart");

    {
        let store = JsonFileStore::open(&path).await.unwrap();
        let auth = AuthService::new(Arc::new(store));
        assert!(auth.register("user@example.com", "pw").await.unwrap());
    }

    let store = JsonFileStore::open(&path).await.unwrap();
    let auth = AuthService::new(Arc::new(store));
    assert!(auth.authenticate("user@example.com", "pw").await.unwrap());
    assert!(!auth.register("user@example.com", "other").await.unwrap());

    // File is a flat id -> hash map
    let raw = std::fs::read_to_string(&path).unwrap();
    let map: std::collections::HashMap<String, String> = serde_json::from_str(&raw).unwrap();
    assert_eq!(map.len(), 1);
    assert!(map["user@example.com"].starts_with("pbkdf2:sha256:"));

    let _ = std::fs::remove_file(&path);
}

#[tokio::test]
async fn stores_never_keep_plaintext() {
    let store = Arc::new(MemoryStore::new());
    let auth = AuthService::new(store.clone());
    auth.register("a@example.com", "plaintext-password").await.unwrap();
    let stored = store.lookup("a@example.com").await.unwrap().unwrap();
    assert!(!stored.contains("plaintext-password"));
}
