// Credential store trait — the narrow storage capability behind AuthService.
//
// Implementors: JsonFileStore (flat JSON file on disk), MemoryStore (tests
// and throwaway servers). Methods are async so file-backed and future
// database-backed stores fit behind one interface.

use anyhow::Result;
use async_trait::async_trait;

#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Look up the stored password hash for a user id.
    async fn lookup(&self, id: &str) -> Result<Option<String>>;

    /// Store a new user. Returns `false` without changing anything if the
    /// id is already taken.
    async fn insert(&self, id: &str, password_hash: &str) -> Result<bool>;
}
