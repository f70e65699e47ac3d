// User accounts — password hashing, credential storage, and the
// register/authenticate flow used by the web dashboard and the CLI.

pub mod json_file;
pub mod memory;
pub mod password;
pub mod service;
pub mod traits;

pub use json_file::JsonFileStore;
pub use memory::MemoryStore;
pub use service::AuthService;
pub use traits::CredentialStore;
