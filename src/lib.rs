pub mod auth;
pub mod config;
pub mod error;
pub mod protocol;
pub mod server;
pub mod storage;

pub use auth::{Argon2Policy, CredentialHandle, CredentialService, HashPolicy, VerificationResult};
pub use error::{LoginError, RegisterError, ServiceError, StoreError};
pub use server::Server;
pub use storage::{Account, CredentialStore, MemoryStore, RedbStore};
