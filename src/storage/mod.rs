//! Credential storage
//!
//! The `CredentialStore` abstraction and its two backends. The backend is
//! chosen by configuration; callers only see the trait.

pub mod account;
pub mod database;
pub mod memory;
pub mod traits;

pub use account::Account;
pub use database::RedbStore;
pub use memory::MemoryStore;
pub use traits::CredentialStore;

use std::sync::Arc;

use log::info;

use crate::config::{StorageBackend, StorageConfig};
use crate::error::StoreError;

/// Opens the backend named in the storage configuration.
pub fn open_store(config: &StorageConfig) -> Result<Arc<dyn CredentialStore>, StoreError> {
    match config.backend {
        StorageBackend::Memory => {
            info!("Using in-memory credential store; accounts are not persisted");
            Ok(Arc::new(MemoryStore::new()))
        }
        StorageBackend::Redb => Ok(Arc::new(RedbStore::open(&config.path_buf())?)),
    }
}
