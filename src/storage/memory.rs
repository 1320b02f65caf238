//! In-memory credential store
//!
//! Backs tests and ephemeral runs. Nothing survives the process.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::error::StoreError;
use crate::storage::traits::{CredentialStore, check_record};
use crate::storage::Account;

/// Accounts keyed by username behind a single reader-writer lock.
///
/// `insert` holds the write lock across the check and the insert.
#[derive(Default)]
pub struct MemoryStore {
    accounts: RwLock<HashMap<String, Account>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored accounts.
    pub fn len(&self) -> Result<usize, StoreError> {
        Ok(self.read()?.len())
    }

    pub fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.read()?.is_empty())
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, HashMap<String, Account>>, StoreError> {
        self.accounts
            .read()
            .map_err(|_| StoreError::Backend("account map lock poisoned".into()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, HashMap<String, Account>>, StoreError> {
        self.accounts
            .write()
            .map_err(|_| StoreError::Backend("account map lock poisoned".into()))
    }
}

impl CredentialStore for MemoryStore {
    fn exists(&self, username: &str) -> Result<bool, StoreError> {
        Ok(self.read()?.contains_key(username))
    }

    fn insert(&self, username: &str, password_hash: &str) -> Result<(), StoreError> {
        check_record(username, password_hash)?;

        let mut accounts = self.write()?;
        match accounts.entry(username.to_string()) {
            Entry::Occupied(_) => Err(StoreError::AccountExists(username.to_string())),
            Entry::Vacant(slot) => {
                slot.insert(Account::new(username, password_hash));
                Ok(())
            }
        }
    }

    fn find(&self, username: &str) -> Result<Option<Account>, StoreError> {
        Ok(self.read()?.get(username).cloned())
    }
}
