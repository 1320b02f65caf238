//! Durable credential store
//!
//! Backed by redb, a pure-Rust embedded key-value database. Accounts live in
//! a single `accounts` table keyed by username; values are JSON records.

use std::fmt::Display;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use log::info;
use redb::{Database, ReadableTable, TableDefinition};

use crate::error::StoreError;
use crate::storage::traits::{CredentialStore, check_record};
use crate::storage::Account;

const ACCOUNTS: TableDefinition<&str, &[u8]> = TableDefinition::new("accounts");

fn backend<E: Display>(e: E) -> StoreError {
    StoreError::Backend(e.to_string())
}

/// RedbStore persists accounts in a redb database file.
///
/// redb admits one write transaction at a time, so the existence check and
/// the insert inside `insert` cannot interleave with another writer.
pub struct RedbStore {
    db: Arc<Database>,
}

impl RedbStore {
    /// Open or create a database at the given path.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(backend)?;
            }
        }

        let db = Database::create(path).map_err(backend)?;

        // Create the table up front so read transactions can always open it.
        let write_txn = db.begin_write().map_err(backend)?;
        {
            let _table = write_txn.open_table(ACCOUNTS).map_err(backend)?;
        }
        write_txn.commit().map_err(backend)?;

        info!("Credential database opened at {}", path.display());

        Ok(Self { db: Arc::new(db) })
    }

    fn decode(username: &str, bytes: &[u8]) -> Result<Account, StoreError> {
        serde_json::from_slice(bytes).map_err(|e| {
            StoreError::InvalidRecord(format!("undecodable record for {}: {}", username, e))
        })
    }
}

impl CredentialStore for RedbStore {
    fn exists(&self, username: &str) -> Result<bool, StoreError> {
        let read_txn = self.db.begin_read().map_err(backend)?;
        let table = read_txn.open_table(ACCOUNTS).map_err(backend)?;
        let found = table.get(username).map_err(backend)?.is_some();
        Ok(found)
    }

    fn insert(&self, username: &str, password_hash: &str) -> Result<(), StoreError> {
        check_record(username, password_hash)?;

        let record = serde_json::to_vec(&Account::new(username, password_hash))
            .map_err(|e| StoreError::InvalidRecord(e.to_string()))?;

        let write_txn = self.db.begin_write().map_err(backend)?;
        let taken = {
            let mut table = write_txn.open_table(ACCOUNTS).map_err(backend)?;
            let taken = table.get(username).map_err(backend)?.is_some();
            if !taken {
                table
                    .insert(username, record.as_slice())
                    .map_err(backend)?;
            }
            taken
        };

        if taken {
            write_txn.abort().map_err(backend)?;
            return Err(StoreError::AccountExists(username.to_string()));
        }

        write_txn.commit().map_err(backend)?;
        Ok(())
    }

    fn find(&self, username: &str) -> Result<Option<Account>, StoreError> {
        let read_txn = self.db.begin_read().map_err(backend)?;
        let table = read_txn.open_table(ACCOUNTS).map_err(backend)?;

        match table.get(username).map_err(backend)? {
            Some(value) => Self::decode(username, value.value()).map(Some),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Barrier;
    use std::thread;

    #[test]
    fn test_insert_then_find() {
        let dir = tempfile::tempdir().unwrap();
        let store = RedbStore::open(&dir.path().join("creds.redb")).unwrap();

        assert!(!store.exists("alice").unwrap());
        store.insert("alice", "$argon2id$stub").unwrap();

        assert!(store.exists("alice").unwrap());
        let account = store.find("alice").unwrap().unwrap();
        assert_eq!(account.username, "alice");
        assert_eq!(account.password_hash, "$argon2id$stub");
        assert!(store.find("bob").unwrap().is_none());
    }

    #[test]
    fn test_duplicate_insert_is_rejected_without_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let store = RedbStore::open(&dir.path().join("creds.redb")).unwrap();

        store.insert("alice", "first").unwrap();
        let err = store.insert("alice", "second").unwrap_err();

        assert!(matches!(err, StoreError::AccountExists(_)));
        assert_eq!(store.find("alice").unwrap().unwrap().password_hash, "first");
    }

    #[test]
    fn test_records_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("creds.redb");

        {
            let store = RedbStore::open(&path).unwrap();
            store.insert("alice", "hash").unwrap();
        }

        let store = RedbStore::open(&path).unwrap();
        assert!(store.exists("alice").unwrap());
        assert_eq!(store.find("alice").unwrap().unwrap().password_hash, "hash");
    }

    #[test]
    fn test_concurrent_inserts_single_winner() {
        let dir = tempfile::tempdir().unwrap();
        let store = Arc::new(RedbStore::open(&dir.path().join("creds.redb")).unwrap());
        let workers = 8;
        let barrier = Arc::new(Barrier::new(workers));

        let handles: Vec<_> = (0..workers)
            .map(|i| {
                let store = Arc::clone(&store);
                let barrier = Arc::clone(&barrier);
                thread::spawn(move || {
                    barrier.wait();
                    store.insert("carol", &format!("hash-{}", i))
                })
            })
            .collect();

        let wins = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|r| r.is_ok())
            .count();

        assert_eq!(wins, 1);
        assert!(store.exists("carol").unwrap());
    }
}
