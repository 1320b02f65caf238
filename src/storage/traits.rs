use crate::error::StoreError;
use crate::storage::Account;

/// CredentialStore is the durable username → password-hash mapping.
///
/// Implementations must make `insert` atomic with respect to the existence
/// check: of any number of concurrent inserts for one username, exactly one
/// succeeds and the rest fail with `StoreError::AccountExists`.
pub trait CredentialStore: Send + Sync {
    /// Whether an account with exactly this username exists.
    fn exists(&self, username: &str) -> Result<bool, StoreError>;

    /// Create an account. Fails with `StoreError::AccountExists` if the
    /// username is taken; nothing is written in that case.
    fn insert(&self, username: &str, password_hash: &str) -> Result<(), StoreError>;

    /// Look up an account by exact username.
    fn find(&self, username: &str) -> Result<Option<Account>, StoreError>;
}

/// Rejects records that would break the store invariants.
pub(crate) fn check_record(username: &str, password_hash: &str) -> Result<(), StoreError> {
    if username.is_empty() {
        return Err(StoreError::InvalidRecord("empty username".into()));
    }
    if password_hash.is_empty() {
        return Err(StoreError::InvalidRecord(format!(
            "empty password hash for {}",
            username
        )));
    }
    Ok(())
}
