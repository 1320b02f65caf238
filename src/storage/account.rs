//! Account record
//!
//! The single persisted entity: a username and its encoded password hash.

use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

/// A registered account.
///
/// `password_hash` is a PHC string (`$argon2id$v=19$m=...,t=...,p=...$salt$hash`)
/// carrying its own salt and cost parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub username: String,
    pub password_hash: String,
    /// Seconds since the Unix epoch
    pub created_at: u64,
}

impl Account {
    pub fn new(username: &str, password_hash: &str) -> Self {
        Self {
            username: username.to_string(),
            password_hash: password_hash.to_string(),
            created_at: current_timestamp(),
        }
    }
}

fn current_timestamp() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|dur| dur.as_secs())
        .unwrap_or(0)
}
