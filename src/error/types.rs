//! Error types
//!
//! Defines domain-specific error types for each layer of the credential service.

use std::io;

use thiserror::Error;

/// Credential store errors
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("account already exists: {0}")]
    AccountExists(String),

    #[error("invalid account record: {0}")]
    InvalidRecord(String),

    #[error("storage backend error: {0}")]
    Backend(String),
}

/// Password hashing errors
#[derive(Error, Debug)]
pub enum HashError {
    #[error("invalid hashing parameters: {0}")]
    Parameters(String),

    #[error("malformed password hash: {0}")]
    Malformed(String),

    #[error("hashing failed: {0}")]
    Hashing(String),
}

/// Registration failures as seen by a caller.
///
/// Infrastructure variants carry no detail; the detail is logged where the
/// fault is observed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegisterError {
    #[error("username and password are required")]
    MissingField,

    #[error("invalid field: {0}")]
    InvalidField(String),

    #[error("username already taken")]
    UsernameTaken,

    #[error("storage failure")]
    StorageFailure,

    #[error("internal error")]
    Internal,
}

/// Infrastructure faults during authentication.
///
/// Wrong credentials are not errors; they are reported through
/// [`crate::auth::VerificationResult`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LoginError {
    #[error("storage failure")]
    StorageFailure,

    #[error("internal error")]
    Internal,
}

/// General service error that encompasses all error types
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("store error: {0}")]
    Store(#[from] StoreError),

    #[error("hash error: {0}")]
    Hash(#[from] HashError),

    #[error("registration error: {0}")]
    Register(#[from] RegisterError),

    #[error("login error: {0}")]
    Login(#[from] LoginError),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}
