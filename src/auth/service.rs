//! Credential service
//!
//! Registration and login over an injected `CredentialStore` and
//! `HashPolicy`. The service keeps no account state of its own.

use std::sync::Arc;

use log::{debug, error, info, warn};

use crate::auth::credentials::HashPolicy;
use crate::auth::results::VerificationResult;
use crate::auth::validator::{InputError, validate_login, validate_registration};
use crate::config::PolicyConfig;
use crate::error::{LoginError, RegisterError, StoreError};
use crate::storage::CredentialStore;

/// Plaintext behind the decoy hash checked for unknown usernames.
const DECOY_PASSWORD: &str = "decoy-password-for-absent-accounts";

pub struct CredentialService {
    store: Arc<dyn CredentialStore>,
    hasher: Arc<dyn HashPolicy>,
    policy: PolicyConfig,
    decoy_hash: Option<String>,
}

impl CredentialService {
    pub fn new(
        store: Arc<dyn CredentialStore>,
        hasher: Arc<dyn HashPolicy>,
        policy: PolicyConfig,
    ) -> Self {
        // Prepared before the first login so no miss pays for it
        let decoy_hash = match hasher.hash(DECOY_PASSWORD) {
            Ok(hash) => Some(hash),
            Err(e) => {
                warn!("Could not prepare decoy hash: {}", e);
                None
            }
        };

        Self {
            store,
            hasher,
            policy,
            decoy_hash,
        }
    }

    pub fn store(&self) -> &Arc<dyn CredentialStore> {
        &self.store
    }

    /// Creates an account for `username` with a freshly salted hash of
    /// `password`.
    ///
    /// A duplicate username yields `UsernameTaken` whether it is caught by the
    /// pre-check or by the store during a concurrent registration.
    pub fn register(&self, username: &str, password: &str) -> Result<(), RegisterError> {
        let username = validate_registration(username, password, &self.policy).map_err(
            |e| match e {
                InputError::Missing => RegisterError::MissingField,
                InputError::Invalid(reason) => RegisterError::InvalidField(reason),
            },
        )?;

        if self.store.exists(username).map_err(register_fault)? {
            debug!("Registration rejected, username taken: {}", username);
            return Err(RegisterError::UsernameTaken);
        }

        let password_hash = self.hasher.hash(password).map_err(|e| {
            error!("Password hashing failed for {}: {}", username, e);
            RegisterError::Internal
        })?;

        match self.store.insert(username, &password_hash) {
            Ok(()) => {
                info!("Registered account: {}", username);
                Ok(())
            }
            Err(StoreError::AccountExists(_)) => {
                debug!("Concurrent registration won the race for: {}", username);
                Err(RegisterError::UsernameTaken)
            }
            Err(e) => Err(register_fault(e)),
        }
    }

    /// Checks a login attempt.
    ///
    /// Every well-formed attempt runs exactly one hash verification, including
    /// attempts for usernames that do not exist.
    pub fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> Result<VerificationResult, LoginError> {
        let username = match validate_login(username, password, &self.policy) {
            Ok(username) => username,
            Err(InputError::Missing) => {
                return Ok(VerificationResult::ValidationError(
                    "missing credentials".into(),
                ));
            }
            Err(InputError::Invalid(reason)) => {
                return Ok(VerificationResult::ValidationError(reason));
            }
        };

        let account = self.store.find(username).map_err(|e| {
            error!("Account lookup failed for {}: {}", username, e);
            LoginError::StorageFailure
        })?;

        let Some(account) = account else {
            self.verify_decoy(password);
            debug!("Login failed for {}", username);
            return Ok(VerificationResult::InvalidCredentials);
        };

        match self.hasher.verify(password, &account.password_hash) {
            Ok(true) => {
                debug!("Login succeeded for {}", account.username);
                Ok(VerificationResult::Success(account.username))
            }
            Ok(false) => {
                debug!("Login failed for {}", username);
                Ok(VerificationResult::InvalidCredentials)
            }
            Err(e) => {
                warn!("Stored hash for {} could not be checked: {}", username, e);
                Err(LoginError::Internal)
            }
        }
    }

    /// Burns one verification so a miss costs about as much as a wrong
    /// password.
    fn verify_decoy(&self, password: &str) {
        if let Some(hash) = &self.decoy_hash {
            let _ = self.hasher.verify(password, hash);
        }
    }
}

fn register_fault(e: StoreError) -> RegisterError {
    error!("Credential store failure during registration: {}", e);
    RegisterError::StorageFailure
}
