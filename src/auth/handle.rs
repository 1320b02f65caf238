//! Async access to the credential service
//!
//! Argon2 is deliberately slow, so each call is moved onto tokio's blocking
//! pool instead of running on a reactor thread.

use std::sync::Arc;

use log::error;
use tokio::task;

use crate::auth::results::VerificationResult;
use crate::auth::service::CredentialService;
use crate::error::{LoginError, RegisterError};

/// Cheaply cloneable handle shared across request tasks.
#[derive(Clone)]
pub struct CredentialHandle {
    service: Arc<CredentialService>,
}

impl CredentialHandle {
    pub fn new(service: CredentialService) -> Self {
        Self {
            service: Arc::new(service),
        }
    }

    pub async fn register(&self, username: String, password: String) -> Result<(), RegisterError> {
        let service = Arc::clone(&self.service);
        task::spawn_blocking(move || service.register(&username, &password))
            .await
            .unwrap_or_else(|e| {
                error!("Registration task failed: {}", e);
                Err(RegisterError::Internal)
            })
    }

    pub async fn authenticate(
        &self,
        username: String,
        password: String,
    ) -> Result<VerificationResult, LoginError> {
        let service = Arc::clone(&self.service);
        task::spawn_blocking(move || service.authenticate(&username, &password))
            .await
            .unwrap_or_else(|e| {
                error!("Login task failed: {}", e);
                Err(LoginError::Internal)
            })
    }
}
