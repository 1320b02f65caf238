//! Authentication system
//!
//! Handles password hashing, credential validation, registration and login.

pub mod credentials;
pub mod handle;
pub mod results;
pub mod service;
pub mod validator;

pub use credentials::{Argon2Policy, HashPolicy};
pub use handle::CredentialHandle;
pub use results::VerificationResult;
pub use service::CredentialService;
