//! Error handlers
//!
//! Logs errors and maps outcomes to the status codes a transport should send.

use log::error;

use crate::auth::VerificationResult;
use crate::error::types::{LoginError, RegisterError, ServiceError};

pub const OK: u16 = 200;
pub const CREATED: u16 = 201;
pub const BAD_REQUEST: u16 = 400;
pub const UNAUTHORIZED: u16 = 401;
pub const CONFLICT: u16 = 409;
pub const INTERNAL_SERVER_ERROR: u16 = 500;

/// Handle a service error
pub fn handle_error(err: &ServiceError) {
    error!("Credential service error: {}", err);
}

/// Convert error to a transport status code
pub fn error_to_status(err: &ServiceError) -> u16 {
    match err {
        ServiceError::Register(e) => register_error_status(e),
        ServiceError::Login(e) => login_error_status(e),
        ServiceError::Config(_)
        | ServiceError::Store(_)
        | ServiceError::Hash(_)
        | ServiceError::Io(_) => INTERNAL_SERVER_ERROR,
    }
}

pub fn register_error_status(err: &RegisterError) -> u16 {
    match err {
        RegisterError::MissingField | RegisterError::InvalidField(_) => BAD_REQUEST,
        RegisterError::UsernameTaken => CONFLICT,
        RegisterError::StorageFailure | RegisterError::Internal => INTERNAL_SERVER_ERROR,
    }
}

pub fn login_error_status(_err: &LoginError) -> u16 {
    INTERNAL_SERVER_ERROR
}

/// Status code for a completed verification.
pub fn verification_status(result: &VerificationResult) -> u16 {
    match result {
        VerificationResult::Success(_) => OK,
        VerificationResult::InvalidCredentials => UNAUTHORIZED,
        VerificationResult::ValidationError(_) => BAD_REQUEST,
    }
}
