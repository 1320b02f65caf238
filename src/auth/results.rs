//! Authentication result types
//!
//! Defines the outcome returned by a login attempt.

/// Outcome of checking a username/password pair.
///
/// An unknown username and a wrong password both produce
/// `InvalidCredentials`; callers cannot tell them apart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerificationResult {
    /// The password matched; carries the stored username.
    Success(String),
    InvalidCredentials,
    ValidationError(String),
}

impl VerificationResult {
    pub fn is_success(&self) -> bool {
        matches!(self, VerificationResult::Success(_))
    }

    /// The authenticated username, if any.
    pub fn username(&self) -> Option<&str> {
        match self {
            VerificationResult::Success(username) => Some(username.as_str()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_username_only_on_success() {
        let ok = VerificationResult::Success("alice".into());
        assert!(ok.is_success());
        assert_eq!(ok.username(), Some("alice"));

        assert!(!VerificationResult::InvalidCredentials.is_success());
        assert_eq!(VerificationResult::InvalidCredentials.username(), None);
        assert_eq!(
            VerificationResult::ValidationError("missing credentials".into()).username(),
            None
        );
    }
}
