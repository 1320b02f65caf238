//! Credential input validation
//!
//! Screens usernames and passwords before any store or hashing work. Usernames
//! are trimmed; passwords are used exactly as given.

use crate::config::PolicyConfig;

/// Why a credential pair was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    /// A field is absent or blank after trimming.
    Missing,
    /// A field is present but violates the policy.
    Invalid(String),
}

fn is_blank(input: &str) -> bool {
    input.trim().is_empty()
}

fn has_control_chars(input: &str) -> bool {
    input.chars().any(char::is_control)
}

/// Validates a registration attempt and returns the normalized username.
pub fn validate_registration<'a>(
    username: &'a str,
    password: &str,
    policy: &PolicyConfig,
) -> Result<&'a str, InputError> {
    if is_blank(username) || is_blank(password) {
        return Err(InputError::Missing);
    }

    let username = username.trim();
    if has_control_chars(username) {
        return Err(InputError::Invalid(
            "username contains control characters".into(),
        ));
    }
    let username_length = username.chars().count();
    if username_length < policy.min_username_length {
        return Err(InputError::Invalid(format!(
            "username must be at least {} characters",
            policy.min_username_length
        )));
    }
    if username_length > policy.max_username_length {
        return Err(InputError::Invalid(format!(
            "username must be at most {} characters",
            policy.max_username_length
        )));
    }

    let length = password.chars().count();
    if length < policy.min_password_length {
        return Err(InputError::Invalid(format!(
            "password must be at least {} characters",
            policy.min_password_length
        )));
    }
    if length > policy.max_password_length {
        return Err(InputError::Invalid(format!(
            "password must be at most {} characters",
            policy.max_password_length
        )));
    }
    if password.contains('\0') {
        return Err(InputError::Invalid("password contains NUL".into()));
    }

    Ok(username)
}

/// Validates a login attempt and returns the normalized username.
///
/// Minimum lengths are not enforced here: a short username or password
/// simply fails to match.
pub fn validate_login<'a>(
    username: &'a str,
    password: &str,
    policy: &PolicyConfig,
) -> Result<&'a str, InputError> {
    if is_blank(username) || is_blank(password) {
        return Err(InputError::Missing);
    }

    let username = username.trim();
    if has_control_chars(username)
        || username.chars().count() > policy.max_username_length
        || password.chars().count() > policy.max_password_length
    {
        return Err(InputError::Invalid("malformed credentials".into()));
    }

    Ok(username)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy() -> PolicyConfig {
        PolicyConfig::default()
    }

    #[test]
    fn test_missing_fields() {
        let p = policy();
        assert_eq!(validate_registration("", "x", &p), Err(InputError::Missing));
        assert_eq!(validate_registration("bob", "", &p), Err(InputError::Missing));
        assert_eq!(
            validate_registration("   ", "secret123", &p),
            Err(InputError::Missing)
        );
        assert_eq!(validate_registration("bob", " \t", &p), Err(InputError::Missing));
        assert_eq!(validate_login("", "secret123", &p), Err(InputError::Missing));
        assert_eq!(validate_login("alice", "  ", &p), Err(InputError::Missing));
    }

    #[test]
    fn test_username_is_trimmed_password_is_not() {
        let p = policy();
        assert_eq!(validate_registration("  alice ", "secret123", &p), Ok("alice"));
        assert_eq!(validate_login("\talice\n", " secret123 ", &p), Ok("alice"));
    }

    #[test]
    fn test_password_length_bounds() {
        let p = policy();
        assert!(matches!(
            validate_registration("alice", "short", &p),
            Err(InputError::Invalid(_))
        ));
        let long = "a".repeat(p.max_password_length + 1);
        assert!(matches!(
            validate_registration("alice", &long, &p),
            Err(InputError::Invalid(_))
        ));
        assert!(matches!(
            validate_login("alice", &long, &p),
            Err(InputError::Invalid(_))
        ));
        // Short passwords are still accepted at login
        assert_eq!(validate_login("alice", "short", &p), Ok("alice"));
    }

    #[test]
    fn test_username_rules() {
        let p = policy();
        assert!(matches!(
            validate_registration("al\nice", "secret123", &p),
            Err(InputError::Invalid(_))
        ));
        assert!(matches!(
            validate_registration("al\0ice", "secret123", &p),
            Err(InputError::Invalid(_))
        ));
        let long = "u".repeat(p.max_username_length + 1);
        assert!(matches!(
            validate_registration(&long, "secret123", &p),
            Err(InputError::Invalid(_))
        ));
        assert_eq!(
            validate_registration("Zoë", "secret123", &p),
            Ok("Zoë")
        );
    }

    #[test]
    fn test_username_minimum_length() {
        let p = policy();
        assert!(matches!(
            validate_registration("ab", "secret123", &p),
            Err(InputError::Invalid(_))
        ));
        // Counted after trimming
        assert!(matches!(
            validate_registration("  ab  ", "secret123", &p),
            Err(InputError::Invalid(_))
        ));
        assert_eq!(validate_registration("bob", "secret123", &p), Ok("bob"));
    }
}
