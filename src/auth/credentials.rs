//! Password hashing policy
//!
//! Turns plaintext passwords into salted, slow, one-way PHC strings and checks
//! candidates against them. The service only talks to the `HashPolicy` trait,
//! so tests can substitute an instrumented policy.

use argon2::password_hash::{
    Error as PhcError, PasswordHash, PasswordHasher, PasswordVerifier, SaltString,
};
use argon2::{Algorithm, Argon2, Params, Version};
use rand_core::OsRng;

use crate::config::HashingConfig;
use crate::error::HashError;

pub trait HashPolicy: Send + Sync {
    /// Hash `password` under a fresh random salt, returning an encoded string
    /// that embeds the algorithm, parameters and salt.
    fn hash(&self, password: &str) -> Result<String, HashError>;

    /// Check `password` against an encoded hash produced by `hash`.
    ///
    /// `Ok(false)` means a well-formed hash that does not match. Comparison
    /// of the digests is constant-time.
    fn verify(&self, password: &str, password_hash: &str) -> Result<bool, HashError>;
}

/// Argon2id with configurable cost.
pub struct Argon2Policy {
    argon2: Argon2<'static>,
}

impl Argon2Policy {
    pub fn new(config: &HashingConfig) -> Result<Self, HashError> {
        let params = Params::new(
            config.memory_kib,
            config.iterations,
            config.parallelism,
            None,
        )
        .map_err(|e| HashError::Parameters(e.to_string()))?;

        Ok(Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
        })
    }
}

impl Default for Argon2Policy {
    fn default() -> Self {
        Self {
            argon2: Argon2::default(),
        }
    }
}

impl HashPolicy for Argon2Policy {
    fn hash(&self, password: &str) -> Result<String, HashError> {
        let salt = SaltString::generate(&mut OsRng);
        self.argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| HashError::Hashing(e.to_string()))
    }

    fn verify(&self, password: &str, password_hash: &str) -> Result<bool, HashError> {
        let parsed =
            PasswordHash::new(password_hash).map_err(|e| HashError::Malformed(e.to_string()))?;

        // Cost parameters and salt come from the stored hash, not from self.
        match self.argon2.verify_password(password.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(PhcError::Password) => Ok(false),
            Err(e) => Err(HashError::Hashing(e.to_string())),
        }
    }
}
