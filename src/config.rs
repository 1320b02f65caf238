//! Configuration management for the credential service
//!
//! Loaded from `config.toml` with environment overrides. Every section has
//! defaults, so an empty file yields a working in-memory setup.

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::PathBuf;

/// Complete service configuration
#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct ServiceConfig {
    pub storage: StorageConfig,
    pub hashing: HashingConfig,
    pub policy: PolicyConfig,
    pub console: ConsoleConfig,
}

/// Which credential store backend to open
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// Process-local map, lost on exit
    Memory,
    /// Embedded redb database file
    Redb,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct StorageConfig {
    pub backend: StorageBackend,

    /// Database file, used by the redb backend only
    /// Environment: CREDSVC_STORAGE__PATH
    pub path: String,
}

/// Argon2id cost parameters applied to newly created hashes.
///
/// Verification reads the parameters embedded in each stored hash, so
/// changing these does not invalidate existing accounts.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct HashingConfig {
    pub memory_kib: u32,
    pub iterations: u32,
    pub parallelism: u32,
}

/// Input limits enforced before any hashing or storage work
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct PolicyConfig {
    pub min_password_length: usize,
    pub max_password_length: usize,
    pub min_username_length: usize,
    pub max_username_length: usize,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ConsoleConfig {
    /// Redirect hint attached to a successful login
    pub login_redirect: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::Memory,
            path: "data/credentials.redb".to_string(),
        }
    }
}

impl Default for HashingConfig {
    fn default() -> Self {
        // argon2 crate defaults (OWASP minimum for Argon2id)
        Self {
            memory_kib: 19 * 1024,
            iterations: 2,
            parallelism: 1,
        }
    }
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            min_password_length: 8,
            max_password_length: 128,
            min_username_length: 3,
            max_username_length: 30,
        }
    }
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            login_redirect: "/dashboard".to_string(),
        }
    }
}

impl ServiceConfig {
    /// Load configuration from config.toml with environment overrides
    pub fn load() -> Result<Self, ConfigError> {
        // Installed layout first, then the working directory
        let config_paths = ["credential-service/config", "config"];

        let mut last_error = None;

        for config_path in &config_paths {
            match Config::builder()
                .add_source(File::with_name(config_path))
                .add_source(
                    Environment::with_prefix("CREDSVC")
                        .prefix_separator("_")
                        .separator("__")
                        .try_parsing(true),
                )
                .build()
            {
                Ok(settings) => {
                    let config: ServiceConfig = settings.try_deserialize()?;
                    config.validate()?;
                    return Ok(config);
                }
                Err(e) => {
                    last_error = Some(e);
                    continue;
                }
            }
        }

        Err(last_error.unwrap_or_else(|| {
            ConfigError::Message(format!(
                "Failed to load config.toml from any location. Tried: {config_paths:?}"
            ))
        }))
    }

    /// Validation for all configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.storage.backend == StorageBackend::Redb && self.storage.path.trim().is_empty() {
            return Err(ConfigError::Message(
                "storage.path cannot be empty for the redb backend".into(),
            ));
        }

        if self.hashing.iterations == 0 {
            return Err(ConfigError::Message(
                "hashing.iterations must be greater than 0".into(),
            ));
        }

        if self.hashing.parallelism == 0 {
            return Err(ConfigError::Message(
                "hashing.parallelism must be greater than 0".into(),
            ));
        }

        if self.hashing.memory_kib < 8 * self.hashing.parallelism {
            return Err(ConfigError::Message(
                "hashing.memory_kib must be at least 8 * parallelism".into(),
            ));
        }

        if self.policy.min_password_length == 0 {
            return Err(ConfigError::Message(
                "policy.min_password_length must be greater than 0".into(),
            ));
        }

        if self.policy.max_password_length < self.policy.min_password_length {
            return Err(ConfigError::Message(
                "policy.max_password_length must not be below min_password_length".into(),
            ));
        }

        if self.policy.min_username_length == 0 {
            return Err(ConfigError::Message(
                "policy.min_username_length must be greater than 0".into(),
            ));
        }

        if self.policy.max_username_length < self.policy.min_username_length {
            return Err(ConfigError::Message(
                "policy.max_username_length must not be below min_username_length".into(),
            ));
        }

        Ok(())
    }
}

impl StorageConfig {
    /// Get the database path as PathBuf
    pub fn path_buf(&self) -> PathBuf {
        PathBuf::from(&self.path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = ServiceConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.storage.backend, StorageBackend::Memory);
        assert_eq!(config.policy.min_password_length, 8);
        assert_eq!(config.policy.min_username_length, 3);
        assert_eq!(config.console.login_redirect, "/dashboard");
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let settings = Config::builder()
            .add_source(File::from_str(
                "[storage]\nbackend = \"redb\"\npath = \"creds.redb\"\n\n[policy]\nmax_username_length = 16\n",
                config::FileFormat::Toml,
            ))
            .build()
            .unwrap();
        let config: ServiceConfig = settings.try_deserialize().unwrap();

        assert_eq!(config.storage.backend, StorageBackend::Redb);
        assert_eq!(config.storage.path, "creds.redb");
        assert_eq!(config.policy.max_username_length, 16);
        assert_eq!(config.policy.min_password_length, 8);
        assert_eq!(config.hashing.iterations, 2);
    }

    #[test]
    fn test_rejects_inverted_password_limits() {
        let mut config = ServiceConfig::default();
        config.policy.min_password_length = 64;
        config.policy.max_password_length = 32;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_inverted_username_limits() {
        let mut config = ServiceConfig::default();
        config.policy.min_username_length = 10;
        config.policy.max_username_length = 5;
        assert!(config.validate().is_err());

        config.policy.min_username_length = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_empty_redb_path() {
        let mut config = ServiceConfig::default();
        config.storage.backend = StorageBackend::Redb;
        config.storage.path = "  ".into();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_zero_iterations() {
        let mut config = ServiceConfig::default();
        config.hashing.iterations = 0;
        assert!(config.validate().is_err());
    }
}
