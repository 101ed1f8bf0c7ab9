//! Configuration loading and validation for the crypto core.
//!
//! Every option has a default, so an empty environment yields a working
//! configuration. Values are read from `CRYPTOCORE_*` environment variables.

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::CryptoCore;

/// Crypto core configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CryptoConfig {
    /// Symmetric cipher identifier.
    #[serde(default = "default_symmetric_algorithm")]
    pub symmetric_algorithm: String,

    /// Asymmetric cipher identifier.
    #[serde(default = "default_asymmetric_algorithm")]
    pub asymmetric_algorithm: String,

    /// RSA modulus size in bits. Keys of any other size are rejected.
    #[serde(default = "default_asymmetric_key_length")]
    pub asymmetric_key_length: u32,

    /// AES-GCM authentication tag length in bits.
    #[serde(default = "default_gcm_tag_length")]
    pub gcm_tag_length: u32,

    /// Password-hash identifier.
    #[serde(default = "default_hash_algorithm")]
    pub hash_algorithm: String,

    #[serde(default = "default_hash_iterations")]
    pub hash_iterations: u32,

    /// Derived key length of the password hash, in bits.
    #[serde(default = "default_hash_key_length")]
    pub hash_key_length: u32,

    /// Signature identifier.
    #[serde(default = "default_sign_algorithm")]
    pub sign_algorithm: String,

    /// Tracing log level used by [`crate::telemetry::init`].
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_symmetric_algorithm() -> String {
    "AES/GCM/PKCS5Padding".into()
}
fn default_asymmetric_algorithm() -> String {
    "RSA/ECB/OAEPWITHSHA-256ANDMGF1PADDING".into()
}
fn default_asymmetric_key_length() -> u32 {
    2048
}
fn default_gcm_tag_length() -> u32 {
    128
}
fn default_hash_algorithm() -> String {
    "PBKDF2WithHmacSHA512".into()
}
fn default_hash_iterations() -> u32 {
    100_000
}
fn default_hash_key_length() -> u32 {
    256
}
fn default_sign_algorithm() -> String {
    "SHA512withRSA".into()
}
fn default_log_level() -> String {
    "info".into()
}

impl Default for CryptoConfig {
    fn default() -> Self {
        Self {
            symmetric_algorithm: default_symmetric_algorithm(),
            asymmetric_algorithm: default_asymmetric_algorithm(),
            asymmetric_key_length: default_asymmetric_key_length(),
            gcm_tag_length: default_gcm_tag_length(),
            hash_algorithm: default_hash_algorithm(),
            hash_iterations: default_hash_iterations(),
            hash_key_length: default_hash_key_length(),
            sign_algorithm: default_sign_algorithm(),
            log_level: default_log_level(),
        }
    }
}

impl CryptoConfig {
    /// Load and validate configuration from `CRYPTOCORE_*` environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable cannot be parsed or the resulting
    /// configuration is rejected by [`CryptoConfig::validate`].
    pub fn from_env() -> Result<Self> {
        Self::load(config::Environment::with_prefix("CRYPTOCORE").try_parsing(true))
    }

    fn load(source: config::Environment) -> Result<Self> {
        let cfg = config::Config::builder()
            .add_source(source)
            .build()
            .context("failed to build configuration from environment")?;

        let c: CryptoConfig = cfg
            .try_deserialize()
            .context("failed to deserialise configuration")?;

        c.validate()?;
        Ok(c)
    }

    /// Check every identifier and numeric parameter by building the facade once.
    ///
    /// # Errors
    ///
    /// Returns the first [`cryptocore_common::CryptoError`] the facade raises,
    /// wrapped with context, or an error for an empty log level.
    pub fn validate(&self) -> Result<()> {
        if self.log_level.trim().is_empty() {
            anyhow::bail!("LOG_LEVEL must not be empty");
        }
        CryptoCore::new(self).context("invalid crypto configuration")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cryptocore_common::CryptoError;
    use std::collections::HashMap;

    fn env(vars: &[(&str, &str)]) -> config::Environment {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (format!("CRYPTOCORE_{k}"), v.to_string()))
            .collect();
        config::Environment::with_prefix("CRYPTOCORE")
            .try_parsing(true)
            .source(Some(map))
    }

    #[test]
    fn defaults_are_correct() {
        assert_eq!(default_symmetric_algorithm(), "AES/GCM/PKCS5Padding");
        assert_eq!(
            default_asymmetric_algorithm(),
            "RSA/ECB/OAEPWITHSHA-256ANDMGF1PADDING"
        );
        assert_eq!(default_asymmetric_key_length(), 2048);
        assert_eq!(default_gcm_tag_length(), 128);
        assert_eq!(default_hash_algorithm(), "PBKDF2WithHmacSHA512");
        assert_eq!(default_hash_iterations(), 100_000);
        assert_eq!(default_hash_key_length(), 256);
        assert_eq!(default_sign_algorithm(), "SHA512withRSA");
        assert_eq!(default_log_level(), "info");
    }

    #[test]
    fn empty_environment_yields_defaults() {
        let cfg = CryptoConfig::load(env(&[])).unwrap();
        assert_eq!(cfg, CryptoConfig::default());
    }

    #[test]
    fn environment_overrides_defaults() {
        let cfg = CryptoConfig::load(env(&[
            ("HASH_ITERATIONS", "1000"),
            ("GCM_TAG_LENGTH", "96"),
            ("SIGN_ALGORITHM", "SHA256withRSA"),
            ("LOG_LEVEL", "debug"),
        ]))
        .unwrap();
        assert_eq!(cfg.hash_iterations, 1000);
        assert_eq!(cfg.gcm_tag_length, 96);
        assert_eq!(cfg.sign_algorithm, "SHA256withRSA");
        assert_eq!(cfg.log_level, "debug");
        assert_eq!(cfg.asymmetric_key_length, 2048);
    }

    #[test]
    fn unparseable_number_is_rejected() {
        assert!(CryptoConfig::load(env(&[("HASH_ITERATIONS", "lots")])).is_err());
    }

    #[test]
    fn validate_accepts_defaults() {
        assert!(CryptoConfig::default().validate().is_ok());
    }

    #[test]
    fn validate_rejects_unknown_algorithm() {
        let cfg = CryptoConfig {
            symmetric_algorithm: "DES/CBC/PKCS5Padding".into(),
            ..CryptoConfig::default()
        };
        let err = cfg.validate().unwrap_err();
        assert!(matches!(
            err.downcast_ref::<CryptoError>(),
            Some(CryptoError::UnsupportedAlgorithm { .. })
        ));
    }

    #[test]
    fn validate_rejects_bad_tag_length() {
        let cfg = CryptoConfig {
            gcm_tag_length: 64,
            ..CryptoConfig::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn validate_rejects_zero_iterations() {
        let cfg = CryptoConfig {
            hash_iterations: 0,
            ..CryptoConfig::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn validate_rejects_empty_log_level() {
        let cfg = CryptoConfig {
            log_level: "  ".into(),
            ..CryptoConfig::default()
        };
        assert!(cfg.validate().is_err());
    }
}
