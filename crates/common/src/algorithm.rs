//! Algorithm identifiers accepted in configuration.
//!
//! Identifiers use the conventional `Cipher/Mode/Padding` and
//! `DigestwithRSA` spellings and are matched case-insensitively. Parsing an
//! unknown identifier yields [`CryptoError::UnsupportedAlgorithm`].

use std::fmt;
use std::str::FromStr;

use crate::error::CryptoError;

/// Authenticated symmetric cipher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SymmetricAlgorithm {
    /// AES in Galois/Counter Mode. The padding suffix is accepted for
    /// compatibility only; GCM is a stream mode and never pads.
    #[default]
    AesGcm,
}

impl SymmetricAlgorithm {
    /// Cipher block size in bytes, which is also the IV length.
    pub fn block_size(self) -> usize {
        match self {
            Self::AesGcm => 16,
        }
    }
}

impl FromStr for SymmetricAlgorithm {
    type Err = CryptoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "AES/GCM/PKCS5PADDING" | "AES/GCM/NOPADDING" => Ok(Self::AesGcm),
            _ => Err(CryptoError::unsupported_algorithm(format!(
                "unknown symmetric algorithm: {s}"
            ))),
        }
    }
}

impl fmt::Display for SymmetricAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AesGcm => f.write_str("AES/GCM/PKCS5Padding"),
        }
    }
}

/// RSA encryption scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AsymmetricAlgorithm {
    /// RSA-OAEP with SHA-256, MGF1(SHA-256) and an empty label.
    #[default]
    RsaOaepSha256,
}

impl AsymmetricAlgorithm {
    /// Output length in bytes of the OAEP hash.
    pub fn hash_len(self) -> usize {
        match self {
            Self::RsaOaepSha256 => 32,
        }
    }
}

impl FromStr for AsymmetricAlgorithm {
    type Err = CryptoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "RSA/ECB/OAEPWITHSHA-256ANDMGF1PADDING" => Ok(Self::RsaOaepSha256),
            _ => Err(CryptoError::unsupported_algorithm(format!(
                "unknown asymmetric algorithm: {s}"
            ))),
        }
    }
}

impl fmt::Display for AsymmetricAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RsaOaepSha256 => f.write_str("RSA/ECB/OAEPWITHSHA-256ANDMGF1PADDING"),
        }
    }
}

/// PBKDF2 pseudo-random function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PasswordHashAlgorithm {
    Pbkdf2HmacSha256,
    #[default]
    Pbkdf2HmacSha512,
}

impl FromStr for PasswordHashAlgorithm {
    type Err = CryptoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "PBKDF2WITHHMACSHA256" => Ok(Self::Pbkdf2HmacSha256),
            "PBKDF2WITHHMACSHA512" => Ok(Self::Pbkdf2HmacSha512),
            _ => Err(CryptoError::unsupported_algorithm(format!(
                "unknown password hash algorithm: {s}"
            ))),
        }
    }
}

impl fmt::Display for PasswordHashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pbkdf2HmacSha256 => f.write_str("PBKDF2WithHmacSHA256"),
            Self::Pbkdf2HmacSha512 => f.write_str("PBKDF2WithHmacSHA512"),
        }
    }
}

/// RSASSA-PKCS1-v1_5 signature digest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SignatureAlgorithm {
    Sha256WithRsa,
    Sha384WithRsa,
    #[default]
    Sha512WithRsa,
}

impl FromStr for SignatureAlgorithm {
    type Err = CryptoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "SHA256WITHRSA" => Ok(Self::Sha256WithRsa),
            "SHA384WITHRSA" => Ok(Self::Sha384WithRsa),
            "SHA512WITHRSA" => Ok(Self::Sha512WithRsa),
            _ => Err(CryptoError::unsupported_algorithm(format!(
                "unknown signature algorithm: {s}"
            ))),
        }
    }
}

impl fmt::Display for SignatureAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sha256WithRsa => f.write_str("SHA256withRSA"),
            Self::Sha384WithRsa => f.write_str("SHA384withRSA"),
            Self::Sha512WithRsa => f.write_str("SHA512withRSA"),
        }
    }
}
