//! Error taxonomy shared by every cryptographic operation.

use thiserror::Error;

/// Boxed underlying cause attached to a [`CryptoError`].
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Failure of a cryptographic operation.
///
/// Each variant carries a stable code (see [`CryptoError::code`]):
/// - [`CryptoError::UnsupportedAlgorithm`] → `CRY-001`
/// - [`CryptoError::InvalidKey`] → `CRY-002`
/// - [`CryptoError::InvalidParameters`] → `CRY-003`
/// - [`CryptoError::InvalidData`] → `CRY-004`
/// - [`CryptoError::Signature`] → `CRY-005`
///
/// A signature that is well-formed but does not match is not an error; the
/// verifier reports it as `false`.
#[derive(Debug, Error)]
pub enum CryptoError {
    /// The configured algorithm identifier is unknown or unavailable.
    #[error("unsupported algorithm: {message}")]
    UnsupportedAlgorithm {
        message: String,
        #[source]
        source: Option<BoxError>,
    },

    /// Missing key, wrong key type, or key rejected by the primitive.
    #[error("invalid key: {message}")]
    InvalidKey {
        message: String,
        #[source]
        source: Option<BoxError>,
    },

    /// Malformed IV, tag length, or derivation parameter combination.
    #[error("invalid parameters: {message}")]
    InvalidParameters {
        message: String,
        #[source]
        source: Option<BoxError>,
    },

    /// Input too short or malformed, or an authentication/padding check failed.
    #[error("invalid data: {message}")]
    InvalidData {
        message: String,
        #[source]
        source: Option<BoxError>,
    },

    /// Empty or malformed signature input, or a fault in the signature scheme.
    #[error("signature error: {message}")]
    Signature {
        message: String,
        #[source]
        source: Option<BoxError>,
    },
}

/// Result alias used throughout the crypto crates.
pub type CryptoResult<T> = Result<T, CryptoError>;

impl CryptoError {
    pub fn unsupported_algorithm(message: impl Into<String>) -> Self {
        Self::UnsupportedAlgorithm {
            message: message.into(),
            source: None,
        }
    }

    pub fn invalid_key(message: impl Into<String>) -> Self {
        Self::InvalidKey {
            message: message.into(),
            source: None,
        }
    }

    pub fn invalid_parameters(message: impl Into<String>) -> Self {
        Self::InvalidParameters {
            message: message.into(),
            source: None,
        }
    }

    pub fn invalid_data(message: impl Into<String>) -> Self {
        Self::InvalidData {
            message: message.into(),
            source: None,
        }
    }

    pub fn signature(message: impl Into<String>) -> Self {
        Self::Signature {
            message: message.into(),
            source: None,
        }
    }

    /// Attach the underlying cause, replacing any previous one.
    pub fn with_source(mut self, cause: impl Into<BoxError>) -> Self {
        let slot = match &mut self {
            Self::UnsupportedAlgorithm { source, .. }
            | Self::InvalidKey { source, .. }
            | Self::InvalidParameters { source, .. }
            | Self::InvalidData { source, .. }
            | Self::Signature { source, .. } => source,
        };
        *slot = Some(cause.into());
        self
    }

    /// Stable machine-readable code for this error kind.
    pub fn code(&self) -> &'static str {
        match self {
            Self::UnsupportedAlgorithm { .. } => "CRY-001",
            Self::InvalidKey { .. } => "CRY-002",
            Self::InvalidParameters { .. } => "CRY-003",
            Self::InvalidData { .. } => "CRY-004",
            Self::Signature { .. } => "CRY-005",
        }
    }

    /// Human-readable message without the kind prefix.
    pub fn message(&self) -> &str {
        match self {
            Self::UnsupportedAlgorithm { message, .. }
            | Self::InvalidKey { message, .. }
            | Self::InvalidParameters { message, .. }
            | Self::InvalidData { message, .. }
            | Self::Signature { message, .. } => message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn codes_are_stable() {
        assert_eq!(CryptoError::unsupported_algorithm("x").code(), "CRY-001");
        assert_eq!(CryptoError::invalid_key("x").code(), "CRY-002");
        assert_eq!(CryptoError::invalid_parameters("x").code(), "CRY-003");
        assert_eq!(CryptoError::invalid_data("x").code(), "CRY-004");
        assert_eq!(CryptoError::signature("x").code(), "CRY-005");
    }

    #[test]
    fn display_includes_message() {
        let e = CryptoError::invalid_data("ciphertext shorter than IV");
        assert!(e.to_string().contains("ciphertext shorter than IV"));
        assert_eq!(e.message(), "ciphertext shorter than IV");
    }

    #[test]
    fn source_is_exposed() {
        let cause = std::io::Error::other("rng offline");
        let e = CryptoError::invalid_key("bad key").with_source(cause);
        let source = e.source().expect("source attached");
        assert!(source.to_string().contains("rng offline"));
    }

    #[test]
    fn no_source_by_default() {
        assert!(CryptoError::signature("empty").source().is_none());
    }
}
