//! Serialisable projection of a [`CryptoError`].
//!
//! Hosts that surface failures over their own APIs send this body instead of
//! the error itself. Only the code and message leave the process; underlying
//! causes stay in the error chain.

use serde::{Deserialize, Serialize};

use crate::error::CryptoError;

/// Error body carrying a stable code and a human-readable message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorReport {
    /// Stable machine-readable error code (e.g. `"CRY-004"`).
    pub code: String,
    /// Human-readable description.
    pub message: String,
}

impl ErrorReport {
    /// Construct an [`ErrorReport`] from a code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

impl From<&CryptoError> for ErrorReport {
    fn from(err: &CryptoError) -> Self {
        Self::new(err.code(), err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_error_carries_code_and_message() {
        let err = CryptoError::invalid_data("authentication tag mismatch");
        let report = ErrorReport::from(&err);
        assert_eq!(report.code, "CRY-004");
        assert!(report.message.contains("authentication tag mismatch"));
    }

    #[test]
    fn cause_is_not_serialised() {
        let err = CryptoError::invalid_key("rejected")
            .with_source(std::io::Error::other("internal detail"));
        let json = serde_json::to_string(&ErrorReport::from(&err)).unwrap();
        assert!(!json.contains("internal detail"));
    }

    #[test]
    fn serde_round_trip() {
        let report = ErrorReport::new("CRY-005", "signature is empty");
        let json = serde_json::to_string(&report).unwrap();
        let decoded: ErrorReport = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, report);
    }
}
