//! Error taxonomy, algorithm identifiers, and error reports shared across `cryptocore` crates.

pub mod algorithm;
pub mod error;
pub mod report;

pub use algorithm::{
    AsymmetricAlgorithm, PasswordHashAlgorithm, SignatureAlgorithm, SymmetricAlgorithm,
};
pub use error::{CryptoError, CryptoResult};
pub use report::ErrorReport;
