//! Cryptographic components composed by [`crate::CryptoCore`].
//!
//! Each component is stateless per call: it builds its own cipher or
//! signature engine for every operation and shares nothing mutable except the
//! random source. All failures are returned as [`cryptocore_common::CryptoError`];
//! nothing is retried, logged, or swallowed here.

pub mod asymmetric;
pub mod oaep;
pub mod password;
pub mod signature;
pub mod symmetric;

pub use asymmetric::{AsymmetricCipher, RsaOaepCipher};
pub use password::{PasswordHasher, Pbkdf2Hasher};
pub use signature::{RsaSigner, Signer, Verifier};
pub use symmetric::{AesGcmCipher, SymmetricCipher, TagLength};
