//! `cryptocore`: symmetric and asymmetric encryption, password hashing and
//! digital signatures behind one configured facade.
//!
//! ```text
//! CryptoConfig ──► CryptoCore ─┬─ AesGcmCipher   (AES-GCM, self or caller IV)
//!                              ├─ RsaOaepCipher  (RSA-OAEP, raw RSA + software unpad)
//!                              ├─ Pbkdf2Hasher   (PBKDF2-HMAC-SHA2, uppercase hex)
//!                              ├─ RsaSigner      (PKCS#1 v1.5, base64)
//!                              └─ RandomSource   (OS CSPRNG, shared)
//! ```
//!
//! Keys are always supplied by the caller; nothing is persisted.

pub mod config;
pub mod crypto;
pub mod facade;
pub mod keys;
pub mod random;
pub mod telemetry;

pub use config::CryptoConfig;
pub use cryptocore_common::{CryptoError, CryptoResult, ErrorReport};
pub use facade::CryptoCore;
pub use keys::{PrivateKey, PublicKey, SecretKey};
pub use random::{OsRandom, RandomSource};

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::OnceLock;

    use aes_gcm::aead::OsRng;

    use crate::keys::{PrivateKey, PublicKey};

    /// One 2048-bit key pair shared by every test; generation is slow.
    pub(crate) fn rsa_key_pair() -> &'static (PrivateKey, PublicKey) {
        static PAIR: OnceLock<(PrivateKey, PublicKey)> = OnceLock::new();
        PAIR.get_or_init(|| {
            let private = rsa::RsaPrivateKey::new(&mut OsRng, 2048).unwrap();
            let private = PrivateKey::from(private);
            let public = private.public_key();
            (private, public)
        })
    }
}
