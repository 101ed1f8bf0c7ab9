//! Caller-supplied key material.
//!
//! The core never generates, stores, or rotates keys. These wrappers only tag
//! bytes with their algorithm family and decode the standard RSA encodings.
//!
//! # Security invariants
//!
//! - Secret and private key bytes are zeroed on drop.
//! - `Debug` output never includes key material.

use rsa::pkcs1::{DecodeRsaPrivateKey, DecodeRsaPublicKey};
use rsa::pkcs8::{DecodePrivateKey, DecodePublicKey};
use rsa::traits::PublicKeyParts;
use zeroize::Zeroizing;

use cryptocore_common::{CryptoError, CryptoResult};

/// Symmetric secret key.
#[derive(Clone)]
pub struct SecretKey(Zeroizing<Vec<u8>>);

impl SecretKey {
    /// Copy `bytes` into a new zeroizing buffer.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self(Zeroizing::new(bytes.to_vec()))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// An empty key stands for a missing key and is rejected by every cipher.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<u8>> for SecretKey {
    fn from(bytes: Vec<u8>) -> Self {
        Self(Zeroizing::new(bytes))
    }
}

impl std::fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SecretKey([REDACTED])")
    }
}

/// RSA public key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicKey(rsa::RsaPublicKey);

impl PublicKey {
    /// Decode a DER-encoded SubjectPublicKeyInfo or PKCS#1 `RSAPublicKey`.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::InvalidKey`] if neither encoding parses.
    pub fn from_der(der: &[u8]) -> CryptoResult<Self> {
        rsa::RsaPublicKey::from_public_key_der(der)
            .or_else(|_| rsa::RsaPublicKey::from_pkcs1_der(der))
            .map(Self)
            .map_err(|e| CryptoError::invalid_key("malformed RSA public key").with_source(e))
    }

    /// Decode a PEM-encoded `PUBLIC KEY` or `RSA PUBLIC KEY` document.
    pub fn from_pem(pem: &str) -> CryptoResult<Self> {
        rsa::RsaPublicKey::from_public_key_pem(pem)
            .or_else(|_| rsa::RsaPublicKey::from_pkcs1_pem(pem))
            .map(Self)
            .map_err(|e| CryptoError::invalid_key("malformed RSA public key").with_source(e))
    }

    /// Modulus length in bytes.
    pub fn size(&self) -> usize {
        self.0.size()
    }

    pub(crate) fn as_rsa(&self) -> &rsa::RsaPublicKey {
        &self.0
    }
}

impl From<rsa::RsaPublicKey> for PublicKey {
    fn from(key: rsa::RsaPublicKey) -> Self {
        Self(key)
    }
}

/// RSA private key.
#[derive(Clone)]
pub struct PrivateKey(rsa::RsaPrivateKey);

impl PrivateKey {
    /// Decode a DER-encoded PKCS#8 `PrivateKeyInfo` or PKCS#1 `RSAPrivateKey`.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::InvalidKey`] if neither encoding parses.
    pub fn from_der(der: &[u8]) -> CryptoResult<Self> {
        rsa::RsaPrivateKey::from_pkcs8_der(der)
            .or_else(|_| rsa::RsaPrivateKey::from_pkcs1_der(der))
            .map(Self)
            .map_err(|e| CryptoError::invalid_key("malformed RSA private key").with_source(e))
    }

    /// Decode a PEM-encoded `PRIVATE KEY` or `RSA PRIVATE KEY` document.
    pub fn from_pem(pem: &str) -> CryptoResult<Self> {
        rsa::RsaPrivateKey::from_pkcs8_pem(pem)
            .or_else(|_| rsa::RsaPrivateKey::from_pkcs1_pem(pem))
            .map(Self)
            .map_err(|e| CryptoError::invalid_key("malformed RSA private key").with_source(e))
    }

    /// Modulus length in bytes.
    pub fn size(&self) -> usize {
        self.0.size()
    }

    /// The matching public key.
    pub fn public_key(&self) -> PublicKey {
        PublicKey(self.0.to_public_key())
    }

    pub(crate) fn as_rsa(&self) -> &rsa::RsaPrivateKey {
        &self.0
    }
}

impl From<rsa::RsaPrivateKey> for PrivateKey {
    fn from(key: rsa::RsaPrivateKey) -> Self {
        Self(key)
    }
}

impl std::fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("PrivateKey([REDACTED])")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::rsa_key_pair;
    use rsa::pkcs1::{EncodeRsaPrivateKey, EncodeRsaPublicKey};
    use rsa::pkcs8::{EncodePrivateKey, EncodePublicKey, LineEnding};

    #[test]
    fn secret_key_redacted_in_debug() {
        let key = SecretKey::from_bytes(&[0xFF; 32]);
        let printed = format!("{key:?}");
        assert!(printed.contains("REDACTED"));
        assert!(!printed.contains("255"));
    }

    #[test]
    fn secret_key_exposes_bytes() {
        let key = SecretKey::from(vec![1, 2, 3]);
        assert_eq!(key.as_bytes(), &[1, 2, 3]);
        assert_eq!(key.len(), 3);
        assert!(!key.is_empty());
        assert!(SecretKey::from_bytes(&[]).is_empty());
    }

    #[test]
    fn private_key_decodes_pkcs8_and_pkcs1_der() {
        let (private, _) = rsa_key_pair();
        let pkcs8 = private.as_rsa().to_pkcs8_der().unwrap();
        let pkcs1 = private.as_rsa().to_pkcs1_der().unwrap();
        assert_eq!(
            PrivateKey::from_der(pkcs8.as_bytes()).unwrap().size(),
            private.size()
        );
        assert_eq!(
            PrivateKey::from_der(pkcs1.as_bytes()).unwrap().size(),
            private.size()
        );
    }

    #[test]
    fn public_key_decodes_spki_and_pkcs1() {
        let (_, public) = rsa_key_pair();
        let spki = public.as_rsa().to_public_key_der().unwrap();
        let pkcs1 = public.as_rsa().to_pkcs1_der().unwrap();
        assert_eq!(&PublicKey::from_der(spki.as_bytes()).unwrap(), public);
        assert_eq!(&PublicKey::from_der(pkcs1.as_bytes()).unwrap(), public);
    }

    #[test]
    fn pem_round_trip() {
        let (private, public) = rsa_key_pair();
        let private_pem = private.as_rsa().to_pkcs8_pem(LineEnding::LF).unwrap();
        let public_pem = public.as_rsa().to_public_key_pem(LineEnding::LF).unwrap();
        let decoded = PrivateKey::from_pem(&private_pem).unwrap();
        assert_eq!(&decoded.public_key(), public);
        assert_eq!(&PublicKey::from_pem(&public_pem).unwrap(), public);
    }

    #[test]
    fn malformed_keys_are_invalid_key() {
        let err = PublicKey::from_der(&[0x30, 0x03, 0x02, 0x01]).unwrap_err();
        assert!(matches!(err, CryptoError::InvalidKey { .. }));
        let err = PrivateKey::from_pem("not a pem document").unwrap_err();
        assert!(matches!(err, CryptoError::InvalidKey { .. }));
    }

    #[test]
    fn private_key_redacted_in_debug() {
        let (private, _) = rsa_key_pair();
        assert_eq!(format!("{private:?}"), "PrivateKey([REDACTED])");
    }
}
