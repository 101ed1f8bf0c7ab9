//! RSASSA-PKCS1-v1_5 signatures (`SHA512withRSA` by default).
//!
//! Signatures travel as URL-safe base64 without padding. Verification also
//! accepts padded input and the standard alphabet. Signing blinds the private
//! key operation with the shared random source.

use std::sync::Arc;

use base64::{
    alphabet,
    engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig},
    Engine as _,
};
use rsa::pkcs1v15::{Signature, SigningKey, VerifyingKey};
use rsa::signature::{RandomizedSigner as _, SignatureEncoding, Verifier as _};
use sha2::{Sha256, Sha384, Sha512};

use cryptocore_common::{CryptoError, CryptoResult, SignatureAlgorithm};

use crate::keys::{PrivateKey, PublicKey};
use crate::random::{RandomSource, RngAdapter};

const SIGNATURE_BASE64: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new()
        .with_encode_padding(false)
        .with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

const STANDARD_BASE64: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// URL-safe first, then the standard alphabet.
fn decode_signature(signature: &str) -> CryptoResult<Vec<u8>> {
    SIGNATURE_BASE64
        .decode(signature)
        .or_else(|_| STANDARD_BASE64.decode(signature))
        .map_err(|e| CryptoError::signature("signature is not valid base64").with_source(e))
}

/// Produces signatures over arbitrary payloads.
pub trait Signer {
    /// Sign `data` and return the base64-encoded signature.
    fn sign(&self, data: &[u8], key: &PrivateKey) -> CryptoResult<String>;
}

/// Checks signatures produced by a [`Signer`].
pub trait Verifier {
    /// Returns `Ok(false)` for a well-formed signature that does not match.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::Signature`] for an empty or malformed signature
    /// string, before any cryptographic work.
    fn verify(&self, data: &[u8], signature: &str, key: &PublicKey) -> CryptoResult<bool>;
}

/// [`Signer`] and [`Verifier`] for RSA PKCS#1 v1.5 signatures.
#[derive(Clone)]
pub struct RsaSigner {
    algorithm: SignatureAlgorithm,
    random: Arc<dyn RandomSource>,
}

impl RsaSigner {
    pub fn new(algorithm: SignatureAlgorithm, random: Arc<dyn RandomSource>) -> Self {
        Self { algorithm, random }
    }

    pub fn algorithm(&self) -> SignatureAlgorithm {
        self.algorithm
    }
}

impl Signer for RsaSigner {
    fn sign(&self, data: &[u8], key: &PrivateKey) -> CryptoResult<String> {
        if data.is_empty() {
            return Err(CryptoError::invalid_data("data to sign is empty"));
        }
        let key = key.as_rsa().clone();
        let mut rng = RngAdapter::new(self.random.as_ref());
        let signature = match self.algorithm {
            SignatureAlgorithm::Sha256WithRsa => {
                SigningKey::<Sha256>::new(key).try_sign_with_rng(&mut rng, data)
            }
            SignatureAlgorithm::Sha384WithRsa => {
                SigningKey::<Sha384>::new(key).try_sign_with_rng(&mut rng, data)
            }
            SignatureAlgorithm::Sha512WithRsa => {
                SigningKey::<Sha512>::new(key).try_sign_with_rng(&mut rng, data)
            }
        }
        .map_err(|e| {
            CryptoError::signature(format!("{} signing failed", self.algorithm)).with_source(e)
        })?;

        Ok(SIGNATURE_BASE64.encode(signature.to_bytes()))
    }
}

impl Verifier for RsaSigner {
    fn verify(&self, data: &[u8], signature: &str, key: &PublicKey) -> CryptoResult<bool> {
        if signature.trim().is_empty() {
            return Err(CryptoError::signature("signature is empty"));
        }
        if data.is_empty() {
            return Err(CryptoError::invalid_data("signed data is empty"));
        }

        let bytes = decode_signature(signature.trim())?;
        if bytes.len() != key.size() {
            return Err(CryptoError::signature(format!(
                "signature is {} bytes, expected {}",
                bytes.len(),
                key.size()
            )));
        }
        let signature = Signature::try_from(bytes.as_slice())
            .map_err(|e| CryptoError::signature("malformed signature").with_source(e))?;

        let key = key.as_rsa().clone();
        let outcome = match self.algorithm {
            SignatureAlgorithm::Sha256WithRsa => {
                VerifyingKey::<Sha256>::new(key).verify(data, &signature)
            }
            SignatureAlgorithm::Sha384WithRsa => {
                VerifyingKey::<Sha384>::new(key).verify(data, &signature)
            }
            SignatureAlgorithm::Sha512WithRsa => {
                VerifyingKey::<Sha512>::new(key).verify(data, &signature)
            }
        };
        Ok(outcome.is_ok())
    }
}
