//! RSA-OAEP encryption, and decryption through raw RSA plus software unpadding.
//!
//! Encryption uses the RSA engine's own OAEP encoder (SHA-256, MGF1(SHA-256),
//! empty label). Decryption is split in two steps:
//!
//! 1. [`raw_decrypt`]: textbook RSA with no padding scheme. This stands in for
//!    a hardware module that only exposes raw RSA. Leading zero bytes lost in
//!    the integer conversion are restored so the block is exactly `k` bytes.
//! 2. [`oaep::unpad`]: portable RFC 8017 OAEP decoding of that block.
//!
//! Only step 1 changes when the hardware call replaces it.

use std::sync::Arc;

use rsa::traits::PublicKeyParts;
use rsa::{BigUint, Oaep};
use sha2::Sha256;

use cryptocore_common::{AsymmetricAlgorithm, CryptoError, CryptoResult};

use super::oaep;
use crate::keys::{PrivateKey, PublicKey};
use crate::random::{RandomSource, RngAdapter};

/// RSA public-key encryption.
pub trait AsymmetricCipher {
    /// Encrypt `plaintext` into exactly one RSA block.
    fn encrypt(&self, key: &PublicKey, plaintext: &[u8]) -> CryptoResult<Vec<u8>>;

    /// Decrypt one RSA block back into the plaintext.
    fn decrypt(&self, key: &PrivateKey, ciphertext: &[u8]) -> CryptoResult<Vec<u8>>;
}

/// [`AsymmetricCipher`] for RSA-OAEP with a configured key length.
#[derive(Clone)]
pub struct RsaOaepCipher {
    algorithm: AsymmetricAlgorithm,
    key_len: usize,
    random: Arc<dyn RandomSource>,
}

impl RsaOaepCipher {
    /// Build a cipher for keys of `key_length_bits`.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::InvalidParameters`] if the key length is not a
    /// whole number of bytes or is too short to hold any OAEP message.
    pub fn new(
        algorithm: AsymmetricAlgorithm,
        key_length_bits: u32,
        random: Arc<dyn RandomSource>,
    ) -> CryptoResult<Self> {
        let key_len = key_length_bits as usize / 8;
        if key_length_bits % 8 != 0 || key_len < 2 * algorithm.hash_len() + 2 {
            return Err(CryptoError::invalid_parameters(format!(
                "asymmetric key length of {key_length_bits} bits is unusable with {algorithm}"
            )));
        }
        Ok(Self {
            algorithm,
            key_len,
            random,
        })
    }

    /// RSA block size in bytes.
    pub fn key_len(&self) -> usize {
        self.key_len
    }

    /// Largest plaintext accepted by [`AsymmetricCipher::encrypt`].
    pub fn max_plaintext_len(&self) -> usize {
        self.key_len - 2 * self.algorithm.hash_len() - 2
    }

    fn check_key_size(&self, size: usize) -> CryptoResult<()> {
        if size != self.key_len {
            return Err(CryptoError::invalid_key(format!(
                "RSA key is {} bits, configured for {}",
                size * 8,
                self.key_len * 8
            )));
        }
        Ok(())
    }
}

impl AsymmetricCipher for RsaOaepCipher {
    fn encrypt(&self, key: &PublicKey, plaintext: &[u8]) -> CryptoResult<Vec<u8>> {
        self.check_key_size(key.size())?;
        if plaintext.len() > self.max_plaintext_len() {
            return Err(CryptoError::invalid_data(format!(
                "plaintext of {} bytes exceeds the OAEP limit of {} bytes",
                plaintext.len(),
                self.max_plaintext_len()
            )));
        }
        let padding = match self.algorithm {
            AsymmetricAlgorithm::RsaOaepSha256 => Oaep::new::<Sha256>(),
        };
        let mut rng = RngAdapter::new(self.random.as_ref());
        key.as_rsa()
            .encrypt(&mut rng, padding, plaintext)
            .map_err(|e| CryptoError::invalid_data("RSA-OAEP encryption failed").with_source(e))
    }

    fn decrypt(&self, key: &PrivateKey, ciphertext: &[u8]) -> CryptoResult<Vec<u8>> {
        self.check_key_size(key.size())?;
        let padded = raw_decrypt(key, ciphertext, self.key_len, self.random.as_ref())?;
        match self.algorithm {
            AsymmetricAlgorithm::RsaOaepSha256 => oaep::unpad::<Sha256>(&padded, self.key_len, b""),
        }
    }
}

/// Raw RSA decryption (`m = c^d mod n`) returning a block of exactly `key_len` bytes.
///
/// Blinding draws from `random`.
///
/// # Errors
///
/// - [`CryptoError::InvalidData`] if the ciphertext is not `key_len` bytes or
///   is not smaller than the modulus.
/// - [`CryptoError::InvalidKey`] if the private-key operation fails its
///   consistency check.
pub fn raw_decrypt(
    key: &PrivateKey,
    ciphertext: &[u8],
    key_len: usize,
    random: &dyn RandomSource,
) -> CryptoResult<Vec<u8>> {
    if ciphertext.len() != key_len {
        return Err(CryptoError::invalid_data(format!(
            "ciphertext is {} bytes, expected {key_len}",
            ciphertext.len()
        )));
    }
    let c = BigUint::from_bytes_be(ciphertext);
    if &c >= key.as_rsa().n() {
        return Err(CryptoError::invalid_data(
            "ciphertext is out of range for the key modulus",
        ));
    }

    let mut rng = RngAdapter::new(random);
    let m = rsa::hazmat::rsa_decrypt_and_check(key.as_rsa(), Some(&mut rng), &c)
        .map_err(|e| CryptoError::invalid_key("raw RSA decryption failed").with_source(e))?;

    left_pad(&m.to_bytes_be(), key_len)
}

/// Restore the leading zero bytes stripped by big-integer conversion.
fn left_pad(block: &[u8], key_len: usize) -> CryptoResult<Vec<u8>> {
    if block.len() > key_len {
        return Err(CryptoError::invalid_data(format!(
            "decrypted block of {} bytes exceeds key length {key_len}",
            block.len()
        )));
    }
    let mut padded = vec![0u8; key_len];
    padded[key_len - block.len()..].copy_from_slice(block);
    Ok(padded)
}
