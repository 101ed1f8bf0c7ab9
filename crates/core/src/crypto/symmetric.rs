//! AES-GCM authenticated encryption with caller- or self-generated IVs.
//!
//! # Ciphertext format
//!
//! ```text
//! self-generated IV:  ciphertext || tag || IV
//! caller-supplied IV: ciphertext || tag
//! ```
//!
//! The IV is always one AES block (16 bytes) and sits at the **tail** of a
//! self-IV blob. The tag length is fixed per configuration. AES-128, AES-192
//! or AES-256 is selected from the key length.

use std::sync::Arc;

use aes_gcm::{
    aead::{
        consts::{U12, U13, U14, U15, U16},
        generic_array::GenericArray,
        Aead, KeyInit, Payload,
    },
    aes::{Aes128, Aes192, Aes256},
    AesGcm,
};

use cryptocore_common::{CryptoError, CryptoResult, SymmetricAlgorithm};

use crate::keys::SecretKey;
use crate::random::{self, RandomSource};

/// GCM tag lengths accepted in configuration, in bits.
pub const SUPPORTED_TAG_BITS: [u32; 5] = [96, 104, 112, 120, 128];

/// Authentication tag length of an AES-GCM ciphertext.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TagLength(usize);

impl TagLength {
    /// Validate a tag length given in bits.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::InvalidParameters`] unless `bits` is one of
    /// [`SUPPORTED_TAG_BITS`].
    pub fn from_bits(bits: u32) -> CryptoResult<Self> {
        if SUPPORTED_TAG_BITS.contains(&bits) {
            Ok(Self(bits as usize / 8))
        } else {
            Err(CryptoError::invalid_parameters(format!(
                "unsupported GCM tag length: {bits} bits"
            )))
        }
    }

    pub fn bytes(self) -> usize {
        self.0
    }
}

impl Default for TagLength {
    fn default() -> Self {
        Self(16)
    }
}

/// Authenticated symmetric encryption.
pub trait SymmetricCipher {
    /// Encrypt with a fresh random IV and return `ciphertext || tag || IV`.
    fn encrypt_self_iv(
        &self,
        key: &SecretKey,
        plaintext: &[u8],
        aad: Option<&[u8]>,
    ) -> CryptoResult<Vec<u8>>;

    /// Encrypt with a caller-supplied IV and return `ciphertext || tag`.
    ///
    /// Without an IV this is exactly [`SymmetricCipher::encrypt_self_iv`].
    fn encrypt_with_iv(
        &self,
        key: &SecretKey,
        plaintext: &[u8],
        iv: Option<&[u8]>,
        aad: Option<&[u8]>,
    ) -> CryptoResult<Vec<u8>>;

    /// Decrypt a `ciphertext || tag || IV` blob.
    fn decrypt_self_iv(
        &self,
        key: &SecretKey,
        blob: &[u8],
        aad: Option<&[u8]>,
    ) -> CryptoResult<Vec<u8>>;

    /// Decrypt `ciphertext || tag` with a caller-supplied IV.
    ///
    /// Without an IV this is exactly [`SymmetricCipher::decrypt_self_iv`].
    fn decrypt_with_iv(
        &self,
        key: &SecretKey,
        ciphertext: &[u8],
        iv: Option<&[u8]>,
        aad: Option<&[u8]>,
    ) -> CryptoResult<Vec<u8>>;
}

/// [`SymmetricCipher`] implemented with AES-GCM.
///
/// Every call builds its own cipher instance; only the random source is shared.
#[derive(Clone)]
pub struct AesGcmCipher {
    algorithm: SymmetricAlgorithm,
    tag: TagLength,
    random: Arc<dyn RandomSource>,
}

#[derive(Clone, Copy)]
enum Direction {
    Seal,
    Open,
}

impl AesGcmCipher {
    pub fn new(
        algorithm: SymmetricAlgorithm,
        tag: TagLength,
        random: Arc<dyn RandomSource>,
    ) -> Self {
        Self {
            algorithm,
            tag,
            random,
        }
    }

    /// IV length in bytes (the cipher block size).
    pub fn block_size(&self) -> usize {
        self.algorithm.block_size()
    }

    pub fn tag_length(&self) -> TagLength {
        self.tag
    }

    fn run(
        &self,
        direction: Direction,
        key: &SecretKey,
        iv: &[u8],
        data: &[u8],
        aad: Option<&[u8]>,
    ) -> CryptoResult<Vec<u8>> {
        if key.is_empty() {
            return Err(CryptoError::invalid_key("secret key is missing"));
        }
        if iv.len() != self.block_size() {
            return Err(CryptoError::invalid_parameters(format!(
                "IV must be {} bytes, got {}",
                self.block_size(),
                iv.len()
            )));
        }
        let key = key.as_bytes();
        let aad = aad.unwrap_or_default();
        let tag_len = self.tag.bytes();

        macro_rules! dispatch {
            ($($key_len:literal, $tag_len:literal => $aes:ty, $tag:ty;)*) => {
                match (key.len(), tag_len) {
                    $(
                        ($key_len, $tag_len) => match direction {
                            Direction::Seal => seal::<AesGcm<$aes, U16, $tag>>(key, iv, data, aad),
                            Direction::Open => open::<AesGcm<$aes, U16, $tag>>(key, iv, data, aad),
                        },
                    )*
                    (16 | 24 | 32, _) => Err(CryptoError::invalid_parameters(format!(
                        "unsupported GCM tag length: {} bits",
                        tag_len * 8
                    ))),
                    (key_len, _) => Err(CryptoError::invalid_key(format!(
                        "AES key must be 16, 24 or 32 bytes, got {key_len}"
                    ))),
                }
            };
        }

        dispatch! {
            16, 12 => Aes128, U12;
            16, 13 => Aes128, U13;
            16, 14 => Aes128, U14;
            16, 15 => Aes128, U15;
            16, 16 => Aes128, U16;
            24, 12 => Aes192, U12;
            24, 13 => Aes192, U13;
            24, 14 => Aes192, U14;
            24, 15 => Aes192, U15;
            24, 16 => Aes192, U16;
            32, 12 => Aes256, U12;
            32, 13 => Aes256, U13;
            32, 14 => Aes256, U14;
            32, 15 => Aes256, U15;
            32, 16 => Aes256, U16;
        }
    }
}

fn build_cipher<C: KeyInit>(key: &[u8]) -> CryptoResult<C> {
    C::new_from_slice(key).map_err(|_| CryptoError::invalid_key("AES key rejected"))
}

fn seal<C: Aead + KeyInit>(
    key: &[u8],
    iv: &[u8],
    plaintext: &[u8],
    aad: &[u8],
) -> CryptoResult<Vec<u8>> {
    let cipher = build_cipher::<C>(key)?;
    cipher
        .encrypt(GenericArray::from_slice(iv), Payload { msg: plaintext, aad })
        .map_err(|_| CryptoError::invalid_data("AES-GCM encryption failed"))
}

fn open<C: Aead + KeyInit>(
    key: &[u8],
    iv: &[u8],
    ciphertext: &[u8],
    aad: &[u8],
) -> CryptoResult<Vec<u8>> {
    let cipher = build_cipher::<C>(key)?;
    cipher
        .decrypt(GenericArray::from_slice(iv), Payload { msg: ciphertext, aad })
        .map_err(|_| {
            CryptoError::invalid_data("authentication failed: ciphertext corrupt or AAD mismatch")
        })
}

impl SymmetricCipher for AesGcmCipher {
    fn encrypt_self_iv(
        &self,
        key: &SecretKey,
        plaintext: &[u8],
        aad: Option<&[u8]>,
    ) -> CryptoResult<Vec<u8>> {
        let iv = random::generate_iv(self.random.as_ref(), self.block_size());
        let mut output = self.run(Direction::Seal, key, &iv, plaintext, aad)?;
        output.extend_from_slice(&iv);
        Ok(output)
    }

    fn encrypt_with_iv(
        &self,
        key: &SecretKey,
        plaintext: &[u8],
        iv: Option<&[u8]>,
        aad: Option<&[u8]>,
    ) -> CryptoResult<Vec<u8>> {
        match iv {
            Some(iv) => self.run(Direction::Seal, key, iv, plaintext, aad),
            None => self.encrypt_self_iv(key, plaintext, aad),
        }
    }

    fn decrypt_self_iv(
        &self,
        key: &SecretKey,
        blob: &[u8],
        aad: Option<&[u8]>,
    ) -> CryptoResult<Vec<u8>> {
        let block_size = self.block_size();
        if blob.len() < block_size {
            return Err(CryptoError::invalid_data(format!(
                "ciphertext of {} bytes is shorter than the {block_size}-byte IV",
                blob.len()
            )));
        }
        let (ciphertext, iv) = blob.split_at(blob.len() - block_size);
        self.run(Direction::Open, key, iv, ciphertext, aad)
    }

    fn decrypt_with_iv(
        &self,
        key: &SecretKey,
        ciphertext: &[u8],
        iv: Option<&[u8]>,
        aad: Option<&[u8]>,
    ) -> CryptoResult<Vec<u8>> {
        match iv {
            Some(iv) => self.run(Direction::Open, key, iv, ciphertext, aad),
            None => self.decrypt_self_iv(key, ciphertext, aad),
        }
    }
}
