//! PBKDF2 password hashing.
//!
//! The derived bytes are returned as **uppercase** hex and used as a one-way
//! hash. Identical `(data, salt, iterations, length)` always yields the same
//! string.

use hmac::Hmac;
use sha2::{Sha256, Sha512};
use zeroize::Zeroizing;

use cryptocore_common::{CryptoError, CryptoResult, PasswordHashAlgorithm};

/// One-way salted password hashing.
pub trait PasswordHasher {
    /// Hash `data` with `salt`; both must be non-empty.
    fn hash(&self, data: &[u8], salt: &[u8]) -> CryptoResult<String>;
}

/// [`PasswordHasher`] using PBKDF2 with an HMAC-SHA2 PRF.
#[derive(Debug, Clone)]
pub struct Pbkdf2Hasher {
    algorithm: PasswordHashAlgorithm,
    iterations: u32,
    output_len: usize,
}

impl Pbkdf2Hasher {
    /// # Errors
    ///
    /// Returns [`CryptoError::InvalidParameters`] if `iterations` is zero or
    /// `key_length_bits` is zero or not a multiple of 8.
    pub fn new(
        algorithm: PasswordHashAlgorithm,
        iterations: u32,
        key_length_bits: u32,
    ) -> CryptoResult<Self> {
        if iterations == 0 {
            return Err(CryptoError::invalid_parameters(
                "PBKDF2 iteration count must be positive",
            ));
        }
        if key_length_bits == 0 || key_length_bits % 8 != 0 {
            return Err(CryptoError::invalid_parameters(format!(
                "derived key length must be a positive multiple of 8 bits, got {key_length_bits}"
            )));
        }
        Ok(Self {
            algorithm,
            iterations,
            output_len: key_length_bits as usize / 8,
        })
    }
}

impl PasswordHasher for Pbkdf2Hasher {
    fn hash(&self, data: &[u8], salt: &[u8]) -> CryptoResult<String> {
        if data.is_empty() {
            return Err(CryptoError::invalid_data("data to hash is empty"));
        }
        if salt.is_empty() {
            return Err(CryptoError::invalid_data("salt is missing or empty"));
        }

        // Passwords are text: invalid UTF-8 is replaced with U+FFFD first.
        let password = Zeroizing::new(String::from_utf8_lossy(data).into_owned());
        let mut derived = Zeroizing::new(vec![0u8; self.output_len]);
        let result = match self.algorithm {
            PasswordHashAlgorithm::Pbkdf2HmacSha256 => pbkdf2::pbkdf2::<Hmac<Sha256>>(
                password.as_bytes(),
                salt,
                self.iterations,
                &mut derived,
            ),
            PasswordHashAlgorithm::Pbkdf2HmacSha512 => pbkdf2::pbkdf2::<Hmac<Sha512>>(
                password.as_bytes(),
                salt,
                self.iterations,
                &mut derived,
            ),
        };
        result.map_err(|e| {
            CryptoError::invalid_parameters("PBKDF2 derivation failed").with_source(e.to_string())
        })?;

        Ok(hex::encode_upper(derived.as_slice()))
    }
}
