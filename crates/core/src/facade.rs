//! [`CryptoCore`]: the configured bundle of every component.

use std::sync::Arc;

use tracing::{debug, instrument};

use cryptocore_common::{
    AsymmetricAlgorithm, CryptoResult, PasswordHashAlgorithm, SignatureAlgorithm,
    SymmetricAlgorithm,
};

use crate::config::CryptoConfig;
use crate::crypto::{
    AesGcmCipher, AsymmetricCipher, PasswordHasher, Pbkdf2Hasher, RsaOaepCipher, RsaSigner,
    Signer, SymmetricCipher, TagLength, Verifier,
};
use crate::keys::{PrivateKey, PublicKey, SecretKey};
use crate::random::{self, OsRandom, RandomSource};

/// Entry point for all cryptographic operations.
///
/// Built once from a [`CryptoConfig`]; algorithm identifiers and numeric
/// parameters are checked at construction, so the operations themselves
/// only fail on bad keys or data. `CryptoCore` is `Send + Sync` and can be
/// shared behind an `Arc`.
#[derive(Clone)]
pub struct CryptoCore {
    random: Arc<dyn RandomSource>,
    symmetric: AesGcmCipher,
    asymmetric: RsaOaepCipher,
    hasher: Pbkdf2Hasher,
    signer: RsaSigner,
}

impl CryptoCore {
    /// Build the facade with the operating-system CSPRNG.
    ///
    /// # Errors
    ///
    /// - [`cryptocore_common::CryptoError::UnsupportedAlgorithm`] for an
    ///   unknown algorithm identifier.
    /// - [`cryptocore_common::CryptoError::InvalidParameters`] for an
    ///   unusable tag length, key length or iteration count.
    pub fn new(config: &CryptoConfig) -> CryptoResult<Self> {
        Self::with_random(config, Arc::new(OsRandom))
    }

    /// Build the facade around a caller-provided random source.
    ///
    /// # Errors
    ///
    /// As [`CryptoCore::new`].
    pub fn with_random(config: &CryptoConfig, random: Arc<dyn RandomSource>) -> CryptoResult<Self> {
        let symmetric_algorithm: SymmetricAlgorithm = config.symmetric_algorithm.parse()?;
        let asymmetric_algorithm: AsymmetricAlgorithm = config.asymmetric_algorithm.parse()?;
        let hash_algorithm: PasswordHashAlgorithm = config.hash_algorithm.parse()?;
        let sign_algorithm: SignatureAlgorithm = config.sign_algorithm.parse()?;

        let symmetric = AesGcmCipher::new(
            symmetric_algorithm,
            TagLength::from_bits(config.gcm_tag_length)?,
            Arc::clone(&random),
        );
        let asymmetric = RsaOaepCipher::new(
            asymmetric_algorithm,
            config.asymmetric_key_length,
            Arc::clone(&random),
        )?;
        let hasher = Pbkdf2Hasher::new(
            hash_algorithm,
            config.hash_iterations,
            config.hash_key_length,
        )?;
        let signer = RsaSigner::new(sign_algorithm, Arc::clone(&random));

        debug!(
            symmetric = %symmetric_algorithm,
            asymmetric = %asymmetric_algorithm,
            hash = %hash_algorithm,
            sign = %sign_algorithm,
            "crypto core initialised"
        );

        Ok(Self {
            random,
            symmetric,
            asymmetric,
            hasher,
            signer,
        })
    }

    // -----------------------------------------------------------------------
    // Symmetric
    // -----------------------------------------------------------------------

    /// Encrypt with a fresh IV; returns `ciphertext || tag || IV`.
    #[instrument(level = "debug", skip_all, fields(plaintext_len = plaintext.len()))]
    pub fn symmetric_encrypt(
        &self,
        key: &SecretKey,
        plaintext: &[u8],
        aad: Option<&[u8]>,
    ) -> CryptoResult<Vec<u8>> {
        self.symmetric.encrypt_self_iv(key, plaintext, aad)
    }

    /// Encrypt with a caller IV; returns `ciphertext || tag`.
    ///
    /// Without an IV the result is that of [`CryptoCore::symmetric_encrypt`].
    #[instrument(
        level = "debug",
        skip_all,
        fields(plaintext_len = plaintext.len(), caller_iv = iv.is_some())
    )]
    pub fn symmetric_encrypt_with_iv(
        &self,
        key: &SecretKey,
        plaintext: &[u8],
        iv: Option<&[u8]>,
        aad: Option<&[u8]>,
    ) -> CryptoResult<Vec<u8>> {
        self.symmetric.encrypt_with_iv(key, plaintext, iv, aad)
    }

    /// Decrypt a `ciphertext || tag || IV` blob.
    #[instrument(level = "debug", skip_all, fields(blob_len = blob.len()))]
    pub fn symmetric_decrypt(
        &self,
        key: &SecretKey,
        blob: &[u8],
        aad: Option<&[u8]>,
    ) -> CryptoResult<Vec<u8>> {
        self.symmetric.decrypt_self_iv(key, blob, aad)
    }

    /// Decrypt `ciphertext || tag` with a caller IV.
    ///
    /// Without an IV the input is treated as a self-IV blob.
    #[instrument(
        level = "debug",
        skip_all,
        fields(ciphertext_len = ciphertext.len(), caller_iv = iv.is_some())
    )]
    pub fn symmetric_decrypt_with_iv(
        &self,
        key: &SecretKey,
        ciphertext: &[u8],
        iv: Option<&[u8]>,
        aad: Option<&[u8]>,
    ) -> CryptoResult<Vec<u8>> {
        self.symmetric.decrypt_with_iv(key, ciphertext, iv, aad)
    }

    // -----------------------------------------------------------------------
    // Asymmetric
    // -----------------------------------------------------------------------

    #[instrument(level = "debug", skip_all, fields(plaintext_len = plaintext.len()))]
    pub fn asymmetric_encrypt(&self, key: &PublicKey, plaintext: &[u8]) -> CryptoResult<Vec<u8>> {
        self.asymmetric.encrypt(key, plaintext)
    }

    #[instrument(level = "debug", skip_all, fields(ciphertext_len = ciphertext.len()))]
    pub fn asymmetric_decrypt(
        &self,
        key: &PrivateKey,
        ciphertext: &[u8],
    ) -> CryptoResult<Vec<u8>> {
        self.asymmetric.decrypt(key, ciphertext)
    }

    // -----------------------------------------------------------------------
    // Hashing and signatures
    // -----------------------------------------------------------------------

    /// Salted PBKDF2 hash as uppercase hex.
    #[instrument(level = "debug", skip_all, fields(salt_len = salt.len()))]
    pub fn hash(&self, data: &[u8], salt: &[u8]) -> CryptoResult<String> {
        self.hasher.hash(data, salt)
    }

    #[instrument(level = "debug", skip_all, fields(data_len = data.len()))]
    pub fn sign(&self, data: &[u8], key: &PrivateKey) -> CryptoResult<String> {
        self.signer.sign(data, key)
    }

    /// `Ok(false)` means a well-formed signature that does not match.
    #[instrument(level = "debug", skip_all, fields(data_len = data.len()))]
    pub fn verify_signature(
        &self,
        data: &[u8],
        signature: &str,
        key: &PublicKey,
    ) -> CryptoResult<bool> {
        let valid = self.signer.verify(data, signature, key)?;
        if !valid {
            debug!(algorithm = %self.signer.algorithm(), "signature did not verify");
        }
        Ok(valid)
    }

    // -----------------------------------------------------------------------
    // Randomness
    // -----------------------------------------------------------------------

    /// The random source shared by every component.
    pub fn random(&self) -> &dyn RandomSource {
        self.random.as_ref()
    }

    /// A fresh IV of `block_size` bytes.
    pub fn generate_iv(&self, block_size: usize) -> Vec<u8> {
        random::generate_iv(self.random(), block_size)
    }

    /// IV length expected by the symmetric operations.
    pub fn symmetric_block_size(&self) -> usize {
        self.symmetric.block_size()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::MockRandomSource;
    use crate::test_support::rsa_key_pair;
    use cryptocore_common::CryptoError;

    fn facade() -> CryptoCore {
        CryptoCore::new(&CryptoConfig {
            hash_iterations: 1000,
            ..CryptoConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn facade_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<CryptoCore>();
    }

    #[test]
    fn hello_world_scenario() {
        let core = facade();
        let key = SecretKey::from_bytes(&[0x42; 32]);
        let blob = core.symmetric_encrypt(&key, b"hello world", None).unwrap();
        assert_eq!(blob.len(), 43);
        assert_eq!(
            core.symmetric_decrypt(&key, &blob, None).unwrap(),
            b"hello world"
        );
    }

    #[test]
    fn caller_iv_round_trip() {
        let core = facade();
        let key = SecretKey::from_bytes(&[0x11; 16]);
        let iv = core.generate_iv(core.symmetric_block_size());
        let ct = core
            .symmetric_encrypt_with_iv(&key, b"payload", Some(&iv), Some(b"aad"))
            .unwrap();
        assert_eq!(ct.len(), 7 + 16);
        let pt = core
            .symmetric_decrypt_with_iv(&key, &ct, Some(&iv), Some(b"aad"))
            .unwrap();
        assert_eq!(pt, b"payload");
    }

    #[test]
    fn absent_iv_falls_back_to_self_iv_layout() {
        let core = facade();
        let key = SecretKey::from_bytes(&[0x22; 24]);
        let blob = core
            .symmetric_encrypt_with_iv(&key, b"abc", None, None)
            .unwrap();
        assert_eq!(blob.len(), 3 + 16 + 16);
        assert_eq!(
            core.symmetric_decrypt_with_iv(&key, &blob, None, None).unwrap(),
            b"abc"
        );
    }

    #[test]
    fn injected_random_source_supplies_the_iv() {
        let mut random = MockRandomSource::new();
        random
            .expect_fill_bytes()
            .returning(|dest: &mut [u8]| dest.fill(0xA5));
        let core = CryptoCore::with_random(&CryptoConfig::default(), Arc::new(random)).unwrap();
        let key = SecretKey::from_bytes(&[0x33; 32]);
        let blob = core.symmetric_encrypt(&key, b"x", None).unwrap();
        assert_eq!(&blob[blob.len() - 16..], &[0xA5; 16]);
        assert_eq!(core.generate_iv(16), vec![0xA5; 16]);
    }

    #[test]
    fn asymmetric_round_trip() {
        let (private, public) = rsa_key_pair();
        let core = facade();
        let ct = core.asymmetric_encrypt(public, b"wrapped key").unwrap();
        assert_eq!(core.asymmetric_decrypt(private, &ct).unwrap(), b"wrapped key");
    }

    #[test]
    fn hash_sign_and_verify() {
        let (private, public) = rsa_key_pair();
        let core = facade();
        let digest = core.hash(b"password", b"pepper").unwrap();
        assert_eq!(digest, core.hash(b"password", b"pepper").unwrap());

        let sig = core.sign(b"statement", private).unwrap();
        assert!(core.verify_signature(b"statement", &sig, public).unwrap());
        assert!(!core.verify_signature(b"statemenT", &sig, public).unwrap());
    }

    #[test]
    fn unsupported_identifiers_are_rejected_at_construction() {
        for cfg in [
            CryptoConfig {
                symmetric_algorithm: "AES/CBC/PKCS5Padding".into(),
                ..CryptoConfig::default()
            },
            CryptoConfig {
                asymmetric_algorithm: "RSA/ECB/PKCS1Padding".into(),
                ..CryptoConfig::default()
            },
            CryptoConfig {
                hash_algorithm: "PBKDF2WithHmacSHA1".into(),
                ..CryptoConfig::default()
            },
            CryptoConfig {
                sign_algorithm: "MD5withRSA".into(),
                ..CryptoConfig::default()
            },
        ] {
            assert!(matches!(
                CryptoCore::new(&cfg),
                Err(CryptoError::UnsupportedAlgorithm { .. })
            ));
        }
    }

    #[test]
    fn shared_across_threads() {
        let core = Arc::new(facade());
        let key = SecretKey::from_bytes(&[0x44; 32]);
        let handles: Vec<_> = (0u8..8)
            .map(|i| {
                let core = Arc::clone(&core);
                let key = key.clone();
                std::thread::spawn(move || {
                    let msg = vec![i; 64];
                    let blob = core.symmetric_encrypt(&key, &msg, None).unwrap();
                    assert_eq!(core.symmetric_decrypt(&key, &blob, None).unwrap(), msg);
                    blob
                })
            })
            .collect();
        let blobs: Vec<Vec<u8>> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        // Fresh IVs: no two blobs share their tail.
        for (i, a) in blobs.iter().enumerate() {
            for b in &blobs[i + 1..] {
                assert_ne!(&a[a.len() - 16..], &b[b.len() - 16..]);
            }
        }
    }
}
