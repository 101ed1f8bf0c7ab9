//! Secure random source owned by the crypto facade.
//!
//! The facade holds one [`RandomSource`] for its whole lifetime and hands it
//! to every operation that needs fresh randomness (IVs, OAEP seeds, RSA
//! blinding). There is no process-global generator and no reseeding API; the
//! default [`OsRandom`] draws from the operating-system CSPRNG on every call.

use aes_gcm::aead::{
    rand_core::{self, CryptoRng, RngCore},
    OsRng,
};

/// Thread-safe source of cryptographically secure random bytes.
#[cfg_attr(test, mockall::automock)]
pub trait RandomSource: Send + Sync {
    /// Fill `dest` entirely with random bytes.
    fn fill_bytes(&self, dest: &mut [u8]);
}

/// [`RandomSource`] backed by the operating-system CSPRNG.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsRandom;

impl RandomSource for OsRandom {
    fn fill_bytes(&self, dest: &mut [u8]) {
        OsRng.fill_bytes(dest);
    }
}

/// Draw a fresh initialisation vector of `block_size` bytes.
pub fn generate_iv(random: &dyn RandomSource, block_size: usize) -> Vec<u8> {
    let mut iv = vec![0u8; block_size];
    random.fill_bytes(&mut iv);
    iv
}

/// Borrowing adapter exposing a [`RandomSource`] as a `rand_core` RNG for
/// the RSA engine.
pub(crate) struct RngAdapter<'a> {
    source: &'a dyn RandomSource,
}

impl<'a> RngAdapter<'a> {
    pub(crate) fn new(source: &'a dyn RandomSource) -> Self {
        Self { source }
    }
}

impl RngCore for RngAdapter<'_> {
    fn next_u32(&mut self) -> u32 {
        rand_core::impls::next_u32_via_fill(self)
    }

    fn next_u64(&mut self) -> u64 {
        rand_core::impls::next_u64_via_fill(self)
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.source.fill_bytes(dest);
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand_core::Error> {
        self.source.fill_bytes(dest);
        Ok(())
    }
}

impl CryptoRng for RngAdapter<'_> {}
