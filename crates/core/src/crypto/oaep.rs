//! Software OAEP decoding (RFC 8017 §7.1.2, steps 3a–3g).
//!
//! Raw RSA decryption yields the encoded message `EM`; this module strips the
//! padding. It is pure computation and stays the same whether `EM` comes from
//! the software RSA path or from a hardware module that only exposes raw RSA.
//!
//! ```text
//! EM = 0x00 || maskedSeed (hLen) || maskedDB (k - hLen - 1)
//! DB = lHash (hLen) || PS (zero bytes) || 0x01 || M
//! ```
//!
//! All padding failures collapse into one [`CryptoError::InvalidData`] and
//! the checks run in constant time, so callers cannot tell which step failed.

use sha2::Digest;
use subtle::{Choice, ConditionallySelectable, ConstantTimeEq};
use zeroize::Zeroizing;

use cryptocore_common::{CryptoError, CryptoResult};

/// MGF1 mask generation: `T = Hash(seed || C0) || Hash(seed || C1) || ...`
/// truncated to `length` bytes, with big-endian 32-bit counters.
pub fn mgf1<D: Digest>(seed: &[u8], length: usize) -> Vec<u8> {
    let h_len = <D as Digest>::output_size();
    let mut mask = Vec::with_capacity(length + h_len);
    let mut counter: u32 = 0;
    while mask.len() < length {
        let mut hasher = D::new();
        hasher.update(seed);
        hasher.update(counter.to_be_bytes());
        mask.extend_from_slice(&hasher.finalize());
        counter = counter.wrapping_add(1);
    }
    mask.truncate(length);
    mask
}

fn xor_in_place(target: &mut [u8], mask: &[u8]) {
    debug_assert_eq!(target.len(), mask.len());
    for (t, m) in target.iter_mut().zip(mask) {
        *t ^= m;
    }
}

/// Decode an OAEP-encoded block of exactly `k` bytes and return the message.
///
/// # Errors
///
/// - [`CryptoError::InvalidParameters`] if `k` is too small for the hash.
/// - [`CryptoError::InvalidData`] if the block length is not `k` or the
///   padding does not verify.
pub fn unpad<D: Digest>(encoded: &[u8], k: usize, label: &[u8]) -> CryptoResult<Vec<u8>> {
    let h_len = <D as Digest>::output_size();
    if k < 2 * h_len + 2 {
        return Err(CryptoError::invalid_parameters(format!(
            "key length of {k} bytes is too short for OAEP with a {h_len}-byte hash"
        )));
    }
    if encoded.len() != k {
        return Err(CryptoError::invalid_data(format!(
            "encoded block is {} bytes, expected {k}",
            encoded.len()
        )));
    }

    let mut em = Zeroizing::new(encoded.to_vec());
    let (leading, rest) = em.split_at_mut(1);
    let (seed, db) = rest.split_at_mut(h_len);

    let seed_mask = mgf1::<D>(db, h_len);
    xor_in_place(seed, &seed_mask);
    let db_mask = mgf1::<D>(seed, k - h_len - 1);
    xor_in_place(db, &db_mask);

    let l_hash = D::digest(label);
    let (l_hash_em, padded_message) = db.split_at(h_len);

    let mut valid = leading[0].ct_eq(&0u8) & l_hash_em.ct_eq(l_hash.as_slice());

    // Locate the 0x01 separator without branching on secret bytes.
    let mut looking = Choice::from(1u8);
    let mut separator: u32 = 0;
    let mut stray = Choice::from(0u8);
    for (i, byte) in padded_message.iter().enumerate() {
        let is_zero = byte.ct_eq(&0u8);
        let is_one = byte.ct_eq(&1u8);
        separator.conditional_assign(&(i as u32), looking & is_one);
        stray |= looking & !is_zero & !is_one;
        looking &= !is_one;
    }
    valid &= !looking & !stray;

    if !bool::from(valid) {
        return Err(CryptoError::invalid_data("OAEP decoding error"));
    }
    Ok(padded_message[separator as usize + 1..].to_vec())
}
