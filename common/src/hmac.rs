//! HMAC (RFC 2104) and HKDF (RFC 5869), generic over the SHA-2 hashers used by key derivation.

use sha2::{Digest, Sha256, Sha512};

use crate::{CxError, CxResult};

/// A fixed-output hash function usable as the HMAC primitive
pub trait Hasher {
    const BLOCK_SIZE: usize;
    const OUTPUT_SIZE: usize;

    /// Hashes the concatenation of `parts`
    fn hash(parts: &[&[u8]]) -> Vec<u8>;
}

pub struct Sha256Hasher;

impl Hasher for Sha256Hasher {
    const BLOCK_SIZE: usize = 64;
    const OUTPUT_SIZE: usize = 32;

    fn hash(parts: &[&[u8]]) -> Vec<u8> {
        let mut hasher = Sha256::new();
        for part in parts {
            hasher.update(part);
        }
        hasher.finalize().to_vec()
    }
}

pub struct Sha512Hasher;

impl Hasher for Sha512Hasher {
    const BLOCK_SIZE: usize = 128;
    const OUTPUT_SIZE: usize = 64;

    fn hash(parts: &[&[u8]]) -> Vec<u8> {
        let mut hasher = Sha512::new();
        for part in parts {
            hasher.update(part);
        }
        hasher.finalize().to_vec()
    }
}

/// HMAC of the concatenation of `message` parts under `key`
pub fn hmac<H: Hasher>(key: &[u8], message: &[&[u8]]) -> Vec<u8> {
    // Keys longer than a block are hashed first, then zero-padded to the block size
    let mut k_padded = vec![0u8; H::BLOCK_SIZE];
    if key.len() > H::BLOCK_SIZE {
        let k_prime = H::hash(&[key]);
        k_padded[..k_prime.len()].copy_from_slice(&k_prime);
    } else {
        k_padded[..key.len()].copy_from_slice(key);
    }

    let ipad: Vec<u8> = k_padded.iter().map(|b| b ^ 0x36).collect();
    let opad: Vec<u8> = k_padded.iter().map(|b| b ^ 0x5c).collect();

    // inner = H(ipad || message)
    let mut inner_parts: Vec<&[u8]> = Vec::with_capacity(message.len() + 1);
    inner_parts.push(&ipad);
    inner_parts.extend_from_slice(message);
    let inner = H::hash(&inner_parts);

    // outer = H(opad || inner)
    H::hash(&[&opad, &inner])
}

/// HKDF-Extract: `PRK = HMAC(salt, IKM)`
pub fn hkdf_extract<H: Hasher>(salt: &[u8], ikm: &[&[u8]]) -> Vec<u8> {
    hmac::<H>(salt, ikm)
}

/// HKDF-Expand of `prk` into `len` bytes bound to `info`
pub fn hkdf_expand<H: Hasher>(prk: &[u8], info: &[&[u8]], len: usize) -> CxResult<Vec<u8>> {
    if len > 255 * H::OUTPUT_SIZE {
        return Err(CxError::InvalidParameterSize);
    }

    let mut okm = Vec::with_capacity(len + H::OUTPUT_SIZE);
    let mut t: Vec<u8> = Vec::new();
    let mut counter = 1u8;
    while okm.len() < len {
        // T(i) = HMAC(PRK, T(i-1) || info || i)
        let counter_bytes = [counter];
        let mut parts: Vec<&[u8]> = Vec::with_capacity(info.len() + 2);
        parts.push(&t);
        parts.extend_from_slice(info);
        parts.push(&counter_bytes);
        t = hmac::<H>(prk, &parts);
        okm.extend_from_slice(&t);
        counter = counter.wrapping_add(1);
    }
    okm.truncate(len);
    Ok(okm)
}
