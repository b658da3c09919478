//! Big-endian fixed-width conversions between byte buffers and `BigUint`.

use num_bigint::BigUint;
use num_traits::Zero;

pub fn from_be(bytes: &[u8]) -> BigUint {
    BigUint::from_bytes_be(bytes)
}

/// Writes `value` into `out` big-endian: left-padded with zeros when `out` is wider than the
/// value, keeping only the least significant bytes when it is narrower.
pub fn write_be_fixed(value: &BigUint, out: &mut [u8]) {
    out.fill(0);
    if value.is_zero() {
        return;
    }
    let bytes = value.to_bytes_be();
    if bytes.len() >= out.len() {
        out.copy_from_slice(&bytes[bytes.len() - out.len()..]);
    } else {
        let offset = out.len() - bytes.len();
        out[offset..].copy_from_slice(&bytes);
    }
}

pub fn to_be_fixed(value: &BigUint, width: usize) -> Vec<u8> {
    let mut out = vec![0u8; width];
    write_be_fixed(value, &mut out);
    out
}

/// Little-endian fixed-width encoding, as used by the RFC 7748 and RFC 8032 wire formats
pub fn to_le_fixed(value: &BigUint, width: usize) -> Vec<u8> {
    let mut out = to_be_fixed(value, width);
    out.reverse();
    out
}

/// Builds an integer from little-endian `u64` limbs
pub fn biguint_from_u64_digits(limbs: &[u64]) -> BigUint {
    limbs.iter().rev().fold(BigUint::zero(), |acc, &limb| (acc << 64) + BigUint::from(limb))
}

/// Parses a hex constant. Only meant for compiled-in tables.
pub fn biguint_from_hex(hex: &str) -> BigUint {
    let digits: String = hex.chars().filter(|c| !c.is_whitespace()).collect();
    BigUint::parse_bytes(digits.as_bytes(), 16).unwrap_or_default()
}
