//! BLS12-381 entry points.
//!
//! Private keys cross this surface as 48-byte big-endian buffers whose top 16 bytes are zero.

use cx_bls12_381::{
    aggregate, hash_to_field_bls12_381, key_gen, public_key, sign, verify, Coordinate, Scheme,
    PRIVATE_KEY_SIZE, PUBLIC_KEY_SIZE, SIGNATURE_SIZE,
};
use cx_common::{CxError, CxResult};

use crate::context::status;

/// Width of a private key buffer
pub const BLS_PRIVATE_KEY_BUFFER_SIZE: usize = 48;
/// Output of [`sys_cx_hash_to_field`]: four 48-byte base field elements
pub const HASH_TO_FIELD_SIZE: usize = 4 * 48;

const KEY_PAD: usize = BLS_PRIVATE_KEY_BUFFER_SIZE - PRIVATE_KEY_SIZE;

fn read_private_key(buffer: &[u8]) -> CxResult<&[u8]> {
    if buffer.len() != BLS_PRIVATE_KEY_BUFFER_SIZE {
        return Err(CxError::InvalidParameterSize);
    }
    if buffer[..KEY_PAD].iter().any(|&b| b != 0) {
        return Err(CxError::InvalidParameter);
    }
    Ok(&buffer[KEY_PAD..])
}

/// Generates a key pair for `mode` (see [`cx_bls12_381::key_gen`]).
///
/// Without the derivation bit `secret` is a private key buffer. The public key buffer is left
/// untouched for the basic scheme.
pub fn sys_cx_bls12381_key_gen(
    mode: u8,
    secret: &[u8],
    salt: &[u8],
    key_info: &[u8],
    private_key: &mut [u8],
    public_key: &mut [u8],
) -> u32 {
    let result = (|| -> CxResult<()> {
        if private_key.len() != BLS_PRIVATE_KEY_BUFFER_SIZE {
            return Err(CxError::InvalidParameterSize);
        }
        if public_key.len() < PUBLIC_KEY_SIZE {
            return Err(CxError::InvalidParameterSize);
        }
        let secret = if mode & cx_bls12_381::KEYGEN_DERIVE != 0 {
            secret
        } else {
            read_private_key(secret)?
        };
        let pair = key_gen(mode, secret, salt, key_info)?;
        private_key[..KEY_PAD].fill(0);
        private_key[KEY_PAD..].copy_from_slice(&pair.private_key);
        if let Some(pk) = pair.public_key {
            public_key[..PUBLIC_KEY_SIZE].copy_from_slice(&pk);
        }
        Ok(())
    })();
    status("sys_cx_bls12381_key_gen", result)
}

/// Compressed public key of a private key buffer
pub fn sys_cx_bls12381_public_key(private_key: &[u8], out: &mut [u8]) -> u32 {
    let result = (|| -> CxResult<()> {
        let out = out.get_mut(..PUBLIC_KEY_SIZE).ok_or(CxError::InvalidParameterSize)?;
        out.copy_from_slice(&public_key(read_private_key(private_key)?)?);
        Ok(())
    })();
    status("sys_cx_bls12381_public_key", result)
}

/// Signs `msg` with the domain separation tag of the scheme in `mode`
pub fn sys_cx_bls12381_sign(mode: u8, private_key: &[u8], msg: &[u8], sig: &mut [u8]) -> u32 {
    let result = (|| -> CxResult<()> {
        let dst = Scheme::from_mode(mode)?.dst();
        let sig = sig.get_mut(..SIGNATURE_SIZE).ok_or(CxError::InvalidParameterSize)?;
        sig.copy_from_slice(&sign(read_private_key(private_key)?, msg, dst)?);
        Ok(())
    })();
    status("sys_cx_bls12381_sign", result)
}

pub fn sys_cx_bls12381_verify(
    mode: u8,
    public_key: &[u8],
    msg: &[u8],
    sig: &[u8],
    verified: &mut bool,
) -> u32 {
    let result = Scheme::from_mode(mode)
        .and_then(|scheme| verify(public_key, msg, sig, scheme.dst()))
        .map(|ok| *verified = ok);
    status("sys_cx_bls12381_verify", result)
}

/// Adds `sig` into the compressed accumulator `acc`, or initializes it when `is_first`
pub fn sys_cx_bls12381_aggregate(sig: &[u8], acc: &mut [u8], is_first: bool) -> u32 {
    status("sys_cx_bls12381_aggregate", aggregate(sig, acc, is_first))
}

/// hash_to_field for G2: writes four 48-byte big-endian base field elements,
/// `u0.c0 || u0.c1 || u1.c0 || u1.c1`
pub fn sys_cx_hash_to_field(msg: &[u8], dst: &[u8], out: &mut [u8]) -> u32 {
    let result = (|| -> CxResult<()> {
        let out = out.get_mut(..HASH_TO_FIELD_SIZE).ok_or(CxError::InvalidParameterSize)?;
        let elements = hash_to_field_bls12_381(msg, dst)?;
        for (e, chunk) in elements.iter().zip(out.chunks_exact_mut(48)) {
            e.write_be(chunk);
        }
        Ok(())
    })();
    status("sys_cx_hash_to_field", result)
}
