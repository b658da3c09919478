//! Ed25519 (RFC 8032, pure variant) over the twisted Edwards point layer.

use cx_common::{CxError, CxResult};
use cx_mpi::codec::{from_be, to_be_fixed};
use cx_mpi::Arena;
use num_bigint::BigUint;
use sha2::{Digest, Sha512};

use crate::point::{
    ecpoint_add, ecpoint_alloc, ecpoint_cmp, ecpoint_decompress, ecpoint_export, ecpoint_scalarmul,
    load_generator, EcPoint,
};
use crate::{domain, CurveId};

const LEN: usize = 32;

fn sha512_le(parts: &[&[u8]]) -> BigUint {
    let mut hasher = Sha512::new();
    for part in parts {
        hasher.update(part);
    }
    BigUint::from_bytes_le(&hasher.finalize())
}

/// Secret scalar and nonce prefix expanded from a 32-byte private key
fn expand_key(key: &[u8]) -> CxResult<(BigUint, Vec<u8>)> {
    if key.len() != LEN {
        return Err(CxError::InvalidParameterSize);
    }
    let h = Sha512::digest(key);
    let mut a = h[..LEN].to_vec();
    a[0] &= 248;
    a[31] &= 127;
    a[31] |= 64;
    Ok((BigUint::from_bytes_le(&a), h[LEN..].to_vec()))
}

/// `y` little-endian with the parity of `x` in the top bit
fn encode(arena: &Arena, p: &EcPoint) -> CxResult<[u8; LEN]> {
    let (mut x, mut y) = ([0u8; LEN], [0u8; LEN]);
    ecpoint_export(arena, p, &mut x, &mut y)?;
    y.reverse();
    y[LEN - 1] |= (x[LEN - 1] & 1) << 7;
    Ok(y)
}

fn decode(arena: &mut Arena, p: &EcPoint, bytes: &[u8]) -> CxResult<()> {
    let (y, sign) = eddsa_decode_y(bytes)?;
    ecpoint_decompress(arena, p, &y, sign)
}

fn base_mul(arena: &mut Arena, k: &BigUint) -> CxResult<[u8; LEN]> {
    arena.with_session(LEN as u32, |arena| {
        let g = ecpoint_alloc(arena, CurveId::Ed25519)?;
        load_generator(arena, &g, domain(CurveId::Ed25519))?;
        ecpoint_scalarmul(arena, &g, &to_be_fixed(k, LEN))?;
        encode(arena, &g)
    })
}

/// Encoded public key of a 32-byte private key
pub fn eddsa_public_key(arena: &mut Arena, key: &[u8], out: &mut [u8]) -> CxResult<()> {
    if out.len() < LEN {
        return Err(CxError::InvalidParameterSize);
    }
    let (s, _) = expand_key(key)?;
    out[..LEN].copy_from_slice(&base_mul(arena, &s)?);
    Ok(())
}

/// Writes the 64-byte signature `R || S` of `msg` into `sig`
pub fn eddsa_sign(arena: &mut Arena, key: &[u8], msg: &[u8], sig: &mut [u8]) -> CxResult<()> {
    if sig.len() < 2 * LEN {
        return Err(CxError::InvalidParameterSize);
    }
    let order = &domain(CurveId::Ed25519).n;
    let (s, prefix) = expand_key(key)?;
    let public = base_mul(arena, &s)?;

    let r = sha512_le(&[&prefix, msg]) % order;
    let big_r = base_mul(arena, &r)?;
    let k = sha512_le(&[&big_r, &public, msg]) % order;
    let big_s = (r + k * s) % order;

    sig[..LEN].copy_from_slice(&big_r);
    let mut s_le = big_s.to_bytes_le();
    s_le.resize(LEN, 0);
    sig[LEN..2 * LEN].copy_from_slice(&s_le);
    Ok(())
}

/// Checks `[S] B == R + [k] A`
pub fn eddsa_verify(arena: &mut Arena, public: &[u8], msg: &[u8], sig: &[u8]) -> CxResult<bool> {
    if public.len() != LEN || sig.len() != 2 * LEN {
        return Err(CxError::InvalidParameterSize);
    }
    let dom = domain(CurveId::Ed25519);
    let big_s = BigUint::from_bytes_le(&sig[LEN..]);
    if big_s >= dom.n {
        return Ok(false);
    }
    let k = sha512_le(&[&sig[..LEN], public, msg]) % &dom.n;

    arena.with_session(LEN as u32, |arena| {
        let a = ecpoint_alloc(arena, CurveId::Ed25519)?;
        let r = ecpoint_alloc(arena, CurveId::Ed25519)?;
        if decode(arena, &a, public).is_err() || decode(arena, &r, &sig[..LEN]).is_err() {
            return Ok(false);
        }
        ecpoint_scalarmul(arena, &a, &to_be_fixed(&k, LEN))?;
        ecpoint_add(arena, &r, &r, &a)?;

        let sb = ecpoint_alloc(arena, CurveId::Ed25519)?;
        load_generator(arena, &sb, dom)?;
        ecpoint_scalarmul(arena, &sb, &to_be_fixed(&big_s, LEN))?;
        ecpoint_cmp(arena, &sb, &r)
    })
}

/// Splits an encoded point into its big-endian `y` and the sign of `x`
pub fn eddsa_decode_y(encoded: &[u8]) -> CxResult<(Vec<u8>, u32)> {
    if encoded.len() != LEN {
        return Err(CxError::InvalidParameterSize);
    }
    let mut y = encoded.to_vec();
    let sign = u32::from(y[LEN - 1] >> 7);
    y[LEN - 1] &= 0x7F;
    y.reverse();
    if from_be(&y) >= domain(CurveId::Ed25519).p {
        return Err(CxError::InvalidPoint);
    }
    Ok((y, sign))
}
