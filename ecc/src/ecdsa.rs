//! ECDSA over the Weierstrass curves with deterministic nonces (RFC 6979, HMAC-SHA-256).
//!
//! Each call runs in its own arena session: the group operations go through the point layer,
//! the scalar arithmetic modulo the group order is done on plain integers.

use cx_common::{hmac, CxError, CxResult, Sha256Hasher};
use cx_mpi::codec::{from_be, to_be_fixed, write_be_fixed};
use cx_mpi::Arena;
use num_bigint::BigUint;
use num_traits::Zero;
use tracing::debug;

use crate::point::{
    ecpoint_alloc, ecpoint_double_scalarmul, ecpoint_export, ecpoint_init, ecpoint_is_on_curve,
    ecpoint_scalarmul, load_generator,
};
use crate::{domain, CurveDomain, CurveFamily, CurveId};

fn weierstrass(curve: CurveId) -> CxResult<&'static CurveDomain> {
    let dom = domain(curve);
    if dom.family() != CurveFamily::Weierstrass {
        debug!("ecdsa: curve {:?} is not a Weierstrass curve", curve);
        return Err(CxError::InvalidCurve);
    }
    Ok(dom)
}

/// Leftmost `qlen` bits of `data` as an integer
fn bits2int(data: &[u8], qlen: u64) -> BigUint {
    let v = from_be(data);
    let blen = data.len() as u64 * 8;
    if blen > qlen {
        v >> (blen - qlen)
    } else {
        v
    }
}

/// Private scalar in `[1, n)`
fn private_scalar(dom: &CurveDomain, key: &[u8]) -> CxResult<BigUint> {
    let d = from_be(key);
    if d.is_zero() || d >= dom.n {
        return Err(CxError::InvalidParameter);
    }
    Ok(d)
}

/// RFC 6979 §3.2 nonce generation
fn rfc6979_nonce(dom: &CurveDomain, d: &BigUint, hash: &[u8]) -> impl Iterator<Item = BigUint> {
    let q = dom.n.clone();
    let qlen = q.bits();
    let rlen = qlen.div_ceil(8) as usize;
    let x = to_be_fixed(d, rlen);
    let h1 = to_be_fixed(&(bits2int(hash, qlen) % &q), rlen);

    let mut v = vec![0x01u8; 32];
    let mut k = vec![0x00u8; 32];
    k = hmac::<Sha256Hasher>(&k, &[&v, &[0x00], &x, &h1]);
    v = hmac::<Sha256Hasher>(&k, &[&v]);
    k = hmac::<Sha256Hasher>(&k, &[&v, &[0x01], &x, &h1]);
    v = hmac::<Sha256Hasher>(&k, &[&v]);

    let mut first = true;
    std::iter::from_fn(move || loop {
        if !first {
            k = hmac::<Sha256Hasher>(&k, &[&v, &[0x00]]);
            v = hmac::<Sha256Hasher>(&k, &[&v]);
        }
        first = false;

        let mut t = Vec::with_capacity(rlen + 32);
        while t.len() < rlen {
            v = hmac::<Sha256Hasher>(&k, &[&v]);
            t.extend_from_slice(&v);
        }
        let candidate = bits2int(&t[..rlen], qlen);
        if !candidate.is_zero() && candidate < q {
            return Some(candidate);
        }
    })
}

/// `(x, y) = d * G` exported on `length` bytes each
fn base_mul(arena: &mut Arena, dom: &'static CurveDomain, k: &BigUint) -> CxResult<(Vec<u8>, Vec<u8>)> {
    let len = dom.length;
    arena.with_session(len as u32, |arena| {
        let g = ecpoint_alloc(arena, dom.curve)?;
        load_generator(arena, &g, dom)?;
        ecpoint_scalarmul(arena, &g, &to_be_fixed(k, len))?;
        let (mut x, mut y) = (vec![0u8; len], vec![0u8; len]);
        ecpoint_export(arena, &g, &mut x, &mut y)?;
        Ok((x, y))
    })
}

/// Public point `d * G` of a private key
pub fn ecdsa_public_key(
    arena: &mut Arena,
    curve: CurveId,
    key: &[u8],
    x_out: &mut [u8],
    y_out: &mut [u8],
) -> CxResult<()> {
    let dom = weierstrass(curve)?;
    if x_out.len() < dom.length || y_out.len() < dom.length {
        return Err(CxError::InvalidParameterSize);
    }
    let d = private_scalar(dom, key)?;
    let (x, y) = base_mul(arena, dom, &d)?;
    write_be_fixed(&from_be(&x), x_out);
    write_be_fixed(&from_be(&y), y_out);
    Ok(())
}

/// Signs `hash`, writing `r || s` (`2 * length` bytes) into `sig`. Returns the parity of the
/// nonce point's `y`.
pub fn ecdsa_sign(
    arena: &mut Arena,
    curve: CurveId,
    key: &[u8],
    hash: &[u8],
    sig: &mut [u8],
) -> CxResult<u32> {
    let dom = weierstrass(curve)?;
    let len = dom.length;
    if sig.len() < 2 * len {
        return Err(CxError::InvalidParameterSize);
    }
    let d = private_scalar(dom, key)?;
    let n = &dom.n;
    let z = bits2int(hash, n.bits()) % n;

    for k in rfc6979_nonce(dom, &d, hash) {
        let (x, y) = base_mul(arena, dom, &k)?;
        let r = from_be(&x) % n;
        if r.is_zero() {
            continue;
        }
        let k_inv = k.modinv(n).ok_or(CxError::InternalError)?;
        let s = (&z + &r * &d) % n * k_inv % n;
        if s.is_zero() {
            continue;
        }
        write_be_fixed(&r, &mut sig[..len]);
        write_be_fixed(&s, &mut sig[len..2 * len]);
        return Ok(u32::from(y.last().copied().unwrap_or(0) & 1));
    }
    Err(CxError::InternalError)
}

/// Checks `sig = r || s` over `hash` against the public point `(pub_x, pub_y)`
pub fn ecdsa_verify(
    arena: &mut Arena,
    curve: CurveId,
    pub_x: &[u8],
    pub_y: &[u8],
    hash: &[u8],
    sig: &[u8],
) -> CxResult<bool> {
    let dom = weierstrass(curve)?;
    let len = dom.length;
    if sig.len() != 2 * len {
        return Err(CxError::InvalidParameterSize);
    }
    let n = &dom.n;
    let r = from_be(&sig[..len]);
    let s = from_be(&sig[len..]);
    if r.is_zero() || s.is_zero() || &r >= n || &s >= n {
        return Ok(false);
    }

    let z = bits2int(hash, n.bits()) % n;
    let w = s.modinv(n).ok_or(CxError::InternalError)?;
    let u1 = to_be_fixed(&(&z * &w % n), len);
    let u2 = to_be_fixed(&(&r * &w % n), len);

    arena.with_session(len as u32, |arena| {
        let q = ecpoint_alloc(arena, curve)?;
        ecpoint_init(arena, &q, pub_x, pub_y)?;
        if !ecpoint_is_on_curve(arena, &q)? {
            return Err(CxError::InvalidPoint);
        }
        let g = ecpoint_alloc(arena, curve)?;
        load_generator(arena, &g, dom)?;
        let res = ecpoint_alloc(arena, curve)?;
        ecpoint_double_scalarmul(arena, &res, &g, &q, &u1, &u2)?;

        let (mut x, mut y) = (vec![0u8; len], vec![0u8; len]);
        match ecpoint_export(arena, &res, &mut x, &mut y) {
            Ok(()) => Ok(from_be(&x) % n == r),
            Err(CxError::InfinitePoint) => Ok(false),
            Err(e) => Err(e),
        }
    })
}
