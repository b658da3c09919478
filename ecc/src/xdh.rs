//! X25519 and X448 (RFC 7748): x-only Montgomery ladder over little-endian encodings.

use cx_common::{CxError, CxResult};
use cx_mpi::codec::to_le_fixed;
use num_bigint::BigUint;
use num_traits::{One, Zero};

use crate::{domain, CurveId};

struct Xdh {
    curve: CurveId,
    bits: u64,
    a24: u32,
}

const X25519: Xdh = Xdh { curve: CurveId::Curve25519, bits: 255, a24: 121665 };
const X448: Xdh = Xdh { curve: CurveId::Curve448, bits: 448, a24: 39081 };

impl Xdh {
    fn len(&self) -> usize {
        domain(self.curve).length
    }

    fn clamp(&self, k: &[u8]) -> BigUint {
        let mut k = k.to_vec();
        let last = k.len() - 1;
        match self.curve {
            CurveId::Curve25519 => {
                k[0] &= 248;
                k[last] &= 127;
                k[last] |= 64;
            }
            _ => {
                k[0] &= 252;
                k[last] |= 128;
            }
        }
        BigUint::from_bytes_le(&k)
    }

    fn decode_u(&self, u: &[u8]) -> BigUint {
        let mut u = u.to_vec();
        if self.bits % 8 != 0 {
            // Unused top bit is masked
            let last = u.len() - 1;
            u[last] &= (1u8 << (self.bits % 8)) - 1;
        }
        BigUint::from_bytes_le(&u)
    }

    fn ladder(&self, k: &BigUint, u: &BigUint) -> BigUint {
        let p = &domain(self.curve).p;
        let a24 = BigUint::from(self.a24);
        let sub = |x: &BigUint, y: &BigUint| (x + p - y) % p;

        let x1 = u % p;
        let (mut x2, mut z2) = (BigUint::one(), BigUint::zero());
        let (mut x3, mut z3) = (x1.clone(), BigUint::one());
        let mut swap = false;

        for t in (0..self.bits).rev() {
            let k_t = k.bit(t);
            if swap ^ k_t {
                std::mem::swap(&mut x2, &mut x3);
                std::mem::swap(&mut z2, &mut z3);
            }
            swap = k_t;

            let a = (&x2 + &z2) % p;
            let aa = &a * &a % p;
            let b = sub(&x2, &z2);
            let bb = &b * &b % p;
            let e = sub(&aa, &bb);
            let c = (&x3 + &z3) % p;
            let d = sub(&x3, &z3);
            let da = d * &a % p;
            let cb = c * &b % p;

            let s = (&da + &cb) % p;
            x3 = &s * &s % p;
            let diff = sub(&da, &cb);
            z3 = &x1 * (&diff * &diff % p) % p;
            x2 = &aa * &bb % p;
            z2 = &e * ((&aa + &a24 * &e) % p) % p;
        }
        if swap {
            std::mem::swap(&mut x2, &mut x3);
            std::mem::swap(&mut z2, &mut z3);
        }

        // z2^(p-2)
        let exp = p - BigUint::from(2u32);
        x2 * z2.modpow(&exp, p) % p
    }

    fn apply(&self, out: &mut [u8], k: &[u8], u: &[u8]) -> CxResult<()> {
        let len = self.len();
        if k.len() != len || u.len() != len || out.len() < len {
            return Err(CxError::InvalidParameterSize);
        }
        let r = self.ladder(&self.clamp(k), &self.decode_u(u));
        out[..len].copy_from_slice(&to_le_fixed(&r, len));
        Ok(())
    }
}

/// `out = X25519(k, u)`, all values 32 bytes little-endian
pub fn x25519(out: &mut [u8], k: &[u8], u: &[u8]) -> CxResult<()> {
    X25519.apply(out, k, u)
}

/// `out = X448(k, u)`, all values 56 bytes little-endian
pub fn x448(out: &mut [u8], k: &[u8], u: &[u8]) -> CxResult<()> {
    X448.apply(out, k, u)
}
