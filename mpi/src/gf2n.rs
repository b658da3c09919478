//! Multiplication in binary fields GF(2^m), elements as polynomials over GF(2) packed into
//! integers (bit i is the coefficient of x^i).

use cx_common::{CxError, CxResult};
use num_bigint::BigUint;
use num_traits::Zero;

use crate::{Arena, Handle};

/// Carry-less product of two polynomials
pub fn clmul(a: &BigUint, b: &BigUint) -> BigUint {
    let mut acc = BigUint::zero();
    for i in 0..b.bits() {
        if b.bit(i) {
            acc ^= a << i as usize;
        }
    }
    acc
}

/// Remainder of `p` modulo the polynomial `n` (`n` non-zero)
pub fn poly_reduce(mut p: BigUint, n: &BigUint) -> BigUint {
    let deg_n = n.bits();
    while p.bits() >= deg_n && !p.is_zero() {
        let shift = p.bits() - deg_n;
        p ^= n << shift as usize;
    }
    p
}

impl Arena {
    /// `r = a * b mod n` in GF(2)[x].
    ///
    /// `h` is the Montgomery constant the caller precomputed for `n`. It is only accepted for
    /// interface parity: it must be a live handle holding a polynomial of lower degree than `n`,
    /// but its value never takes part in the reduction, which divides by `n` directly.
    pub fn gf2_n_mul(
        &mut self,
        r: Handle,
        a: Handle,
        b: Handle,
        n: Handle,
        h: Handle,
    ) -> CxResult<()> {
        let n = self.value(n)?;
        if n.bits() < 2 {
            return Err(CxError::InvalidParameterValue);
        }
        if self.value(h)?.bits() >= n.bits() {
            return Err(CxError::InvalidParameterValue);
        }
        let product = clmul(self.value(a)?, self.value(b)?);
        let v = poly_reduce(product, n);
        self.store(r, v)
    }
}
