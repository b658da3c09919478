//! Montgomery-form helpers. For a modulus `n` the radix is `R = 2^(8 * nbytes(n))`, so it follows
//! the reserved size of the modulus handle, and the context caches `h = R^2 mod n`.

use cx_common::{CxError, CxResult};
use num_bigint::BigUint;
use num_integer::Integer;
use num_traits::One;

use crate::codec::from_be;
use crate::{Arena, Handle};

/// Modulus and precomputed constant of a Montgomery context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MontCtx {
    pub n: Handle,
    pub h: Handle,
}

impl Arena {
    /// Allocates both handles of a context, rolling back on failure
    pub fn mont_alloc(&mut self, nbytes: u32) -> CxResult<MontCtx> {
        let n = self.alloc(nbytes)?;
        match self.alloc(nbytes) {
            Ok(h) => Ok(MontCtx { n, h }),
            Err(e) => {
                self.destroy(n)?;
                Err(e)
            }
        }
    }

    pub fn mont_destroy(&mut self, ctx: MontCtx) -> CxResult<()> {
        self.destroy(ctx.n)?;
        self.destroy(ctx.h)
    }

    /// Loads the odd modulus `n` and computes `h = R^2 mod n`
    pub fn mont_init(&mut self, ctx: &MontCtx, n: Handle) -> CxResult<()> {
        let modulus = self.value(n)?.clone();
        if modulus.is_even() || modulus.is_one() {
            return Err(CxError::InvalidParameterValue);
        }
        let r = self.radix(ctx)?;
        let h = (&r * &r) % &modulus;
        self.store(ctx.n, modulus)?;
        self.store(ctx.h, h)
    }

    /// Loads a modulus together with a caller-computed `h`
    pub fn mont_init2(&mut self, ctx: &MontCtx, n: Handle, h: Handle) -> CxResult<()> {
        let modulus = self.value(n)?.clone();
        if modulus.is_even() || modulus.is_one() {
            return Err(CxError::InvalidParameterValue);
        }
        let h = self.value(h)?.clone();
        self.store(ctx.n, modulus)?;
        self.store(ctx.h, h)
    }

    /// `r = a * b * R^-1 mod n`
    pub fn mont_mul(&mut self, r: Handle, a: Handle, b: Handle, ctx: &MontCtx) -> CxResult<()> {
        let v = self.redc(self.value(a)? * self.value(b)?, ctx)?;
        self.store(r, v)
    }

    /// `r = a * R mod n`
    pub fn to_montgomery(&mut self, r: Handle, a: Handle, ctx: &MontCtx) -> CxResult<()> {
        let h = self.value(ctx.h)?;
        let v = self.redc(self.value(a)? * h, ctx)?;
        self.store(r, v)
    }

    /// `r = a * R^-1 mod n`
    pub fn from_montgomery(&mut self, r: Handle, a: Handle, ctx: &MontCtx) -> CxResult<()> {
        let v = self.redc(self.value(a)?.clone(), ctx)?;
        self.store(r, v)
    }

    /// Exponentiation inside the Montgomery domain: with `a = x R`, `r = x^e R`
    pub fn mont_pow(&mut self, r: Handle, a: Handle, e: &[u8], ctx: &MontCtx) -> CxResult<()> {
        let v = self.mont_pow_value(a, &from_be(e), ctx)?;
        self.store(r, v)
    }

    pub fn mont_pow_bn(&mut self, r: Handle, a: Handle, e: Handle, ctx: &MontCtx) -> CxResult<()> {
        let e = self.value(e)?.clone();
        let v = self.mont_pow_value(a, &e, ctx)?;
        self.store(r, v)
    }

    /// Inverse inside the Montgomery domain through `a^(n-2)`, valid for a prime modulus
    pub fn mont_invert_nprime(&mut self, r: Handle, a: Handle, ctx: &MontCtx) -> CxResult<()> {
        let e = self.value(ctx.n)? - 2u8;
        let v = self.mont_pow_value(a, &e, ctx)?;
        self.store(r, v)
    }

    fn radix(&self, ctx: &MontCtx) -> CxResult<BigUint> {
        Ok(BigUint::one() << (self.nbytes(ctx.n)? as usize * 8))
    }

    /// Montgomery reduction `t * R^-1 mod n`
    fn redc(&self, t: BigUint, ctx: &MontCtx) -> CxResult<BigUint> {
        let n = self.value(ctx.n)?;
        let r_inv = (self.radix(ctx)? % n).modinv(n).ok_or(CxError::InvalidParameterValue)?;
        Ok((t % n) * r_inv % n)
    }

    fn mont_pow_value(&self, a: Handle, e: &BigUint, ctx: &MontCtx) -> CxResult<BigUint> {
        let n = self.value(ctx.n)?;
        let x = self.redc(self.value(a)?.clone(), ctx)?;
        let r = self.radix(ctx)?;
        Ok(x.modpow(e, n) * (r % n) % n)
    }
}
