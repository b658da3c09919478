//! Fixed-width arithmetic, bitwise operations and comparisons over arena handles.

use std::cmp::Ordering;

use cx_common::{CxError, CxResult};
use num_bigint::{BigUint, RandBigInt};
use num_traits::{One, Zero};

use crate::codec::to_be_fixed;
use crate::{Arena, Handle};

fn modulus_2n(nbytes: u32) -> BigUint {
    BigUint::one() << (nbytes as usize * 8)
}

impl Arena {
    /// Byte-wise comparison of the padded encodings.
    ///
    /// Returns 0 when both handles have the same reserved size and identical encodings, the
    /// difference of the first differing bytes otherwise, and -1 whenever the sizes differ,
    /// whatever the values.
    pub fn cmp(&self, a: Handle, b: Handle) -> CxResult<i32> {
        let (len_a, len_b) = (self.nbytes(a)?, self.nbytes(b)?);
        if len_a != len_b {
            return Ok(-1);
        }
        let ea = to_be_fixed(self.value(a)?, len_a as usize);
        let eb = to_be_fixed(self.value(b)?, len_b as usize);
        Ok(ea.iter().zip(eb.iter()).find(|(x, y)| x != y).map_or(0, |(x, y)| *x as i32 - *y as i32))
    }

    /// Compares the low 32 bits of `a` with `b`. Any non-zero byte above them makes `a` greater.
    ///
    /// The result is clamped to `-1`, `0` or `1`, not a signed difference.
    pub fn cmp_u32(&self, a: Handle, b: u32) -> CxResult<i32> {
        let value = self.value(a)?;
        if value.bits() > 32 {
            return Ok(1);
        }
        let low = value.iter_u32_digits().next().unwrap_or(0);
        Ok(match low.cmp(&b) {
            Ordering::Less => -1,
            Ordering::Equal => 0,
            Ordering::Greater => 1,
        })
    }

    pub fn is_odd(&self, a: Handle) -> CxResult<bool> {
        Ok(self.value(a)?.bit(0))
    }

    pub fn xor(&mut self, r: Handle, a: Handle, b: Handle) -> CxResult<()> {
        let v = self.value(a)? ^ self.value(b)?;
        self.store(r, v)
    }

    pub fn or(&mut self, r: Handle, a: Handle, b: Handle) -> CxResult<()> {
        let v = self.value(a)? | self.value(b)?;
        self.store(r, v)
    }

    pub fn and(&mut self, r: Handle, a: Handle, b: Handle) -> CxResult<()> {
        let v = self.value(a)? & self.value(b)?;
        self.store(r, v)
    }

    pub fn tst_bit(&self, a: Handle, pos: u32) -> CxResult<bool> {
        self.check_bit_pos(a, pos)?;
        Ok(self.value(a)?.bit(u64::from(pos)))
    }

    pub fn set_bit(&mut self, a: Handle, pos: u32) -> CxResult<()> {
        self.check_bit_pos(a, pos)?;
        let mut v = self.value(a)?.clone();
        v.set_bit(u64::from(pos), true);
        self.store(a, v)
    }

    pub fn clr_bit(&mut self, a: Handle, pos: u32) -> CxResult<()> {
        self.check_bit_pos(a, pos)?;
        let mut v = self.value(a)?.clone();
        v.set_bit(u64::from(pos), false);
        self.store(a, v)
    }

    /// Number of significant bits of the value
    pub fn cnt_bits(&self, a: Handle) -> CxResult<u32> {
        Ok(self.value(a)?.bits() as u32)
    }

    /// Shifts left in place. Storage does not grow: bits pushed past the reserved size are lost.
    pub fn shl(&mut self, x: Handle, n: u32) -> CxResult<()> {
        let nbytes = self.check_shift(x, n)?;
        let v = (self.value(x)? << n as usize) % modulus_2n(nbytes);
        self.store(x, v)
    }

    pub fn shr(&mut self, x: Handle, n: u32) -> CxResult<()> {
        self.check_shift(x, n)?;
        let v = self.value(x)? >> n as usize;
        self.store(x, v)
    }

    /// `r = (a + b) mod 2^(8 len)` with `len = max(nbytes(a), nbytes(b))`. Returns the carry.
    pub fn add(&mut self, r: Handle, a: Handle, b: Handle) -> CxResult<bool> {
        let len = self.nbytes(a)?.max(self.nbytes(b)?);
        let sum = self.value(a)? + self.value(b)?;
        let m = modulus_2n(len);
        let carry = sum >= m;
        self.store(r, if carry { sum - m } else { sum })?;
        Ok(carry)
    }

    /// `r = (a - b) mod 2^(8 len)`. Returns the borrow, set iff `a < b`.
    pub fn sub(&mut self, r: Handle, a: Handle, b: Handle) -> CxResult<bool> {
        let len = self.nbytes(a)?.max(self.nbytes(b)?);
        let (va, vb) = (self.value(a)?, self.value(b)?);
        let borrow = va < vb;
        let diff = if borrow { modulus_2n(len) + va - vb } else { va - vb };
        self.store(r, diff)?;
        Ok(borrow)
    }

    /// Full product; `r` must reserve at least `nbytes(a) + nbytes(b)` bytes
    pub fn mul(&mut self, r: Handle, a: Handle, b: Handle) -> CxResult<()> {
        if self.nbytes(r)? < self.nbytes(a)? + self.nbytes(b)? {
            return Err(CxError::InvalidParameterSize);
        }
        let v = self.value(a)? * self.value(b)?;
        self.store(r, v)
    }

    /// Fills `r` with random bytes over its whole reserved size
    pub fn rand(&mut self, r: Handle) -> CxResult<()> {
        let bits = u64::from(self.nbytes(r)?) * 8;
        let v = rand::thread_rng().gen_biguint(bits);
        self.store(r, v)
    }

    /// Uniform random value in `[0, n)`
    pub fn rng(&mut self, r: Handle, n: Handle) -> CxResult<()> {
        let n = self.value(n)?;
        if n.is_zero() {
            return Err(CxError::InvalidParameter);
        }
        let v = rand::thread_rng().gen_biguint_below(n);
        self.store(r, v)
    }

    fn check_bit_pos(&self, a: Handle, pos: u32) -> CxResult<()> {
        if pos >= self.nbytes(a)? * 8 {
            return Err(CxError::InvalidParameter);
        }
        Ok(())
    }

    fn check_shift(&self, x: Handle, n: u32) -> CxResult<u32> {
        let nbytes = self.nbytes(x)?;
        if n > nbytes * 8 {
            return Err(CxError::InvalidParameter);
        }
        Ok(nbytes)
    }
}
