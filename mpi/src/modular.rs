//! Modular arithmetic over arena handles.

use cx_common::{CxError, CxResult};
use num_bigint::BigUint;
use num_integer::Integer;
use num_traits::{One, Zero};

use crate::codec::from_be;
use crate::{Arena, Handle};

impl Arena {
    fn modulus(&self, n: Handle) -> CxResult<BigUint> {
        let n = self.value(n)?;
        if n.is_zero() {
            return Err(CxError::InvalidParameter);
        }
        Ok(n.clone())
    }

    /// `r = d mod n`
    pub fn reduce(&mut self, r: Handle, d: Handle, n: Handle) -> CxResult<()> {
        let n = self.modulus(n)?;
        let v = self.value(d)? % n;
        self.store(r, v)
    }

    pub fn mod_add(&mut self, r: Handle, a: Handle, b: Handle, n: Handle) -> CxResult<()> {
        let n = self.modulus(n)?;
        let v = (self.value(a)? + self.value(b)?) % n;
        self.store(r, v)
    }

    pub fn mod_sub(&mut self, r: Handle, a: Handle, b: Handle, n: Handle) -> CxResult<()> {
        let n = self.modulus(n)?;
        let b = self.value(b)? % &n;
        let v = (self.value(a)? % &n + &n - b) % n;
        self.store(r, v)
    }

    /// `r = a * b mod n`, `n` odd
    pub fn mod_mul(&mut self, r: Handle, a: Handle, b: Handle, n: Handle) -> CxResult<()> {
        let n = self.modulus(n)?;
        if n.is_even() {
            return Err(CxError::InvalidParameterValue);
        }
        let v = (self.value(a)? * self.value(b)?) % n;
        self.store(r, v)
    }

    /// `r = a^e mod n` with the exponent given as big-endian bytes
    pub fn mod_pow(&mut self, r: Handle, a: Handle, e: &[u8], n: Handle) -> CxResult<()> {
        let n = self.modulus(n)?;
        let v = self.value(a)?.modpow(&from_be(e), &n);
        self.store(r, v)
    }

    pub fn mod_pow_bn(&mut self, r: Handle, a: Handle, e: Handle, n: Handle) -> CxResult<()> {
        let n = self.modulus(n)?;
        let v = self.value(a)?.modpow(self.value(e)?, &n);
        self.store(r, v)
    }

    /// Inverse through Fermat's little theorem, `r = a^(n-2) mod n`.
    ///
    /// Only meaningful for a prime `n`: a composite modulus yields a wrong value, not an error.
    pub fn mod_invert_nprime(&mut self, r: Handle, a: Handle, n: Handle) -> CxResult<()> {
        let n = self.modulus(n)?;
        if n < BigUint::from(2u8) {
            return Err(CxError::InvalidParameter);
        }
        let a = self.value(a)? % &n;
        if a.is_zero() {
            return Err(CxError::NotInvertible);
        }
        let v = a.modpow(&(&n - 2u8), &n);
        self.store(r, v)
    }

    /// General inverse of a small value
    pub fn mod_u32_invert(&mut self, r: Handle, a: u32, n: Handle) -> CxResult<()> {
        let n = self.modulus(n)?;
        let v = BigUint::from(a).modinv(&n).ok_or(CxError::NotInvertible)?;
        self.store(r, v)
    }

    /// Square root modulo an odd prime; the root whose parity equals `sign` is returned
    pub fn mod_sqrt(&mut self, r: Handle, a: Handle, n: Handle, sign: u32) -> CxResult<()> {
        let n = self.modulus(n)?;
        if n.is_even() {
            return Err(CxError::InvalidParameterValue);
        }
        let a = self.value(a)? % &n;
        let root = sqrt_mod_prime(&a, &n).ok_or(CxError::NoResidue)?;

        let sign = sign & 1 == 1;
        let root = if root.is_zero() {
            if sign {
                return Err(CxError::InvalidParameter);
            }
            root
        } else if root.bit(0) != sign {
            &n - root
        } else {
            root
        };
        self.store(r, root)
    }
}

/// Tonelli-Shanks. `None` when `a` is not a quadratic residue modulo the odd prime `p`.
pub fn sqrt_mod_prime(a: &BigUint, p: &BigUint) -> Option<BigUint> {
    let a = a % p;
    if a.is_zero() {
        return Some(BigUint::zero());
    }
    let one = BigUint::one();
    let p_minus_1 = p - &one;
    if p == &BigUint::from(2u8) {
        return Some(a);
    }
    // Euler's criterion
    if a.modpow(&(&p_minus_1 >> 1), p) != one {
        return None;
    }

    if p.bit(1) {
        // p = 3 mod 4
        return Some(a.modpow(&((p + &one) >> 2), p));
    }

    // p - 1 = q * 2^s with q odd
    let s = p_minus_1.trailing_zeros().unwrap_or(0);
    let q = &p_minus_1 >> s;

    let mut z = BigUint::from(2u8);
    while z.modpow(&(&p_minus_1 >> 1), p) != p_minus_1 {
        z += 1u8;
    }

    let mut m = s;
    let mut c = z.modpow(&q, p);
    let mut t = a.modpow(&q, p);
    let mut x = a.modpow(&((&q + &one) >> 1), p);

    while t != one {
        // Least i with t^(2^i) = 1
        let mut i = 0u64;
        let mut t2 = t.clone();
        while t2 != one {
            t2 = (&t2 * &t2) % p;
            i += 1;
            if i == m {
                return None;
            }
        }
        let b = c.modpow(&(BigUint::one() << (m - i - 1) as usize), p);
        m = i;
        c = (&b * &b) % p;
        t = (t * &c) % p;
        x = (x * b) % p;
    }
    Some(x)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{biguint_from_hex, to_be_fixed};
    use num_bigint::RandBigInt;

    const P256: &str = "ffffffff00000001000000000000000000000000ffffffffffffffffffffffff";
    // 2^255 - 19, p = 5 mod 8
    const P25519: &str = "7fffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffed";

    fn locked() -> Arena {
        let mut arena = Arena::default();
        arena.lock(32, 0).unwrap();
        arena
    }

    fn load(arena: &mut Arena, v: &BigUint) -> Handle {
        arena.alloc_init(32, &to_be_fixed(v, 32)).unwrap()
    }

    #[test]
    fn test_modular_laws() {
        let mut arena = locked();
        let p = biguint_from_hex(P256);
        let n = load(&mut arena, &p);
        let r = arena.alloc(32).unwrap();
        let mut rng = rand::thread_rng();
        for _ in 0..16 {
            let va = rng.gen_biguint_below(&p);
            let vb = rng.gen_biguint_below(&p);
            let a = load(&mut arena, &va);
            let b = load(&mut arena, &vb);

            arena.mod_add(r, a, b, n).unwrap();
            assert_eq!(arena.value(r).unwrap(), &((&va + &vb) % &p));
            arena.mod_sub(r, a, b, n).unwrap();
            assert_eq!(arena.value(r).unwrap(), &((&va + &p - &vb) % &p));
            arena.mod_mul(r, a, b, n).unwrap();
            assert_eq!(arena.value(r).unwrap(), &((&va * &vb) % &p));

            arena.mod_invert_nprime(r, a, n).unwrap();
            let inv = arena.value(r).unwrap().clone();
            assert_eq!((inv * &va) % &p, BigUint::one());

            arena.destroy(a).unwrap();
            arena.destroy(b).unwrap();
        }
    }

    #[test]
    fn test_mod_mul_rejects_even_modulus() {
        let mut arena = locked();
        let n = arena.alloc_init(32, &[0x10]).unwrap();
        let a = arena.alloc_init(32, &[0x03]).unwrap();
        let r = arena.alloc(32).unwrap();
        assert_eq!(arena.mod_mul(r, a, a, n), Err(CxError::InvalidParameterValue));
        // Addition does not care
        arena.mod_add(r, a, a, n).unwrap();
        assert_eq!(arena.get_u32(r), Ok(6));
    }

    #[test]
    fn test_zero_modulus() {
        let mut arena = locked();
        let zero = arena.alloc(32).unwrap();
        let a = arena.alloc_init(32, &[0x03]).unwrap();
        assert_eq!(arena.reduce(a, a, zero), Err(CxError::InvalidParameter));
        assert_eq!(arena.mod_pow(a, a, &[2], zero), Err(CxError::InvalidParameter));
    }

    #[test]
    fn test_mod_pow_and_reduce() {
        let mut arena = locked();
        let n = arena.alloc_init(32, &[0x01, 0x01]).unwrap(); // 257
        let a = arena.alloc_init(32, &[0x03]).unwrap();
        let e = arena.alloc_init(32, &[0x01, 0x00]).unwrap();
        let r = arena.alloc(32).unwrap();
        arena.mod_pow(r, a, &[0x01, 0x00], n).unwrap();
        assert_eq!(arena.get_u32(r), Ok(1));
        arena.mod_pow_bn(r, a, e, n).unwrap();
        assert_eq!(arena.get_u32(r), Ok(1));
        arena.mod_pow(r, a, &[0x05], n).unwrap();
        assert_eq!(arena.get_u32(r), Ok(243));

        let d = arena.alloc_init(32, &[0x10, 0x00]).unwrap();
        arena.reduce(r, d, n).unwrap();
        assert_eq!(arena.get_u32(r), Ok(4096 % 257));
    }

    #[test]
    fn test_invert() {
        let mut arena = locked();
        let n = arena.alloc_init(32, &[0x0b]).unwrap();
        let zero = arena.alloc(32).unwrap();
        let r = arena.alloc(32).unwrap();
        arena.mod_u32_invert(r, 3, n).unwrap();
        assert_eq!(arena.get_u32(r), Ok(4));
        assert_eq!(arena.mod_invert_nprime(r, zero, n), Err(CxError::NotInvertible));

        let composite = arena.alloc_init(32, &[0x0c]).unwrap();
        assert_eq!(arena.mod_u32_invert(r, 3, composite), Err(CxError::NotInvertible));
        // Fermat inverse over a composite: computed, not rejected
        let five = arena.alloc_init(32, &[0x05]).unwrap();
        arena.mod_invert_nprime(r, five, composite).unwrap();
        // 5^10 mod 12
        assert_eq!(arena.get_u32(r), Ok(1));
    }

    #[test]
    fn test_sqrt_sign_selection() {
        let mut arena = locked();
        let mut rng = rand::thread_rng();
        for hex in [P256, P25519] {
            let p = biguint_from_hex(hex);
            let n = load(&mut arena, &p);
            let r = arena.alloc(32).unwrap();
            for _ in 0..8 {
                let x = rng.gen_biguint_below(&p);
                let square = (&x * &x) % &p;
                let a = load(&mut arena, &square);
                for sign in [0u32, 1] {
                    arena.mod_sqrt(r, a, n, sign).unwrap();
                    let root = arena.value(r).unwrap().clone();
                    assert_eq!((&root * &root) % &p, square);
                    assert_eq!(root.bit(0), sign == 1);
                }
                arena.destroy(a).unwrap();
            }
            arena.destroy(n).unwrap();
            arena.destroy(r).unwrap();
        }
    }

    #[test]
    fn test_sqrt_edge_cases() {
        let mut arena = locked();
        let p = biguint_from_hex(P256);
        let n = load(&mut arena, &p);
        let zero = arena.alloc(32).unwrap();
        let r = arena.alloc(32).unwrap();
        arena.mod_sqrt(r, zero, n, 0).unwrap();
        assert_eq!(arena.get_u32(r), Ok(0));
        assert_eq!(arena.mod_sqrt(r, zero, n, 1), Err(CxError::InvalidParameter));

        // -1 is a non-residue modulo a prime congruent to 3 mod 4
        let minus_one = load(&mut arena, &(&p - 1u8));
        assert_eq!(arena.mod_sqrt(r, minus_one, n, 0), Err(CxError::NoResidue));
    }

    #[test]
    fn test_tonelli_shanks_high_two_adicity() {
        // 2^64 - 2^32 + 1, p - 1 has 32 factors of two
        let p = BigUint::from(0xFFFF_FFFF_0000_0001u64);
        for x in [2u64, 12345, 987_654_321, 0xDEAD_BEEF_CAFE] {
            let x = BigUint::from(x);
            let a = (&x * &x) % &p;
            let root = sqrt_mod_prime(&a, &p).unwrap();
            assert_eq!((&root * &root) % &p, a);
        }
        // 7 generates the multiplicative group, so it is a non-residue
        assert_eq!(sqrt_mod_prime(&BigUint::from(7u8), &p), None);
    }
}
