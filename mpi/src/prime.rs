use cx_common::{CxError, CxResult};
use num_bigint::{BigUint, RandBigInt};
use num_integer::Integer;
use num_traits::{One, Zero};

use crate::{Arena, Handle};

/// Miller-Rabin rounds of the primality test
pub const MILLER_RABIN_ROUNDS: usize = 64;

const SMALL_PRIMES: [u32; 11] = [2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31];

/// Probabilistic primality test with random bases
pub fn is_probable_prime(n: &BigUint) -> bool {
    let two = BigUint::from(2u8);
    if n < &two {
        return false;
    }
    for p in SMALL_PRIMES {
        let p = BigUint::from(p);
        if n == &p {
            return true;
        }
        if (n % &p).is_zero() {
            return false;
        }
    }

    let one = BigUint::one();
    let n_minus_1 = n - &one;
    let s = n_minus_1.trailing_zeros().unwrap_or(0);
    let d = &n_minus_1 >> s;

    let mut rng = rand::thread_rng();
    'witness: for _ in 0..MILLER_RABIN_ROUNDS {
        let a = rng.gen_biguint_range(&two, &n_minus_1);
        let mut x = a.modpow(&d, n);
        if x == one || x == n_minus_1 {
            continue;
        }
        for _ in 1..s {
            x = (&x * &x) % n;
            if x == n_minus_1 {
                continue 'witness;
            }
        }
        return false;
    }
    true
}

impl Arena {
    pub fn is_prime(&self, x: Handle) -> CxResult<bool> {
        Ok(is_probable_prime(self.value(x)?))
    }

    /// Replaces `x` with the smallest prime strictly greater than it. Fails with `Overflow`
    /// when that prime does not fit the storage of `x`.
    pub fn next_prime(&mut self, x: Handle) -> CxResult<()> {
        let max_bits = u64::from(self.nbytes(x)?) * 8;
        let mut candidate = self.value(x)? + 1u8;
        if candidate <= BigUint::from(2u8) {
            return self.store(x, BigUint::from(2u8));
        }
        if candidate.is_even() {
            candidate += 1u8;
        }
        while !is_probable_prime(&candidate) {
            candidate += 2u8;
            if candidate.bits() > max_bits {
                return Err(CxError::Overflow);
            }
        }
        if candidate.bits() > max_bits {
            return Err(CxError::Overflow);
        }
        self.store(x, candidate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::biguint_from_hex;

    #[test]
    fn test_known_primes() {
        assert!(!is_probable_prime(&BigUint::from(0u8)));
        assert!(!is_probable_prime(&BigUint::from(1u8)));
        assert!(is_probable_prime(&BigUint::from(2u8)));
        assert!(is_probable_prime(&BigUint::from(97u8)));
        assert!(!is_probable_prime(&BigUint::from(561u32))); // Carmichael
        assert!(is_probable_prime(&biguint_from_hex(
            "ffffffff00000001000000000000000000000000ffffffffffffffffffffffff"
        )));
        assert!(!is_probable_prime(&biguint_from_hex(
            "ffffffff00000001000000000000000000000000fffffffffffffffffffffffd"
        )));
    }

    #[test]
    fn test_next_prime() {
        let mut arena = Arena::default();
        arena.lock(16, 0).unwrap();
        let x = arena.alloc_init(16, &[0x0e]).unwrap();
        arena.next_prime(x).unwrap();
        assert_eq!(arena.get_u32(x), Ok(17));
        arena.next_prime(x).unwrap();
        assert_eq!(arena.get_u32(x), Ok(19));
        assert_eq!(arena.is_prime(x), Ok(true));

        // 2^128 - 159 is the largest 128-bit prime
        let top = arena.alloc_init(16, &[0xFF; 16]).unwrap();
        let mut bytes = [0xFFu8; 16];
        bytes[15] = 0x61;
        arena.init(top, &bytes).unwrap();
        assert_eq!(arena.is_prime(top), Ok(true));
        assert_eq!(arena.next_prime(top), Err(CxError::Overflow));
    }
}
