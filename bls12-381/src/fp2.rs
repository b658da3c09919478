//! Finite field Fp2 helpers for BLS12-381 hash-to-curve

use ark_bls12_381::{Fq, Fq2};
use ark_ff::{BigInteger, Field, One, PrimeField, Zero};
use cx_mpi::codec::biguint_from_u64_digits;
use lazy_static::lazy_static;

use super::constants::{SQRT_RATIO_C3, SQRT_RATIO_C6, SQRT_RATIO_C7};

/// Number of trailing zeros of `p^2 - 1`
const SQRT_RATIO_C1: u32 = 3;
/// `2^c1 - 1`
const SQRT_RATIO_C4: [u8; 1] = [7];
/// `2^(c1 - 1)`
const SQRT_RATIO_C5: [u8; 1] = [4];

lazy_static! {
    static ref C3_BE: Vec<u8> = biguint_from_u64_digits(&SQRT_RATIO_C3).to_bytes_be();
    static ref C6: Fq2 = fp2_from_limbs(&SQRT_RATIO_C6);
    static ref C7: Fq2 = fp2_from_limbs(&SQRT_RATIO_C7);
}

/// Fp element from little-endian limbs, reduced modulo p
pub fn fp_from_limbs(limbs: &[u64]) -> Fq {
    Fq::from(biguint_from_u64_digits(limbs))
}

/// Fp2 element from `c0 || c1` limbs
pub fn fp2_from_limbs(limbs: &[u64; 12]) -> Fq2 {
    Fq2::new(fp_from_limbs(&limbs[..6]), fp_from_limbs(&limbs[6..]))
}

#[inline]
pub fn is_zero_fp2_bls12_381(x: &Fq2) -> bool {
    x.is_zero()
}

#[inline]
pub fn is_one_fp2_bls12_381(x: &Fq2) -> bool {
    x.is_one()
}

/// `b` if `c` else `a`. Branches on `c`, so not constant time.
#[inline]
pub fn cmov_fp2_bls12_381(a: &Fq2, b: &Fq2, c: bool) -> Fq2 {
    if c {
        *b
    } else {
        *a
    }
}

/// Sign function in Fp2
pub fn sgn0_fp2_bls12_381(x: &Fq2) -> bool {
    let sign_0 = x.c0.into_bigint().is_odd();
    let zero_0 = x.c0.is_zero();
    let sign_1 = x.c1.into_bigint().is_odd();
    sign_0 || (zero_0 && sign_1)
}

/// Frobenius endomorphism `x -> x^p`, i.e. conjugation
#[inline]
pub fn frobenius_fp2_bls12_381(x: &Fq2) -> Fq2 {
    Fq2::new(x.c0, -x.c1)
}

/// `x^e` for a big-endian exponent, square-and-multiply from the most significant bit
pub fn pow_fp2_bls12_381(x: &Fq2, e: &[u8]) -> Fq2 {
    let mut acc = Fq2::one();
    for byte in e {
        for i in (0..8).rev() {
            acc.square_in_place();
            if (byte >> i) & 1 == 1 {
                acc *= x;
            }
        }
    }
    acc
}

/// Square root of the ratio `u / v`.
///
/// Returns `(true, sqrt(u / v))` when `u / v` is a square, else `(false, sqrt(Z u / v))`.
pub fn sqrt_ratio_fp2_bls12_381(u: &Fq2, v: &Fq2) -> (bool, Fq2) {
    let mut tv1 = *C6;
    let mut tv2 = pow_fp2_bls12_381(v, &SQRT_RATIO_C4);
    let mut tv3 = tv2.square();
    tv3 *= v;
    let mut tv5 = *u * tv3;
    tv5 = pow_fp2_bls12_381(&tv5, &C3_BE);
    tv5 *= tv2;
    tv2 = tv5 * v;
    tv3 = tv5 * u;
    let mut tv4 = tv3 * tv2;

    tv5 = pow_fp2_bls12_381(&tv4, &SQRT_RATIO_C5);
    let is_qr = is_one_fp2_bls12_381(&tv5);
    tv2 = tv3 * *C7;
    tv5 = tv4 * tv1;
    tv3 = cmov_fp2_bls12_381(&tv2, &tv3, is_qr);
    tv4 = cmov_fp2_bls12_381(&tv5, &tv4, is_qr);

    for i in (2..=SQRT_RATIO_C1).rev() {
        // tv5 = tv4^(2^(i - 2))
        let e = 1u8 << (i - 2);
        tv5 = pow_fp2_bls12_381(&tv4, &[e]);
        let e1 = is_one_fp2_bls12_381(&tv5);
        tv2 = tv3 * tv1;
        tv1.square_in_place();
        tv5 = tv4 * tv1;
        tv3 = cmov_fp2_bls12_381(&tv2, &tv3, e1);
        tv4 = cmov_fp2_bls12_381(&tv5, &tv4, e1);
    }
    (is_qr, tv3)
}
