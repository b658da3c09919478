//! Hashing to G2 (RFC 9380, suite BLS12381G2_XMD:SHA-256_SSWU_RO_)

use ark_bls12_381::{Fq, Fq2, G2Affine};
use ark_ec::{AffineRepr, CurveGroup};
use ark_ff::{Field, One, PrimeField, Zero};
use cx_common::{CxError, CxResult};
use lazy_static::lazy_static;
use sha2::{Digest, Sha256};
use tracing::trace;

use super::constants::{
    H_EFF_G2, ISO_A_G2, ISO_B_G2, ISO_X_DEN_G2, ISO_X_NUM_G2, ISO_Y_DEN_G2, ISO_Y_NUM_G2,
    SWU_Z_G2,
};
use super::fp2::{
    cmov_fp2_bls12_381, fp2_from_limbs, is_zero_fp2_bls12_381, sgn0_fp2_bls12_381,
    sqrt_ratio_fp2_bls12_381,
};

/// Output size of SHA-256
const B_IN_BYTES: usize = 32;
/// Input block size of SHA-256
const S_IN_BYTES: usize = 64;
/// Bytes per field element in hash_to_field, `ceil((ceil(log2(p)) + k) / 8)` with `k = 128`
const L: usize = 64;

lazy_static! {
    static ref SWU_Z: Fq2 = fp2_from_limbs(&SWU_Z_G2);
    static ref ISO_A: Fq2 = fp2_from_limbs(&ISO_A_G2);
    static ref ISO_B: Fq2 = fp2_from_limbs(&ISO_B_G2);
    static ref X_NUM: Vec<Fq2> = ISO_X_NUM_G2.iter().map(fp2_from_limbs).collect();
    static ref X_DEN: Vec<Fq2> = ISO_X_DEN_G2.iter().map(fp2_from_limbs).collect();
    static ref Y_NUM: Vec<Fq2> = ISO_Y_NUM_G2.iter().map(fp2_from_limbs).collect();
    static ref Y_DEN: Vec<Fq2> = ISO_Y_DEN_G2.iter().map(fp2_from_limbs).collect();
}

/// expand_message_xmd with SHA-256 (RFC 9380 §5.3.1)
pub fn expand_message_xmd(msg: &[u8], dst: &[u8], len_in_bytes: usize) -> CxResult<Vec<u8>> {
    let ell = len_in_bytes.div_ceil(B_IN_BYTES);
    if ell > 255 || len_in_bytes < B_IN_BYTES || dst.len() > 255 {
        return Err(CxError::InvalidParameterSize);
    }
    let mut dst_prime = dst.to_vec();
    dst_prime.push(dst.len() as u8);
    let l_i_b_str = (len_in_bytes as u16).to_be_bytes();

    // b_0 = H(Z_pad || msg || l_i_b_str || I2OSP(0, 1) || DST_prime)
    let b_0 = Sha256::new()
        .chain_update([0u8; S_IN_BYTES])
        .chain_update(msg)
        .chain_update(l_i_b_str)
        .chain_update([0u8])
        .chain_update(&dst_prime)
        .finalize();

    // b_1 = H(b_0 || I2OSP(1, 1) || DST_prime)
    let mut b_i = Sha256::new().chain_update(b_0).chain_update([1u8]).chain_update(&dst_prime).finalize();
    let mut uniform = Vec::with_capacity(ell * B_IN_BYTES);
    uniform.extend_from_slice(&b_i);

    // b_i = H(strxor(b_0, b_(i - 1)) || I2OSP(i, 1) || DST_prime)
    for i in 2..=ell {
        let mixed: Vec<u8> = b_0.iter().zip(b_i.iter()).map(|(a, b)| a ^ b).collect();
        b_i = Sha256::new().chain_update(mixed).chain_update([i as u8]).chain_update(&dst_prime).finalize();
        uniform.extend_from_slice(&b_i);
    }
    uniform.truncate(len_in_bytes);
    Ok(uniform)
}

/// Hashes `msg` to four base field elements, the coordinates of two Fp2 elements
pub fn hash_to_field_bls12_381(msg: &[u8], dst: &[u8]) -> CxResult<[Fq; 4]> {
    let uniform = expand_message_xmd(msg, dst, 4 * L)?;
    let mut out = [Fq::zero(); 4];
    for (e, chunk) in out.iter_mut().zip(uniform.chunks_exact(L)) {
        *e = Fq::from_be_bytes_mod_order(chunk);
    }
    Ok(out)
}

/// Maps a field element u ∈ Fp2 to a point on the isogenous curve E'
/// using the simplified Shallue-van de Woestijne-Ulas (SWU) method for AB != 0
pub fn map_to_curve_simple_swu_g2_bls12_381(u: &Fq2) -> (Fq2, Fq2) {
    let (z, a, b) = (*SWU_Z, *ISO_A, *ISO_B);

    // 1-6. tv1 = Z u^2, tv2 = tv1^2 + tv1, tv3 = B (tv2 + 1)
    let tv1 = z * u.square();
    let mut tv2 = tv1.square() + tv1;
    let tv3 = b * (tv2 + Fq2::one());

    // 7-8. tv4 = A * CMOV(Z, -tv2, tv2 != 0)
    let tv4 = a * cmov_fp2_bls12_381(&z, &-tv2, !is_zero_fp2_bls12_381(&tv2));

    // 9-16. tv2 = tv3^3 + A tv3 tv4^2 + B tv4^3, tv6 = tv4^3
    let mut tv6 = tv4.square();
    tv2 = (tv3.square() + a * tv6) * tv3;
    tv6 *= tv4;
    tv2 += b * tv6;

    // 17-22. Select x and y depending on whether gx1 is square
    let x = tv1 * tv3;
    let (is_gx1_square, y1) = sqrt_ratio_fp2_bls12_381(&tv2, &tv6);
    let y = tv1 * u * y1;
    let x = cmov_fp2_bls12_381(&x, &tv3, is_gx1_square);
    let y = cmov_fp2_bls12_381(&y, &y1, is_gx1_square);

    // 23-24. Fix the sign of y
    let e1 = sgn0_fp2_bls12_381(u) == sgn0_fp2_bls12_381(&y);
    let y = cmov_fp2_bls12_381(&-y, &y, e1);

    // 25. x = x / tv4, tv4 is never zero
    let x = x * tv4.inverse().unwrap_or_default();
    (x, y)
}

/// Horner evaluation of a polynomial with coefficients in increasing degree
fn eval_poly_fp2(coeffs: &[Fq2], x: &Fq2) -> Fq2 {
    coeffs.iter().rev().fold(Fq2::zero(), |acc, c| acc * x + c)
}

/// 3-isogeny from E' to E. The exceptional points map to the identity.
fn isogeny_map_g2_bls12_381(x: &Fq2, y: &Fq2) -> G2Affine {
    let x_den = eval_poly_fp2(&X_DEN, x).inverse();
    let y_den = eval_poly_fp2(&Y_DEN, x).inverse();
    match (x_den, y_den) {
        (Some(x_den), Some(y_den)) => {
            let x_out = eval_poly_fp2(&X_NUM, x) * x_den;
            let y_out = *y * eval_poly_fp2(&Y_NUM, x) * y_den;
            G2Affine::new_unchecked(x_out, y_out)
        }
        _ => G2Affine::identity(),
    }
}

/// Maps a field element in Fp2 to a point of E (not yet in G2)
pub fn map_to_curve_g2_bls12_381(u: &Fq2) -> G2Affine {
    let (x, y) = map_to_curve_simple_swu_g2_bls12_381(u);
    isogeny_map_g2_bls12_381(&x, &y)
}

/// Multiplies by the effective cofactor `h_eff`
pub fn clear_cofactor_g2_bls12_381(p: &G2Affine) -> G2Affine {
    p.mul_bigint(H_EFF_G2).into_affine()
}

/// Maps the two hash_to_field outputs to G2: `clear_cofactor(map(u0) + map(u1))`
pub fn g2_hash_field_to_curve(u: &[Fq; 4]) -> G2Affine {
    let u0 = Fq2::new(u[0], u[1]);
    let u1 = Fq2::new(u[2], u[3]);
    let q0 = map_to_curve_g2_bls12_381(&u0);
    let q1 = map_to_curve_g2_bls12_381(&u1);
    let r = (q0.into_group() + q1).into_affine();
    clear_cofactor_g2_bls12_381(&r)
}

/// hash_to_curve for G2 (random oracle variant)
pub fn hash_to_g2_bls12_381(msg: &[u8], dst: &[u8]) -> CxResult<G2Affine> {
    trace!("hash_to_g2_bls12_381() msg_len={} dst_len={}", msg.len(), dst.len());
    let u = hash_to_field_bls12_381(msg, dst)?;
    Ok(g2_hash_field_to_curve(&u))
}
