//! BLS signatures in the minimal-public-key-size variant: public keys in G1, signatures in G2.
//!
//! Points are exchanged in the ZCash compressed encoding: the big-endian `x` coordinate (`c1`
//! first for G2) with three flag bits in the most significant byte.

use ark_bls12_381::{g1, g2, Bls12_381, Fq, Fq2, Fr, G1Affine, G2Affine};
use ark_ec::pairing::Pairing;
use ark_ec::short_weierstrass::{Affine, SWCurveConfig};
use ark_ec::{AffineRepr, CurveGroup};
use ark_ff::{BigInteger, Field, PrimeField, Zero};
use cx_common::{CxError, CxResult};
use cx_mpi::codec::{biguint_from_u64_digits, from_be};
use num_bigint::BigUint;
use num_traits::Zero as _;
use tracing::debug;

use super::constants::R;
use super::hash_to_curve::hash_to_g2_bls12_381;

pub const PRIVATE_KEY_SIZE: usize = 32;
pub const PUBLIC_KEY_SIZE: usize = 48;
pub const SIGNATURE_SIZE: usize = 96;

const FLAG_COMPRESSED: u8 = 0x80;
const FLAG_INFINITY: u8 = 0x40;
const FLAG_SIGN: u8 = 0x20;
const FLAGS_MASK: u8 = 0xE0;

/// Base field of a curve, as carried by the compressed encoding
pub trait Coordinate: Field + Ord {
    const SIZE: usize;

    fn write_be(&self, out: &mut [u8]);

    /// `None` for values not below the modulus
    fn read_be(bytes: &[u8]) -> Option<Self>;

    /// Whether `self > -self`, comparing the highest coefficient first
    fn is_lexicographically_largest(&self) -> bool;
}

impl Coordinate for Fq {
    const SIZE: usize = 48;

    fn write_be(&self, out: &mut [u8]) {
        out.copy_from_slice(&self.into_bigint().to_bytes_be());
    }

    fn read_be(bytes: &[u8]) -> Option<Self> {
        let v = from_be(bytes);
        let modulus: BigUint = Fq::MODULUS.into();
        if v >= modulus {
            return None;
        }
        Some(Fq::from(v))
    }

    fn is_lexicographically_largest(&self) -> bool {
        *self > -*self
    }
}

impl Coordinate for Fq2 {
    const SIZE: usize = 96;

    fn write_be(&self, out: &mut [u8]) {
        self.c1.write_be(&mut out[..48]);
        self.c0.write_be(&mut out[48..]);
    }

    fn read_be(bytes: &[u8]) -> Option<Self> {
        let c1 = Fq::read_be(&bytes[..48])?;
        let c0 = Fq::read_be(&bytes[48..])?;
        Some(Fq2::new(c0, c1))
    }

    fn is_lexicographically_largest(&self) -> bool {
        if self.c1.is_zero() {
            self.c0.is_lexicographically_largest()
        } else {
            self.c1.is_lexicographically_largest()
        }
    }
}

/// Compressed encoding of `p`
pub fn compress<P>(p: &Affine<P>) -> Vec<u8>
where
    P: SWCurveConfig,
    P::BaseField: Coordinate,
{
    let mut out = vec![0u8; P::BaseField::SIZE];
    if p.infinity {
        out[0] = FLAG_COMPRESSED | FLAG_INFINITY;
        return out;
    }
    p.x.write_be(&mut out);
    out[0] |= FLAG_COMPRESSED;
    if p.y.is_lexicographically_largest() {
        out[0] |= FLAG_SIGN;
    }
    out
}

/// Decodes a compressed point, checking that it lies in the prime-order subgroup
pub fn decompress<P>(bytes: &[u8]) -> CxResult<Affine<P>>
where
    P: SWCurveConfig,
    P::BaseField: Coordinate,
{
    if bytes.len() != P::BaseField::SIZE {
        return Err(CxError::InvalidParameterSize);
    }
    let flags = bytes[0] & FLAGS_MASK;
    if flags & FLAG_COMPRESSED == 0 {
        return Err(CxError::InvalidPoint);
    }
    if flags & FLAG_INFINITY != 0 {
        let rest_is_zero = bytes[0] & !FLAGS_MASK == 0 && bytes[1..].iter().all(|b| *b == 0);
        if flags & FLAG_SIGN != 0 || !rest_is_zero {
            return Err(CxError::InvalidPoint);
        }
        return Ok(Affine::identity());
    }

    let mut raw = bytes.to_vec();
    raw[0] &= !FLAGS_MASK;
    let x = P::BaseField::read_be(&raw).ok_or(CxError::InvalidPoint)?;
    let rhs = x.square() * x + P::mul_by_a(x) + P::COEFF_B;
    let mut y = rhs.sqrt().ok_or(CxError::InvalidPoint)?;
    if y.is_lexicographically_largest() != (flags & FLAG_SIGN != 0) {
        y = -y;
    }
    let p = Affine::new_unchecked(x, y);
    if !p.is_in_correct_subgroup_assuming_on_curve() {
        return Err(CxError::InvalidPoint);
    }
    Ok(p)
}

/// Private key (32 bytes big-endian, in `[1, r)`) as a scalar
pub(crate) fn secret_scalar(key: &[u8]) -> CxResult<Fr> {
    if key.len() != PRIVATE_KEY_SIZE {
        return Err(CxError::InvalidParameterSize);
    }
    let sk = from_be(key);
    if sk.is_zero() || sk >= biguint_from_u64_digits(&R) {
        return Err(CxError::InvalidParameter);
    }
    Ok(Fr::from(sk))
}

/// Compressed public key `sk * G1`
pub fn public_key(key: &[u8]) -> CxResult<[u8; PUBLIC_KEY_SIZE]> {
    let sk = secret_scalar(key)?;
    let pk = (G1Affine::generator() * sk).into_affine();
    let mut out = [0u8; PUBLIC_KEY_SIZE];
    out.copy_from_slice(&compress(&pk));
    Ok(out)
}

/// Signs `msg` under the domain separation tag `dst`: `sk * H(msg)`, compressed
pub fn sign(key: &[u8], msg: &[u8], dst: &[u8]) -> CxResult<[u8; SIGNATURE_SIZE]> {
    let sk = secret_scalar(key)?;
    let h = hash_to_g2_bls12_381(msg, dst)?;
    let sig = (h * sk).into_affine();
    let mut out = [0u8; SIGNATURE_SIZE];
    out.copy_from_slice(&compress(&sig));
    Ok(out)
}

/// Checks `e(pk, H(msg)) == e(G1, sig)`. Malformed or infinite keys and signatures do not verify.
pub fn verify(public: &[u8], msg: &[u8], sig: &[u8], dst: &[u8]) -> CxResult<bool> {
    let pk = decompress::<g1::Config>(public);
    let sig = decompress::<g2::Config>(sig);
    let (pk, sig) = match (pk, sig) {
        (Ok(pk), Ok(sig)) if !pk.infinity && !sig.infinity => (pk, sig),
        _ => {
            debug!("bls verify: rejected malformed key or signature");
            return Ok(false);
        }
    };
    let h = hash_to_g2_bls12_381(msg, dst)?;
    Ok(Bls12_381::pairing(pk, h) == Bls12_381::pairing(G1Affine::generator(), sig))
}

/// Adds `sig` into the compressed accumulator `acc`, or initializes it when `is_first`
pub fn aggregate(sig: &[u8], acc: &mut [u8], is_first: bool) -> CxResult<()> {
    if sig.len() != SIGNATURE_SIZE || acc.len() != SIGNATURE_SIZE {
        return Err(CxError::InvalidParameter);
    }
    let s: G2Affine = decompress(sig).map_err(|_| CxError::InternalError)?;
    let sum = if is_first {
        s
    } else {
        let a: G2Affine = decompress(acc).map_err(|_| CxError::InternalError)?;
        (a.into_group() + s).into_affine()
    };
    acc.copy_from_slice(&compress(&sum));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ark_serialize::CanonicalSerialize;
    use ark_std::UniformRand;
    use cx_common::decode_hex;

    use crate::constants::DST_POP;

    const QUUX_DST: &[u8] = b"QUUX-V01-CS02-with-BLS12381G2_XMD:SHA-256_SSWU_RO_";

    fn key(v: u8) -> [u8; 32] {
        let mut k = [0u8; 32];
        k[31] = v;
        k
    }

    #[test]
    fn test_generator_encoding() {
        assert_eq!(
            public_key(&key(1)).unwrap().to_vec(),
            decode_hex(
                "97f1d3a73197d7942695638c4fa9ac0fc3688c4f9774b905a14e3a3f171bac586c55e83ff97a1aeffb3af00adb22c6bb"
            )
        );
    }

    #[test]
    fn test_compression_matches_arkworks() {
        let mut rng = ark_std::test_rng();
        for _ in 0..4 {
            let p = (G1Affine::generator() * Fr::rand(&mut rng)).into_affine();
            let mut expected = Vec::new();
            p.serialize_compressed(&mut expected).unwrap();
            assert_eq!(compress(&p), expected);
            assert_eq!(decompress::<g1::Config>(&expected).unwrap(), p);

            let q = (G2Affine::generator() * Fr::rand(&mut rng)).into_affine();
            let mut expected = Vec::new();
            q.serialize_compressed(&mut expected).unwrap();
            assert_eq!(compress(&q), expected);
            assert_eq!(decompress::<g2::Config>(&expected).unwrap(), q);
        }
    }

    #[test]
    fn test_decompress_rejects_malformed() {
        let g = compress(&G1Affine::generator());
        let decode = |b: &[u8]| decompress::<g1::Config>(b);

        // uncompressed flag
        let mut bad = g.clone();
        bad[0] &= !FLAG_COMPRESSED;
        assert_eq!(decode(&bad), Err(CxError::InvalidPoint));

        // infinity with garbage
        let mut inf = vec![0u8; 48];
        inf[0] = FLAG_COMPRESSED | FLAG_INFINITY;
        assert!(decode(&inf).unwrap().infinity);
        inf[47] = 1;
        assert_eq!(decode(&inf), Err(CxError::InvalidPoint));

        // x above the modulus
        let mut big = vec![0xffu8; 48];
        big[0] = FLAG_COMPRESSED | 0x1f;
        assert_eq!(decode(&big), Err(CxError::InvalidPoint));

        assert_eq!(decode(&g[..47]), Err(CxError::InvalidParameterSize));
    }

    #[test]
    fn test_sign_known_answer() {
        // With sk = 1 the signature is the hashed point itself
        let sig = sign(&key(1), b"", QUUX_DST).unwrap();
        assert_eq!(
            sig.to_vec(),
            decode_hex(
                "a5cb8437535e20ecffaef7752baddf98034139c38452458baeefab379ba13dff5bf5dd71b72418717047f5b0f37da03d\
                 0141ebfbdca40eb85b87142e130ab689c673cf60f1a3e98d69335266f30d9b8d4ac44c1038e9dcdd5393faf5c41fb78a"
            )
        );
    }

    #[test]
    fn test_sign_and_verify() {
        let sk = decode_hex("263dbd792f5b1be47ed85f8938c0f29586af0d3ac7b977f21c278fe1462040e3");
        let pk = public_key(&sk).unwrap();
        let sig = sign(&sk, b"message", DST_POP).unwrap();

        assert!(verify(&pk, b"message", &sig, DST_POP).unwrap());
        assert!(!verify(&pk, b"other", &sig, DST_POP).unwrap());
        assert!(!verify(&pk, b"message", &sig, QUUX_DST).unwrap());
        assert!(!verify(&pk[..47], b"message", &sig, DST_POP).unwrap());

        assert_eq!(sign(&key(0), b"", DST_POP), Err(CxError::InvalidParameter));
        assert_eq!(sign(&[0xff; 32], b"", DST_POP), Err(CxError::InvalidParameter));
        assert_eq!(sign(&[1; 31], b"", DST_POP), Err(CxError::InvalidParameterSize));
    }

    #[test]
    fn test_aggregate() {
        let s1 = sign(&key(1), b"msg", DST_POP).unwrap();
        let s2 = sign(&key(2), b"msg", DST_POP).unwrap();
        let s3 = sign(&key(3), b"msg", DST_POP).unwrap();

        let mut acc = [0u8; SIGNATURE_SIZE];
        aggregate(&s1, &mut acc, true).unwrap();
        assert_eq!(acc, s1);
        aggregate(&s2, &mut acc, false).unwrap();
        assert_eq!(acc, s3);

        assert_eq!(aggregate(&[], &mut acc, false), Err(CxError::InvalidParameter));
        assert_eq!(aggregate(&s1[..95], &mut acc, false), Err(CxError::InvalidParameter));
        let mut bad = s1;
        bad[0] &= !FLAG_COMPRESSED;
        assert_eq!(aggregate(&bad, &mut acc, false), Err(CxError::InternalError));
        assert_eq!(aggregate(&s1, &mut bad, false), Err(CxError::InternalError));
    }
}
