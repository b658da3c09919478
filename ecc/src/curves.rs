//! Named curve identifiers and their compiled-in domain parameters.
//!
//! Curve ids are partitioned into contiguous ranges, one per family. The family of an id is
//! resolved once, at the API boundary, into a [`Curve`] that the point layer matches on.

use cx_common::{CxError, CxResult};
use lazy_static::lazy_static;
use num_bigint::BigUint;

use cx_mpi::codec::{biguint_from_hex, to_be_fixed};

pub const CX_CURVE_WEIERSTRASS_START: u32 = 0x20;
pub const CX_CURVE_WEIERSTRASS_END: u32 = 0x6F;
pub const CX_CURVE_TWISTED_EDWARDS_START: u32 = 0x70;
pub const CX_CURVE_TWISTED_EDWARDS_END: u32 = 0x7F;
pub const CX_CURVE_MONTGOMERY_START: u32 = 0x80;
pub const CX_CURVE_MONTGOMERY_END: u32 = 0x8F;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum CurveId {
    Secp256k1 = 0x21,
    Secp256r1 = 0x22,
    Secp384r1 = 0x23,
    Secp521r1 = 0x24,
    BrainpoolP256r1 = 0x32,
    Bls12_381G1 = 0x39,
    Ed25519 = 0x71,
    Ed448 = 0x72,
    Curve25519 = 0x81,
    Curve448 = 0x82,
}

impl CurveId {
    pub const ALL: [CurveId; 10] = [
        CurveId::Secp256k1,
        CurveId::Secp256r1,
        CurveId::Secp384r1,
        CurveId::Secp521r1,
        CurveId::BrainpoolP256r1,
        CurveId::Bls12_381G1,
        CurveId::Ed25519,
        CurveId::Ed448,
        CurveId::Curve25519,
        CurveId::Curve448,
    ];

    pub fn raw(self) -> u32 {
        self as u32
    }

    pub fn from_raw(raw: u32) -> CxResult<CurveId> {
        Self::ALL.iter().copied().find(|c| c.raw() == raw).ok_or(CxError::InvalidCurve)
    }

    /// Family of the id, decided by the range it falls strictly inside
    pub fn family(self) -> CurveFamily {
        let raw = self.raw();
        if raw > CX_CURVE_WEIERSTRASS_START && raw < CX_CURVE_WEIERSTRASS_END {
            CurveFamily::Weierstrass
        } else if raw > CX_CURVE_TWISTED_EDWARDS_START && raw < CX_CURVE_TWISTED_EDWARDS_END {
            CurveFamily::TwistedEdwards
        } else {
            CurveFamily::Montgomery
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CurveFamily {
    /// `y^2 = x^3 + a x + b`
    Weierstrass,
    /// `a x^2 + y^2 = 1 + d x^2 y^2`
    TwistedEdwards,
    /// `b y^2 = x^3 + a x^2 + x`
    Montgomery,
}

/// Domain parameters of a named curve. `b` holds `d` for twisted Edwards curves.
#[derive(Debug)]
pub struct CurveDomain {
    pub curve: CurveId,
    pub bit_size: u32,
    /// Byte length of a field element or scalar encoding
    pub length: usize,
    pub a: BigUint,
    pub b: BigUint,
    pub p: BigUint,
    pub gx: BigUint,
    pub gy: BigUint,
    pub n: BigUint,
    pub h: BigUint,
}

impl CurveDomain {
    pub fn family(&self) -> CurveFamily {
        self.curve.family()
    }

    /// Parameter encoded big-endian on `length` bytes (`2 * length` for the generator)
    pub fn parameter_bytes(&self, param: CurveParam) -> Vec<u8> {
        let value = match param {
            CurveParam::A => &self.a,
            CurveParam::B => &self.b,
            CurveParam::Field => &self.p,
            CurveParam::Gx => &self.gx,
            CurveParam::Gy => &self.gy,
            CurveParam::Order => &self.n,
            CurveParam::Cofactor => &self.h,
            CurveParam::Generator => {
                let mut out = to_be_fixed(&self.gx, self.length);
                out.extend(to_be_fixed(&self.gy, self.length));
                return out;
            }
        };
        to_be_fixed(value, self.length)
    }
}

/// Selector of a domain parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum CurveParam {
    A = 1,
    B = 2,
    Field = 3,
    Gx = 4,
    Gy = 5,
    Order = 6,
    Cofactor = 7,
    Generator = 8,
}

impl CurveParam {
    pub fn from_raw(raw: u32) -> CxResult<CurveParam> {
        Ok(match raw {
            1 => CurveParam::A,
            2 => CurveParam::B,
            3 => CurveParam::Field,
            4 => CurveParam::Gx,
            5 => CurveParam::Gy,
            6 => CurveParam::Order,
            7 => CurveParam::Cofactor,
            8 => CurveParam::Generator,
            _ => return Err(CxError::InvalidParameter),
        })
    }
}

/// A curve resolved to its family
#[derive(Debug, Clone, Copy)]
pub enum Curve {
    Weierstrass(&'static CurveDomain),
    TwistedEdwards(&'static CurveDomain),
    Montgomery(&'static CurveDomain),
}

impl Curve {
    pub fn resolve(curve: CurveId) -> Curve {
        let dom = domain(curve);
        match curve.family() {
            CurveFamily::Weierstrass => Curve::Weierstrass(dom),
            CurveFamily::TwistedEdwards => Curve::TwistedEdwards(dom),
            CurveFamily::Montgomery => Curve::Montgomery(dom),
        }
    }

    pub fn from_raw(raw: u32) -> CxResult<Curve> {
        Ok(Self::resolve(CurveId::from_raw(raw)?))
    }

    pub fn domain(&self) -> &'static CurveDomain {
        match self {
            Curve::Weierstrass(d) | Curve::TwistedEdwards(d) | Curve::Montgomery(d) => d,
        }
    }
}

struct CurveDef {
    curve: CurveId,
    bit_size: u32,
    length: usize,
    a: &'static str,
    b: &'static str,
    p: &'static str,
    gx: &'static str,
    gy: &'static str,
    n: &'static str,
    h: &'static str,
}

impl CurveDef {
    fn build(&self) -> CurveDomain {
        CurveDomain {
            curve: self.curve,
            bit_size: self.bit_size,
            length: self.length,
            a: biguint_from_hex(self.a),
            b: biguint_from_hex(self.b),
            p: biguint_from_hex(self.p),
            gx: biguint_from_hex(self.gx),
            gy: biguint_from_hex(self.gy),
            n: biguint_from_hex(self.n),
            h: biguint_from_hex(self.h),
        }
    }
}

lazy_static! {
    static ref DOMAINS: Vec<CurveDomain> = CURVE_DEFS.iter().map(CurveDef::build).collect();
}

/// Domain parameters of a named curve
pub fn domain(curve: CurveId) -> &'static CurveDomain {
    // CURVE_DEFS lists every CurveId in declaration order
    &DOMAINS[CurveId::ALL.iter().position(|c| *c == curve).unwrap_or_default()]
}

#[rustfmt::skip]
static CURVE_DEFS: [CurveDef; 10] = [
        CurveDef {
            curve: CurveId::Secp256k1,
            bit_size: 256,
            length: 32,
            a: "0",
            b: "7",
            p: "fffffffffffffffffffffffffffffffffffffffffffffffffffffffefffffc2f",
            gx: "79be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798",
            gy: "483ada7726a3c4655da4fbfc0e1108a8fd17b448a68554199c47d08ffb10d4b8",
            n: "fffffffffffffffffffffffffffffffebaaedce6af48a03bbfd25e8cd0364141",
            h: "1",
        },
        CurveDef {
            curve: CurveId::Secp256r1,
            bit_size: 256,
            length: 32,
            a: "ffffffff00000001000000000000000000000000fffffffffffffffffffffffc",
            b: "5ac635d8aa3a93e7b3ebbd55769886bc651d06b0cc53b0f63bce3c3e27d2604b",
            p: "ffffffff00000001000000000000000000000000ffffffffffffffffffffffff",
            gx: "6b17d1f2e12c4247f8bce6e563a440f277037d812deb33a0f4a13945d898c296",
            gy: "4fe342e2fe1a7f9b8ee7eb4a7c0f9e162bce33576b315ececbb6406837bf51f5",
            n: "ffffffff00000000ffffffffffffffffbce6faada7179e84f3b9cac2fc632551",
            h: "1",
        },
        CurveDef {
            curve: CurveId::Secp384r1,
            bit_size: 384,
            length: 48,
            a: concat!(
                "ffffffffffffffffffffffffffffffff",
                "fffffffffffffffffffffffffffffffeffffffff0000000000000000fffffffc"
            ),
            b: concat!(
                "b3312fa7e23ee7e4988e056be3f82d19",
                "181d9c6efe8141120314088f5013875ac656398d8a2ed19d2a85c8edd3ec2aef"
            ),
            p: concat!(
                "ffffffffffffffffffffffffffffffff",
                "fffffffffffffffffffffffffffffffeffffffff0000000000000000ffffffff"
            ),
            gx: concat!(
                "aa87ca22be8b05378eb1c71ef320ad74",
                "6e1d3b628ba79b9859f741e082542a385502f25dbf55296c3a545e3872760ab7"
            ),
            gy: concat!(
                "3617de4a96262c6f5d9e98bf9292dc29",
                "f8f41dbd289a147ce9da3113b5f0b8c00a60b1ce1d7e819d7a431d7c90ea0e5f"
            ),
            n: concat!(
                "ffffffffffffffffffffffffffffffff",
                "ffffffffffffffffc7634d81f4372ddf581a0db248b0a77aecec196accc52973"
            ),
            h: "1",
        },
        CurveDef {
            curve: CurveId::Secp521r1,
            bit_size: 521,
            length: 66,
            a: concat!(
                "1fffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff",
                "ffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff",
                "ffc",
            ),
            b: concat!(
                "51953eb9618e1c9a1f929a21a0b68540eea2da725b99b315f3b8b489918ef109",
                "e156193951ec7e937b1652c0bd3bb1bf073573df883d2c34f1ef451fd46b503f",
                "00",
            ),
            p: concat!(
                "1fffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff",
                "ffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff",
                "fff",
            ),
            gx: concat!(
                "c6858e06b70404e9cd9e3ecb662395b4429c648139053fb521f828af606b4d3d",
                "baa14b5e77efe75928fe1dc127a2ffa8de3348b3c1856a429bf97e7e31c2e5bd",
                "66",
            ),
            gy: concat!(
                "11839296a789a3bc0045c8a5fb42c7d1bd998f54449579b446817afbd17273e6",
                "62c97ee72995ef42640c550b9013fad0761353c7086a272c24088be94769fd16",
                "650",
            ),
            n: concat!(
                "1fffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff",
                "ffa51868783bf2f966b7fcc0148f709a5d03bb5c9b8899c47aebb6fb71e91386",
                "409",
            ),
            h: "1",
        },
        CurveDef {
            curve: CurveId::BrainpoolP256r1,
            bit_size: 256,
            length: 32,
            a: "7d5a0975fc2c3057eef67530417affe7fb8055c126dc5c6ce94a4b44f330b5d9",
            b: "26dc5c6ce94a4b44f330b5d9bbd77cbf958416295cf7e1ce6bccdc18ff8c07b6",
            p: "a9fb57dba1eea9bc3e660a909d838d726e3bf623d52620282013481d1f6e5377",
            gx: "8bd2aeb9cb7e57cb2c4b482ffc81b7afb9de27e1e3bd23c23a4453bd9ace3262",
            gy: "547ef835c3dac4fd97f8461a14611dc9c27745132ded8e545c1d54c72f046997",
            n: "a9fb57dba1eea9bc3e660a909d838d718c397aa3b561a6f7901e0e82974856a7",
            h: "1",
        },
        CurveDef {
            curve: CurveId::Bls12_381G1,
            bit_size: 381,
            length: 48,
            a: "0",
            b: "4",
            p: concat!(
                "1a0111ea397fe69a4b1ba7b6434bacd7",
                "64774b84f38512bf6730d2a0f6b0f6241eabfffeb153ffffb9feffffffffaaab"
            ),
            gx: concat!(
                "17f1d3a73197d7942695638c4fa9ac0f",
                "c3688c4f9774b905a14e3a3f171bac586c55e83ff97a1aeffb3af00adb22c6bb"
            ),
            gy: concat!(
                "8b3f481e3aaa0f1a09e30ed741d8ae4",
                "fcf5e095d5d00af600db18cb2c04b3edd03cc744a2888ae40caa232946c5e7e1"
            ),
            n: "73eda753299d7d483339d80809a1d80553bda402fffe5bfeffffffff00000001",
            h: "396c8c005555e1568c00aaab0000aaab",
        },
        CurveDef {
            curve: CurveId::Ed25519,
            bit_size: 256,
            length: 32,
            a: "7fffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffec",
            b: "52036cee2b6ffe738cc740797779e89800700a4d4141d8ab75eb4dca135978a3",
            p: "7fffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffed",
            gx: "216936d3cd6e53fec0a4e231fdd6dc5c692cc7609525a7b2c9562d608f25d51a",
            gy: "6666666666666666666666666666666666666666666666666666666666666658",
            n: "1000000000000000000000000000000014def9dea2f79cd65812631a5cf5d3ed",
            h: "8",
        },
        CurveDef {
            curve: CurveId::Ed448,
            bit_size: 448,
            length: 57,
            a: "1",
            b: concat!(
                "ffffffffffffffffffffffffffffffffffffffffffffffff",
                "fffffffeffffffffffffffffffffffffffffffffffffffffffffffffffff6756"
            ),
            p: concat!(
                "ffffffffffffffffffffffffffffffffffffffffffffffff",
                "fffffffeffffffffffffffffffffffffffffffffffffffffffffffffffffffff"
            ),
            gx: concat!(
                "4f1970c66bed0ded221d15a622bf36da9e146570470f1767",
                "ea6de324a3d3a46412ae1af72ab66511433b80e18b00938e2626a82bc70cc05e"
            ),
            gy: concat!(
                "693f46716eb6bc248876203756c9c7624bea73736ca39840",
                "87789c1e05a0c2d73ad3ff1ce67c39c4fdbd132c4ed7c8ad9808795bf230fa14"
            ),
            n: concat!(
                "3fffffffffffffffffffffffffffffffffffffffffffffff",
                "ffffffff7cca23e9c44edb49aed63690216cc2728dc58f552378c292ab5844f3"
            ),
            h: "4",
        },
        CurveDef {
            curve: CurveId::Curve25519,
            bit_size: 256,
            length: 32,
            a: "76d06",
            b: "1",
            p: "7fffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffed",
            gx: "9",
            gy: "20ae19a1b8a086b4e01edd2c7748d14c923d4d7e6d7c61b229e9c5a27eced3d9",
            n: "1000000000000000000000000000000014def9dea2f79cd65812631a5cf5d3ed",
            h: "8",
        },
        CurveDef {
            curve: CurveId::Curve448,
            bit_size: 448,
            length: 56,
            a: "262a6",
            b: "1",
            p: concat!(
                "ffffffffffffffffffffffffffffffffffffffffffffffff",
                "fffffffeffffffffffffffffffffffffffffffffffffffffffffffffffffffff"
            ),
            gx: "5",
            gy: concat!(
                "7d235d1295f5b1f66c98ab6e58326fcecbae5d34f55545d0",
                "60f75dc28df3f6edb8027e2346430d211312c4b150677af76fd7223d457b5b1a"
            ),
            n: concat!(
                "3fffffffffffffffffffffffffffffffffffffffffffffff",
                "ffffffff7cca23e9c44edb49aed63690216cc2728dc58f552378c292ab5844f3"
            ),
            h: "4",
        },
];
