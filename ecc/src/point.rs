//! Curve points over arena handles.
//!
//! A point owns three coordinate handles. `z` only tracks normalization: `z = 1` is an affine
//! point and `(0, 1, 0)` is the canonical point at infinity. Every operation leaves its result in
//! one of these two forms; any other `z` is rejected as an internal inconsistency.

use cx_common::{CxError, CxResult};
use cx_mpi::codec::{from_be, to_be_fixed};
use cx_mpi::{Arena, Handle, Temps};
use num_bigint::BigUint;
use num_traits::{One, Zero};
use tracing::debug;

use crate::affine::{Chord, Form, Reg};
use crate::edwards::{Edwards, ExtReg};
use crate::field::Field;
use crate::{domain, Curve, CurveDomain, CurveId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EcPoint {
    pub curve: CurveId,
    pub x: Handle,
    pub y: Handle,
    pub z: Handle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PointState {
    Affine,
    Infinity,
}

fn state(arena: &Arena, p: &EcPoint) -> CxResult<PointState> {
    let z = arena.value(p.z)?;
    if z.is_one() {
        Ok(PointState::Affine)
    } else if z.is_zero() {
        Ok(PointState::Infinity)
    } else {
        Err(CxError::InternalError)
    }
}

fn set_infinity(arena: &mut Arena, p: &EcPoint) -> CxResult<()> {
    arena.store(p.x, BigUint::zero())?;
    arena.store(p.y, BigUint::one())?;
    arena.store(p.z, BigUint::zero())
}

fn set_affine(arena: &mut Arena, p: &EcPoint, x: Handle, y: Handle) -> CxResult<()> {
    arena.copy(p.x, x)?;
    arena.copy(p.y, y)?;
    arena.store(p.z, BigUint::one())
}

/// Allocates the three coordinates, sized after the curve's byte length
pub fn ecpoint_alloc(arena: &mut Arena, curve: CurveId) -> CxResult<EcPoint> {
    let len = domain(curve).length as u32;
    let mut temps = Temps::new(arena);
    let x = temps.alloc(len)?;
    let y = temps.alloc(len)?;
    let z = temps.alloc(len)?;
    for h in [x, y, z] {
        temps.keep(h);
    }
    Ok(EcPoint { curve, x, y, z })
}

pub fn ecpoint_destroy(arena: &mut Arena, p: &EcPoint) -> CxResult<()> {
    arena.destroy(p.x)?;
    arena.destroy(p.y)?;
    arena.destroy(p.z)
}

pub fn ecpoint_init(arena: &mut Arena, p: &EcPoint, x: &[u8], y: &[u8]) -> CxResult<()> {
    let len = domain(p.curve).length;
    if x.len() > len || y.len() > len {
        return Err(CxError::InvalidParameterSize);
    }
    arena.init(p.x, x)?;
    arena.init(p.y, y)?;
    arena.store(p.z, BigUint::one())
}

pub fn ecpoint_init_bn(arena: &mut Arena, p: &EcPoint, x: Handle, y: Handle) -> CxResult<()> {
    set_affine(arena, p, x, y)
}

/// Exports the affine coordinates. The point at infinity is written as `(0, 1)` and reported
/// with `InfinitePoint`.
///
/// Destinations shorter than the curve byte length fail with `InvalidParameterSize`; nothing
/// is truncated.
pub fn ecpoint_export(
    arena: &Arena,
    p: &EcPoint,
    x_out: &mut [u8],
    y_out: &mut [u8],
) -> CxResult<()> {
    let len = domain(p.curve).length;
    if x_out.len() < len || y_out.len() < len {
        return Err(CxError::InvalidParameterSize);
    }
    match state(arena, p)? {
        PointState::Affine => {
            arena.export(p.x, x_out)?;
            arena.export(p.y, y_out)
        }
        PointState::Infinity => {
            x_out.fill(0);
            y_out.fill(0);
            if let Some(last) = y_out.last_mut() {
                *last = 1;
            }
            Err(CxError::InfinitePoint)
        }
    }
}

pub fn ecpoint_export_bn(arena: &mut Arena, p: &EcPoint, x: Handle, y: Handle) -> CxResult<()> {
    match state(arena, p)? {
        PointState::Affine => {
            arena.copy(x, p.x)?;
            arena.copy(y, p.y)
        }
        PointState::Infinity => {
            arena.store(x, BigUint::zero())?;
            arena.store(y, BigUint::one())?;
            Err(CxError::InfinitePoint)
        }
    }
}

pub fn ecpoint_is_at_infinity(arena: &Arena, p: &EcPoint) -> CxResult<bool> {
    Ok(arena.value(p.x)?.is_zero() && arena.value(p.y)?.is_one() && arena.value(p.z)?.is_zero())
}

/// Writes the kept coordinate (`y` on Edwards curves, `x` otherwise) into `out` and returns the
/// parity of the dropped one.
pub fn ecpoint_compress(arena: &Arena, p: &EcPoint, out: &mut [u8]) -> CxResult<u32> {
    let dom = domain(p.curve);
    if out.len() < dom.length {
        return Err(CxError::InvalidParameterSize);
    }
    if state(arena, p)? == PointState::Infinity {
        return Err(CxError::InvalidPoint);
    }
    let (kept, dropped) = match Curve::resolve(p.curve) {
        Curve::TwistedEdwards(_) => (p.y, p.x),
        Curve::Weierstrass(_) | Curve::Montgomery(_) => (p.x, p.y),
    };
    arena.export(kept, out)?;
    Ok(arena.value(dropped)?.bit(0) as u32)
}

/// Rebuilds a point from its kept coordinate and the parity of the other one
pub fn ecpoint_decompress(
    arena: &mut Arena,
    p: &EcPoint,
    compressed: &[u8],
    sign: u32,
) -> CxResult<()> {
    let curve = Curve::resolve(p.curve);
    let dom = curve.domain();
    if compressed.len() > dom.length {
        return Err(CxError::InvalidParameterSize);
    }
    if from_be(compressed) >= dom.p {
        return Err(CxError::InvalidPoint);
    }

    let mut temps = Temps::new(arena);
    let f = Field::load(&mut temps, dom)?;
    let known = temps.alloc_init(f.len, compressed)?;
    let square = f.reg(&mut temps)?;
    let root = f.reg(&mut temps)?;

    match curve {
        Curve::Weierstrass(_) | Curve::Montgomery(_) => {
            let chord = Chord { form: form_of(&curve), f: &f, s: f.regs(&mut temps)? };
            chord.y_squared(&mut temps, square, known)?;
        }
        Curve::TwistedEdwards(_) => {
            let ed = Edwards { f: &f, s: f.regs(&mut temps)? };
            ed.x_squared(&mut temps, square, known)?;
        }
    }

    if f.is_zero(&temps, square)? {
        // Zero has no odd root
        if sign & 1 == 1 {
            return Err(CxError::InvalidParameter);
        }
    } else {
        temps.mod_sqrt(root, square, f.p, sign & 1).map_err(|e| match e {
            CxError::NoResidue => CxError::InvalidPoint,
            e => e,
        })?;
    }

    match curve {
        Curve::TwistedEdwards(_) => set_affine(&mut temps, p, root, known),
        Curve::Weierstrass(_) | Curve::Montgomery(_) => set_affine(&mut temps, p, known, root),
    }
}

/// Negates the family-appropriate coordinate
pub fn ecpoint_neg(arena: &mut Arena, p: &EcPoint) -> CxResult<()> {
    let curve = Curve::resolve(p.curve);
    if state(arena, p)? == PointState::Infinity {
        return Ok(());
    }
    let coord = match curve {
        Curve::TwistedEdwards(_) => p.x,
        Curve::Weierstrass(_) | Curve::Montgomery(_) => p.y,
    };
    let modulus = &curve.domain().p;
    let v = arena.value(coord)? % modulus;
    let neg = if v.is_zero() { v } else { modulus - v };
    arena.store(coord, neg)
}

/// `r = p + q`; all three points must be on the same curve
pub fn ecpoint_add(arena: &mut Arena, r: &EcPoint, p: &EcPoint, q: &EcPoint) -> CxResult<()> {
    if p.curve != q.curve || r.curve != p.curve {
        debug!("ecpoint_add() curve mismatch {:?} {:?} {:?}", r.curve, p.curve, q.curve);
        return Err(CxError::InvalidPoint);
    }
    let p_state = state(arena, p)?;
    let q_state = state(arena, q)?;
    let curve = Curve::resolve(p.curve);
    let dom = curve.domain();

    let mut temps = Temps::new(arena);
    let f = Field::load(&mut temps, dom)?;
    match curve {
        Curve::TwistedEdwards(_) => {
            let ed = Edwards { f: &f, s: f.regs(&mut temps)? };
            let a = load_ext(&mut temps, &f, p, p_state)?;
            let b = load_ext(&mut temps, &f, q, q_state)?;
            ed.load_t(&mut temps, &a)?;
            ed.load_t(&mut temps, &b)?;
            ed.add(&mut temps, &a, &a, &b)?;
            store_edwards(&mut temps, r, &a)
        }
        Curve::Weierstrass(_) | Curve::Montgomery(_) => {
            let chord = Chord { form: form_of(&curve), f: &f, s: f.regs(&mut temps)? };
            let mut acc = load_reg(&mut temps, &f, p, p_state)?;
            let other = load_reg(&mut temps, &f, q, q_state)?;
            chord.add(&mut temps, &mut acc, &other)?;
            store_reg(&mut temps, r, &acc)
        }
    }
}

/// `p = k * p` for a big-endian scalar
pub fn ecpoint_scalarmul(arena: &mut Arena, p: &EcPoint, k: &[u8]) -> CxResult<()> {
    scalarmul(arena, p, &from_be(k))
}

pub fn ecpoint_scalarmul_bn(arena: &mut Arena, p: &EcPoint, k: Handle) -> CxResult<()> {
    let k = arena.value(k)?.clone();
    scalarmul(arena, p, &k)
}

/// `r = k p + s q`, computed as two scalar multiplications and one addition
pub fn ecpoint_double_scalarmul(
    arena: &mut Arena,
    r: &EcPoint,
    p: &EcPoint,
    q: &EcPoint,
    k: &[u8],
    s: &[u8],
) -> CxResult<()> {
    double_scalarmul(arena, r, p, q, &from_be(k), &from_be(s))
}

pub fn ecpoint_double_scalarmul_bn(
    arena: &mut Arena,
    r: &EcPoint,
    p: &EcPoint,
    q: &EcPoint,
    k: Handle,
    s: Handle,
) -> CxResult<()> {
    let k = arena.value(k)?.clone();
    let s = arena.value(s)?.clone();
    double_scalarmul(arena, r, p, q, &k, &s)
}

/// Equality of the normalized points
pub fn ecpoint_cmp(arena: &Arena, p: &EcPoint, q: &EcPoint) -> CxResult<bool> {
    if p.curve != q.curve {
        return Ok(false);
    }
    let modulus = &domain(p.curve).p;
    match (state(arena, p)?, state(arena, q)?) {
        (PointState::Infinity, PointState::Infinity) => Ok(true),
        (PointState::Affine, PointState::Affine) => Ok(arena.value(p.x)? % modulus
            == arena.value(q.x)? % modulus
            && arena.value(p.y)? % modulus == arena.value(q.y)? % modulus),
        _ => Ok(false),
    }
}

/// Curve-equation membership. The point at infinity belongs to every curve.
pub fn ecpoint_is_on_curve(arena: &mut Arena, p: &EcPoint) -> CxResult<bool> {
    if state(arena, p)? == PointState::Infinity {
        return Ok(true);
    }
    let curve = Curve::resolve(p.curve);
    let dom = curve.domain();
    if arena.value(p.x)? >= &dom.p || arena.value(p.y)? >= &dom.p {
        return Ok(false);
    }

    let mut temps = Temps::new(arena);
    let f = Field::load(&mut temps, dom)?;
    match curve {
        Curve::TwistedEdwards(_) => {
            let ed = Edwards { f: &f, s: f.regs(&mut temps)? };
            ed.contains(&mut temps, p.x, p.y)
        }
        Curve::Weierstrass(_) | Curve::Montgomery(_) => {
            let chord = Chord { form: form_of(&curve), f: &f, s: f.regs(&mut temps)? };
            chord.contains(&mut temps, p.x, p.y)
        }
    }
}

fn form_of(curve: &Curve) -> Form {
    match curve {
        Curve::Montgomery(_) => Form::Montgomery,
        _ => Form::Weierstrass,
    }
}

fn scalarmul(arena: &mut Arena, p: &EcPoint, k: &BigUint) -> CxResult<()> {
    let p_state = state(arena, p)?;
    let curve = Curve::resolve(p.curve);
    let dom = curve.domain();

    if k.is_zero() || p_state == PointState::Infinity {
        return set_infinity(arena, p);
    }

    let mut temps = Temps::new(arena);
    let f = Field::load(&mut temps, dom)?;
    match curve {
        Curve::TwistedEdwards(_) => {
            let ed = Edwards { f: &f, s: f.regs(&mut temps)? };
            let r0 = load_ext(&mut temps, &f, p, p_state)?;
            let [x, y, t] = f.regs(&mut temps)?;
            let ladder = [r0, ExtReg { x, y, t }];
            ed.ladder(&mut temps, &ladder, k)?;
            store_edwards(&mut temps, p, &ladder[0])
        }
        Curve::Weierstrass(_) | Curve::Montgomery(_) => {
            let chord = Chord { form: form_of(&curve), f: &f, s: f.regs(&mut temps)? };
            let base = load_reg(&mut temps, &f, p, p_state)?;
            let [x, y] = f.regs(&mut temps)?;
            let mut acc = Reg { x, y, inf: true };
            chord.scalar_mul(&mut temps, &mut acc, &base, k)?;
            store_reg(&mut temps, p, &acc)
        }
    }
}

fn double_scalarmul(
    arena: &mut Arena,
    r: &EcPoint,
    p: &EcPoint,
    q: &EcPoint,
    k: &BigUint,
    s: &BigUint,
) -> CxResult<()> {
    if p.curve != q.curve || r.curve != p.curve {
        return Err(CxError::InvalidPoint);
    }
    let mut temps = Temps::new(arena);
    let len = domain(p.curve).length as u32;
    // s q goes to a temporary first, so `r` may alias either input
    let sq = temp_point(&mut temps, q.curve, len)?;
    copy_point(&mut temps, &sq, q)?;
    scalarmul(&mut temps, &sq, s)?;

    copy_point(&mut temps, r, p)?;
    scalarmul(&mut temps, r, k)?;
    ecpoint_add(&mut temps, r, r, &sq)
}

fn temp_point(temps: &mut Temps, curve: CurveId, len: u32) -> CxResult<EcPoint> {
    Ok(EcPoint { curve, x: temps.alloc(len)?, y: temps.alloc(len)?, z: temps.alloc(len)? })
}

fn copy_point(arena: &mut Arena, dst: &EcPoint, src: &EcPoint) -> CxResult<()> {
    arena.copy(dst.x, src.x)?;
    arena.copy(dst.y, src.y)?;
    arena.copy(dst.z, src.z)
}

/// Copies a point into fresh registers, reduced modulo `p`
fn load_reg(temps: &mut Temps, f: &Field, p: &EcPoint, st: PointState) -> CxResult<Reg> {
    let [x, y] = f.regs(temps)?;
    let inf = st == PointState::Infinity;
    if !inf {
        f.reduce(temps, x, p.x)?;
        f.reduce(temps, y, p.y)?;
    }
    Ok(Reg { x, y, inf })
}

/// Edwards counterpart of [`load_reg`]; the point at infinity loads as the identity `(0, 1)`
fn load_ext(temps: &mut Temps, f: &Field, p: &EcPoint, st: PointState) -> CxResult<ExtReg> {
    let [x, y, t] = f.regs(temps)?;
    if st == PointState::Infinity {
        temps.copy(y, f.one)?;
    } else {
        f.reduce(temps, x, p.x)?;
        f.reduce(temps, y, p.y)?;
    }
    Ok(ExtReg { x, y, t })
}

fn store_reg(arena: &mut Arena, p: &EcPoint, reg: &Reg) -> CxResult<()> {
    if reg.inf {
        set_infinity(arena, p)
    } else {
        set_affine(arena, p, reg.x, reg.y)
    }
}

/// The Edwards identity `(0, 1)` is stored in the infinity encoding
fn store_edwards(arena: &mut Arena, p: &EcPoint, reg: &ExtReg) -> CxResult<()> {
    if arena.value(reg.x)?.is_zero() && arena.value(reg.y)?.is_one() {
        set_infinity(arena, p)
    } else {
        set_affine(arena, p, reg.x, reg.y)
    }
}

/// Loads the generator of `curve` into an allocated point
pub(crate) fn load_generator(arena: &mut Arena, p: &EcPoint, dom: &CurveDomain) -> CxResult<()> {
    ecpoint_init(
        arena,
        p,
        &to_be_fixed(&dom.gx, dom.length),
        &to_be_fixed(&dom.gy, dom.length),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use cx_common::decode_hex;

    struct Double {
        curve: CurveId,
        x: &'static str,
        y: &'static str,
    }

    const DOUBLES: [Double; 7] = [
        Double {
            curve: CurveId::Secp256k1,
            x: "c6047f9441ed7d6d3045406e95c07cd85c778e4b8cef3ca7abac09b95c709ee5",
            y: "1ae168fea63dc339a3c58419466ceaeef7f632653266d0e1236431a950cfe52a",
        },
        Double {
            curve: CurveId::Secp256r1,
            x: "7cf27b188d034f7e8a52380304b51ac3c08969e277f21b35a60b48fc47669978",
            y: "07775510db8ed040293d9ac69f7430dbba7dade63ce982299e04b79d227873d1",
        },
        Double {
            curve: CurveId::Secp384r1,
            x: "08d999057ba3d2d969260045c55b97f089025959a6f434d651d207d19fb96e9e4fe0e86ebe0e64f85b96a9c75295df61",
            y: "8e80f1fa5b1b3cedb7bfe8dffd6dba74b275d875bc6cc43e904e505f256ab4255ffd43e94d39e22d61501e700a940e80",
        },
        Double {
            curve: CurveId::BrainpoolP256r1,
            x: "743cf1b8b5cd4f2eb55f8aa369593ac436ef044166699e37d51a14c2ce13ea0e",
            y: "36ed163337deba9c946fe0bb776529da38df059f69249406892ada097eeb7cd4",
        },
        Double {
            curve: CurveId::Bls12_381G1,
            x: "0572cbea904d67468808c8eb50a9450c9721db309128012543902d0ac358a62ae28f75bb8f1c7c42c39a8c5529bf0f4e",
            y: "166a9d8cabc673a322fda673779d8e3822ba3ecb8670e461f73bb9021d5fd76a4c56d9d4cd16bd1bba86881979749d28",
        },
        Double {
            curve: CurveId::Ed25519,
            x: "36ab384c9f5a046c3d043b7d1833e7ac080d8e4515d7a45f83c5a14e2843ce0e",
            y: "2260cdf3092329c21da25ee8c9a21f5697390f51643851560e5f46ae6af8a3c9",
        },
        Double {
            curve: CurveId::Curve25519,
            x: "20d342d51873f1b7d9750c687d1571148f3f5ced1e350b5c5cae469cdd684efb",
            y: "13b57e011700e8ae050a00945d2ba2f377659eb28d8d391ebcd70465c72df563",
        },
    ];

    fn locked() -> Arena {
        let mut arena = Arena::default();
        arena.lock(32, 0).unwrap();
        arena
    }

    fn generator(arena: &mut Arena, curve: CurveId) -> EcPoint {
        let p = ecpoint_alloc(arena, curve).unwrap();
        load_generator(arena, &p, domain(curve)).unwrap();
        p
    }

    fn export(arena: &Arena, p: &EcPoint) -> (Vec<u8>, Vec<u8>) {
        let len = domain(p.curve).length;
        let (mut x, mut y) = (vec![0u8; len], vec![0u8; len]);
        ecpoint_export(arena, p, &mut x, &mut y).unwrap();
        (x, y)
    }

    #[test]
    fn test_doubling_known_answers() {
        for v in DOUBLES.iter() {
            let mut arena = locked();
            let expected = (decode_hex(v.x), decode_hex(v.y));

            let g = generator(&mut arena, v.curve);
            let r = ecpoint_alloc(&mut arena, v.curve).unwrap();
            ecpoint_add(&mut arena, &r, &g, &g).unwrap();
            assert_eq!(export(&arena, &r), expected, "{:?} add", v.curve);

            ecpoint_scalarmul(&mut arena, &g, &[2]).unwrap();
            assert_eq!(export(&arena, &g), expected, "{:?} scalarmul", v.curve);
            assert!(ecpoint_is_on_curve(&mut arena, &g).unwrap());
        }
    }

    #[test]
    fn test_order_gives_infinity() {
        for curve in [CurveId::Secp256k1, CurveId::Ed25519, CurveId::Ed448, CurveId::Curve448] {
            let mut arena = locked();
            let dom = domain(curve);
            let g = generator(&mut arena, curve);
            ecpoint_scalarmul(&mut arena, &g, &to_be_fixed(&dom.n, dom.length)).unwrap();
            assert!(ecpoint_is_at_infinity(&arena, &g).unwrap(), "{:?}", curve);

            let (mut x, mut y) = (vec![0xAAu8; dom.length], vec![0xAAu8; dom.length]);
            assert_eq!(ecpoint_export(&arena, &g, &mut x, &mut y), Err(CxError::InfinitePoint));
            assert!(x.iter().all(|b| *b == 0));
            assert_eq!(y[dom.length - 1], 1);
        }
    }

    #[test]
    fn test_negation_and_infinity() {
        for curve in CurveId::ALL {
            let mut arena = locked();
            let g = generator(&mut arena, curve);
            let minus_g = generator(&mut arena, curve);
            ecpoint_neg(&mut arena, &minus_g).unwrap();
            assert!(ecpoint_is_on_curve(&mut arena, &minus_g).unwrap());

            let r = ecpoint_alloc(&mut arena, curve).unwrap();
            ecpoint_add(&mut arena, &r, &g, &minus_g).unwrap();
            assert!(ecpoint_is_at_infinity(&arena, &r).unwrap(), "{:?}", curve);
            assert!(ecpoint_is_on_curve(&mut arena, &r).unwrap());

            // Infinity is the neutral element
            ecpoint_add(&mut arena, &r, &r, &g).unwrap();
            assert!(ecpoint_cmp(&arena, &r, &g).unwrap());
        }
    }

    #[test]
    fn test_export_rejects_short_destination() {
        for curve in CurveId::ALL {
            let mut arena = locked();
            let g = generator(&mut arena, curve);
            let len = domain(curve).length;
            let (mut x, mut y) = (vec![0xAAu8; len - 1], vec![0xAAu8; len]);
            assert_eq!(ecpoint_export(&arena, &g, &mut x, &mut y), Err(CxError::InvalidParameterSize));
            assert_eq!(ecpoint_export(&arena, &g, &mut y, &mut x), Err(CxError::InvalidParameterSize));
            assert!(x.iter().chain(y.iter()).all(|&b| b == 0xAA));
        }
    }

    #[test]
    fn test_compress_round_trip() {
        for curve in CurveId::ALL {
            let mut arena = locked();
            let len = domain(curve).length;
            let p = generator(&mut arena, curve);
            ecpoint_scalarmul(&mut arena, &p, &[0x01, 0x23, 0x45]).unwrap();

            let mut packed = vec![0u8; len];
            let sign = ecpoint_compress(&arena, &p, &mut packed).unwrap();

            let q = ecpoint_alloc(&mut arena, curve).unwrap();
            ecpoint_decompress(&mut arena, &q, &packed, sign).unwrap();
            assert!(ecpoint_cmp(&arena, &p, &q).unwrap(), "{:?}", curve);

            // The other sign gives the opposite point
            ecpoint_decompress(&mut arena, &q, &packed, sign ^ 1).unwrap();
            ecpoint_neg(&mut arena, &q).unwrap();
            assert!(ecpoint_cmp(&arena, &p, &q).unwrap(), "{:?}", curve);
        }
    }

    #[test]
    fn test_decompress_rejects_bad_input() {
        let mut arena = locked();
        let p = ecpoint_alloc(&mut arena, CurveId::Secp256r1).unwrap();
        let field = domain(CurveId::Secp256r1).parameter_bytes(crate::CurveParam::Field);
        assert_eq!(ecpoint_decompress(&mut arena, &p, &field, 0), Err(CxError::InvalidPoint));
        // x = 1 gives a non-residue on P-256
        assert_eq!(ecpoint_decompress(&mut arena, &p, &[1], 0), Err(CxError::InvalidPoint));
        ecpoint_decompress(&mut arena, &p, &[5], 1).unwrap();
        assert!(ecpoint_is_on_curve(&mut arena, &p).unwrap());
        assert_eq!(
            ecpoint_decompress(&mut arena, &p, &[0u8; 33], 0),
            Err(CxError::InvalidParameterSize)
        );

        let inf = ecpoint_alloc(&mut arena, CurveId::Secp256r1).unwrap();
        ecpoint_scalarmul(&mut arena, &inf, &[]).unwrap();
        let mut out = [0u8; 32];
        assert_eq!(ecpoint_compress(&arena, &inf, &mut out), Err(CxError::InvalidPoint));
    }

    #[test]
    fn test_double_scalarmul() {
        for curve in [CurveId::Secp256k1, CurveId::Ed25519, CurveId::Secp384r1] {
            let mut arena = locked();
            let g = generator(&mut arena, curve);
            let q = generator(&mut arena, curve);
            ecpoint_scalarmul(&mut arena, &q, &[7]).unwrap();

            // 5 G + 3 (7 G) = 26 G
            let r = ecpoint_alloc(&mut arena, curve).unwrap();
            ecpoint_double_scalarmul(&mut arena, &r, &g, &q, &[5], &[3]).unwrap();
            let expected = generator(&mut arena, curve);
            ecpoint_scalarmul(&mut arena, &expected, &[26]).unwrap();
            assert!(ecpoint_cmp(&arena, &r, &expected).unwrap(), "{:?}", curve);

            // Output aliasing an input
            ecpoint_double_scalarmul(&mut arena, &q, &g, &q, &[5], &[3]).unwrap();
            assert!(ecpoint_cmp(&arena, &q, &expected).unwrap(), "{:?}", curve);
        }
    }

    #[test]
    fn test_bn_variants() {
        let mut arena = locked();
        let g = generator(&mut arena, CurveId::Secp256k1);
        let k = arena.alloc_init(32, &[2]).unwrap();
        ecpoint_scalarmul_bn(&mut arena, &g, k).unwrap();

        let (x, y) = (arena.alloc(32).unwrap(), arena.alloc(32).unwrap());
        ecpoint_export_bn(&mut arena, &g, x, y).unwrap();
        let mut out = [0u8; 32];
        arena.export(x, &mut out).unwrap();
        assert_eq!(out.to_vec(), decode_hex(DOUBLES[0].x));

        let p = ecpoint_alloc(&mut arena, CurveId::Secp256k1).unwrap();
        ecpoint_init_bn(&mut arena, &p, x, y).unwrap();
        assert!(ecpoint_cmp(&arena, &p, &g).unwrap());
    }

    #[test]
    fn test_temporaries_are_released() {
        let mut arena = locked();
        let g = generator(&mut arena, CurveId::Ed448);
        let before = (arena.live_handles(), arena.total_bytes());
        ecpoint_scalarmul(&mut arena, &g, &[0xFF; 8]).unwrap();
        assert_eq!((arena.live_handles(), arena.total_bytes()), before);

        // Stale coordinates fail without leaking
        let stale = ecpoint_alloc(&mut arena, CurveId::Ed448).unwrap();
        ecpoint_destroy(&mut arena, &stale).unwrap();
        assert_eq!(ecpoint_add(&mut arena, &g, &g, &stale), Err(CxError::InvalidParameter));
        assert_eq!((arena.live_handles(), arena.total_bytes()), before);
    }

    #[test]
    fn test_curve_checks() {
        let mut arena = locked();
        let a = generator(&mut arena, CurveId::Secp256k1);
        let b = generator(&mut arena, CurveId::Secp256r1);
        assert_eq!(ecpoint_add(&mut arena, &a, &a, &b), Err(CxError::InvalidPoint));
        assert!(!ecpoint_cmp(&arena, &a, &b).unwrap());

        ecpoint_init(&mut arena, &a, &[1], &[1]).unwrap();
        assert!(!ecpoint_is_on_curve(&mut arena, &a).unwrap());
        assert_eq!(
            ecpoint_init(&mut arena, &a, &[1u8; 33], &[1]),
            Err(CxError::InvalidParameterSize)
        );

        arena.store(a.z, BigUint::from(2u32)).unwrap();
        let (mut x, mut y) = ([0u8; 32], [0u8; 32]);
        assert_eq!(ecpoint_export(&arena, &a, &mut x, &mut y), Err(CxError::InternalError));
    }
}
