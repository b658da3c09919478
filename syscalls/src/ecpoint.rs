//! `sys_cx_ecpoint_*`: curve points over raw handles.

use cx_common::CxResult;
use cx_ecc::{
    ecpoint_add, ecpoint_alloc, ecpoint_cmp, ecpoint_compress, ecpoint_decompress,
    ecpoint_destroy, ecpoint_double_scalarmul, ecpoint_double_scalarmul_bn, ecpoint_export,
    ecpoint_export_bn, ecpoint_init, ecpoint_init_bn, ecpoint_is_at_infinity, ecpoint_is_on_curve,
    ecpoint_neg, ecpoint_scalarmul, ecpoint_scalarmul_bn, x25519, x448, CurveId, EcPoint,
};
use cx_mpi::Handle;

use crate::context::{handle, status, CxContext};

/// Raw point: the curve id and the three coordinate handles
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(C)]
pub struct SyscallEcPoint {
    pub curve: u32,
    pub x: u32,
    pub y: u32,
    pub z: u32,
}

impl Default for SyscallEcPoint {
    fn default() -> Self {
        Self { curve: 0, x: Handle::INVALID_RAW, y: Handle::INVALID_RAW, z: Handle::INVALID_RAW }
    }
}

impl SyscallEcPoint {
    pub(crate) fn resolve(&self) -> CxResult<EcPoint> {
        Ok(EcPoint {
            curve: CurveId::from_raw(self.curve)?,
            x: handle(self.x)?,
            y: handle(self.y)?,
            z: handle(self.z)?,
        })
    }
}

impl From<EcPoint> for SyscallEcPoint {
    fn from(p: EcPoint) -> Self {
        Self { curve: p.curve.raw(), x: p.x.to_raw(), y: p.y.to_raw(), z: p.z.to_raw() }
    }
}

pub fn sys_cx_ecpoint_alloc(ctx: &mut CxContext, p: &mut SyscallEcPoint, curve: u32) -> u32 {
    *p = SyscallEcPoint::default();
    let result = CurveId::from_raw(curve)
        .and_then(|c| ecpoint_alloc(&mut ctx.arena, c))
        .map(|point| *p = point.into());
    status("sys_cx_ecpoint_alloc", result)
}

pub fn sys_cx_ecpoint_destroy(ctx: &mut CxContext, p: &mut SyscallEcPoint) -> u32 {
    let result = p.resolve().and_then(|point| ecpoint_destroy(&mut ctx.arena, &point));
    if result.is_ok() {
        *p = SyscallEcPoint::default();
    }
    status("sys_cx_ecpoint_destroy", result)
}

pub fn sys_cx_ecpoint_init(ctx: &mut CxContext, p: &SyscallEcPoint, x: &[u8], y: &[u8]) -> u32 {
    let result = p.resolve().and_then(|point| ecpoint_init(&mut ctx.arena, &point, x, y));
    status("sys_cx_ecpoint_init", result)
}

pub fn sys_cx_ecpoint_init_bn(ctx: &mut CxContext, p: &SyscallEcPoint, x: u32, y: u32) -> u32 {
    let result =
        (|| ecpoint_init_bn(&mut ctx.arena, &p.resolve()?, handle(x)?, handle(y)?))();
    status("sys_cx_ecpoint_init_bn", result)
}

/// Exports the affine coordinates. The point at infinity writes `(0, 1)` and reports
/// `CX_EC_INFINITE_POINT`.
pub fn sys_cx_ecpoint_export(
    ctx: &CxContext,
    p: &SyscallEcPoint,
    x: &mut [u8],
    y: &mut [u8],
) -> u32 {
    let result = p.resolve().and_then(|point| ecpoint_export(&ctx.arena, &point, x, y));
    status("sys_cx_ecpoint_export", result)
}

pub fn sys_cx_ecpoint_export_bn(ctx: &mut CxContext, p: &SyscallEcPoint, x: u32, y: u32) -> u32 {
    let result =
        (|| ecpoint_export_bn(&mut ctx.arena, &p.resolve()?, handle(x)?, handle(y)?))();
    status("sys_cx_ecpoint_export_bn", result)
}

pub fn sys_cx_ecpoint_compress(
    ctx: &CxContext,
    p: &SyscallEcPoint,
    xy_compressed: &mut [u8],
    sign: &mut u32,
) -> u32 {
    let result = p
        .resolve()
        .and_then(|point| ecpoint_compress(&ctx.arena, &point, xy_compressed))
        .map(|s| *sign = s);
    status("sys_cx_ecpoint_compress", result)
}

pub fn sys_cx_ecpoint_decompress(
    ctx: &mut CxContext,
    p: &SyscallEcPoint,
    xy_compressed: &[u8],
    sign: u32,
) -> u32 {
    let result = p
        .resolve()
        .and_then(|point| ecpoint_decompress(&mut ctx.arena, &point, xy_compressed, sign));
    status("sys_cx_ecpoint_decompress", result)
}

/// `r = p + q`
pub fn sys_cx_ecpoint_add(
    ctx: &mut CxContext,
    r: &SyscallEcPoint,
    p: &SyscallEcPoint,
    q: &SyscallEcPoint,
) -> u32 {
    let result = (|| ecpoint_add(&mut ctx.arena, &r.resolve()?, &p.resolve()?, &q.resolve()?))();
    status("sys_cx_ecpoint_add", result)
}

pub fn sys_cx_ecpoint_neg(ctx: &mut CxContext, p: &SyscallEcPoint) -> u32 {
    let result = p.resolve().and_then(|point| ecpoint_neg(&mut ctx.arena, &point));
    status("sys_cx_ecpoint_neg", result)
}

/// `p = k p` for a big-endian scalar
pub fn sys_cx_ecpoint_scalarmul(ctx: &mut CxContext, p: &SyscallEcPoint, k: &[u8]) -> u32 {
    let result = p.resolve().and_then(|point| ecpoint_scalarmul(&mut ctx.arena, &point, k));
    status("sys_cx_ecpoint_scalarmul", result)
}

pub fn sys_cx_ecpoint_scalarmul_bn(ctx: &mut CxContext, p: &SyscallEcPoint, k: u32) -> u32 {
    let result = (|| ecpoint_scalarmul_bn(&mut ctx.arena, &p.resolve()?, handle(k)?))();
    status("sys_cx_ecpoint_scalarmul_bn", result)
}

/// `r = k p + s q`
pub fn sys_cx_ecpoint_double_scalarmul(
    ctx: &mut CxContext,
    r: &SyscallEcPoint,
    p: &SyscallEcPoint,
    q: &SyscallEcPoint,
    k: &[u8],
    s: &[u8],
) -> u32 {
    let result = (|| {
        ecpoint_double_scalarmul(&mut ctx.arena, &r.resolve()?, &p.resolve()?, &q.resolve()?, k, s)
    })();
    status("sys_cx_ecpoint_double_scalarmul", result)
}

pub fn sys_cx_ecpoint_double_scalarmul_bn(
    ctx: &mut CxContext,
    r: &SyscallEcPoint,
    p: &SyscallEcPoint,
    q: &SyscallEcPoint,
    k: u32,
    s: u32,
) -> u32 {
    let result = (|| {
        let (r, p, q) = (r.resolve()?, p.resolve()?, q.resolve()?);
        ecpoint_double_scalarmul_bn(&mut ctx.arena, &r, &p, &q, handle(k)?, handle(s)?)
    })();
    status("sys_cx_ecpoint_double_scalarmul_bn", result)
}

pub fn sys_cx_ecpoint_cmp(
    ctx: &CxContext,
    p: &SyscallEcPoint,
    q: &SyscallEcPoint,
    is_equal: &mut bool,
) -> u32 {
    let result = (|| -> CxResult<()> {
        *is_equal = ecpoint_cmp(&ctx.arena, &p.resolve()?, &q.resolve()?)?;
        Ok(())
    })();
    status("sys_cx_ecpoint_cmp", result)
}

pub fn sys_cx_ecpoint_is_on_curve(
    ctx: &mut CxContext,
    p: &SyscallEcPoint,
    is_on_curve: &mut bool,
) -> u32 {
    let result = p
        .resolve()
        .and_then(|point| ecpoint_is_on_curve(&mut ctx.arena, &point))
        .map(|v| *is_on_curve = v);
    status("sys_cx_ecpoint_is_on_curve", result)
}

pub fn sys_cx_ecpoint_is_at_infinity(
    ctx: &CxContext,
    p: &SyscallEcPoint,
    is_at_infinity: &mut bool,
) -> u32 {
    let result = p
        .resolve()
        .and_then(|point| ecpoint_is_at_infinity(&ctx.arena, &point))
        .map(|v| *is_at_infinity = v);
    status("sys_cx_ecpoint_is_at_infinity", result)
}

/// X25519 on 32-byte little-endian scalar and u-coordinate
pub fn sys_cx_x25519(out: &mut [u8], k: &[u8], u: &[u8]) -> u32 {
    status("sys_cx_x25519", x25519(out, k, u))
}

/// X448 on 56-byte little-endian scalar and u-coordinate
pub fn sys_cx_x448(out: &mut [u8], k: &[u8], u: &[u8]) -> u32 {
    status("sys_cx_x448", x448(out, k, u))
}
