//! ECDSA and Ed25519 entry points.
//!
//! These run their own arena session, so they fail with `CX_NOT_UNLOCKED` while the calling
//! application holds the lock.

use cx_common::CxResult;
use cx_ecc::{
    ecdsa_public_key, ecdsa_sign, ecdsa_verify, eddsa_public_key, eddsa_sign, eddsa_verify,
    CurveId,
};

use crate::context::{status, CxContext};

pub fn sys_cx_ecdsa_public_key(
    ctx: &mut CxContext,
    curve: u32,
    private_key: &[u8],
    x: &mut [u8],
    y: &mut [u8],
) -> u32 {
    let result = (|| -> CxResult<()> {
        ecdsa_public_key(&mut ctx.arena, CurveId::from_raw(curve)?, private_key, x, y)
    })();
    status("sys_cx_ecdsa_public_key", result)
}

/// Writes `r || s` into `sig` and the parity of the nonce point into `parity`
pub fn sys_cx_ecdsa_sign(
    ctx: &mut CxContext,
    curve: u32,
    private_key: &[u8],
    hash: &[u8],
    sig: &mut [u8],
    parity: &mut u32,
) -> u32 {
    let result = (|| -> CxResult<()> {
        *parity = ecdsa_sign(&mut ctx.arena, CurveId::from_raw(curve)?, private_key, hash, sig)?;
        Ok(())
    })();
    status("sys_cx_ecdsa_sign", result)
}

pub fn sys_cx_ecdsa_verify(
    ctx: &mut CxContext,
    curve: u32,
    x: &[u8],
    y: &[u8],
    hash: &[u8],
    sig: &[u8],
    verified: &mut bool,
) -> u32 {
    let result = (|| -> CxResult<()> {
        let curve = CurveId::from_raw(curve)?;
        *verified = ecdsa_verify(&mut ctx.arena, curve, x, y, hash, sig)?;
        Ok(())
    })();
    status("sys_cx_ecdsa_verify", result)
}

pub fn sys_cx_eddsa_public_key(ctx: &mut CxContext, private_key: &[u8], out: &mut [u8]) -> u32 {
    status("sys_cx_eddsa_public_key", eddsa_public_key(&mut ctx.arena, private_key, out))
}

pub fn sys_cx_eddsa_sign(
    ctx: &mut CxContext,
    private_key: &[u8],
    msg: &[u8],
    sig: &mut [u8],
) -> u32 {
    status("sys_cx_eddsa_sign", eddsa_sign(&mut ctx.arena, private_key, msg, sig))
}

pub fn sys_cx_eddsa_verify(
    ctx: &mut CxContext,
    public_key: &[u8],
    msg: &[u8],
    sig: &[u8],
    verified: &mut bool,
) -> u32 {
    let result =
        eddsa_verify(&mut ctx.arena, public_key, msg, sig).map(|ok| *verified = ok);
    status("sys_cx_eddsa_verify", result)
}
