//! `sys_cx_mont_*`: Montgomery contexts over raw handles.

use cx_common::CxResult;
use cx_mpi::{Handle, MontCtx};

use crate::context::{handle, status, CxContext};

/// Raw Montgomery context: the modulus handle and the handle of `R^2 mod n`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(C)]
pub struct SyscallMontCtx {
    pub n: u32,
    pub h: u32,
}

impl Default for SyscallMontCtx {
    fn default() -> Self {
        Self { n: Handle::INVALID_RAW, h: Handle::INVALID_RAW }
    }
}

impl SyscallMontCtx {
    fn resolve(&self) -> CxResult<MontCtx> {
        Ok(MontCtx { n: handle(self.n)?, h: handle(self.h)? })
    }
}

pub fn sys_cx_mont_alloc(ctx: &mut CxContext, mont: &mut SyscallMontCtx, nbytes: u32) -> u32 {
    *mont = SyscallMontCtx::default();
    let result = ctx.arena.mont_alloc(nbytes).map(|m| {
        *mont = SyscallMontCtx { n: m.n.to_raw(), h: m.h.to_raw() };
    });
    status("sys_cx_mont_alloc", result)
}

/// Loads the odd modulus `n` into the context and precomputes `h`
pub fn sys_cx_mont_init(ctx: &mut CxContext, mont: &SyscallMontCtx, n: u32) -> u32 {
    let result = (|| ctx.arena.mont_init(&mont.resolve()?, handle(n)?))();
    status("sys_cx_mont_init", result)
}

/// Loads `n` together with a caller-computed `h`
pub fn sys_cx_mont_init2(ctx: &mut CxContext, mont: &SyscallMontCtx, n: u32, h: u32) -> u32 {
    let result = (|| ctx.arena.mont_init2(&mont.resolve()?, handle(n)?, handle(h)?))();
    status("sys_cx_mont_init2", result)
}

pub fn sys_cx_mont_to_montgomery(ctx: &mut CxContext, x: u32, z: u32, mont: &SyscallMontCtx) -> u32 {
    let result = (|| ctx.arena.to_montgomery(handle(x)?, handle(z)?, &mont.resolve()?))();
    status("sys_cx_mont_to_montgomery", result)
}

pub fn sys_cx_mont_from_montgomery(
    ctx: &mut CxContext,
    z: u32,
    x: u32,
    mont: &SyscallMontCtx,
) -> u32 {
    let result = (|| ctx.arena.from_montgomery(handle(z)?, handle(x)?, &mont.resolve()?))();
    status("sys_cx_mont_from_montgomery", result)
}

pub fn sys_cx_mont_mul(ctx: &mut CxContext, r: u32, a: u32, b: u32, mont: &SyscallMontCtx) -> u32 {
    let result = (|| ctx.arena.mont_mul(handle(r)?, handle(a)?, handle(b)?, &mont.resolve()?))();
    status("sys_cx_mont_mul", result)
}

pub fn sys_cx_mont_pow(ctx: &mut CxContext, r: u32, a: u32, e: &[u8], mont: &SyscallMontCtx) -> u32 {
    let result = (|| ctx.arena.mont_pow(handle(r)?, handle(a)?, e, &mont.resolve()?))();
    status("sys_cx_mont_pow", result)
}

pub fn sys_cx_mont_pow_bn(ctx: &mut CxContext, r: u32, a: u32, e: u32, mont: &SyscallMontCtx) -> u32 {
    let result = (|| ctx.arena.mont_pow_bn(handle(r)?, handle(a)?, handle(e)?, &mont.resolve()?))();
    status("sys_cx_mont_pow_bn", result)
}

pub fn sys_cx_mont_invert_nprime(ctx: &mut CxContext, r: u32, a: u32, mont: &SyscallMontCtx) -> u32 {
    let result = (|| ctx.arena.mont_invert_nprime(handle(r)?, handle(a)?, &mont.resolve()?))();
    status("sys_cx_mont_invert_nprime", result)
}

/// Frees both handles of the context and resets it
pub fn sys_cx_mont_destroy(ctx: &mut CxContext, mont: &mut SyscallMontCtx) -> u32 {
    let result = (|| ctx.arena.mont_destroy(mont.resolve()?))();
    if result.is_ok() {
        *mont = SyscallMontCtx::default();
    }
    status("sys_cx_mont_destroy", result)
}
