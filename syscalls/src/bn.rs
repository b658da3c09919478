//! `sys_cx_bn_*`: session control and arithmetic over raw MPI handles.

use cx_common::{CxResult, CX_CARRY, CX_OK};
use cx_mpi::Handle;

use crate::context::{handle, status, CxContext};

/// Opens a session with the given word size
pub fn sys_cx_bn_lock(ctx: &mut CxContext, word_size: u32, flags: u32) -> u32 {
    status("sys_cx_bn_lock", ctx.arena.lock(word_size, flags))
}

/// Closes the session and frees every handle. Returns `CX_OK` whether or not a session was open.
pub fn sys_cx_bn_unlock(ctx: &mut CxContext) -> u32 {
    ctx.arena.unlock();
    CX_OK
}

pub fn sys_cx_bn_is_locked(ctx: &CxContext) -> bool {
    ctx.arena.is_locked()
}

/// Allocates `nbytes` bytes. On failure `x` is set to the invalid sentinel.
pub fn sys_cx_bn_alloc(ctx: &mut CxContext, x: &mut u32, nbytes: u32) -> u32 {
    *x = Handle::INVALID_RAW;
    status(
        "sys_cx_bn_alloc",
        ctx.arena.alloc(nbytes).map(|h| {
            *x = h.to_raw();
        }),
    )
}

pub fn sys_cx_bn_alloc_init(ctx: &mut CxContext, x: &mut u32, nbytes: u32, value: &[u8]) -> u32 {
    *x = Handle::INVALID_RAW;
    status(
        "sys_cx_bn_alloc_init",
        ctx.arena.alloc_init(nbytes, value).map(|h| {
            *x = h.to_raw();
        }),
    )
}

/// Frees `x` and resets it to the invalid sentinel
pub fn sys_cx_bn_destroy(ctx: &mut CxContext, x: &mut u32) -> u32 {
    let result = handle(*x).and_then(|h| ctx.arena.destroy(h));
    if result.is_ok() {
        *x = Handle::INVALID_RAW;
    }
    status("sys_cx_bn_destroy", result)
}

pub fn sys_cx_bn_nbytes(ctx: &CxContext, x: u32, nbytes: &mut u32) -> u32 {
    let result = handle(x).and_then(|h| ctx.arena.nbytes(h)).map(|n| *nbytes = n);
    status("sys_cx_bn_nbytes", result)
}

pub fn sys_cx_bn_init(ctx: &mut CxContext, x: u32, value: &[u8]) -> u32 {
    status("sys_cx_bn_init", handle(x).and_then(|h| ctx.arena.init(h, value)))
}

pub fn sys_cx_bn_rand(ctx: &mut CxContext, x: u32) -> u32 {
    status("sys_cx_bn_rand", handle(x).and_then(|h| ctx.arena.rand(h)))
}

/// `a = b`
pub fn sys_cx_bn_copy(ctx: &mut CxContext, a: u32, b: u32) -> u32 {
    let result = handle(a).and_then(|a| ctx.arena.copy(a, handle(b)?));
    status("sys_cx_bn_copy", result)
}

pub fn sys_cx_bn_set_u32(ctx: &mut CxContext, x: u32, n: u32) -> u32 {
    status("sys_cx_bn_set_u32", handle(x).and_then(|h| ctx.arena.set_u32(h, n)))
}

pub fn sys_cx_bn_get_u32(ctx: &CxContext, x: u32, n: &mut u32) -> u32 {
    let result = handle(x).and_then(|h| ctx.arena.get_u32(h)).map(|v| *n = v);
    status("sys_cx_bn_get_u32", result)
}

/// Exports `x` big-endian into `bytes`, left-padded or truncated from the left
pub fn sys_cx_bn_export(ctx: &CxContext, x: u32, bytes: &mut [u8]) -> u32 {
    status("sys_cx_bn_export", handle(x).and_then(|h| ctx.arena.export(h, bytes)))
}

pub fn sys_cx_bn_cmp(ctx: &CxContext, a: u32, b: u32, diff: &mut i32) -> u32 {
    let result = (|| -> CxResult<()> {
        *diff = ctx.arena.cmp(handle(a)?, handle(b)?)?;
        Ok(())
    })();
    status("sys_cx_bn_cmp", result)
}

pub fn sys_cx_bn_cmp_u32(ctx: &CxContext, a: u32, b: u32, diff: &mut i32) -> u32 {
    let result = handle(a).and_then(|a| ctx.arena.cmp_u32(a, b)).map(|d| *diff = d);
    status("sys_cx_bn_cmp_u32", result)
}

pub fn sys_cx_bn_is_odd(ctx: &CxContext, n: u32, odd: &mut bool) -> u32 {
    let result = handle(n).and_then(|h| ctx.arena.is_odd(h)).map(|v| *odd = v);
    status("sys_cx_bn_is_odd", result)
}

pub fn sys_cx_bn_xor(ctx: &mut CxContext, r: u32, a: u32, b: u32) -> u32 {
    let result = (|| ctx.arena.xor(handle(r)?, handle(a)?, handle(b)?))();
    status("sys_cx_bn_xor", result)
}

pub fn sys_cx_bn_or(ctx: &mut CxContext, r: u32, a: u32, b: u32) -> u32 {
    let result = (|| ctx.arena.or(handle(r)?, handle(a)?, handle(b)?))();
    status("sys_cx_bn_or", result)
}

pub fn sys_cx_bn_and(ctx: &mut CxContext, r: u32, a: u32, b: u32) -> u32 {
    let result = (|| ctx.arena.and(handle(r)?, handle(a)?, handle(b)?))();
    status("sys_cx_bn_and", result)
}

pub fn sys_cx_bn_tst_bit(ctx: &CxContext, x: u32, pos: u32, set: &mut bool) -> u32 {
    let result = handle(x).and_then(|h| ctx.arena.tst_bit(h, pos)).map(|v| *set = v);
    status("sys_cx_bn_tst_bit", result)
}

pub fn sys_cx_bn_set_bit(ctx: &mut CxContext, x: u32, pos: u32) -> u32 {
    status("sys_cx_bn_set_bit", handle(x).and_then(|h| ctx.arena.set_bit(h, pos)))
}

pub fn sys_cx_bn_clr_bit(ctx: &mut CxContext, x: u32, pos: u32) -> u32 {
    status("sys_cx_bn_clr_bit", handle(x).and_then(|h| ctx.arena.clr_bit(h, pos)))
}

pub fn sys_cx_bn_cnt_bits(ctx: &CxContext, n: u32, nbits: &mut u32) -> u32 {
    let result = handle(n).and_then(|h| ctx.arena.cnt_bits(h)).map(|v| *nbits = v);
    status("sys_cx_bn_cnt_bits", result)
}

pub fn sys_cx_bn_shr(ctx: &mut CxContext, x: u32, n: u32) -> u32 {
    status("sys_cx_bn_shr", handle(x).and_then(|h| ctx.arena.shr(h, n)))
}

pub fn sys_cx_bn_shl(ctx: &mut CxContext, x: u32, n: u32) -> u32 {
    status("sys_cx_bn_shl", handle(x).and_then(|h| ctx.arena.shl(h, n)))
}

/// `r = a + b`; returns `CX_CARRY` when the sum overflowed, with `r` holding the low bytes
pub fn sys_cx_bn_add(ctx: &mut CxContext, r: u32, a: u32, b: u32) -> u32 {
    let result = (|| ctx.arena.add(handle(r)?, handle(a)?, handle(b)?))();
    carry_status("sys_cx_bn_add", result)
}

/// `r = a - b`; returns `CX_CARRY` on borrow, with `r` holding the wrapped difference
pub fn sys_cx_bn_sub(ctx: &mut CxContext, r: u32, a: u32, b: u32) -> u32 {
    let result = (|| ctx.arena.sub(handle(r)?, handle(a)?, handle(b)?))();
    carry_status("sys_cx_bn_sub", result)
}

fn carry_status(name: &str, result: CxResult<bool>) -> u32 {
    match result {
        Ok(true) => CX_CARRY,
        Ok(false) => CX_OK,
        Err(e) => status(name, Err(e)),
    }
}

pub fn sys_cx_bn_mul(ctx: &mut CxContext, r: u32, a: u32, b: u32) -> u32 {
    let result = (|| ctx.arena.mul(handle(r)?, handle(a)?, handle(b)?))();
    status("sys_cx_bn_mul", result)
}

/// `r = d mod n`
pub fn sys_cx_bn_reduce(ctx: &mut CxContext, r: u32, d: u32, n: u32) -> u32 {
    let result = (|| ctx.arena.reduce(handle(r)?, handle(d)?, handle(n)?))();
    status("sys_cx_bn_reduce", result)
}

pub fn sys_cx_bn_mod_add(ctx: &mut CxContext, r: u32, a: u32, b: u32, n: u32) -> u32 {
    let result = (|| ctx.arena.mod_add(handle(r)?, handle(a)?, handle(b)?, handle(n)?))();
    status("sys_cx_bn_mod_add", result)
}

pub fn sys_cx_bn_mod_sub(ctx: &mut CxContext, r: u32, a: u32, b: u32, n: u32) -> u32 {
    let result = (|| ctx.arena.mod_sub(handle(r)?, handle(a)?, handle(b)?, handle(n)?))();
    status("sys_cx_bn_mod_sub", result)
}

pub fn sys_cx_bn_mod_mul(ctx: &mut CxContext, r: u32, a: u32, b: u32, n: u32) -> u32 {
    let result = (|| ctx.arena.mod_mul(handle(r)?, handle(a)?, handle(b)?, handle(n)?))();
    status("sys_cx_bn_mod_mul", result)
}

pub fn sys_cx_bn_mod_pow(ctx: &mut CxContext, r: u32, a: u32, e: &[u8], n: u32) -> u32 {
    let result = (|| ctx.arena.mod_pow(handle(r)?, handle(a)?, e, handle(n)?))();
    status("sys_cx_bn_mod_pow", result)
}

pub fn sys_cx_bn_mod_pow_bn(ctx: &mut CxContext, r: u32, a: u32, e: u32, n: u32) -> u32 {
    let result = (|| ctx.arena.mod_pow_bn(handle(r)?, handle(a)?, handle(e)?, handle(n)?))();
    status("sys_cx_bn_mod_pow_bn", result)
}

/// `r = a^(n-2) mod n`, the inverse when `n` is prime
pub fn sys_cx_bn_mod_invert_nprime(ctx: &mut CxContext, r: u32, a: u32, n: u32) -> u32 {
    let result = (|| ctx.arena.mod_invert_nprime(handle(r)?, handle(a)?, handle(n)?))();
    status("sys_cx_bn_mod_invert_nprime", result)
}

pub fn sys_cx_bn_mod_u32_invert(ctx: &mut CxContext, r: u32, a: u32, n: u32) -> u32 {
    let result = (|| ctx.arena.mod_u32_invert(handle(r)?, a, handle(n)?))();
    status("sys_cx_bn_mod_u32_invert", result)
}

/// Square root of `a` modulo the prime `n` whose low bit equals `sign`
pub fn sys_cx_bn_mod_sqrt(ctx: &mut CxContext, r: u32, a: u32, n: u32, sign: u32) -> u32 {
    let result = (|| ctx.arena.mod_sqrt(handle(r)?, handle(a)?, handle(n)?, sign))();
    status("sys_cx_bn_mod_sqrt", result)
}

pub fn sys_cx_bn_is_prime(ctx: &CxContext, n: u32, prime: &mut bool) -> u32 {
    let result = handle(n).and_then(|h| ctx.arena.is_prime(h)).map(|v| *prime = v);
    status("sys_cx_bn_is_prime", result)
}

pub fn sys_cx_bn_next_prime(ctx: &mut CxContext, n: u32) -> u32 {
    status("sys_cx_bn_next_prime", handle(n).and_then(|h| ctx.arena.next_prime(h)))
}

/// Uniform random `r` in `[0, n)`
pub fn sys_cx_bn_rng(ctx: &mut CxContext, r: u32, n: u32) -> u32 {
    let result = (|| ctx.arena.rng(handle(r)?, handle(n)?))();
    status("sys_cx_bn_rng", result)
}

/// Product in GF(2^m) modulo the polynomial `n`, with `h` the precomputed constant of `n`
pub fn sys_cx_bn_gf2_n_mul(ctx: &mut CxContext, r: u32, a: u32, b: u32, n: u32, h: u32) -> u32 {
    let result =
        (|| ctx.arena.gf2_n_mul(handle(r)?, handle(a)?, handle(b)?, handle(n)?, handle(h)?))();
    status("sys_cx_bn_gf2_n_mul", result)
}
