//! Twisted Edwards arithmetic `a x^2 + y^2 = 1 + d x^2 y^2` over affine coordinates extended with
//! `T = x y`, which the addition formula reuses in place of a projective `Z`.
//!
//! The identity is `(0, 1)`; both named Edwards curves have a non-square `d`, so the formulas
//! below are complete.

use cx_common::{CxError, CxResult};
use cx_mpi::{Arena, Handle};
use num_bigint::BigUint;

use crate::field::Field;

/// Extended affine point `(x, y, T = x y)`
#[derive(Debug, Clone, Copy)]
pub(crate) struct ExtReg {
    pub x: Handle,
    pub y: Handle,
    pub t: Handle,
}

/// Working registers. `f.b` holds `d`.
pub(crate) struct Edwards<'f> {
    pub f: &'f Field,
    pub s: [Handle; 5],
}

impl Edwards<'_> {
    /// Sets `T = x y`
    pub fn load_t(&self, arena: &mut Arena, p: &ExtReg) -> CxResult<()> {
        self.f.mul(arena, p.t, p.x, p.y)
    }

    /// `r = p + q` with
    /// `x3 = (x1 y2 + y1 x2) / (1 + d T1 T2)`, `y3 = (y1 y2 - a x1 x2) / (1 - d T1 T2)`.
    /// `r` may alias `p` or `q`.
    pub fn add(&self, arena: &mut Arena, r: &ExtReg, p: &ExtReg, q: &ExtReg) -> CxResult<()> {
        let f = self.f;
        let [dtt, xn, yn, t, u] = self.s;

        f.mul(arena, dtt, p.t, q.t)?;
        f.mul(arena, dtt, dtt, f.b)?;

        f.mul(arena, xn, p.x, q.y)?;
        f.mul(arena, t, p.y, q.x)?;
        f.add(arena, xn, xn, t)?;

        f.mul(arena, yn, p.y, q.y)?;
        f.mul(arena, t, p.x, q.x)?;
        f.mul(arena, t, t, f.a)?;
        f.sub(arena, yn, yn, t)?;

        f.add(arena, u, f.one, dtt)?;
        self.invert(arena, u)?;
        f.mul(arena, xn, xn, u)?;

        f.sub(arena, u, f.one, dtt)?;
        self.invert(arena, u)?;
        f.mul(arena, yn, yn, u)?;

        arena.copy(r.x, xn)?;
        arena.copy(r.y, yn)?;
        self.load_t(arena, r)
    }

    /// `p = 2 p` with `x3 = 2 x y / (a x^2 + y^2)`, `y3 = (y^2 - a x^2) / (2 - a x^2 - y^2)`
    pub fn double(&self, arena: &mut Arena, p: &ExtReg) -> CxResult<()> {
        let f = self.f;
        let [ax2, y2, xn, sum, u] = self.s;

        f.sqr(arena, ax2, p.x)?;
        f.mul(arena, ax2, ax2, f.a)?;
        f.sqr(arena, y2, p.y)?;

        f.add(arena, xn, p.t, p.t)?;
        f.add(arena, sum, ax2, y2)?;
        f.reduce(arena, u, sum)?;
        self.invert(arena, u)?;
        f.mul(arena, xn, xn, u)?;

        f.sub(arena, y2, y2, ax2)?;
        f.add(arena, u, f.one, f.one)?;
        f.sub(arena, u, u, sum)?;
        self.invert(arena, u)?;
        f.mul(arena, y2, y2, u)?;

        arena.copy(p.x, xn)?;
        arena.copy(p.y, y2)?;
        self.load_t(arena, p)
    }

    /// `r[0] = k * P` for `P = r[0]` with a Montgomery ladder, `k > 0`.
    ///
    /// The ladder starts from `(P, 2P)` which accounts for the top bit of `k`; for every lower
    /// bit `b` it sets `r[1-b] = r[0] + r[1]` then `r[b] = 2 r[b]`.
    pub fn ladder(&self, arena: &mut Arena, r: &[ExtReg; 2], k: &BigUint) -> CxResult<()> {
        let top = k.bits().checked_sub(1).ok_or(CxError::InvalidParameter)?;
        self.load_t(arena, &r[0])?;
        arena.copy(r[1].x, r[0].x)?;
        arena.copy(r[1].y, r[0].y)?;
        arena.copy(r[1].t, r[0].t)?;
        self.double(arena, &r[1])?;

        for i in (0..top).rev() {
            let b = k.bit(i) as usize;
            self.add(arena, &r[1 - b], &r[0], &r[1])?;
            self.double(arena, &r[b])?;
        }
        Ok(())
    }

    /// Whether `(x, y)` satisfies the curve equation
    pub fn contains(&self, arena: &mut Arena, x: Handle, y: Handle) -> CxResult<bool> {
        let f = self.f;
        let [x2, y2, lhs, rhs, _] = self.s;
        f.sqr(arena, x2, x)?;
        f.sqr(arena, y2, y)?;
        f.mul(arena, lhs, x2, f.a)?;
        f.add(arena, lhs, lhs, y2)?;
        f.mul(arena, rhs, x2, y2)?;
        f.mul(arena, rhs, rhs, f.b)?;
        f.add(arena, rhs, rhs, f.one)?;
        f.eq(arena, lhs, rhs)
    }

    /// `out = (y^2 - 1) / (d y^2 - a)`, the value of `x^2` at `y`
    pub fn x_squared(&self, arena: &mut Arena, out: Handle, y: Handle) -> CxResult<()> {
        let f = self.f;
        let [y2, den, _, _, _] = self.s;
        f.sqr(arena, y2, y)?;
        f.mul(arena, den, y2, f.b)?;
        f.sub(arena, den, den, f.a)?;
        f.sub(arena, out, y2, f.one)?;
        self.invert(arena, den)?;
        f.mul(arena, out, out, den)
    }

    /// In-place inverse; a vanishing denominator means the inputs were not on the curve
    fn invert(&self, arena: &mut Arena, x: Handle) -> CxResult<()> {
        self.f.inv(arena, x, x).map_err(|e| match e {
            CxError::NotInvertible => CxError::InvalidPoint,
            e => e,
        })
    }
}
