//! Chord-and-tangent group law in affine coordinates, shared by short Weierstrass curves
//! `y^2 = x^3 + a x + b` and Montgomery curves `b y^2 = x^3 + a x^2 + x`.

use cx_common::CxResult;
use cx_mpi::{Arena, Handle};
use num_bigint::BigUint;

use crate::field::Field;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Form {
    Weierstrass,
    Montgomery,
}

/// Affine point held in arena registers; the point at infinity has no coordinates
#[derive(Debug, Clone, Copy)]
pub(crate) struct Reg {
    pub x: Handle,
    pub y: Handle,
    pub inf: bool,
}

/// Working registers of the group law
pub(crate) struct Chord<'f> {
    pub form: Form,
    pub f: &'f Field,
    pub s: [Handle; 3],
}

impl Chord<'_> {
    /// `r = r + q`, `q` distinct from `r`
    pub fn add(&self, arena: &mut Arena, r: &mut Reg, q: &Reg) -> CxResult<()> {
        if q.inf {
            return Ok(());
        }
        if r.inf {
            arena.copy(r.x, q.x)?;
            arena.copy(r.y, q.y)?;
            r.inf = false;
            return Ok(());
        }
        let f = self.f;
        let [lambda, x3, y3] = self.s;

        if f.eq(arena, r.x, q.x)? {
            // Either the same point or opposite points
            if f.eq(arena, r.y, q.y)? {
                return self.double(arena, r);
            }
            r.inf = true;
            return Ok(());
        }

        // λ = (y2 - y1) / (x2 - x1)
        f.sub(arena, lambda, q.y, r.y)?;
        f.sub(arena, x3, q.x, r.x)?;
        f.inv(arena, x3, x3)?;
        f.mul(arena, lambda, lambda, x3)?;

        self.finish(arena, r, q.x)
    }

    /// `r = 2 r`
    pub fn double(&self, arena: &mut Arena, r: &mut Reg) -> CxResult<()> {
        if r.inf {
            return Ok(());
        }
        let f = self.f;
        if f.is_zero(arena, r.y)? {
            // Points of order two
            r.inf = true;
            return Ok(());
        }
        let [lambda, t, u] = self.s;

        // Numerator: 3 x^2 + a (Weierstrass) or 3 x^2 + 2 a x + 1 (Montgomery)
        f.sqr(arena, lambda, r.x)?;
        f.add(arena, t, lambda, lambda)?;
        f.add(arena, lambda, lambda, t)?;
        match self.form {
            Form::Weierstrass => f.add(arena, lambda, lambda, f.a)?,
            Form::Montgomery => {
                f.mul(arena, t, f.a, r.x)?;
                f.add(arena, t, t, t)?;
                f.add(arena, lambda, lambda, t)?;
                f.add(arena, lambda, lambda, f.one)?;
            }
        }

        // Denominator: 2 y, or 2 b y
        match self.form {
            Form::Weierstrass => f.add(arena, u, r.y, r.y)?,
            Form::Montgomery => {
                f.mul(arena, u, f.b, r.y)?;
                f.add(arena, u, u, u)?;
            }
        }
        f.inv(arena, u, u)?;
        f.mul(arena, lambda, lambda, u)?;

        self.finish(arena, r, r.x)
    }

    /// Given λ in `s[0]`, sets `r = (x3, y3)` with `x3 = λ^2 - x1 - x2` (times `b`, minus `a`
    /// on Montgomery curves) and `y3 = λ (x1 - x3) - y1`
    fn finish(&self, arena: &mut Arena, r: &mut Reg, x2: Handle) -> CxResult<()> {
        let f = self.f;
        let [lambda, x3, y3] = self.s;

        f.sqr(arena, x3, lambda)?;
        if self.form == Form::Montgomery {
            f.mul(arena, x3, x3, f.b)?;
            f.sub(arena, x3, x3, f.a)?;
        }
        f.sub(arena, x3, x3, r.x)?;
        f.sub(arena, x3, x3, x2)?;

        f.sub(arena, y3, r.x, x3)?;
        f.mul(arena, y3, y3, lambda)?;
        f.sub(arena, y3, y3, r.y)?;

        arena.copy(r.x, x3)?;
        arena.copy(r.y, y3)?;
        r.inf = false;
        Ok(())
    }

    /// `acc = k * base` by left-to-right double-and-add
    pub fn scalar_mul(
        &self,
        arena: &mut Arena,
        acc: &mut Reg,
        base: &Reg,
        k: &BigUint,
    ) -> CxResult<()> {
        acc.inf = true;
        for i in (0..k.bits()).rev() {
            self.double(arena, acc)?;
            if k.bit(i) {
                self.add(arena, acc, base)?;
            }
        }
        Ok(())
    }

    /// Whether `(x, y)` satisfies the curve equation
    pub fn contains(&self, arena: &mut Arena, x: Handle, y: Handle) -> CxResult<bool> {
        let f = self.f;
        let [lhs, rhs, t] = self.s;
        f.sqr(arena, lhs, y)?;
        f.sqr(arena, t, x)?;
        match self.form {
            Form::Weierstrass => {
                // x^3 + a x + b
                f.mul(arena, rhs, t, x)?;
                f.mul(arena, t, f.a, x)?;
                f.add(arena, rhs, rhs, t)?;
                f.add(arena, rhs, rhs, f.b)?;
            }
            Form::Montgomery => {
                // b y^2 = x^3 + a x^2 + x
                f.mul(arena, lhs, lhs, f.b)?;
                f.mul(arena, rhs, t, x)?;
                f.mul(arena, t, t, f.a)?;
                f.add(arena, rhs, rhs, t)?;
                f.add(arena, rhs, rhs, x)?;
            }
        }
        f.eq(arena, lhs, rhs)
    }

    /// Right-hand side of the equation solved for `y^2` at `x`, into `out`
    pub fn y_squared(&self, arena: &mut Arena, out: Handle, x: Handle) -> CxResult<()> {
        let f = self.f;
        let [t, u, _] = self.s;
        f.sqr(arena, t, x)?;
        match self.form {
            Form::Weierstrass => {
                f.mul(arena, out, t, x)?;
                f.mul(arena, u, f.a, x)?;
                f.add(arena, out, out, u)?;
                f.add(arena, out, out, f.b)
            }
            Form::Montgomery => {
                f.mul(arena, out, t, x)?;
                f.mul(arena, u, t, f.a)?;
                f.add(arena, out, out, u)?;
                f.add(arena, out, out, x)?;
                f.inv(arena, u, f.b)?;
                f.mul(arena, out, out, u)
            }
        }
    }
}
