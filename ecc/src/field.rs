use cx_common::CxResult;
use cx_mpi::codec::to_be_fixed;
use cx_mpi::{Arena, Handle, Temps};

use crate::CurveDomain;

/// Base-field constants of a curve loaded into arena registers
pub(crate) struct Field {
    pub p: Handle,
    pub a: Handle,
    pub b: Handle,
    pub one: Handle,
    pub len: u32,
}

impl Field {
    pub fn load(temps: &mut Temps, dom: &CurveDomain) -> CxResult<Field> {
        let len = dom.length as u32;
        let p = temps.alloc_init(len, &to_be_fixed(&dom.p, dom.length))?;
        let a = temps.alloc_init(len, &to_be_fixed(&dom.a, dom.length))?;
        let b = temps.alloc_init(len, &to_be_fixed(&dom.b, dom.length))?;
        let one = temps.alloc_init(len, &[1])?;
        Ok(Field { p, a, b, one, len })
    }

    /// A fresh zeroed register wide enough for a field element
    pub fn reg(&self, temps: &mut Temps) -> CxResult<Handle> {
        temps.alloc(self.len)
    }

    pub fn regs<const N: usize>(&self, temps: &mut Temps) -> CxResult<[Handle; N]> {
        let mut out = [self.p; N];
        for slot in out.iter_mut() {
            *slot = temps.alloc(self.len)?;
        }
        Ok(out)
    }

    pub fn add(&self, arena: &mut Arena, r: Handle, x: Handle, y: Handle) -> CxResult<()> {
        arena.mod_add(r, x, y, self.p)
    }

    pub fn sub(&self, arena: &mut Arena, r: Handle, x: Handle, y: Handle) -> CxResult<()> {
        arena.mod_sub(r, x, y, self.p)
    }

    pub fn mul(&self, arena: &mut Arena, r: Handle, x: Handle, y: Handle) -> CxResult<()> {
        arena.mod_mul(r, x, y, self.p)
    }

    pub fn sqr(&self, arena: &mut Arena, r: Handle, x: Handle) -> CxResult<()> {
        arena.mod_mul(r, x, x, self.p)
    }

    pub fn inv(&self, arena: &mut Arena, r: Handle, x: Handle) -> CxResult<()> {
        arena.mod_invert_nprime(r, x, self.p)
    }

    /// `r = x mod p`
    pub fn reduce(&self, arena: &mut Arena, r: Handle, x: Handle) -> CxResult<()> {
        arena.reduce(r, x, self.p)
    }

    pub fn is_zero(&self, arena: &Arena, x: Handle) -> CxResult<bool> {
        Ok(arena.value(x)?.bits() == 0)
    }

    pub fn eq(&self, arena: &Arena, x: Handle, y: Handle) -> CxResult<bool> {
        Ok(arena.value(x)? == arena.value(y)?)
    }
}
