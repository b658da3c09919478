//! `sys_cx_ecdomain_*`: curve domain queries by raw curve id.

use cx_common::CxResult;
use cx_ecc::{
    ecdomain_generator, ecdomain_generator_bn, ecdomain_parameter, ecdomain_parameter_bn,
    ecdomain_parameters_length, ecdomain_size, CurveId, CurveParam,
};

use crate::context::{handle, status, CxContext};
use crate::ecpoint::SyscallEcPoint;

/// Size of the curve in bits
pub fn sys_cx_ecdomain_size(curve: u32, length: &mut u32) -> u32 {
    let result = CurveId::from_raw(curve).map(|c| *length = ecdomain_size(c));
    status("sys_cx_ecdomain_size", result)
}

/// Byte length of one domain parameter
pub fn sys_cx_ecdomain_parameters_length(curve: u32, length: &mut u32) -> u32 {
    let result = CurveId::from_raw(curve).map(|c| *length = ecdomain_parameters_length(c) as u32);
    status("sys_cx_ecdomain_parameters_length", result)
}

pub fn sys_cx_ecdomain_parameter(curve: u32, id: u32, p: &mut [u8]) -> u32 {
    let result = (|| -> CxResult<()> {
        ecdomain_parameter(CurveId::from_raw(curve)?, CurveParam::from_raw(id)?, p)
    })();
    status("sys_cx_ecdomain_parameter", result)
}

pub fn sys_cx_ecdomain_parameter_bn(ctx: &mut CxContext, curve: u32, id: u32, p: u32) -> u32 {
    let result = (|| -> CxResult<()> {
        let curve = CurveId::from_raw(curve)?;
        ecdomain_parameter_bn(&mut ctx.arena, curve, CurveParam::from_raw(id)?, handle(p)?)
    })();
    status("sys_cx_ecdomain_parameter_bn", result)
}

pub fn sys_cx_ecdomain_generator(curve: u32, gx: &mut [u8], gy: &mut [u8]) -> u32 {
    let result = CurveId::from_raw(curve).and_then(|c| ecdomain_generator(c, gx, gy));
    status("sys_cx_ecdomain_generator", result)
}

pub fn sys_cx_ecdomain_generator_bn(ctx: &mut CxContext, curve: u32, p: &SyscallEcPoint) -> u32 {
    let result = (|| -> CxResult<()> {
        ecdomain_generator_bn(&mut ctx.arena, CurveId::from_raw(curve)?, &p.resolve()?)
    })();
    status("sys_cx_ecdomain_generator_bn", result)
}
