use cx_common::{CxError, CxResult};
use cx_mpi::codec::write_be_fixed;
use cx_mpi::{Arena, Handle};

use crate::point::{load_generator, EcPoint};
use crate::{domain, CurveId, CurveParam};

/// Size of the curve in bits
pub fn ecdomain_size(curve: CurveId) -> u32 {
    domain(curve).bit_size
}

/// Byte length of a single domain parameter
pub fn ecdomain_parameters_length(curve: CurveId) -> usize {
    domain(curve).length
}

pub fn ecdomain_parameter(curve: CurveId, param: CurveParam, out: &mut [u8]) -> CxResult<()> {
    let bytes = domain(curve).parameter_bytes(param);
    if out.len() < bytes.len() {
        return Err(CxError::InvalidParameterSize);
    }
    out.fill(0);
    let offset = out.len() - bytes.len();
    out[offset..].copy_from_slice(&bytes);
    Ok(())
}

/// Loads a scalar domain parameter into a handle
pub fn ecdomain_parameter_bn(
    arena: &mut Arena,
    curve: CurveId,
    param: CurveParam,
    h: Handle,
) -> CxResult<()> {
    if param == CurveParam::Generator {
        return Err(CxError::InvalidParameter);
    }
    let bytes = domain(curve).parameter_bytes(param);
    arena.init(h, &bytes)
}

pub fn ecdomain_generator(curve: CurveId, gx: &mut [u8], gy: &mut [u8]) -> CxResult<()> {
    let dom = domain(curve);
    if gx.len() < dom.length || gy.len() < dom.length {
        return Err(CxError::InvalidParameterSize);
    }
    write_be_fixed(&dom.gx, gx);
    write_be_fixed(&dom.gy, gy);
    Ok(())
}

/// Loads the generator into an allocated point of the same curve
pub fn ecdomain_generator_bn(arena: &mut Arena, curve: CurveId, p: &EcPoint) -> CxResult<()> {
    if p.curve != curve {
        return Err(CxError::InvalidCurve);
    }
    load_generator(arena, p, domain(curve))
}
