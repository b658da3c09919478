//! Error kinds reported by the crypto library and the flat numeric code space they map to.
//!
//! Callers of the syscall surface only ever see `u32` codes: `CX_OK` on success and one of the
//! `0xFFFFFFxx` sentinels below on failure. Inside the workspace every fallible operation returns
//! a [`CxResult`] and the conversion happens once, at the syscall boundary.

pub const CX_OK: u32 = 0x0000_0000;
pub const CX_CARRY: u32 = 0xFFFF_FF21;
pub const CX_EC_INFINITE_POINT: u32 = 0xFFFF_FF41;
pub const CX_NOT_LOCKED: u32 = 0xFFFF_FF83;
pub const CX_NOT_UNLOCKED: u32 = 0xFFFF_FF84;
pub const CX_INTERNAL_ERROR: u32 = 0xFFFF_FF85;
pub const CX_INVALID_PARAMETER_SIZE: u32 = 0xFFFF_FF86;
pub const CX_INVALID_PARAMETER_VALUE: u32 = 0xFFFF_FF87;
pub const CX_INVALID_PARAMETER: u32 = 0xFFFF_FF88;
pub const CX_NOT_INVERTIBLE: u32 = 0xFFFF_FF89;
pub const CX_OVERFLOW: u32 = 0xFFFF_FF8A;
pub const CX_MEMORY_FULL: u32 = 0xFFFF_FF8B;
pub const CX_NO_RESIDUE: u32 = 0xFFFF_FF8C;
pub const CX_EC_INVALID_POINT: u32 = 0xFFFF_FFA2;
pub const CX_EC_INVALID_CURVE: u32 = 0xFFFF_FFA3;

/// Failure kinds of the crypto library.
///
/// A carry out of `add`/`sub` is not listed here: it is a successful computation and is reported
/// through the `Ok` value of those operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
pub enum CxError {
    /// A session-only operation was invoked without an open session
    #[error("no MPI session is locked")]
    NotLocked,

    /// A session was requested while another one is still open
    #[error("an MPI session is already locked")]
    NotUnlocked,

    /// The slot table is full or the byte budget would be exceeded
    #[error("MPI arena memory full")]
    MemoryFull,

    #[error("invalid parameter")]
    InvalidParameter,

    #[error("invalid parameter size")]
    InvalidParameterSize,

    #[error("invalid parameter value")]
    InvalidParameterValue,

    #[error("value is not invertible")]
    NotInvertible,

    #[error("result overflows its storage")]
    Overflow,

    #[error("value is not a quadratic residue")]
    NoResidue,

    #[error("unsupported or unknown curve")]
    InvalidCurve,

    #[error("invalid curve point")]
    InvalidPoint,

    #[error("point at infinity")]
    InfinitePoint,

    #[error("internal error")]
    InternalError,
}

pub type CxResult<T> = Result<T, CxError>;

impl CxError {
    /// Numeric code of this error on the flat syscall surface
    pub const fn code(self) -> u32 {
        match self {
            CxError::NotLocked => CX_NOT_LOCKED,
            CxError::NotUnlocked => CX_NOT_UNLOCKED,
            CxError::MemoryFull => CX_MEMORY_FULL,
            CxError::InvalidParameter => CX_INVALID_PARAMETER,
            CxError::InvalidParameterSize => CX_INVALID_PARAMETER_SIZE,
            CxError::InvalidParameterValue => CX_INVALID_PARAMETER_VALUE,
            CxError::NotInvertible => CX_NOT_INVERTIBLE,
            CxError::Overflow => CX_OVERFLOW,
            CxError::NoResidue => CX_NO_RESIDUE,
            CxError::InvalidCurve => CX_EC_INVALID_CURVE,
            CxError::InvalidPoint => CX_EC_INVALID_POINT,
            CxError::InfinitePoint => CX_EC_INFINITE_POINT,
            CxError::InternalError => CX_INTERNAL_ERROR,
        }
    }

    /// Inverse of [`CxError::code`]. `CX_OK` and `CX_CARRY` are not errors and map to `None`.
    pub const fn from_code(code: u32) -> Option<CxError> {
        match code {
            CX_NOT_LOCKED => Some(CxError::NotLocked),
            CX_NOT_UNLOCKED => Some(CxError::NotUnlocked),
            CX_MEMORY_FULL => Some(CxError::MemoryFull),
            CX_INVALID_PARAMETER => Some(CxError::InvalidParameter),
            CX_INVALID_PARAMETER_SIZE => Some(CxError::InvalidParameterSize),
            CX_INVALID_PARAMETER_VALUE => Some(CxError::InvalidParameterValue),
            CX_NOT_INVERTIBLE => Some(CxError::NotInvertible),
            CX_OVERFLOW => Some(CxError::Overflow),
            CX_NO_RESIDUE => Some(CxError::NoResidue),
            CX_EC_INVALID_CURVE => Some(CxError::InvalidCurve),
            CX_EC_INVALID_POINT => Some(CxError::InvalidPoint),
            CX_EC_INFINITE_POINT => Some(CxError::InfinitePoint),
            CX_INTERNAL_ERROR => Some(CxError::InternalError),
            _ => None,
        }
    }

    /// True for the session-discipline errors, which always denote a caller bug
    pub const fn is_session_error(self) -> bool {
        matches!(self, CxError::NotLocked | CxError::NotUnlocked)
    }
}

/// Collapses a unit result into its flat numeric code
pub fn cx_code(result: CxResult<()>) -> u32 {
    match result {
        Ok(()) => CX_OK,
        Err(e) => e.code(),
    }
}
