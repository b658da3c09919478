//! Flat "cx" syscall surface.
//!
//! Every entry point takes the [`CxContext`] of the calling application, plain buffers and raw
//! handles, and returns a `u32` status: `CX_OK`, `CX_CARRY` for the fixed-width additions, or
//! one of the error codes of [`cx_common::CxError`]. Results that are not buffers are written
//! through `&mut` out-parameters, which are left untouched on failure unless stated otherwise.

mod bip32;
mod bls12381;
mod bn;
mod context;
mod ecdomain;
mod ecpoint;
mod mont;
mod signatures;

pub use bip32::*;
pub use bls12381::*;
pub use bn::*;
pub use context::*;
pub use ecdomain::*;
pub use ecpoint::*;
pub use mont::*;
pub use signatures::*;
