//! Elliptic curves of the crypto coprocessor: the curve domain table, points over arena handles
//! and the protocols built on them.

mod affine;
mod bip32;
mod curves;
mod ecdomain;
mod ecdsa;
mod eddsa;
mod edwards;
mod field;
mod point;
mod xdh;

pub use bip32::*;
pub use curves::*;
pub use ecdomain::*;
pub use ecdsa::*;
pub use eddsa::*;
pub use point::*;
pub use xdh::*;
