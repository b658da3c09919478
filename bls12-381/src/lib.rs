//! BLS12-381 services of the crypto library: hashing to G2, key generation, signing and
//! signature aggregation. Group arithmetic and pairings come from arkworks; the field helpers and
//! the hash-to-curve pipeline are implemented here.

mod constants;
mod fp2;
mod hash_to_curve;
mod keygen;
mod signature;

pub use constants::{DST_AUG, DST_BASIC, DST_POP, KEYGEN_SALT};
pub use fp2::*;
pub use hash_to_curve::*;
pub use keygen::*;
pub use signature::*;
