//! Multi-precision integers of the crypto coprocessor: the session-scoped [`Arena`] of handles
//! and the fixed-width, modular, binary-field and Montgomery operations defined on it.

mod arena;
pub mod codec;
mod gf2n;
mod modular;
mod montgomery;
mod ops;
mod prime;

pub use arena::{Arena, Handle, Temps};
pub use gf2n::{clmul, poly_reduce};
pub use modular::sqrt_mod_prime;
pub use montgomery::MontCtx;
pub use prime::{is_probable_prime, MILLER_RABIN_ROUNDS};
