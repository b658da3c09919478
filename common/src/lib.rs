//! Shared plumbing of the crypto-library emulator: the error taxonomy and its numeric code
//! space, configuration, tracing setup and the keyed-hash helpers used by key derivation.

mod config;
mod errors;
mod hmac;
mod utils;

pub use config::*;
pub use errors::*;
pub use hmac::*;
pub use utils::*;
