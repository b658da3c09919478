//! BLS key generation, either from a raw private key or through the keygen_v5 derivation
//! (HKDF-SHA-256 with the `BLS-SIG-KEYGEN-SALT-` salt).

use cx_common::{hkdf_expand, hkdf_extract, CxError, CxResult, Sha256Hasher};
use cx_mpi::codec::{biguint_from_u64_digits, from_be, to_be_fixed};
use num_traits::Zero;
use sha2::{Digest, Sha256};
use tracing::debug;

use super::constants::{DST_AUG, DST_BASIC, DST_POP, KEYGEN_SALT, R};
use super::signature::{public_key, secret_scalar, PRIVATE_KEY_SIZE, PUBLIC_KEY_SIZE};

/// Mode bit requesting keygen_v5 derivation from the secret
pub const KEYGEN_DERIVE: u8 = 0x80;
const SCHEME_MASK: u8 = 0x03;

/// keygen_v5 output length, `ceil((3 * ceil(log2(r))) / 16)`
const KEYGEN_L: usize = 48;
/// Smallest accepted input key material
const MIN_IKM_SIZE: usize = 32;

/// Signature scheme selected by the low mode bits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scheme {
    Basic,
    Augmented,
    ProofOfPossession,
}

impl Scheme {
    pub fn from_mode(mode: u8) -> CxResult<Scheme> {
        match mode & SCHEME_MASK {
            0 => Ok(Scheme::Basic),
            1 => Ok(Scheme::Augmented),
            2 => Ok(Scheme::ProofOfPossession),
            _ => Err(CxError::InvalidParameter),
        }
    }

    /// Domain separation tag of the signing hash
    pub fn dst(self) -> &'static [u8] {
        match self {
            Scheme::Basic => DST_BASIC,
            Scheme::Augmented => DST_AUG,
            Scheme::ProofOfPossession => DST_POP,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyPair {
    /// Big-endian scalar in `[1, r)`
    pub private_key: [u8; PRIVATE_KEY_SIZE],

    /// Compressed G1 point, only produced for the augmented and proof-of-possession schemes
    pub public_key: Option<[u8; PUBLIC_KEY_SIZE]>,
}

/// keygen_v5: `OKM = HKDF-Expand(HKDF-Extract(H(salt), IKM || 0), info || I2OSP(L, 2), L)`,
/// rehashing the salt until `OKM mod r` is nonzero
pub fn keygen_v5(ikm: &[u8], salt: &[u8], key_info: &[u8]) -> CxResult<[u8; PRIVATE_KEY_SIZE]> {
    if ikm.len() < MIN_IKM_SIZE {
        return Err(CxError::InvalidParameterSize);
    }
    let r = biguint_from_u64_digits(&R);
    let l_be = (KEYGEN_L as u16).to_be_bytes();
    let mut salt = if salt.is_empty() { KEYGEN_SALT.to_vec() } else { salt.to_vec() };
    loop {
        salt = Sha256::digest(&salt).to_vec();
        let prk = hkdf_extract::<Sha256Hasher>(&salt, &[ikm, &[0x00]]);
        let okm = hkdf_expand::<Sha256Hasher>(&prk, &[key_info, &l_be], KEYGEN_L)?;
        let sk = from_be(&okm) % &r;
        if !sk.is_zero() {
            let mut out = [0u8; PRIVATE_KEY_SIZE];
            out.copy_from_slice(&to_be_fixed(&sk, PRIVATE_KEY_SIZE));
            return Ok(out);
        }
    }
}

/// Produces the key pair for `mode`: derived from `secret` when [`KEYGEN_DERIVE`] is set,
/// otherwise `secret` is the private key itself
pub fn key_gen(mode: u8, secret: &[u8], salt: &[u8], key_info: &[u8]) -> CxResult<KeyPair> {
    let scheme = Scheme::from_mode(mode)?;
    let private_key = if mode & KEYGEN_DERIVE != 0 {
        keygen_v5(secret, salt, key_info)?
    } else {
        secret_scalar(secret)?;
        let mut key = [0u8; PRIVATE_KEY_SIZE];
        key.copy_from_slice(secret);
        key
    };
    debug!("bls key_gen: scheme {:?}, derived {}", scheme, mode & KEYGEN_DERIVE != 0);

    let public_key = match scheme {
        Scheme::Basic => None,
        Scheme::Augmented | Scheme::ProofOfPossession => Some(public_key(&private_key)?),
    };
    Ok(KeyPair { private_key, public_key })
}
