//! Hierarchical key derivation: BIP32 on secp256k1 and SLIP-10 on secp256r1 and Ed25519.

use cx_common::{hmac, CxError, CxResult, Sha512Hasher};
use cx_mpi::codec::{from_be, to_be_fixed};
use cx_mpi::Arena;
use num_traits::Zero;
use tracing::debug;

use crate::ecdsa::ecdsa_public_key;
use crate::{domain, CurveId};

/// Hardened bit of a path element
pub const HARDENED: u32 = 0x8000_0000;

/// Derived private key and chain code
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub private_key: [u8; 32],
    pub chain_code: [u8; 32],
}

impl Node {
    fn from_hmac(i: &[u8]) -> Node {
        let mut node = Node { private_key: [0u8; 32], chain_code: [0u8; 32] };
        node.private_key.copy_from_slice(&i[..32]);
        node.chain_code.copy_from_slice(&i[32..64]);
        node
    }
}

fn seed_key(curve: CurveId) -> CxResult<&'static [u8]> {
    match curve {
        CurveId::Secp256k1 => Ok(b"Bitcoin seed"),
        CurveId::Secp256r1 => Ok(b"Nist256p1 seed"),
        CurveId::Ed25519 => Ok(b"ed25519 seed"),
        _ => {
            debug!("derive_node_bip32: unsupported curve {:?}", curve);
            Err(CxError::InvalidCurve)
        }
    }
}

/// Derives the node at `path` from `seed`
pub fn derive_node_bip32(
    arena: &mut Arena,
    curve: CurveId,
    path: &[u32],
    seed: &[u8],
) -> CxResult<Node> {
    let key = seed_key(curve)?;
    if curve == CurveId::Ed25519 {
        let mut node = Node::from_hmac(&hmac::<Sha512Hasher>(key, &[seed]));
        for &index in path {
            if index & HARDENED == 0 {
                return Err(CxError::InvalidParameter);
            }
            let i = hmac::<Sha512Hasher>(
                &node.chain_code,
                &[&[0x00], &node.private_key, &index.to_be_bytes()],
            );
            node = Node::from_hmac(&i);
        }
        return Ok(node);
    }

    let n = &domain(curve).n;
    let mut i = hmac::<Sha512Hasher>(key, &[seed]);
    // An out-of-range master key is retried on the previous output
    loop {
        let il = from_be(&i[..32]);
        if !il.is_zero() && &il < n {
            break;
        }
        i = hmac::<Sha512Hasher>(key, &[&i]);
    }
    let mut node = Node::from_hmac(&i);

    for &index in path {
        let index_be = index.to_be_bytes();
        let mut i = if index & HARDENED != 0 {
            hmac::<Sha512Hasher>(&node.chain_code, &[&[0x00], &node.private_key, &index_be])
        } else {
            let public = compressed_public_key(arena, curve, &node.private_key)?;
            hmac::<Sha512Hasher>(&node.chain_code, &[&public, &index_be])
        };

        let k = from_be(&node.private_key);
        loop {
            let il = from_be(&i[..32]);
            let child = (&il + &k) % n;
            if &il < n && !child.is_zero() {
                node.private_key.copy_from_slice(&to_be_fixed(&child, 32));
                node.chain_code.copy_from_slice(&i[32..64]);
                break;
            }
            i = hmac::<Sha512Hasher>(&node.chain_code, &[&[0x01], &i[32..64], &index_be]);
        }
    }
    Ok(node)
}

/// SEC1 compressed encoding `02|03 || x` of the public key
fn compressed_public_key(arena: &mut Arena, curve: CurveId, key: &[u8]) -> CxResult<[u8; 33]> {
    let (mut x, mut y) = ([0u8; 32], [0u8; 32]);
    ecdsa_public_key(arena, curve, key, &mut x, &mut y)?;
    let mut out = [0u8; 33];
    out[0] = 0x02 | (y[31] & 1);
    out[1..].copy_from_slice(&x);
    Ok(out)
}
