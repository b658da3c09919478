use cx_common::{CxError, CxResult};
use cx_ecc::{derive_node_bip32, CurveId};

use crate::context::{status, CxContext};

/// Derives the node at `path` from `seed`. The chain code is only written when requested.
pub fn sys_os_derive_node_bip32(
    ctx: &mut CxContext,
    curve: u32,
    path: &[u32],
    seed: &[u8],
    private_key: &mut [u8],
    chain_code: Option<&mut [u8]>,
) -> u32 {
    let result = (|| -> CxResult<()> {
        let node = derive_node_bip32(&mut ctx.arena, CurveId::from_raw(curve)?, path, seed)?;
        let key = private_key.get_mut(..32).ok_or(CxError::InvalidParameterSize)?;
        key.copy_from_slice(&node.private_key);
        if let Some(chain_code) = chain_code {
            let cc = chain_code.get_mut(..32).ok_or(CxError::InvalidParameterSize)?;
            cc.copy_from_slice(&node.chain_code);
        }
        Ok(())
    })();
    status("sys_os_derive_node_bip32", result)
}
