use std::path::Path;

use anyhow::Result;
use cx_common::{cx_code, info_file, CxConfig, CxError, CxResult};
use cx_mpi::{Arena, Handle};
use tracing::debug;

/// State of the emulated crypto library for one application: the MPI arena and the
/// configuration it was built from
#[derive(Debug)]
pub struct CxContext {
    pub(crate) arena: Arena,
    config: CxConfig,
}

impl Default for CxContext {
    fn default() -> Self {
        Self::new(CxConfig::default())
    }
}

impl CxContext {
    pub fn new(config: CxConfig) -> Self {
        Self { arena: Arena::new(config.arena.clone()), config }
    }

    /// Builds a context from an optional configuration file layered with `CXEMU__*` variables
    pub fn from_config(path: Option<&Path>) -> Result<Self> {
        let config = CxConfig::load(path)?;
        info_file!(
            "cx context: {} slots, {} bytes budget, word size >= {}",
            config.arena.max_slots, config.arena.max_bytes, config.arena.min_word_size
        );
        Ok(Self::new(config))
    }

    pub fn config(&self) -> &CxConfig {
        &self.config
    }

    pub fn arena(&self) -> &Arena {
        &self.arena
    }

    pub fn arena_mut(&mut self) -> &mut Arena {
        &mut self.arena
    }
}

/// Resolves a raw handle; the sentinel is rejected as an invalid parameter
pub(crate) fn handle(raw: u32) -> CxResult<Handle> {
    Handle::from_raw(raw).ok_or(CxError::InvalidParameter)
}

/// Converts the result of a syscall into its status code, logging failures
pub(crate) fn status(name: &str, result: CxResult<()>) -> u32 {
    if let Err(e) = result {
        debug!("{}() failed: {} (0x{:08X})", name, e, e.code());
    }
    cx_code(result)
}
