use std::path::{Path, PathBuf};

use anyhow::{ensure, Context, Result};
use serde::Deserialize;

/// Limits of the MPI arena.
///
/// The defaults reproduce the secure element: 64 live handles sharing a 2 KiB budget, storage
/// rounded to 16-byte words and at most 512 bytes per integer.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ArenaConfig {
    /// Capacity of the handle table, at most 256 so that a slot index fits a byte
    pub max_slots: usize,

    /// Byte budget shared by every live handle of a session
    pub max_bytes: u32,

    /// Minimum allocation granularity; session word sizes round up to a multiple of it
    pub min_word_size: u32,

    /// Largest single allocation, after rounding
    pub max_bn_size: u32,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self { max_slots: 64, max_bytes: 2048, min_word_size: 16, max_bn_size: 512 }
    }
}

/// Logging options consumed by [`crate::init_tracing`]
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Default filter directive, overridden by `RUST_LOG`
    pub level: String,

    /// Optional log file receiving the `screen_and_file` target
    pub file: Option<PathBuf>,

    pub ansi: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self { level: "info".to_string(), file: None, ansi: true }
    }
}

/// Top-level configuration of the emulated crypto library
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CxConfig {
    pub arena: ArenaConfig,
    pub log: LogConfig,
}

impl CxConfig {
    /// Prefix of the environment variables layered over the file, e.g. `CXEMU__ARENA__MAX_BYTES`
    pub const ENV_PREFIX: &'static str = "CXEMU";

    /// Loads the configuration from an optional file (any format the `config` crate knows by
    /// extension) with `CXEMU__*` environment variables on top.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = config::Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path));
        }
        builder = builder.add_source(
            config::Environment::with_prefix(Self::ENV_PREFIX).separator("__").try_parsing(true),
        );

        let cfg: CxConfig = builder
            .build()
            .context("Failed to read cx configuration")?
            .try_deserialize()
            .context("Failed to deserialize cx configuration")?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Parses a TOML document, without environment overrides
    pub fn from_toml_str(toml: &str) -> Result<Self> {
        let cfg: CxConfig = config::Config::builder()
            .add_source(config::File::from_str(toml, config::FileFormat::Toml))
            .build()
            .context("Failed to parse cx configuration")?
            .try_deserialize()
            .context("Failed to deserialize cx configuration")?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        let arena = &self.arena;
        ensure!(
            arena.max_slots > 0 && arena.max_slots <= 256,
            "arena.max_slots must be in 1..=256, got {}",
            arena.max_slots
        );
        ensure!(
            arena.min_word_size > 0 && arena.min_word_size.is_power_of_two(),
            "arena.min_word_size must be a power of two, got {}",
            arena.min_word_size
        );
        ensure!(
            arena.max_bytes >= arena.min_word_size,
            "arena.max_bytes ({}) is smaller than one word ({})",
            arena.max_bytes,
            arena.min_word_size
        );
        ensure!(
            arena.max_bn_size >= arena.min_word_size,
            "arena.max_bn_size ({}) is smaller than one word ({})",
            arena.max_bn_size,
            arena.min_word_size
        );
        Ok(())
    }
}
