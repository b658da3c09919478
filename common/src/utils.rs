use std::fs::OpenOptions;

use anyhow::{Context, Result};
use tracing_subscriber::{filter::FilterFn, fmt, prelude::*, EnvFilter};

use crate::LogConfig;

#[macro_export]
macro_rules! info_file {
    ($($arg:tt)*) => {
        tracing::info!(target: "screen_and_file", $($arg)*);
    };
}

#[macro_export]
macro_rules! warn_file {
    ($($arg:tt)*) => {
        tracing::warn!(target: "screen_and_file", $($arg)*);
    };
}

/// Installs the global subscriber: stdout always, plus the optional log file which only receives
/// events logged through the `*_file!` macros. Fails if a subscriber is already installed.
pub fn init_tracing(cfg: &LogConfig) -> Result<()> {
    let directive = cfg
        .level
        .parse()
        .with_context(|| format!("Invalid log level directive '{}'", cfg.level))?;
    let filter = EnvFilter::from_default_env().add_directive(directive);

    let stdout_layer =
        fmt::layer().with_writer(std::io::stdout).with_ansi(cfg.ansi).with_target(false);

    let file_layer = match &cfg.file {
        Some(path) => {
            let file = OpenOptions::new()
                .append(true)
                .create(true)
                .open(path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;
            Some(
                fmt::layer()
                    .with_writer(file)
                    .with_ansi(false) // no color in file
                    .with_target(false)
                    .with_filter(FilterFn::new(|meta| meta.target() == "screen_and_file")),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stdout_layer)
        .with(file_layer)
        .try_init()
        .context("A tracing subscriber is already installed")?;
    Ok(())
}

/// Decodes a hex string, ignoring whitespace. Intended for constant tables and test vectors;
/// panics on malformed input.
pub fn decode_hex(s: &str) -> Vec<u8> {
    let digits: Vec<u8> = s.bytes().filter(|b| !b.is_ascii_whitespace()).collect();
    assert!(digits.len() % 2 == 0, "odd-length hex string");
    digits
        .chunks(2)
        .map(|pair| {
            let hi = hex_digit(pair[0]);
            let lo = hex_digit(pair[1]);
            (hi << 4) | lo
        })
        .collect()
}

fn hex_digit(c: u8) -> u8 {
    match c {
        b'0'..=b'9' => c - b'0',
        b'a'..=b'f' => c - b'a' + 10,
        b'A'..=b'F' => c - b'A' + 10,
        _ => panic!("invalid hex digit {:?}", c as char),
    }
}
