//! Utility functions for CLI operations.

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};

use airmask_core::MaskCatalog;
use airmask_core::classify::round_aqi;

use crate::config::Config;

/// Parse an AQI argument.
///
/// Integers are used as-is; decimals are rounded. Clamping to 0-500 happens
/// at classification.
pub fn parse_aqi_arg(raw: &str) -> airmask_core::Result<i64> {
    let raw = raw.trim();
    if let Ok(aqi) = raw.parse::<i64>() {
        return Ok(aqi);
    }
    let value: f64 = raw
        .parse()
        .map_err(|_| airmask_core::Error::invalid_input(format!("'{}' is not a number", raw)))?;
    round_aqi(value)
}

/// Load the mask catalog named in config, or the built-in one.
pub fn load_catalog(config: &Config) -> Result<MaskCatalog> {
    match &config.catalog {
        Some(path) => MaskCatalog::load(path)
            .with_context(|| format!("Failed to load mask catalog: {}", path.display())),
        None => Ok(MaskCatalog::builtin()),
    }
}

/// Write output to file or stdout.
pub fn write_output(output: Option<&PathBuf>, content: &str) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write to {}", path.display()))?;
        }
        None => {
            print!("{}", content);
            io::stdout().flush()?;
        }
    }
    Ok(())
}
