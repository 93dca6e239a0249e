//! Configuration file management.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::cli::OutputFormat;

/// Configuration file structure
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Default output format
    #[serde(default)]
    pub format: Option<String>,

    /// Disable colored output
    #[serde(default)]
    pub no_color: bool,

    /// Compact JSON output
    #[serde(default)]
    pub compact: bool,

    /// Default activity for recommendations
    #[serde(default)]
    pub activity: Option<String>,

    /// Default age group for recommendations
    #[serde(default)]
    pub age_group: Option<String>,

    /// TOML mask catalog replacing the built-in one
    #[serde(default)]
    pub catalog: Option<PathBuf>,
}

impl Config {
    /// Get the config file path.
    ///
    /// `AIRMASK_CONFIG` overrides the platform location.
    pub fn path() -> PathBuf {
        if let Some(path) = std::env::var_os("AIRMASK_CONFIG").filter(|p| !p.is_empty()) {
            return PathBuf::from(path);
        }
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("airmask")
            .join("config.toml")
    }

    /// Load config from file, or return default if not found
    pub fn load() -> Self {
        let path = Self::path();
        if path.exists() {
            match fs::read_to_string(&path) {
                Ok(content) => match toml::from_str(&content) {
                    Ok(config) => return config,
                    Err(e) => {
                        eprintln!("Warning: Failed to parse config: {}", e);
                    }
                },
                Err(e) => {
                    eprintln!("Warning: Failed to read config: {}", e);
                }
            }
        }
        Self::default()
    }

    /// Save config to file
    pub fn save(&self) -> Result<()> {
        let path = Self::path();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(&path, content)
            .with_context(|| format!("Failed to write config: {}", path.display()))?;
        Ok(())
    }

    /// Default output format from config, if set and valid.
    pub fn output_format(&self) -> Option<OutputFormat> {
        match self.format.as_deref()?.to_ascii_lowercase().as_str() {
            "text" => Some(OutputFormat::Text),
            "json" => Some(OutputFormat::Json),
            "csv" => Some(OutputFormat::Csv),
            other => {
                tracing::warn!("Ignoring unknown format '{}' in config", other);
                None
            }
        }
    }
}

/// Resolve the output format: `--json` wins, then the command flag, then
/// config, then text.
pub fn resolve_format(cmd_format: Option<OutputFormat>, json: bool, config: &Config) -> OutputFormat {
    if json {
        OutputFormat::Json
    } else {
        cmd_format
            .or_else(|| config.output_format())
            .unwrap_or_default()
    }
}
