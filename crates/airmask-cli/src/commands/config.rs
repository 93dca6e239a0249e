//! Config command implementation.

use std::path::PathBuf;

use anyhow::{Context, Result, bail};

use airmask_core::MaskCatalog;

use crate::cli::{ConfigAction, ConfigKey};
use crate::config::Config;
use crate::style;

pub fn cmd_config(action: ConfigAction, no_color: bool) -> Result<()> {
    match action {
        ConfigAction::Path => {
            println!("{}", Config::path().display());
        }
        ConfigAction::Show => {
            let config = Config::load();
            let content = toml::to_string_pretty(&config).context("Failed to serialize config")?;
            if content.trim().is_empty() {
                println!("(empty configuration)");
            } else {
                print!("{}", content);
            }
        }
        ConfigAction::Get { key } => {
            let config = Config::load();
            match get_value(&config, key) {
                Some(value) => println!("{}", value),
                None => println!("(not set)"),
            }
        }
        ConfigAction::Set { key, value } => {
            let mut config = Config::load();
            set_value(&mut config, key, &value)?;
            config.save()?;
            println!(
                "{}",
                style::format_success(&format!("Set {:?} = {}", key, value), no_color)
            );
        }
        ConfigAction::Unset { key } => {
            let mut config = Config::load();
            unset_value(&mut config, key);
            config.save()?;
            println!(
                "{}",
                style::format_success(&format!("Unset {:?}", key), no_color)
            );
        }
        ConfigAction::Init => {
            let path = Config::path();
            if path.exists() {
                bail!("Config already exists at {}", path.display());
            }
            Config::default().save()?;
            println!(
                "{}",
                style::format_success(
                    &format!("Created config at {}", path.display()),
                    no_color
                )
            );
        }
    }
    Ok(())
}

fn get_value(config: &Config, key: ConfigKey) -> Option<String> {
    match key {
        ConfigKey::Format => config.format.clone(),
        ConfigKey::NoColor => Some(config.no_color.to_string()),
        ConfigKey::Compact => Some(config.compact.to_string()),
        ConfigKey::Activity => config.activity.clone(),
        ConfigKey::AgeGroup => config.age_group.clone(),
        ConfigKey::Catalog => config.catalog.as_ref().map(|p| p.display().to_string()),
    }
}

fn set_value(config: &mut Config, key: ConfigKey, value: &str) -> Result<()> {
    match key {
        ConfigKey::Format => {
            let format = value.to_ascii_lowercase();
            if !matches!(format.as_str(), "text" | "json" | "csv") {
                bail!("Invalid format '{}'. Use text, json, or csv.", value);
            }
            config.format = Some(format);
        }
        ConfigKey::NoColor => config.no_color = parse_bool(value)?,
        ConfigKey::Compact => config.compact = parse_bool(value)?,
        ConfigKey::Activity => config.activity = non_blank(value),
        ConfigKey::AgeGroup => config.age_group = non_blank(value),
        ConfigKey::Catalog => {
            let path = PathBuf::from(value);
            // Validate before saving
            MaskCatalog::load(&path)
                .with_context(|| format!("Invalid mask catalog: {}", path.display()))?;
            config.catalog = Some(path);
        }
    }
    Ok(())
}

fn unset_value(config: &mut Config, key: ConfigKey) {
    match key {
        ConfigKey::Format => config.format = None,
        ConfigKey::NoColor => config.no_color = false,
        ConfigKey::Compact => config.compact = false,
        ConfigKey::Activity => config.activity = None,
        ConfigKey::AgeGroup => config.age_group = None,
        ConfigKey::Catalog => config.catalog = None,
    }
}

fn parse_bool(value: &str) -> Result<bool> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "yes" | "1" | "on" => Ok(true),
        "false" | "no" | "0" | "off" => Ok(false),
        _ => bail!("Invalid boolean '{}'. Use true or false.", value),
    }
}

fn non_blank(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_and_get_values() {
        let mut config = Config::default();
        set_value(&mut config, ConfigKey::Format, "JSON").unwrap();
        set_value(&mut config, ConfigKey::NoColor, "yes").unwrap();
        set_value(&mut config, ConfigKey::Activity, " Exercise ").unwrap();

        assert_eq!(get_value(&config, ConfigKey::Format).as_deref(), Some("json"));
        assert_eq!(get_value(&config, ConfigKey::NoColor).as_deref(), Some("true"));
        assert_eq!(get_value(&config, ConfigKey::Activity).as_deref(), Some("Exercise"));
        assert_eq!(get_value(&config, ConfigKey::AgeGroup), None);
    }

    #[test]
    fn test_set_rejects_bad_values() {
        let mut config = Config::default();
        assert!(set_value(&mut config, ConfigKey::Format, "yaml").is_err());
        assert!(set_value(&mut config, ConfigKey::Compact, "maybe").is_err());
        assert!(set_value(&mut config, ConfigKey::Catalog, "/nonexistent/masks.toml").is_err());
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_set_catalog_validates_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("masks.toml");
        std::fs::write(
            &path,
            r#"
[[mask]]
id = "Anything"
protection_percent = 90
comfort = 3
breathability = 3
lifespan = "Reusable"
recommended_bands = ["Good", "Moderate", "UnhealthySensitive", "Unhealthy", "VeryUnhealthy", "Hazardous"]
"#,
        )
        .unwrap();

        let mut config = Config::default();
        set_value(&mut config, ConfigKey::Catalog, path.to_str().unwrap()).unwrap();
        assert_eq!(config.catalog.as_deref(), Some(path.as_path()));
    }

    #[test]
    fn test_unset_restores_defaults() {
        let mut config = Config {
            compact: true,
            age_group: Some("Children".into()),
            ..Config::default()
        };
        unset_value(&mut config, ConfigKey::Compact);
        unset_value(&mut config, ConfigKey::AgeGroup);
        assert_eq!(config, Config::default());
    }
}
