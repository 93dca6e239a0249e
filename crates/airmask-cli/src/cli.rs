//! CLI argument definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use airmask_core::CatalogFilter;
use airmask_types::UserConstraints;

/// Output format for commands
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Csv,
}

/// Visual styling mode for output
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum StyleMode {
    /// Standard styling with colors
    Minimal,
    /// Rich styling with tables, bars, and full formatting (default)
    #[default]
    Rich,
    /// Plain ASCII text with no decorations (for scripting)
    Plain,
}

/// Reusable output format argument
#[derive(Debug, Clone, Args)]
pub struct FormatArg {
    /// Output format (defaults to the config value, then text)
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,
}

/// Who will wear the mask and what they will be doing
#[derive(Debug, Clone, Default, Args)]
pub struct ConstraintArgs {
    /// Planned activity, e.g. "Exercise" (overrides config)
    #[arg(short, long, env = "AIRMASK_ACTIVITY")]
    pub activity: Option<String>,

    /// Wearer age group, e.g. "Children" (overrides config)
    #[arg(short = 'g', long, env = "AIRMASK_AGE_GROUP")]
    pub age_group: Option<String>,
}

impl ConstraintArgs {
    /// Resolve constraints: explicit flags override config values.
    pub fn resolve(
        &self,
        config_activity: Option<&str>,
        config_age_group: Option<&str>,
    ) -> Option<UserConstraints> {
        let activity = self
            .activity
            .clone()
            .or_else(|| config_activity.map(str::to_string));
        let age_group = self
            .age_group
            .clone()
            .or_else(|| config_age_group.map(str::to_string));
        let constraints = UserConstraints::new(activity, age_group);
        (!constraints.is_empty()).then_some(constraints)
    }
}

#[derive(Parser)]
#[command(name = "airmask")]
#[command(
    author,
    version,
    about = "Air quality classification and mask recommendations",
    long_about = None
)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output as JSON (shorthand for --format json)
    #[arg(long, global = true)]
    pub json: bool,

    /// Output compact JSON (no pretty-printing)
    #[arg(long, global = true)]
    pub compact: bool,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR")]
    pub no_color: bool,

    /// Visual styling mode (minimal, rich, plain)
    #[arg(
        long,
        global = true,
        value_enum,
        default_value = "rich",
        env = "AIRMASK_STYLE"
    )]
    pub style: StyleMode,

    /// Write output to file instead of stdout
    #[arg(short, long, global = true)]
    pub output: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Classify an AQI value into its severity band
    Classify {
        /// AQI value (fractions are rounded, out-of-range values are clamped)
        #[arg(allow_hyphen_values = true)]
        aqi: String,

        #[command(flatten)]
        format: FormatArg,
    },

    /// Recommend masks for an AQI value
    Recommend {
        /// AQI value
        #[arg(allow_hyphen_values = true)]
        aqi: String,

        #[command(flatten)]
        constraints: ConstraintArgs,

        #[command(flatten)]
        format: FormatArg,
    },

    /// Show each pollutant's share of the total concentration
    Breakdown {
        /// Pollutant concentration in µg/m³, e.g. -p PM2.5=65 (repeatable)
        #[arg(short, long = "pollutant", value_name = "NAME=VALUE", value_parser = parse_key_val)]
        pollutants: Vec<(String, String)>,

        #[command(flatten)]
        format: FormatArg,
    },

    /// Full assessment of a reading file: tier, masks, breakdown and advice
    Report {
        /// JSON reading document, or a provider payload with --openweather
        #[arg(short, long)]
        input: PathBuf,

        /// Treat the input as an OpenWeather air pollution payload
        #[arg(long)]
        openweather: bool,

        /// Location name (used when the input does not carry one)
        #[arg(short, long)]
        location: Option<String>,

        #[command(flatten)]
        constraints: ConstraintArgs,

        #[command(flatten)]
        format: FormatArg,
    },

    /// Browse the mask catalog
    Masks {
        /// Match mask names and uses (case-insensitive)
        #[arg(short, long)]
        search: Option<String>,

        /// Catalog filter (all, high-protection, reusable, comfort)
        #[arg(long, default_value = "all")]
        filter: CatalogFilter,

        /// Show full details for one mask
        #[arg(long, value_name = "ID")]
        show: Option<String>,

        #[command(flatten)]
        format: FormatArg,
    },

    /// Health tips for an AQI value
    Tips {
        /// AQI value
        #[arg(allow_hyphen_values = true)]
        aqi: String,

        /// Print the request text for an external tip generator instead
        #[arg(long, conflicts_with = "reply")]
        prompt: bool,

        /// Read tips from a generator reply (a dash-prefixed list)
        #[arg(long, value_name = "FILE")]
        reply: Option<PathBuf>,

        #[command(flatten)]
        format: FormatArg,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Parse a `NAME=VALUE` pair
fn parse_key_val(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("invalid pollutant '{}': expected NAME=VALUE", s))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("invalid pollutant '{}': missing name", s));
    }
    Ok((key.to_string(), value.trim().to_string()))
}

/// Configuration keys
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ConfigKey {
    /// Default output format
    Format,
    /// Disable colored output
    NoColor,
    /// Compact JSON output
    Compact,
    /// Default activity for recommendations
    Activity,
    /// Default age group for recommendations
    AgeGroup,
    /// Path to a TOML mask catalog replacing the built-in one
    Catalog,
}

/// Configuration subcommands
#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,
    /// Get a configuration value
    Get {
        /// Configuration key
        #[arg(value_enum)]
        key: ConfigKey,
    },
    /// Set a configuration value
    Set {
        /// Configuration key
        #[arg(value_enum)]
        key: ConfigKey,
        /// Configuration value
        value: String,
    },
    /// Unset (remove) a configuration value
    Unset {
        /// Configuration key to remove
        #[arg(value_enum)]
        key: ConfigKey,
    },
    /// Show configuration file path
    Path,
    /// Initialize default configuration
    Init,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_key_val() {
        assert_eq!(
            parse_key_val("PM2.5=65").unwrap(),
            ("PM2.5".to_string(), "65".to_string())
        );
        assert_eq!(
            parse_key_val(" co = 1200.5 ").unwrap(),
            ("co".to_string(), "1200.5".to_string())
        );
        assert!(parse_key_val("PM10").is_err());
        assert!(parse_key_val("=5").is_err());
    }

    #[test]
    fn test_negative_aqi_is_a_value() {
        let cli = Cli::try_parse_from(["airmask", "classify", "-5"]).unwrap();
        match cli.command {
            Commands::Classify { aqi, .. } => assert_eq!(aqi, "-5"),
            _ => panic!("expected classify"),
        }
    }

    #[test]
    fn test_masks_filter_parses() {
        let cli =
            Cli::try_parse_from(["airmask", "masks", "--filter", "high-protection"]).unwrap();
        match cli.command {
            Commands::Masks { filter, .. } => assert_eq!(filter, CatalogFilter::HighProtection),
            _ => panic!("expected masks"),
        }
        assert!(Cli::try_parse_from(["airmask", "masks", "--filter", "cheap"]).is_err());
    }

    #[test]
    fn test_constraints_flags_override_config() {
        let args = ConstraintArgs {
            activity: Some("Running".into()),
            age_group: None,
        };
        let resolved = args.resolve(Some("Walking"), Some("Children")).unwrap();
        assert_eq!(resolved.activity.as_deref(), Some("Running"));
        assert_eq!(resolved.age_group.as_deref(), Some("Children"));

        assert!(ConstraintArgs::default().resolve(None, Some("  ")).is_none());
    }
}
