//! Command-line interface for AQI classification and mask recommendations.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `classify` | Map an AQI value to its severity band |
//! | `recommend` | Ranked mask recommendation for an AQI value |
//! | `breakdown` | Each pollutant's share of the total concentration |
//! | `report` | Full assessment of a reading file or provider payload |
//! | `masks` | Browse and search the mask catalog |
//! | `tips` | Health tips for an AQI value |
//! | `config` | Manage CLI configuration |
//! | `completions` | Generate shell completions |
//!
//! Every data command supports `--format text|json|csv` and `--output FILE`.
//!
//! # Configuration
//!
//! Settings live in `~/.config/airmask/config.toml` (or the platform
//! equivalent, overridden by `AIRMASK_CONFIG`):
//!
//! - `format`: Default output format
//! - `no_color` / `compact`: Output preferences
//! - `activity` / `age_group`: Default recommendation constraints
//! - `catalog`: TOML mask catalog replacing the built-in one
//!
//! # Environment Variables
//!
//! - `AIRMASK_ACTIVITY` / `AIRMASK_AGE_GROUP`: Constraint defaults (overridden by flags)
//! - `AIRMASK_STYLE`: `rich`, `minimal` or `plain`
//! - `NO_COLOR`: Disable colored output when set
//!
//! # Examples
//!
//! ```bash
//! airmask classify 175
//! airmask recommend 175 --activity Exercise
//! airmask breakdown -p PM2.5=65 -p PM10=89
//! airmask report --input reading.json --format json
//! airmask report --input payload.json --openweather --location "Delhi, IN"
//! airmask masks --filter reusable
//! ```

// The binary lives in main.rs; this library only re-exports the engine.
pub use airmask_core;
pub use airmask_types;
