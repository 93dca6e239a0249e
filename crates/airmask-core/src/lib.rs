//! AQI classification and respirator mask recommendation engine.
//!
//! This crate turns one canonical air-quality reading into everything a
//! presentation layer needs: the severity tier, a ranked mask
//! recommendation, and a pollutant breakdown for charting.
//!
//! # Features
//!
//! - **Classification**: one authoritative AQI band table, total over all numeric input
//! - **Normalization**: untrusted pollutant maps to six non-negative µg/m³ values
//! - **Mask catalog**: validated, browsable, loadable from TOML
//! - **Recommendation**: deterministic ranking with advisory contra-indication warnings
//! - **Breakdown**: per-pollutant shares in a fixed order
//! - **Reading sources**: async boundary for files, fixtures and provider payloads
//! - **Health tips**: an isolated side-channel that only sees band and AQI
//!
//! # Bands
//!
//! | Band | AQI |
//! |------|-----|
//! | Good | 0-50 |
//! | Moderate | 51-100 |
//! | Unhealthy for Sensitive Groups | 101-150 |
//! | Unhealthy | 151-200 |
//! | Very Unhealthy | 201-300 |
//! | Hazardous | 301+ |
//!
//! # Quick Start
//!
//! ```
//! use airmask_core::{MaskCatalog, assess};
//! use airmask_types::{AqiReading, Band, Pollutant, PollutantLevels};
//!
//! let levels = PollutantLevels::zero()
//!     .with(Pollutant::Pm25, 65.0)
//!     .with(Pollutant::Pm10, 89.0);
//! let reading = AqiReading::new(175, "Lahore, PK", levels);
//!
//! let assessment = assess(reading, &MaskCatalog::builtin(), None).unwrap();
//! assert_eq!(assessment.tier.band, Band::Unhealthy);
//! assert_eq!(assessment.recommendation.primary.protection_percent, 95);
//! assert_eq!(assessment.breakdown[0].percentage_of_total, 42);
//! ```
//!
//! The engine itself is synchronous and pure. Only the collaborator traits
//! ([`ReadingSource`], [`TipGenerator`]) are async.

pub mod assess;
pub mod breakdown;
pub mod catalog;
pub mod classify;
pub mod error;
pub mod normalize;
pub mod provider;
pub mod recommend;
pub mod source;
pub mod tips;

// Re-export types crate
pub use airmask_types::types;

pub use assess::{Assessment, assess};
pub use breakdown::breakdown;
pub use catalog::{CatalogFilter, MaskCatalog};
pub use classify::{band_for, classify, classify_f64, classify_reading, classify_value, parse_aqi};
pub use error::{Error, Result};
pub use normalize::{Adjustment, Normalized, normalize, normalize_pairs, normalize_with_report};
pub use recommend::{matches_constraint, recommend};
pub use source::{JsonFileSource, ReadingSource, StaticSource, parse_reading};
pub use tips::{CannedTips, TipContext, TipGenerator, parse_tip_list};
