//! Error types shared by the airmask crates.

use core::fmt;

use thiserror::Error;

use crate::types::Band;

/// Errors raised by the classification and recommendation engine.
///
/// Everything else in the engine is total: missing or zero data never
/// produces an error, only structurally invalid input does.
///
/// This enum is marked `#[non_exhaustive]` to allow adding new error variants
/// in future versions without breaking downstream code.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum Error {
    /// The AQI was missing, non-numeric, or NaN.
    ///
    /// Callers should fall back to a neutral "unknown" display state.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The mask catalog fails one of its static invariants.
    #[error("Catalog integrity error: {0}")]
    CatalogIntegrity(CatalogIssue),
}

/// The specific invariant a mask catalog violates.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CatalogIssue {
    /// The catalog contains no masks at all.
    Empty,
    /// No mask lists this band among its recommended bands.
    UncoveredBand(Band),
    /// Two masks share the same id (compared case-insensitively).
    DuplicateId(String),
    /// Protection is above 100%.
    ProtectionOutOfRange { id: String, value: u8 },
    /// A 1-5 rating (comfort or breathability) is outside its scale.
    RatingOutOfRange {
        id: String,
        field: &'static str,
        value: u8,
    },
    /// A mask is not recommended for any band.
    NoRecommendedBands(String),
}

impl fmt::Display for CatalogIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogIssue::Empty => write!(f, "catalog is empty"),
            CatalogIssue::UncoveredBand(band) => {
                write!(f, "no mask is recommended for band {:?}", band)
            }
            CatalogIssue::DuplicateId(id) => write!(f, "duplicate mask id '{}'", id),
            CatalogIssue::ProtectionOutOfRange { id, value } => {
                write!(f, "mask '{}' has protection {}% (max 100)", id, value)
            }
            CatalogIssue::RatingOutOfRange { id, field, value } => {
                write!(f, "mask '{}' has {} {} (expected 1-5)", id, field, value)
            }
            CatalogIssue::NoRecommendedBands(id) => {
                write!(f, "mask '{}' is not recommended for any band", id)
            }
        }
    }
}

/// Result type alias using airmask-types' Error type.
pub type Result<T> = std::result::Result<T, Error>;
