//! Error types for airmask-core.
//!
//! The engine itself only fails on structurally invalid input: a
//! non-numeric AQI ([`Error::InvalidInput`]) or a malformed mask catalog
//! ([`Error::CatalogIntegrity`]). The remaining variants belong to the
//! collaborator boundary (reading sources and provider payloads), which must
//! translate its failures into either a valid reading or [`Error::NoData`].
//!
//! | Error | Caller action |
//! |-------|---------------|
//! | [`Error::InvalidInput`] | Show the neutral "unknown" state |
//! | [`Error::CatalogIntegrity`] | Fix the catalog; never reachable with the built-in one |
//! | [`Error::NoData`] | Show "no data available" for the location |
//! | [`Error::Io`] / [`Error::Json`] | Report the catalog file or raw payload problem |
//! | [`Error::CatalogFormat`] | Report the catalog file problem |

use thiserror::Error;

use airmask_types::CatalogIssue;

/// Errors returned by airmask-core.
///
/// This enum is marked `#[non_exhaustive]` to allow adding new error variants
/// in future versions without breaking downstream code.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// Missing, non-numeric, or NaN AQI.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The mask catalog violates one of its invariants.
    #[error("Catalog integrity error: {0}")]
    CatalogIntegrity(CatalogIssue),

    /// The reading source has nothing usable for the query.
    #[error("No data available: {0}")]
    NoData(String),

    /// I/O error.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Malformed JSON reading document or provider payload.
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Malformed TOML mask catalog.
    #[error("Invalid catalog file: {0}")]
    CatalogFormat(#[from] toml::de::Error),
}

impl Error {
    /// Create an invalid input error.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    /// Create a no-data error.
    pub fn no_data(message: impl Into<String>) -> Self {
        Self::NoData(message.into())
    }
}

impl From<airmask_types::Error> for Error {
    fn from(err: airmask_types::Error) -> Self {
        match err {
            airmask_types::Error::InvalidInput(msg) => Error::InvalidInput(msg),
            airmask_types::Error::CatalogIntegrity(issue) => Error::CatalogIntegrity(issue),
            // Handle future error variants (non_exhaustive)
            _ => Error::InvalidInput(err.to_string()),
        }
    }
}

/// Result type alias using airmask-core's Error type.
pub type Result<T> = std::result::Result<T, Error>;
