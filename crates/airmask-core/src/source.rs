//! Reading sources.
//!
//! A [`ReadingSource`] is the boundary where untrusted data becomes a
//! canonical [`AqiReading`]. Whatever a source talks to, it resolves to
//! either a reading or [`Error::NoData`] before the engine sees anything.
//!
//! Two sources ship with the crate:
//!
//! - [`StaticSource`] serves a fixed in-memory reading, with failure
//!   injection for tests.
//! - [`JsonFileSource`] reads one JSON reading document from disk.
//!
//! # Reading documents
//!
//! ```json
//! {
//!   "aqi": 175,
//!   "location": "Lahore, PK",
//!   "pollutants": { "PM2.5": 65, "PM10": 89 },
//!   "observed_at": "2024-11-02T08:00:00Z"
//! }
//! ```
//!
//! `pollutants` goes through [`normalize`](crate::normalize), so missing or
//! malformed entries become zero. `observed_at` may be an RFC 3339 string or
//! unix seconds and is optional; a value that cannot be read is dropped.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};

use async_trait::async_trait;
use serde_json::{Map, Value};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use tokio::sync::RwLock;

use airmask_types::AqiReading;

use crate::classify::parse_aqi;
use crate::error::{Error, Result};
use crate::normalize::normalize;

/// Something that can produce a reading for a location query.
///
/// # Example
///
/// ```
/// use airmask_core::{ReadingSource, StaticSource, classify_reading};
/// use airmask_types::{AqiReading, PollutantLevels};
///
/// #[tokio::main]
/// async fn main() {
///     let source = StaticSource::new(AqiReading::new(42, "Oslo, NO", PollutantLevels::zero()));
///     let reading = source.fetch("Oslo").await.unwrap();
///     assert_eq!(classify_reading(&reading).label(), "Good");
/// }
/// ```
#[async_trait]
pub trait ReadingSource: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &str;

    /// Fetch a reading for `query` (a place name, or empty for the default).
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoData`] when nothing usable is available. Sources
    /// must not leak transport-specific error shapes.
    async fn fetch(&self, query: &str) -> Result<AqiReading>;
}

/// A source that always serves the same reading.
pub struct StaticSource {
    reading: RwLock<Option<AqiReading>>,
    fetch_count: AtomicU32,
    should_fail: AtomicBool,
}

impl std::fmt::Debug for StaticSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StaticSource")
            .field("fetch_count", &self.fetch_count.load(Ordering::Relaxed))
            .field("should_fail", &self.should_fail.load(Ordering::Relaxed))
            .finish()
    }
}

impl StaticSource {
    pub fn new(reading: AqiReading) -> Self {
        Self {
            reading: RwLock::new(Some(reading)),
            fetch_count: AtomicU32::new(0),
            should_fail: AtomicBool::new(false),
        }
    }

    /// A source with nothing to serve.
    pub fn empty() -> Self {
        Self {
            reading: RwLock::new(None),
            fetch_count: AtomicU32::new(0),
            should_fail: AtomicBool::new(false),
        }
    }

    /// Replace the served reading.
    pub async fn set_reading(&self, reading: AqiReading) {
        *self.reading.write().await = Some(reading);
    }

    /// Make every fetch fail with [`Error::NoData`].
    pub fn set_should_fail(&self, fail: bool) {
        self.should_fail.store(fail, Ordering::Relaxed);
    }

    /// Number of fetches so far, including failed ones.
    pub fn fetch_count(&self) -> u32 {
        self.fetch_count.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl ReadingSource for StaticSource {
    fn name(&self) -> &str {
        "static"
    }

    async fn fetch(&self, query: &str) -> Result<AqiReading> {
        self.fetch_count.fetch_add(1, Ordering::Relaxed);
        if self.should_fail.load(Ordering::Relaxed) {
            return Err(Error::no_data(format!("no reading for '{}'", query)));
        }
        self.reading
            .read()
            .await
            .clone()
            .ok_or_else(|| Error::no_data(format!("no reading for '{}'", query)))
    }
}

/// A source backed by a JSON reading document on disk.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl ReadingSource for JsonFileSource {
    fn name(&self) -> &str {
        "json-file"
    }

    /// Read and parse the document. `query` is used as the location when
    /// the document has none.
    ///
    /// An unreadable file or malformed JSON is [`Error::NoData`]; a
    /// non-numeric `aqi` stays [`Error::InvalidInput`].
    async fn fetch(&self, query: &str) -> Result<AqiReading> {
        tracing::debug!("Reading {}", self.path.display());
        let content = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| Error::no_data(format!("cannot read {}: {}", self.path.display(), e)))?;
        parse_reading(&content, query).map_err(|e| match e {
            Error::Json(e) => {
                Error::no_data(format!("{} is not valid JSON: {}", self.path.display(), e))
            }
            other => other,
        })
    }
}

/// Parse a reading document.
///
/// `fallback_location` is used when the document has no `location`.
///
/// # Errors
///
/// - [`Error::Json`] if `content` is not JSON
/// - [`Error::NoData`] if the document is not an object
/// - [`Error::InvalidInput`] if `aqi` is missing or non-numeric
///
/// An unusable `observed_at` is logged and left unset.
pub fn parse_reading(content: &str, fallback_location: &str) -> Result<AqiReading> {
    let doc: Value = serde_json::from_str(content)?;
    let Some(doc) = doc.as_object() else {
        return Err(Error::no_data("reading document is not a JSON object"));
    };

    let aqi = parse_aqi(doc.get("aqi"))?;
    let location = doc
        .get("location")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(fallback_location);
    let pollutants = match doc.get("pollutants").and_then(Value::as_object) {
        Some(raw) => normalize(raw),
        None => normalize(&Map::new()),
    };

    let mut reading = AqiReading::new(aqi, location, pollutants);
    if let Some(observed_at) = parse_observed_at(doc.get("observed_at")) {
        reading = reading.with_observed_at(observed_at);
    }
    Ok(reading)
}

/// An unusable timestamp is logged and dropped; the reading stays valid.
fn parse_observed_at(value: Option<&Value>) -> Option<OffsetDateTime> {
    match value {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => match OffsetDateTime::parse(s, &Rfc3339) {
            Ok(observed_at) => Some(observed_at),
            Err(e) => {
                tracing::warn!("Ignoring observed_at '{}': {}", s, e);
                None
            }
        },
        Some(Value::Number(n)) => match n.as_i64() {
            Some(secs) => unix_timestamp(secs),
            None => {
                tracing::warn!("Ignoring observed_at {}: not whole seconds", n);
                None
            }
        },
        Some(other) => {
            tracing::warn!("Ignoring observed_at {}: expected a string or number", other);
            None
        }
    }
}

/// Convert unix seconds, logging and dropping values `time` cannot represent.
pub(crate) fn unix_timestamp(secs: i64) -> Option<OffsetDateTime> {
    OffsetDateTime::from_unix_timestamp(secs)
        .inspect_err(|e| tracing::warn!("Ignoring timestamp {}: {}", secs, e))
        .ok()
}
