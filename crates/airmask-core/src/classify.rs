//! AQI classification.
//!
//! This module is the single source of truth for mapping a numeric AQI to a
//! severity band. Presentation code should call [`classify`] instead of
//! re-declaring band boundaries inline.
//!
//! | Band | AQI |
//! |------|-----|
//! | Good | 0-50 |
//! | Moderate | 51-100 |
//! | UnhealthySensitive | 101-150 |
//! | Unhealthy | 151-200 |
//! | VeryUnhealthy | 201-300 |
//! | Hazardous | 301+ |
//!
//! # Example
//!
//! ```
//! use airmask_core::classify;
//! use airmask_types::Band;
//!
//! assert_eq!(classify(42).band, Band::Good);
//! assert_eq!(classify(151).band, Band::Unhealthy);
//!
//! // Out-of-range values are clamped, never rejected
//! assert_eq!(classify(-5), classify(0));
//! assert_eq!(classify(900), classify(500));
//! ```

use serde_json::Value;

use airmask_types::{AQI_MAX, AqiReading, AqiTier, Band, clamp_aqi};

use crate::error::{Error, Result};

/// Band for an already-clamped AQI value.
#[must_use]
pub fn band_for(aqi: u16) -> Band {
    Band::ALL
        .into_iter()
        .rev()
        .find(|band| aqi >= band.range().lower)
        .unwrap_or(Band::Good)
}

/// Classify an integer AQI.
///
/// Values below 0 are treated as 0 and values above 500 as 500.
#[must_use]
pub fn classify(aqi: i64) -> AqiTier {
    let clamped = clamp_aqi(aqi);
    if i64::from(clamped) != aqi {
        tracing::debug!("AQI {} clamped to {}", aqi, clamped);
    }
    AqiTier::for_band(band_for(clamped))
}

/// Round a floating-point AQI to the integer domain.
///
/// Halves round away from zero. Infinities saturate at the domain bounds.
///
/// # Errors
///
/// Returns [`Error::InvalidInput`] for NaN.
pub fn round_aqi(aqi: f64) -> Result<i64> {
    if aqi.is_nan() {
        return Err(Error::invalid_input("AQI is NaN"));
    }
    Ok(if aqi >= f64::from(AQI_MAX) {
        i64::from(AQI_MAX)
    } else if aqi <= 0.0 {
        0
    } else {
        aqi.round() as i64
    })
}

/// Classify a floating-point AQI.
///
/// The value is rounded with [`round_aqi`] before clamping.
///
/// # Errors
///
/// Returns [`Error::InvalidInput`] for NaN.
pub fn classify_f64(aqi: f64) -> Result<AqiTier> {
    round_aqi(aqi).map(classify)
}

/// Extract an integer AQI from an untrusted JSON value.
///
/// # Errors
///
/// Returns [`Error::InvalidInput`] for anything that is not a JSON number,
/// including `null`, strings and a missing field.
pub fn parse_aqi(value: Option<&Value>) -> Result<i64> {
    match value {
        Some(Value::Number(n)) => match n.as_i64() {
            Some(i) => Ok(i),
            None => round_aqi(n.as_f64().unwrap_or(f64::NAN)),
        },
        Some(other) => Err(Error::invalid_input(format!(
            "AQI must be a number, got {}",
            other
        ))),
        None => Err(Error::invalid_input("AQI is missing")),
    }
}

/// Classify an untrusted JSON value, as found in provider payloads.
///
/// # Errors
///
/// See [`parse_aqi`].
pub fn classify_value(value: Option<&Value>) -> Result<AqiTier> {
    parse_aqi(value).map(classify)
}

/// Classify a canonical reading by its AQI.
///
/// The tier is always derived from the reading's AQI, never from its
/// pollutant concentrations.
#[must_use]
pub fn classify_reading(reading: &AqiReading) -> AqiTier {
    classify(i64::from(reading.aqi()))
}
