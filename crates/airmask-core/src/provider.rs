//! Translation of OpenWeather-style air pollution payloads.
//!
//! The provider reports a 1-5 quality index instead of a 0-500 AQI and keys
//! its concentrations with its own names (`pm2_5`, `nh3`, ...). Both are
//! mapped here, before the engine sees the reading.
//!
//! ```json
//! {
//!   "list": [{
//!     "dt": 1700000000,
//!     "main": { "aqi": 4 },
//!     "components": { "co": 201.94, "no": 0.02, "pm2_5": 65.1, "pm10": 89.3, "nh3": 0.72 }
//!   }]
//! }
//! ```

use serde_json::Value;

use airmask_types::{AqiReading, Pollutant};

use crate::error::{Error, Result};
use crate::normalize::normalize_pairs;
use crate::source::unix_timestamp;

/// Map the provider's 1-5 index to a representative AQI.
///
/// | Index | AQI |
/// |-------|-----|
/// | 1 | 50 |
/// | 2 | 100 |
/// | 3 | 150 |
/// | 4 | 200 |
/// | 5 | 300 |
///
/// Anything else has no defined meaning and returns `None`.
#[must_use]
pub fn standard_aqi(index: i64) -> Option<i64> {
    match index {
        1 => Some(50),
        2 => Some(100),
        3 => Some(150),
        4 => Some(200),
        5 => Some(300),
        _ => None,
    }
}

/// Rename a provider component key to the engine's vocabulary.
///
/// Components the engine does not track (`no`, `nh3`) map to `None`.
#[must_use]
pub fn canonical_pollutant(key: &str) -> Option<Pollutant> {
    match key {
        "pm2_5" => Some(Pollutant::Pm25),
        "pm10" => Some(Pollutant::Pm10),
        "o3" => Some(Pollutant::O3),
        "no2" => Some(Pollutant::No2),
        "so2" => Some(Pollutant::So2),
        "co" => Some(Pollutant::Co),
        _ => None,
    }
}

/// Translate a provider payload into a canonical reading.
///
/// Component values are kept as reported, in µg/m³.
///
/// # Errors
///
/// Returns [`Error::NoData`] when the payload has no entries or its index
/// is missing or outside 1-5.
pub fn translate(payload: &Value, location: &str) -> Result<AqiReading> {
    let entry = payload
        .get("list")
        .and_then(Value::as_array)
        .and_then(|list| list.first())
        .ok_or_else(|| Error::no_data(format!("provider returned no entries for '{}'", location)))?;

    let index = entry.pointer("/main/aqi").and_then(Value::as_i64);
    let aqi = index.and_then(standard_aqi).ok_or_else(|| {
        tracing::warn!("Provider index {:?} has no AQI mapping", index);
        Error::no_data(format!("provider index for '{}' is not in 1-5", location))
    })?;

    let pairs = entry
        .get("components")
        .and_then(Value::as_object)
        .into_iter()
        .flatten()
        .filter_map(|(key, value)| {
            let pollutant = canonical_pollutant(key);
            if pollutant.is_none() {
                tracing::trace!("Dropping provider component '{}'", key);
            }
            pollutant.map(|p| (p.name(), value.as_f64()))
        });
    let levels = normalize_pairs(pairs).levels;

    let mut reading = AqiReading::new(aqi, location, levels);
    if let Some(observed_at) = entry.get("dt").and_then(Value::as_i64).and_then(unix_timestamp) {
        reading = reading.with_observed_at(observed_at);
    }
    Ok(reading)
}

/// Parse and translate a raw payload string.
pub fn translate_str(payload: &str, location: &str) -> Result<AqiReading> {
    let value: Value = serde_json::from_str(payload)?;
    translate(&value, location)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload(index: Value) -> Value {
        json!({
            "list": [{
                "dt": 1_700_000_000,
                "main": { "aqi": index },
                "components": {
                    "co": 201.94, "no": 0.02, "no2": 12.5, "o3": 68.66,
                    "so2": 3.1, "pm2_5": 65.1, "pm10": 89.3, "nh3": 0.72
                }
            }]
        })
    }

    #[test]
    fn test_standard_aqi() {
        let mapped: Vec<_> = (1..=5).filter_map(standard_aqi).collect();
        assert_eq!(mapped, [50, 100, 150, 200, 300]);
        assert_eq!(standard_aqi(0), None);
        assert_eq!(standard_aqi(6), None);
    }

    #[test]
    fn test_canonical_pollutant() {
        assert_eq!(canonical_pollutant("pm2_5"), Some(Pollutant::Pm25));
        assert_eq!(canonical_pollutant("co"), Some(Pollutant::Co));
        assert_eq!(canonical_pollutant("nh3"), None);
        assert_eq!(canonical_pollutant("no"), None);
    }

    #[test]
    fn test_translate() {
        let reading = translate(&payload(json!(4)), "Delhi, IN").unwrap();
        assert_eq!(reading.aqi(), 200);
        assert_eq!(reading.location(), "Delhi, IN");
        // No rounding, no unit conversion
        assert_eq!(reading.pollutants().get(Pollutant::Pm25), 65.1);
        assert_eq!(reading.pollutants().get(Pollutant::Co), 201.94);
        assert_eq!(reading.observed_at().unwrap().unix_timestamp(), 1_700_000_000);
    }

    #[test]
    fn test_translate_unknown_index_is_no_data() {
        for index in [json!(0), json!(7), json!("3"), Value::Null] {
            assert!(matches!(
                translate(&payload(index), "X"),
                Err(Error::NoData(_))
            ));
        }
    }

    #[test]
    fn test_translate_empty_list_is_no_data() {
        assert!(matches!(
            translate(&json!({ "list": [] }), "X"),
            Err(Error::NoData(_))
        ));
        assert!(matches!(translate(&json!({}), "X"), Err(Error::NoData(_))));
    }

    #[test]
    fn test_translate_without_components() {
        let reading = translate(&json!({ "list": [{ "main": { "aqi": 1 } }] }), "X").unwrap();
        assert_eq!(reading.aqi(), 50);
        assert_eq!(reading.pollutants().total(), 0.0);
        assert!(reading.observed_at().is_none());
    }

    #[test]
    fn test_translate_out_of_range_dt_keeps_reading() {
        let payload = json!({
            "list": [{
                "dt": i64::MAX,
                "main": { "aqi": 3 },
                "components": { "pm2_5": 40.0 }
            }]
        });
        let reading = translate(&payload, "X").unwrap();
        assert_eq!(reading.aqi(), 150);
        assert_eq!(reading.pollutants().get(Pollutant::Pm25), 40.0);
        assert!(reading.observed_at().is_none());
    }

    #[test]
    fn test_translate_str() {
        assert!(matches!(translate_str("nope", "X"), Err(Error::Json(_))));
        let raw = payload(json!(2)).to_string();
        assert_eq!(translate_str(&raw, "X").unwrap().aqi(), 100);
    }
}
