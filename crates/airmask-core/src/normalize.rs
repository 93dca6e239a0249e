//! Pollutant normalization.
//!
//! Provider payloads are untrusted: fields may be missing, non-numeric,
//! negative (sensor artifacts near zero) or keyed by names the engine does
//! not track. This module funnels them through one total function that
//! always produces all six pollutants with non-negative values.
//!
//! No unit conversion happens here. Input is assumed to be µg/m³ for every
//! pollutant, CO included.
//!
//! # Example
//!
//! ```
//! use airmask_core::normalize;
//! use airmask_types::Pollutant;
//! use serde_json::json;
//!
//! let raw = json!({ "PM2.5": -5, "PM10": 89, "O3": "n/a" });
//! let levels = normalize(raw.as_object().unwrap());
//!
//! assert_eq!(levels.get(Pollutant::Pm25), 0.0);
//! assert_eq!(levels.get(Pollutant::Pm10), 89.0);
//! assert_eq!(levels.get(Pollutant::O3), 0.0);
//! assert_eq!(levels.get(Pollutant::Co), 0.0);
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use airmask_types::{Pollutant, PollutantLevels};

/// Something the normalizer had to fix up.
///
/// Adjustments are informational; normalization never fails.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum Adjustment {
    /// The pollutant was absent and defaulted to zero.
    Missing(Pollutant),
    /// The value was not a finite number and was replaced by zero.
    NonNumeric(Pollutant),
    /// A negative value was clamped to zero.
    NegativeClamped { pollutant: Pollutant, value: f64 },
    /// The key is not one of the six tracked pollutants and was ignored.
    UnknownKey(String),
}

impl fmt::Display for Adjustment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Adjustment::Missing(p) => write!(f, "{} missing, defaulted to 0", p),
            Adjustment::NonNumeric(p) => write!(f, "{} is not a number, defaulted to 0", p),
            Adjustment::NegativeClamped { pollutant, value } => {
                write!(f, "{} {} is negative, clamped to 0", pollutant, value)
            }
            Adjustment::UnknownKey(key) => write!(f, "unknown pollutant '{}' ignored", key),
        }
    }
}

/// Normalized levels plus the list of adjustments made to reach them.
#[derive(Debug, Clone, PartialEq)]
pub struct Normalized {
    pub levels: PollutantLevels,
    pub adjustments: Vec<Adjustment>,
}

impl Normalized {
    /// Check if anything had to be fixed up.
    pub fn has_adjustments(&self) -> bool {
        !self.adjustments.is_empty()
    }
}

/// Normalize `(name, value)` pairs where `None` means non-numeric.
///
/// Names are matched with [`Pollutant::from_str`](std::str::FromStr), so
/// `PM2.5`, `pm25` and `pm2_5` are equivalent. When a pollutant appears
/// twice the last value wins.
pub fn normalize_pairs<I, K>(raw: I) -> Normalized
where
    I: IntoIterator<Item = (K, Option<f64>)>,
    K: AsRef<str>,
{
    let mut levels = PollutantLevels::zero();
    let mut seen = [false; 6];
    let mut adjustments = Vec::new();

    for (key, value) in raw {
        let key = key.as_ref();
        let Ok(pollutant) = key.parse::<Pollutant>() else {
            tracing::trace!("Ignoring unknown pollutant key '{}'", key);
            adjustments.push(Adjustment::UnknownKey(key.to_string()));
            continue;
        };
        let slot = pollutant.index();
        if seen[slot] {
            tracing::debug!("Duplicate value for {}, keeping the last one", pollutant);
            adjustments.retain(|a| !concerns(a, pollutant));
        }
        seen[slot] = true;

        match value {
            Some(v) if v.is_finite() && v < 0.0 => {
                tracing::debug!("{} reported {} µg/m³, clamping to 0", pollutant, v);
                adjustments.push(Adjustment::NegativeClamped {
                    pollutant,
                    value: v,
                });
                levels.set(pollutant, 0.0);
            }
            Some(v) if v.is_finite() => levels.set(pollutant, v),
            _ => {
                adjustments.push(Adjustment::NonNumeric(pollutant));
                levels.set(pollutant, 0.0);
            }
        }
    }

    for (i, pollutant) in Pollutant::ALL.iter().enumerate() {
        if !seen[i] {
            adjustments.push(Adjustment::Missing(*pollutant));
        }
    }

    Normalized {
        levels,
        adjustments,
    }
}

fn concerns(adjustment: &Adjustment, pollutant: Pollutant) -> bool {
    match adjustment {
        Adjustment::NonNumeric(p) => *p == pollutant,
        Adjustment::NegativeClamped { pollutant: p, .. } => *p == pollutant,
        _ => false,
    }
}

/// Normalize a JSON object, reporting adjustments.
pub fn normalize_with_report(raw: &Map<String, Value>) -> Normalized {
    normalize_pairs(raw.iter().map(|(k, v)| (k.as_str(), v.as_f64())))
}

/// Normalize a JSON object of pollutant concentrations.
///
/// Every tracked pollutant is present in the result; anything absent,
/// non-numeric or negative becomes zero.
pub fn normalize(raw: &Map<String, Value>) -> PollutantLevels {
    let normalized = normalize_with_report(raw);
    if normalized.has_adjustments() {
        tracing::debug!(
            "Normalized pollutants with {} adjustment(s)",
            normalized.adjustments.len()
        );
    }
    normalized.levels
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn obj(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_empty_input_gives_all_zero() {
        let levels = normalize(&Map::new());
        assert_eq!(levels.iter().count(), 6);
        assert!(levels.iter().all(|(_, v)| v == 0.0));
    }

    #[test]
    fn test_negative_is_clamped() {
        let levels = normalize(&obj(json!({ "PM2.5": -5 })));
        assert_eq!(levels.get(Pollutant::Pm25), 0.0);
    }

    #[test]
    fn test_values_pass_through_without_conversion() {
        // CO stays in µg/m³: no division here
        let levels = normalize(&obj(json!({ "CO": 1250.5, "NO2": 12 })));
        assert_eq!(levels.get(Pollutant::Co), 1250.5);
        assert_eq!(levels.get(Pollutant::No2), 12.0);
    }

    #[test]
    fn test_non_numeric_becomes_zero() {
        let report = normalize_with_report(&obj(json!({
            "O3": "high",
            "SO2": null,
            "PM10": [1, 2],
        })));
        assert_eq!(report.levels.total(), 0.0);
        assert!(report.adjustments.contains(&Adjustment::NonNumeric(Pollutant::O3)));
        assert!(report.adjustments.contains(&Adjustment::NonNumeric(Pollutant::So2)));
        assert!(report.adjustments.contains(&Adjustment::NonNumeric(Pollutant::Pm10)));
    }

    #[test]
    fn test_report_lists_missing_and_unknown() {
        let report = normalize_with_report(&obj(json!({ "PM2.5": 10, "nh3": 4 })));
        assert!(report.has_adjustments());
        assert!(report
            .adjustments
            .contains(&Adjustment::UnknownKey("nh3".to_string())));
        assert!(report.adjustments.contains(&Adjustment::Missing(Pollutant::Co)));
        assert!(!report.adjustments.contains(&Adjustment::Missing(Pollutant::Pm25)));
    }

    #[test]
    fn test_clean_input_has_no_adjustments() {
        let report = normalize_with_report(&obj(json!({
            "PM2.5": 1, "PM10": 2, "O3": 3, "NO2": 4, "SO2": 5, "CO": 6
        })));
        assert!(!report.has_adjustments());
        assert_eq!(report.levels.total(), 21.0);
    }

    #[test]
    fn test_alias_keys_and_last_value_wins() {
        let report = normalize_pairs([("pm2_5", Some(-1.0)), ("PM2.5", Some(30.0))]);
        assert_eq!(report.levels.get(Pollutant::Pm25), 30.0);
        assert!(!report.adjustments.iter().any(|a| matches!(
            a,
            Adjustment::NegativeClamped { pollutant: Pollutant::Pm25, .. }
        )));
    }

    #[test]
    fn test_non_finite_pairs() {
        let report = normalize_pairs([("CO", Some(f64::INFINITY)), ("O3", Some(f64::NAN))]);
        assert_eq!(report.levels.get(Pollutant::Co), 0.0);
        assert_eq!(report.levels.get(Pollutant::O3), 0.0);
    }

    #[test]
    fn test_adjustment_display() {
        let adj = Adjustment::NegativeClamped {
            pollutant: Pollutant::Pm25,
            value: -5.0,
        };
        assert_eq!(adj.to_string(), "PM2.5 -5 is negative, clamped to 0");
        assert!(Adjustment::UnknownKey("nh3".into()).to_string().contains("nh3"));
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn normalized_values_are_non_negative(
                pm25 in proptest::option::of(any::<f64>()),
                co in proptest::option::of(any::<f64>()),
            ) {
                let report = normalize_pairs([("PM2.5", pm25), ("CO", co)]);
                for (_, v) in report.levels.iter() {
                    prop_assert!(v >= 0.0 && v.is_finite());
                }
            }
        }
    }
}
