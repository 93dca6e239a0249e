//! Platform-agnostic types for AQI classification and mask recommendation.
//!
//! This crate provides the plain data shared by the engine (airmask-core)
//! and any presentation layer built on top of it.
//!
//! # Features
//!
//! - AQI bands, intervals and tiers with display metadata
//! - The fixed six-pollutant vocabulary and concentration records
//! - Canonical readings, mask catalog entries and recommendation results
//! - Error types for invalid input and catalog integrity
//!
//! # Example
//!
//! ```
//! use airmask_types::{AqiReading, Band, Pollutant, PollutantLevels};
//!
//! let levels = PollutantLevels::zero().with(Pollutant::Pm25, 12.0);
//! let reading = AqiReading::new(9999, "Delhi, IN", levels);
//! assert_eq!(reading.aqi(), 500);
//! assert_eq!(Band::Hazardous.range().to_string(), "301+");
//! ```

pub mod error;
pub mod types;

pub use error::{CatalogIssue, Error, Result};
pub use types::{
    AQI_MAX, AqiRange, AqiReading, AqiTier, Band, BreakdownEntry, Lifespan, MaskType,
    MaskWarning, Pollutant, PollutantLevels, Recommendation, UserConstraints, clamp_aqi,
};

#[cfg(test)]
mod tests {
    use super::*;

    // --- Band tests ---

    #[test]
    fn test_band_severity_rank_follows_order() {
        for (i, band) in Band::ALL.iter().enumerate() {
            assert_eq!(band.severity_rank() as usize, i);
        }
    }

    #[test]
    fn test_band_ranges_are_contiguous() {
        for pair in Band::ALL.windows(2) {
            let upper = pair[0].range().upper.unwrap();
            assert_eq!(pair[1].range().lower, upper + 1);
        }
        assert!(Band::Hazardous.range().upper.is_none());
    }

    #[test]
    fn test_band_range_display() {
        assert_eq!(Band::Good.range().to_string(), "0-50");
        assert_eq!(Band::VeryUnhealthy.range().to_string(), "201-300");
        assert_eq!(Band::Hazardous.range().to_string(), "301+");
    }

    #[test]
    fn test_range_contains() {
        let r = Band::Moderate.range();
        assert!(!r.contains(50));
        assert!(r.contains(51));
        assert!(r.contains(100));
        assert!(!r.contains(101));
        assert!(Band::Hazardous.range().contains(500));
    }

    #[test]
    fn test_band_display_uses_label() {
        assert_eq!(format!("{}", Band::Good), "Good");
        assert_eq!(format!("{}", Band::VeryUnhealthy), "Very Unhealthy");
    }

    #[test]
    fn test_band_advice_non_empty() {
        for band in Band::ALL {
            assert!(!band.advice().is_empty(), "{:?} has no advice", band);
            assert!(!band.description().is_empty());
        }
        assert!(Band::Good.advice().contains(&"No mask needed"));
    }

    #[test]
    fn test_tier_comparison() {
        let good = AqiTier::from(Band::Good);
        let bad = AqiTier::from(Band::Unhealthy);
        assert!(bad.is_worse_than(&good));
        assert!(!good.is_worse_than(&bad));
        assert!(!good.is_worse_than(&good));
        assert_eq!(bad.severity_rank, 3);
        assert_eq!(bad.range, Band::Unhealthy.range());
    }

    // --- Pollutant tests ---

    #[test]
    fn test_pollutant_order_is_fixed() {
        let names: Vec<&str> = Pollutant::ALL.iter().map(|p| p.name()).collect();
        assert_eq!(names, vec!["PM2.5", "PM10", "O3", "NO2", "SO2", "CO"]);
    }

    #[test]
    fn test_pollutant_from_str_variants() {
        assert_eq!("PM10".parse::<Pollutant>(), Ok(Pollutant::Pm10));
        assert_eq!(" pm25 ".parse::<Pollutant>(), Ok(Pollutant::Pm25));
        assert_eq!("No2".parse::<Pollutant>(), Ok(Pollutant::No2));
        let err = "nh3".parse::<Pollutant>().unwrap_err();
        assert!(err.to_string().contains("unknown pollutant"));
    }

    // --- PollutantLevels tests ---

    #[test]
    fn test_levels_default_all_zero() {
        let levels = PollutantLevels::zero();
        assert!(levels.iter().all(|(_, v)| v == 0.0));
        assert_eq!(levels.iter().count(), 6);
        assert_eq!(levels.total(), 0.0);
    }

    #[test]
    fn test_levels_set_clamps_negative_and_nan() {
        let levels = PollutantLevels::zero()
            .with(Pollutant::Pm25, -5.0)
            .with(Pollutant::O3, f64::NAN)
            .with(Pollutant::Co, f64::INFINITY)
            .with(Pollutant::Pm10, 20.0);
        assert_eq!(levels.get(Pollutant::Pm25), 0.0);
        assert_eq!(levels.get(Pollutant::O3), 0.0);
        assert_eq!(levels.get(Pollutant::Co), 0.0);
        assert_eq!(levels.get(Pollutant::Pm10), 20.0);
        assert_eq!(levels.total(), 20.0);
    }

    // --- AqiReading tests ---

    #[test]
    fn test_reading_clamps_aqi() {
        assert_eq!(AqiReading::new(-3, "x", PollutantLevels::zero()).aqi(), 0);
        assert_eq!(AqiReading::new(501, "x", PollutantLevels::zero()).aqi(), 500);
        assert_eq!(AqiReading::new(175, "x", PollutantLevels::zero()).aqi(), 175);
    }

    #[test]
    fn test_reading_observed_at_optional() {
        use time::OffsetDateTime;

        let reading = AqiReading::new(42, "Oslo, NO", PollutantLevels::zero());
        assert!(reading.observed_at().is_none());
        let reading = reading.with_observed_at(OffsetDateTime::UNIX_EPOCH);
        assert_eq!(reading.observed_at(), Some(OffsetDateTime::UNIX_EPOCH));
        assert_eq!(reading.location(), "Oslo, NO");
    }

    // --- UserConstraints tests ---

    #[test]
    fn test_constraints_skip_blank_values() {
        let c = UserConstraints::new(Some("  ".to_string()), Some("Children".to_string()));
        assert_eq!(c.values().collect::<Vec<_>>(), vec!["Children"]);
        assert!(!c.is_empty());
        assert!(UserConstraints::default().is_empty());
    }

    #[test]
    fn test_lifespan_reusable() {
        assert!(!Lifespan::SingleUse.is_reusable());
        assert!(Lifespan::Reusable.is_reusable());
        assert!(Lifespan::ReusableWithFilters.is_reusable());
        assert_eq!(Lifespan::ReusableWithFilters.to_string(), "Reusable with Filters");
    }

    // --- Error tests ---

    #[test]
    fn test_error_display() {
        let err = Error::InvalidInput("aqi is NaN".to_string());
        assert_eq!(err.to_string(), "Invalid input: aqi is NaN");

        let err = Error::CatalogIntegrity(CatalogIssue::UncoveredBand(Band::Hazardous));
        assert!(err.to_string().contains("Hazardous"));
    }

    // --- Serialization tests ---

    #[test]
    fn test_band_serialization() {
        assert_eq!(
            serde_json::to_string(&Band::UnhealthySensitive).unwrap(),
            "\"UnhealthySensitive\""
        );
    }

    #[test]
    fn test_pollutant_serialization_uses_canonical_names() {
        assert_eq!(serde_json::to_string(&Pollutant::Pm25).unwrap(), "\"PM2.5\"");
        assert_eq!(serde_json::to_string(&Pollutant::Co).unwrap(), "\"CO\"");
    }

    #[test]
    fn test_levels_deserialize_fills_missing_and_clamps() {
        let levels: PollutantLevels =
            serde_json::from_str(r#"{"PM2.5": 65.0, "NO2": -2.0}"#).unwrap();
        assert_eq!(levels.get(Pollutant::Pm25), 65.0);
        assert_eq!(levels.get(Pollutant::No2), 0.0);
        assert_eq!(levels.get(Pollutant::Co), 0.0);
    }

    #[test]
    fn test_reading_serialization_omits_unknown_time() {
        let reading = AqiReading::new(42, "Oslo, NO", PollutantLevels::zero());
        let json = serde_json::to_string(&reading).unwrap();
        assert!(json.contains("\"aqi\":42"));
        assert!(json.contains("\"PM2.5\":0.0"));
        assert!(!json.contains("observed_at"));
    }

    #[test]
    fn test_mask_type_deserialization_defaults() {
        let json = r#"{
            "id": "Test",
            "protection_percent": 80,
            "comfort": 3,
            "breathability": 3,
            "lifespan": "Reusable",
            "recommended_bands": ["Good", "Moderate"]
        }"#;
        let mask: MaskType = serde_json::from_str(json).unwrap();
        assert!(mask.covers(Band::Moderate));
        assert!(!mask.covers(Band::Hazardous));
        assert!(mask.unsuitable_for.is_empty());
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn clamp_aqi_stays_in_domain(aqi in any::<i64>()) {
                let clamped = clamp_aqi(aqi);
                prop_assert!(clamped <= AQI_MAX);
            }

            #[test]
            fn levels_never_negative(value in any::<f64>()) {
                let levels = PollutantLevels::zero().with(Pollutant::So2, value);
                prop_assert!(levels.get(Pollutant::So2) >= 0.0);
                prop_assert!(levels.get(Pollutant::So2).is_finite());
            }
        }
    }
}
