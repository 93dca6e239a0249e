//! One-shot assessment of a reading.
//!
//! [`assess`] threads a single immutable [`AqiReading`] through
//! classification, recommendation and breakdown, so the tier driving the
//! recommendation always comes from the same reading as the chart data.

use serde::Serialize;

use airmask_types::{AqiReading, AqiTier, BreakdownEntry, Recommendation, UserConstraints};

use crate::breakdown::breakdown;
use crate::catalog::MaskCatalog;
use crate::classify::classify_reading;
use crate::error::Result;
use crate::recommend::recommend;

/// Everything the presentation layer needs for one reading.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Assessment {
    pub reading: AqiReading,
    pub tier: AqiTier,
    pub recommendation: Recommendation,
    pub breakdown: Vec<BreakdownEntry>,
}

/// Classify, recommend and break down one reading.
///
/// # Errors
///
/// Only fails when `catalog` does not cover the reading's band.
pub fn assess(
    reading: AqiReading,
    catalog: &MaskCatalog,
    constraints: Option<&UserConstraints>,
) -> Result<Assessment> {
    let tier = classify_reading(&reading);
    let recommendation = recommend(tier, catalog, constraints)?;
    let breakdown = breakdown(reading.pollutants());
    tracing::debug!(
        "Assessed {} (AQI {}): {}",
        reading.location(),
        reading.aqi(),
        tier.label()
    );
    Ok(Assessment {
        reading,
        tier,
        recommendation,
        breakdown,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use airmask_types::{Band, Pollutant, PollutantLevels};

    #[test]
    fn test_assess_threads_one_reading() {
        let levels = PollutantLevels::zero()
            .with(Pollutant::Pm25, 65.0)
            .with(Pollutant::Pm10, 89.0);
        let reading = AqiReading::new(175, "Lahore, PK", levels);
        let assessment = assess(reading.clone(), &MaskCatalog::builtin(), None).unwrap();

        assert_eq!(assessment.reading, reading);
        assert_eq!(assessment.tier.band, Band::Unhealthy);
        assert_eq!(assessment.recommendation.band, assessment.tier.band);
        assert_eq!(assessment.breakdown[0].value, 65.0);
    }

    #[test]
    fn test_assessment_serializes() {
        let reading = AqiReading::new(42, "Oslo, NO", PollutantLevels::zero());
        let assessment = assess(reading, &MaskCatalog::builtin(), None).unwrap();
        let json = serde_json::to_value(&assessment).unwrap();

        assert_eq!(json["tier"]["band"], "Good");
        assert_eq!(json["recommendation"]["primary"]["id"], "Cloth");
        assert_eq!(json["breakdown"].as_array().unwrap().len(), 6);
        assert_eq!(json["reading"]["location"], "Oslo, NO");
    }

    #[test]
    fn test_assess_propagates_catalog_error() {
        let empty = MaskCatalog::from_unchecked(Vec::new());
        let reading = AqiReading::new(42, "Nowhere", PollutantLevels::zero());
        assert!(assess(reading, &empty, None).is_err());
    }
}
