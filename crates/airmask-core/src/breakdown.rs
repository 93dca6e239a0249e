//! Relative pollutant shares for charting.
//!
//! Each percentage is rounded on its own, so the sum may be off by a point
//! or two. The output always has six entries in the fixed pollutant order.

use airmask_types::{BreakdownEntry, PollutantLevels};

/// Compute each pollutant's share of the total concentration.
///
/// When every value is zero all percentages are zero.
///
/// ```
/// use airmask_core::breakdown;
/// use airmask_types::{Pollutant, PollutantLevels};
///
/// let levels = PollutantLevels::zero()
///     .with(Pollutant::Pm25, 65.0)
///     .with(Pollutant::Pm10, 89.0);
/// let shares: Vec<u8> = breakdown(&levels).iter().map(|e| e.percentage_of_total).collect();
/// assert_eq!(shares, [42, 58, 0, 0, 0, 0]);
/// ```
pub fn breakdown(levels: &PollutantLevels) -> Vec<BreakdownEntry> {
    // Shares are taken against the largest value so huge finite inputs
    // cannot overflow the total
    let max = levels
        .iter()
        .map(|(_, value)| finite_or_zero(value))
        .fold(0.0, f64::max);
    let scaled_total: f64 = if max > 0.0 {
        levels.iter().map(|(_, value)| finite_or_zero(value) / max).sum()
    } else {
        tracing::trace!("All pollutant levels are zero, breakdown is flat");
        0.0
    };
    levels
        .iter()
        .map(|(name, value)| BreakdownEntry {
            name,
            value,
            percentage_of_total: share(finite_or_zero(value), max, scaled_total),
        })
        .collect()
}

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() { value.max(0.0) } else { 0.0 }
}

fn share(value: f64, max: f64, scaled_total: f64) -> u8 {
    if max <= 0.0 || scaled_total <= 0.0 {
        return 0;
    }
    (value / max / scaled_total * 100.0).round().clamp(0.0, 100.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use airmask_types::Pollutant;

    #[test]
    fn test_all_zero_is_flat() {
        let entries = breakdown(&PollutantLevels::zero());
        assert_eq!(entries.len(), 6);
        assert!(entries.iter().all(|e| e.percentage_of_total == 0));
    }

    #[test]
    fn test_fixed_order_not_sorted_by_value() {
        let levels = PollutantLevels::zero()
            .with(Pollutant::Co, 900.0)
            .with(Pollutant::Pm25, 1.0);
        let names: Vec<_> = breakdown(&levels).iter().map(|e| e.name).collect();
        assert_eq!(names, Pollutant::ALL);
    }

    #[test]
    fn test_single_pollutant_is_hundred() {
        let levels = PollutantLevels::zero().with(Pollutant::O3, 12.5);
        let entries = breakdown(&levels);
        assert_eq!(entries[2].percentage_of_total, 100);
        assert_eq!(entries[2].value, 12.5);
    }

    #[test]
    fn test_rounding_is_not_redistributed() {
        // Three equal thirds round to 33 each
        let levels = PollutantLevels::zero()
            .with(Pollutant::Pm25, 1.0)
            .with(Pollutant::Pm10, 1.0)
            .with(Pollutant::O3, 1.0);
        let sum: u32 = breakdown(&levels)
            .iter()
            .map(|e| u32::from(e.percentage_of_total))
            .sum();
        assert_eq!(sum, 99);
    }

    #[test]
    fn test_huge_values_do_not_overflow() {
        let levels = PollutantLevels::zero()
            .with(Pollutant::Pm25, 1e308)
            .with(Pollutant::Pm10, 1e308);
        assert!(levels.total().is_infinite());

        let shares: Vec<u8> = breakdown(&levels)
            .iter()
            .map(|e| e.percentage_of_total)
            .collect();
        assert_eq!(shares, [50, 50, 0, 0, 0, 0]);
    }

    #[test]
    fn test_tiny_values_still_share() {
        let levels = PollutantLevels::zero()
            .with(Pollutant::No2, 1e-310)
            .with(Pollutant::So2, 3e-310);
        let entries = breakdown(&levels);
        assert_eq!(entries[3].percentage_of_total, 25);
        assert_eq!(entries[4].percentage_of_total, 75);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn percentages_sum_near_hundred(values in prop::array::uniform6(0.0f64..f64::MAX)) {
                let mut levels = PollutantLevels::zero();
                for (p, v) in Pollutant::ALL.into_iter().zip(values) {
                    levels.set(p, v);
                }
                let sum: u32 = breakdown(&levels)
                    .iter()
                    .map(|e| u32::from(e.percentage_of_total))
                    .sum();
                if values.iter().any(|v| *v > 0.0) {
                    prop_assert!((97..=103).contains(&sum), "sum was {}", sum);
                } else {
                    prop_assert_eq!(sum, 0);
                }
            }
        }
    }
}
