//! Health tips side-channel.
//!
//! Tip generation is independent of mask recommendation: a generator only
//! ever sees the band and the AQI number, and its failures never reach the
//! recommendation path.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use airmask_types::{AqiReading, Band};

use crate::classify::classify_reading;
use crate::error::Result;

/// The only context handed to a tip generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TipContext {
    pub band: Band,
    pub aqi: u16,
}

impl TipContext {
    pub fn from_reading(reading: &AqiReading) -> Self {
        Self {
            band: classify_reading(reading).band,
            aqi: reading.aqi(),
        }
    }

    /// Request text for a free-text generator.
    ///
    /// Asks for a dash-prefixed list so the reply can be read back with
    /// [`parse_tip_list`].
    pub fn prompt(&self) -> String {
        format!(
            "Generate 5-7 practical health and safety tips for dealing with air pollution \
             at AQI level {} ({}). Include:\n\
             - Indoor air quality improvements\n\
             - Outdoor activity recommendations\n\
             - Breathing exercises or techniques\n\
             - Dietary suggestions for lung health\n\
             - When to stay indoors\n\
             - Hydration and general wellness tips\n\
             Format as a simple list with each tip on a new line, starting with a dash (-).",
            self.aqi,
            self.band.label()
        )
    }
}

/// Extract tips from a dash-prefixed list.
///
/// Lines not starting with `-` (after trimming) are ignored.
///
/// ```
/// use airmask_core::parse_tip_list;
///
/// let tips = parse_tip_list("Here you go:\n- Stay hydrated\n  -  Close windows \n-\n");
/// assert_eq!(tips, ["Stay hydrated", "Close windows"]);
/// ```
pub fn parse_tip_list(text: &str) -> Vec<String> {
    text.lines()
        .filter_map(|line| line.trim().strip_prefix('-'))
        .map(str::trim)
        .filter(|tip| !tip.is_empty())
        .map(str::to_string)
        .collect()
}

/// Produces health tips for a tier.
#[async_trait]
pub trait TipGenerator: Send + Sync {
    async fn tips(&self, context: TipContext) -> Result<Vec<String>>;
}

/// Deterministic generator returning the band's static advice.
#[derive(Debug, Clone, Copy, Default)]
pub struct CannedTips;

#[async_trait]
impl TipGenerator for CannedTips {
    async fn tips(&self, context: TipContext) -> Result<Vec<String>> {
        Ok(context
            .band
            .advice()
            .iter()
            .map(|s| s.to_string())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::MaskCatalog;
    use crate::error::Error;
    use crate::recommend::recommend;
    use airmask_types::PollutantLevels;

    struct FailingTips;

    #[async_trait]
    impl TipGenerator for FailingTips {
        async fn tips(&self, _context: TipContext) -> Result<Vec<String>> {
            Err(Error::no_data("generator unavailable"))
        }
    }

    #[test]
    fn test_context_from_reading() {
        let reading = AqiReading::new(175, "Lahore, PK", PollutantLevels::zero());
        let ctx = TipContext::from_reading(&reading);
        assert_eq!(ctx, TipContext { band: Band::Unhealthy, aqi: 175 });
    }

    #[test]
    fn test_prompt_mentions_only_band_and_aqi() {
        let ctx = TipContext { band: Band::Hazardous, aqi: 420 };
        let prompt = ctx.prompt();
        assert!(prompt.contains("420"));
        assert!(prompt.contains("Hazardous"));
        assert!(!prompt.contains("PM2.5"));
        assert!(!prompt.contains("N95"));
    }

    #[test]
    fn test_parse_tip_list() {
        let text = "Tips:\n- Drink water\nnot a tip\n   - Use an air purifier\n- \n";
        assert_eq!(parse_tip_list(text), ["Drink water", "Use an air purifier"]);
        assert!(parse_tip_list("").is_empty());
    }

    #[tokio::test]
    async fn test_canned_tips_follow_band_advice() {
        let ctx = TipContext { band: Band::Good, aqi: 20 };
        let tips = CannedTips.tips(ctx).await.unwrap();
        assert_eq!(tips.len(), Band::Good.advice().len());
        assert_eq!(tips[0], "Perfect for outdoor activities");
    }

    #[tokio::test]
    async fn test_generator_failure_does_not_affect_recommendation() {
        let reading = AqiReading::new(175, "Lahore, PK", PollutantLevels::zero());
        let ctx = TipContext::from_reading(&reading);

        assert!(FailingTips.tips(ctx).await.is_err());
        let rec = recommend(classify_reading(&reading), &MaskCatalog::builtin(), None).unwrap();
        assert_eq!(rec.primary.id, "KN95");
    }
}
