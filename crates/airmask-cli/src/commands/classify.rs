//! Classify command implementation.

use std::path::PathBuf;

use anyhow::Result;

use airmask_core::classify;
use airmask_types::clamp_aqi;

use crate::cli::OutputFormat;
use crate::format::{
    FormatOptions, TierView, format_tier_csv, format_tier_text, format_unknown_csv,
    format_unknown_text,
};
use crate::util::{parse_aqi_arg, write_output};

/// Classify a raw AQI argument.
///
/// Unusable input is not an error here: it is reported as the neutral
/// "unknown" state so scripts can still parse the output.
pub fn cmd_classify(
    aqi: &str,
    format: OutputFormat,
    output: Option<&PathBuf>,
    opts: &FormatOptions,
) -> Result<()> {
    let content = match parse_aqi_arg(aqi) {
        Ok(value) => {
            let tier = classify(value);
            let clamped = clamp_aqi(value);
            tracing::debug!("AQI {} classified as {:?}", value, tier.band);
            match format {
                OutputFormat::Json => opts.as_json(&TierView::new(clamped, &tier))?,
                OutputFormat::Csv => format_tier_csv(clamped, &tier),
                OutputFormat::Text => format_tier_text(clamped, &tier, opts),
            }
        }
        Err(e) => {
            tracing::warn!("Cannot classify '{}': {}", aqi, e);
            match format {
                OutputFormat::Json => opts.as_json(&TierView::unknown(e.to_string()))?,
                OutputFormat::Csv => format_unknown_csv(),
                OutputFormat::Text => format_unknown_text(&e.to_string(), opts),
            }
        }
    };

    write_output(output, &content)
}
