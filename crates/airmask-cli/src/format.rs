//! Output formatting utilities for text, JSON, and CSV output.
//!
//! This is the only place concentrations are converted for display: CO is
//! shown in mg/m³, everything else in µg/m³.

use anyhow::Result;
use serde::Serialize;
use tabled::{Table, Tabled};
use time::format_description::well_known::Rfc3339;

use airmask_core::{Adjustment, Assessment};
use airmask_types::{AqiReading, AqiTier, Band, BreakdownEntry, MaskType, Pollutant, Recommendation};

use crate::cli::StyleMode;
use crate::style;

/// Formatting options for output.
#[derive(Debug, Clone, Copy)]
pub struct FormatOptions {
    /// Disable colored output.
    pub no_color: bool,
    /// Use compact JSON output (no pretty-printing).
    pub compact: bool,
    /// Visual styling mode.
    pub style: StyleMode,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            no_color: false,
            compact: false,
            style: StyleMode::Rich,
        }
    }
}

impl FormatOptions {
    pub fn new(no_color: bool, style: StyleMode) -> Self {
        // Plain mode automatically disables colors for pipe-friendliness
        Self {
            no_color: no_color || style == StyleMode::Plain,
            compact: false,
            style,
        }
    }

    /// Check if rich styling is enabled.
    pub fn is_rich(&self) -> bool {
        self.style == StyleMode::Rich
    }

    /// Check if plain styling is enabled (no decorations).
    pub fn is_plain(&self) -> bool {
        self.style == StyleMode::Plain
    }

    /// Create with compact JSON option.
    pub fn with_compact(mut self, compact: bool) -> Self {
        self.compact = compact;
        self
    }

    /// Serialize value to JSON string, respecting compact option.
    pub fn as_json<T: Serialize>(&self, value: &T) -> Result<String> {
        let json = if self.compact {
            serde_json::to_string(value)?
        } else {
            serde_json::to_string_pretty(value)?
        };
        Ok(json + "\n")
    }

    /// Format a concentration with its display unit.
    /// Uses ASCII-only units for Plain mode (pipe-friendly).
    #[must_use]
    pub fn format_concentration(&self, pollutant: Pollutant, ug_m3: f64) -> String {
        let (value, unit) = display_concentration(pollutant, ug_m3);
        let unit = if self.is_plain() {
            unit.replace('µ', "u").replace('³', "3")
        } else {
            unit.to_string()
        };
        format!("{:.1} {}", value, unit)
    }

    fn kv(&self, key: &str, value: &str) -> String {
        format!("  {:>12}:  {}\n", style::format_key(key, self.no_color), value)
    }
}

/// Convert a stored µg/m³ value to its display value and unit.
///
/// CO is divided by 1000 and shown in mg/m³; every other pollutant is
/// returned unchanged.
#[must_use]
pub fn display_concentration(pollutant: Pollutant, ug_m3: f64) -> (f64, &'static str) {
    match pollutant {
        Pollutant::Co => (ug_m3 / 1000.0, "mg/m³"),
        _ => (ug_m3, "µg/m³"),
    }
}

/// Escape a string for CSV output.
/// Wraps the value in quotes if it contains commas, quotes, or newlines.
#[must_use]
pub fn csv_escape(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') || s.contains('\r') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

// ============================================================================
// Tier formatting
// ============================================================================

/// Serializable view of a classification.
#[derive(Debug, Serialize)]
pub struct TierView<'a> {
    pub aqi: Option<u16>,
    pub band: Option<Band>,
    pub label: &'a str,
    pub range: Option<String>,
    pub severity_rank: Option<u8>,
    pub color: Option<&'a str>,
    pub description: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<'a> TierView<'a> {
    pub fn new(aqi: u16, tier: &AqiTier) -> Self {
        Self {
            aqi: Some(aqi),
            band: Some(tier.band),
            label: tier.label(),
            range: Some(tier.range.to_string()),
            severity_rank: Some(tier.severity_rank),
            color: Some(tier.band.hex_color()),
            description: Some(tier.band.description()),
            error: None,
        }
    }

    /// The neutral state shown for unusable input.
    pub fn unknown(error: String) -> Self {
        Self {
            aqi: None,
            band: None,
            label: "Unknown",
            range: None,
            severity_rank: None,
            color: None,
            description: None,
            error: Some(error),
        }
    }
}

#[must_use]
pub fn format_tier_text(aqi: u16, tier: &AqiTier, opts: &FormatOptions) -> String {
    let band = tier.band;
    let label = style::format_band_colored(band, opts.no_color);
    if !opts.is_rich() {
        return format!("AQI {}: {} ({})\n", aqi, label, tier.range);
    }

    let mut output = String::new();
    let aqi_display = style::paint_band(&aqi.to_string(), band, opts.no_color);
    output.push_str(&format!(
        "  AQI {}  {} {}  {}\n\n",
        aqi_display,
        band.emoji(),
        label,
        style::format_severity_bar(band, opts.style, opts.no_color)
    ));
    output.push_str(&opts.kv("Range", &tier.range.to_string()));
    output.push_str(&opts.kv("Air quality", band.description()));
    output.push_str(&opts.kv("Health", band.health_effects()));
    output.push_str(&opts.kv("At risk", band.sensitive_groups()));
    output
}

#[must_use]
pub fn format_unknown_text(error: &str, opts: &FormatOptions) -> String {
    let message = format!("AQI unknown ({})", error);
    format!("{}\n", style::format_warning(&message, opts.no_color))
}

const TIER_CSV_HEADER: &str = "aqi,band,label,range,severity_rank";

#[must_use]
pub fn format_tier_csv(aqi: u16, tier: &AqiTier) -> String {
    format!(
        "{}\n{},{:?},{},{},{}\n",
        TIER_CSV_HEADER,
        aqi,
        tier.band,
        csv_escape(tier.label()),
        tier.range,
        tier.severity_rank
    )
}

/// The neutral "unknown" row, with the same columns as [`format_tier_csv`].
#[must_use]
pub fn format_unknown_csv() -> String {
    format!("{}\n,,Unknown,,\n", TIER_CSV_HEADER)
}

// ============================================================================
// Recommendation formatting
// ============================================================================

#[must_use]
pub fn format_recommendation_text(rec: &Recommendation, opts: &FormatOptions) -> String {
    let mut output = String::new();
    let primary = &rec.primary;

    output.push_str(&format!(
        "  Recommended for {}: {} ({} protection)\n",
        style::format_band_colored(rec.band, opts.no_color),
        primary.id,
        style::format_protection_colored(primary.protection_percent, opts.no_color)
    ));
    if opts.is_rich() && !primary.description.is_empty() {
        output.push_str(&format!("    {}\n", primary.description));
    }

    if !rec.alternatives.is_empty() {
        let alternatives: Vec<String> = rec
            .alternatives
            .iter()
            .map(|m| format!("{} ({}%)", m.id, m.protection_percent))
            .collect();
        output.push_str(&format!("  Alternatives: {}\n", alternatives.join(", ")));
    }

    for warning in &rec.warnings {
        output.push_str(&format!(
            "  {}\n",
            style::format_warning(&warning.to_string(), opts.no_color)
        ));
    }
    output
}

#[must_use]
pub fn format_recommendation_csv(rec: &Recommendation) -> String {
    let mut output = String::from("rank,id,protection_percent,comfort,breathability,warnings\n");
    for (rank, mask) in rec.ranked().enumerate() {
        let warnings: Vec<&str> = rec
            .warnings
            .iter()
            .filter(|w| w.mask_id == mask.id)
            .map(|w| w.contraindication.as_str())
            .collect();
        output.push_str(&format!(
            "{},{},{},{},{},{}\n",
            rank + 1,
            csv_escape(&mask.id),
            mask.protection_percent,
            mask.comfort,
            mask.breathability,
            csv_escape(&warnings.join("; "))
        ));
    }
    output
}

// ============================================================================
// Breakdown formatting
// ============================================================================

#[must_use]
pub fn format_breakdown_text(entries: &[BreakdownEntry], opts: &FormatOptions) -> String {
    let mut output = String::new();
    if entries.iter().all(|e| e.percentage_of_total == 0) {
        output.push_str("  No pollutant data available\n");
        return output;
    }
    for entry in entries {
        let bar = if opts.is_plain() {
            String::new()
        } else {
            style::format_share_bar(entry.percentage_of_total, 20, opts.style)
        };
        output.push_str(&format!(
            "  {:<6} {:>14} {:>4}%  {}\n",
            entry.name.name(),
            opts.format_concentration(entry.name, entry.value),
            entry.percentage_of_total,
            bar
        ));
    }
    output
}

#[must_use]
pub fn format_breakdown_csv(entries: &[BreakdownEntry]) -> String {
    let mut output = String::from("pollutant,value,unit,percentage_of_total\n");
    for entry in entries {
        let (value, unit) = display_concentration(entry.name, entry.value);
        output.push_str(&format!(
            "{},{},{},{}\n",
            entry.name.name(),
            value,
            unit,
            entry.percentage_of_total
        ));
    }
    output
}

/// Format normalization adjustments as warnings.
#[must_use]
pub fn format_adjustments(adjustments: &[Adjustment], opts: &FormatOptions) -> String {
    adjustments
        .iter()
        .filter(|a| !matches!(a, Adjustment::Missing(_)))
        .map(|a| format!("{}\n", style::format_warning(&a.to_string(), opts.no_color)))
        .collect()
}

// ============================================================================
// Assessment formatting
// ============================================================================

fn observed_at_rfc3339(reading: &AqiReading) -> Option<String> {
    reading
        .observed_at()
        .and_then(|t| t.format(&Rfc3339).ok())
}

#[must_use]
pub fn format_assessment_text(assessment: &Assessment, opts: &FormatOptions) -> String {
    let reading = &assessment.reading;
    let mut output = String::new();

    output.push_str(&style::format_title(
        reading.location(),
        opts.style,
        opts.no_color,
    ));
    output.push_str("\n\n");
    output.push_str(&format_tier_text(reading.aqi(), &assessment.tier, opts));
    let observed = observed_at_rfc3339(reading).unwrap_or_else(|| "unknown".to_string());
    output.push_str(&opts.kv("Observed", &observed));
    output.push('\n');

    output.push_str(&format_recommendation_text(&assessment.recommendation, opts));
    output.push('\n');

    output.push_str("  Pollutants\n");
    output.push_str(&format_breakdown_text(&assessment.breakdown, opts));
    output.push('\n');

    output.push_str("  Advice\n");
    for advice in assessment.tier.band.advice() {
        output.push_str(&format!("    - {}\n", advice));
    }
    output
}

#[must_use]
pub fn format_assessment_csv(assessment: &Assessment) -> String {
    let reading = &assessment.reading;
    let mut output = String::from(
        "location,aqi,band,primary_mask,observed_at,PM2.5,PM10,O3,NO2,SO2,CO\n",
    );
    let values: Vec<String> = reading
        .pollutants()
        .iter()
        .map(|(_, v)| v.to_string())
        .collect();
    output.push_str(&format!(
        "{},{},{:?},{},{},{}\n",
        csv_escape(reading.location()),
        reading.aqi(),
        assessment.tier.band,
        csv_escape(&assessment.recommendation.primary.id),
        observed_at_rfc3339(reading).unwrap_or_default(),
        values.join(",")
    ));
    output
}

// ============================================================================
// Mask catalog formatting
// ============================================================================

#[derive(Tabled)]
struct MaskRow {
    #[tabled(rename = "Mask")]
    id: String,
    #[tabled(rename = "Protection")]
    protection: String,
    #[tabled(rename = "Comfort")]
    comfort: String,
    #[tabled(rename = "Breathability")]
    breathability: String,
    #[tabled(rename = "Lifespan")]
    lifespan: String,
    #[tabled(rename = "Recommended for")]
    bands: String,
}

fn band_ranges(mask: &MaskType) -> String {
    mask.recommended_bands
        .iter()
        .map(|b| b.range().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

#[must_use]
pub fn format_masks_table(masks: &[&MaskType], opts: &FormatOptions) -> String {
    if masks.is_empty() {
        return "No masks match\n".to_string();
    }
    let rows: Vec<MaskRow> = masks
        .iter()
        .map(|m| MaskRow {
            id: m.id.clone(),
            protection: style::format_protection_colored(m.protection_percent, opts.no_color),
            comfort: style::format_rating(m.comfort, opts.style),
            breathability: style::format_rating(m.breathability, opts.style),
            lifespan: m.lifespan.to_string(),
            bands: band_ranges(m),
        })
        .collect();
    let mut table = Table::new(rows);
    style::apply_table_style(&mut table, opts.style);
    let plural = if masks.len() == 1 { "" } else { "s" };
    format!("{}\nShowing {} mask{}\n", table, masks.len(), plural)
}

#[must_use]
pub fn format_masks_csv(masks: &[&MaskType]) -> String {
    let mut output = String::from(
        "id,protection_percent,comfort,breathability,lifespan,layers,recommended_bands\n",
    );
    for m in masks {
        let bands: Vec<String> = m
            .recommended_bands
            .iter()
            .map(|b| format!("{:?}", b))
            .collect();
        output.push_str(&format!(
            "{},{},{},{},{},{},{}\n",
            csv_escape(&m.id),
            m.protection_percent,
            m.comfort,
            m.breathability,
            csv_escape(&m.lifespan.to_string()),
            m.layers,
            csv_escape(&bands.join(";"))
        ));
    }
    output
}

fn list_or_dash(items: &[String]) -> String {
    if items.is_empty() {
        "-".to_string()
    } else {
        items.join(", ")
    }
}

#[must_use]
pub fn format_mask_detail(mask: &MaskType, opts: &FormatOptions) -> String {
    let mut output = style::format_title(&mask.id, opts.style, opts.no_color);
    output.push_str("\n\n");
    if !mask.description.is_empty() {
        output.push_str(&format!("  {}\n\n", mask.description));
    }
    output.push_str(&opts.kv(
        "Protection",
        &style::format_protection_colored(mask.protection_percent, opts.no_color),
    ));
    output.push_str(&opts.kv("Comfort", &style::format_rating(mask.comfort, opts.style)));
    output.push_str(&opts.kv(
        "Breathability",
        &style::format_rating(mask.breathability, opts.style),
    ));
    output.push_str(&opts.kv("Lifespan", &mask.lifespan.to_string()));
    if mask.layers > 0 {
        output.push_str(&opts.kv("Layers", &mask.layers.to_string()));
    }
    output.push_str(&opts.kv("AQI", &band_ranges(mask)));
    output.push_str(&opts.kv("Best for", &list_or_dash(&mask.best_for)));
    output.push_str(&opts.kv("Suitable for", &list_or_dash(&mask.suitability)));
    output.push_str(&opts.kv("Avoid for", &list_or_dash(&mask.unsuitable_for)));
    output.push_str(&opts.kv("Pros", &list_or_dash(&mask.pros)));
    output.push_str(&opts.kv("Cons", &list_or_dash(&mask.cons)));
    output
}

// ============================================================================
// Tips formatting
// ============================================================================

#[must_use]
pub fn format_tips_text(band: Band, tips: &[String], opts: &FormatOptions) -> String {
    let mut output = format!(
        "  Health tips for {}\n",
        style::format_band_colored(band, opts.no_color)
    );
    if tips.is_empty() {
        output.push_str("  No tips available\n");
    }
    for (i, tip) in tips.iter().enumerate() {
        output.push_str(&format!("  {}. {}\n", i + 1, tip));
    }
    output
}
