//! Recommend command implementation.

use std::path::PathBuf;

use anyhow::{Context, Result};

use airmask_core::{MaskCatalog, classify, recommend};
use airmask_types::UserConstraints;

use crate::cli::OutputFormat;
use crate::format::{FormatOptions, format_recommendation_csv, format_recommendation_text};
use crate::util::{parse_aqi_arg, write_output};

pub fn cmd_recommend(
    aqi: &str,
    catalog: &MaskCatalog,
    constraints: Option<&UserConstraints>,
    format: OutputFormat,
    output: Option<&PathBuf>,
    opts: &FormatOptions,
) -> Result<()> {
    let value = parse_aqi_arg(aqi).with_context(|| format!("Invalid AQI '{}'", aqi))?;
    let recommendation = recommend(classify(value), catalog, constraints)
        .context("Failed to build recommendation")?;

    let content = match format {
        OutputFormat::Json => opts.as_json(&recommendation)?,
        OutputFormat::Csv => format_recommendation_csv(&recommendation),
        OutputFormat::Text => format_recommendation_text(&recommendation, opts),
    };

    write_output(output, &content)
}
