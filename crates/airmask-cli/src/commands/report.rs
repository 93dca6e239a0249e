//! Report command implementation.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use airmask_core::{JsonFileSource, MaskCatalog, ReadingSource, assess, provider};
use airmask_types::{AqiReading, UserConstraints};

use crate::cli::OutputFormat;
use crate::format::{FormatOptions, format_assessment_csv, format_assessment_text};
use crate::util::write_output;

/// Location used when neither the input nor `--location` names one.
const UNKNOWN_LOCATION: &str = "Unknown location";

/// Arguments for the report command.
pub struct ReportArgs<'a> {
    pub input: &'a Path,
    pub openweather: bool,
    pub location: Option<&'a str>,
    pub constraints: Option<&'a UserConstraints>,
}

pub async fn cmd_report(
    args: ReportArgs<'_>,
    catalog: &MaskCatalog,
    format: OutputFormat,
    output: Option<&PathBuf>,
    opts: &FormatOptions,
) -> Result<()> {
    let location = args.location.unwrap_or(UNKNOWN_LOCATION);
    let reading = load_reading(args.input, args.openweather, location).await?;
    let assessment = assess(reading, catalog, args.constraints)
        .context("Failed to assess reading")?;

    let content = match format {
        OutputFormat::Json => opts.as_json(&assessment)?,
        OutputFormat::Csv => format_assessment_csv(&assessment),
        OutputFormat::Text => format_assessment_text(&assessment, opts),
    };

    write_output(output, &content)
}

async fn load_reading(input: &Path, openweather: bool, location: &str) -> Result<AqiReading> {
    if openweather {
        let payload = tokio::fs::read_to_string(input)
            .await
            .with_context(|| format!("Failed to read {}", input.display()))?;
        return provider::translate_str(&payload, location)
            .with_context(|| format!("Failed to translate provider payload {}", input.display()));
    }

    let source = JsonFileSource::new(input);
    tracing::debug!("Fetching reading from {} source", source.name());
    source
        .fetch(location)
        .await
        .with_context(|| format!("Failed to load reading {}", input.display()))
}
