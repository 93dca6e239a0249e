//! Breakdown command implementation.

use std::path::PathBuf;

use anyhow::Result;

use airmask_core::{breakdown, normalize_pairs};

use crate::cli::OutputFormat;
use crate::format::{
    FormatOptions, format_adjustments, format_breakdown_csv, format_breakdown_text,
};
use crate::util::write_output;

/// Break `NAME=VALUE` pairs down into per-pollutant shares.
///
/// Values that fail to parse are treated like non-numeric provider fields:
/// they become zero and are reported on stderr unless `quiet` is set.
pub fn cmd_breakdown(
    pollutants: &[(String, String)],
    format: OutputFormat,
    output: Option<&PathBuf>,
    opts: &FormatOptions,
    quiet: bool,
) -> Result<()> {
    let normalized = normalize_pairs(
        pollutants
            .iter()
            .map(|(name, value)| (name.as_str(), value.parse::<f64>().ok())),
    );

    if !quiet {
        eprint!("{}", format_adjustments(&normalized.adjustments, opts));
    }

    let entries = breakdown(&normalized.levels);
    let content = match format {
        OutputFormat::Json => opts.as_json(&entries)?,
        OutputFormat::Csv => format_breakdown_csv(&entries),
        OutputFormat::Text => format_breakdown_text(&entries, opts),
    };

    write_output(output, &content)
}
