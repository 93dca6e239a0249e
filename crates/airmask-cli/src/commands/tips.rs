//! Tips command implementation.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;

use airmask_core::{CannedTips, TipContext, TipGenerator, classify, parse_tip_list};
use airmask_types::{Band, clamp_aqi};

use crate::cli::OutputFormat;
use crate::format::{FormatOptions, csv_escape, format_tips_text};
use crate::util::{parse_aqi_arg, write_output};

#[derive(Debug, Serialize)]
struct TipsView<'a> {
    aqi: u16,
    band: Band,
    source: &'a str,
    tips: &'a [String],
}

/// Show health tips for an AQI.
///
/// With `prompt`, prints the request text for an external generator. With
/// `reply`, reads that generator's answer; an empty or unreadable reply
/// falls back to the built-in advice.
pub async fn cmd_tips(
    aqi: &str,
    prompt: bool,
    reply: Option<&Path>,
    format: OutputFormat,
    output: Option<&PathBuf>,
    opts: &FormatOptions,
) -> Result<()> {
    let value = parse_aqi_arg(aqi).with_context(|| format!("Invalid AQI '{}'", aqi))?;
    let context = TipContext {
        band: classify(value).band,
        aqi: clamp_aqi(value),
    };

    if prompt {
        return write_output(output, &format!("{}\n", context.prompt()));
    }

    let (source, tips) = match reply {
        Some(path) => match read_reply(path).await {
            Ok(tips) if !tips.is_empty() => ("reply", tips),
            Ok(_) => {
                tracing::warn!("No tips found in {}, using built-in advice", path.display());
                ("built-in", CannedTips.tips(context).await?)
            }
            Err(e) => {
                tracing::warn!("{:#}, using built-in advice", e);
                ("built-in", CannedTips.tips(context).await?)
            }
        },
        None => ("built-in", CannedTips.tips(context).await?),
    };

    let content = match format {
        OutputFormat::Json => opts.as_json(&TipsView {
            aqi: context.aqi,
            band: context.band,
            source,
            tips: &tips,
        })?,
        OutputFormat::Csv => {
            let mut csv = String::from("rank,tip\n");
            for (i, tip) in tips.iter().enumerate() {
                csv.push_str(&format!("{},{}\n", i + 1, csv_escape(tip)));
            }
            csv
        }
        OutputFormat::Text => format_tips_text(context.band, &tips, opts),
    };

    write_output(output, &content)
}

async fn read_reply(path: &Path) -> Result<Vec<String>> {
    let text = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read tip reply {}", path.display()))?;
    Ok(parse_tip_list(&text))
}
