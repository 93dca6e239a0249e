//! Masks command implementation.

use std::path::PathBuf;

use anyhow::{Result, bail};

use airmask_core::{CatalogFilter, MaskCatalog};
use airmask_types::MaskType;

use crate::cli::OutputFormat;
use crate::format::{FormatOptions, format_mask_detail, format_masks_csv, format_masks_table};
use crate::util::write_output;

pub fn cmd_masks(
    catalog: &MaskCatalog,
    search: Option<&str>,
    filter: CatalogFilter,
    show: Option<&str>,
    format: OutputFormat,
    output: Option<&PathBuf>,
    opts: &FormatOptions,
) -> Result<()> {
    if let Some(id) = show {
        let Some(mask) = catalog.get(id) else {
            bail!(
                "No mask named '{}'. Run 'airmask masks' to list the catalog.",
                id
            );
        };
        let content = match format {
            OutputFormat::Json => opts.as_json(mask)?,
            OutputFormat::Csv => format_masks_csv(&[mask]),
            OutputFormat::Text => format_mask_detail(mask, opts),
        };
        return write_output(output, &content);
    }

    let masks: Vec<&MaskType> = catalog.search(search.unwrap_or(""), filter).collect();
    tracing::debug!("{} of {} masks match", masks.len(), catalog.len());

    let content = match format {
        OutputFormat::Json => opts.as_json(&masks)?,
        OutputFormat::Csv => format_masks_csv(&masks),
        OutputFormat::Text => format_masks_table(&masks, opts),
    };

    write_output(output, &content)
}
