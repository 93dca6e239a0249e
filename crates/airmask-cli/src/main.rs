mod cli;
mod commands;
mod config;
mod format;
mod style;
mod util;

use std::io;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
use commands::{
    ReportArgs, cmd_breakdown, cmd_classify, cmd_config, cmd_masks, cmd_recommend, cmd_report,
    cmd_tips,
};
use config::{Config, resolve_format};
use format::FormatOptions;
use util::load_catalog;

#[tokio::main]
async fn main() -> Result<()> {
    human_panic::setup_panic!();

    let cli = Cli::parse();

    // Handle completions command early (before tracing init)
    if let Commands::Completions { shell } = cli.command {
        let mut cmd = Cli::command();
        clap_complete::generate(shell, &mut cmd, "airmask", &mut io::stdout());
        return Ok(());
    }

    // When quiet mode is enabled, suppress info-level logging
    let filter = if cli.quiet {
        EnvFilter::new("warn")
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    // Logs go to stderr so they never mix with command output
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let config = Config::load();
    let no_color = cli.no_color || config.no_color;
    let compact = cli.compact || config.compact;
    let opts = FormatOptions::new(no_color, cli.style).with_compact(compact);
    let output = cli.output.as_ref();

    if let Some(path) = output {
        tracing::debug!("Output will be written to: {}", path.display());
    }

    match cli.command {
        Commands::Classify { aqi, format } => {
            let format = resolve_format(format.format, cli.json, &config);
            cmd_classify(&aqi, format, output, &opts)?;
        }
        Commands::Recommend {
            aqi,
            constraints,
            format,
        } => {
            let format = resolve_format(format.format, cli.json, &config);
            let catalog = load_catalog(&config)?;
            let constraints =
                constraints.resolve(config.activity.as_deref(), config.age_group.as_deref());
            cmd_recommend(
                &aqi,
                &catalog,
                constraints.as_ref(),
                format,
                output,
                &opts,
            )?;
        }
        Commands::Breakdown { pollutants, format } => {
            let format = resolve_format(format.format, cli.json, &config);
            cmd_breakdown(&pollutants, format, output, &opts, cli.quiet)?;
        }
        Commands::Report {
            input,
            openweather,
            location,
            constraints,
            format,
        } => {
            let format = resolve_format(format.format, cli.json, &config);
            let catalog = load_catalog(&config)?;
            let constraints =
                constraints.resolve(config.activity.as_deref(), config.age_group.as_deref());
            let args = ReportArgs {
                input: &input,
                openweather,
                location: location.as_deref(),
                constraints: constraints.as_ref(),
            };
            cmd_report(args, &catalog, format, output, &opts).await?;
        }
        Commands::Masks {
            search,
            filter,
            show,
            format,
        } => {
            let format = resolve_format(format.format, cli.json, &config);
            let catalog = load_catalog(&config)?;
            cmd_masks(
                &catalog,
                search.as_deref(),
                filter,
                show.as_deref(),
                format,
                output,
                &opts,
            )?;
        }
        Commands::Tips {
            aqi,
            prompt,
            reply,
            format,
        } => {
            let format = resolve_format(format.format, cli.json, &config);
            cmd_tips(&aqi, prompt, reply.as_deref(), format, output, &opts).await?;
        }
        Commands::Config { action } => {
            cmd_config(action, opts.no_color)?;
        }
        Commands::Completions { .. } => {
            // Already handled above
            unreachable!()
        }
    }

    Ok(())
}
