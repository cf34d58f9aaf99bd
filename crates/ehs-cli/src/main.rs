//! Command-line interface for environmental safety recommendations.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `evaluate` | Evaluate noise, oxygen, and air quality readings |
//! | `report` | Full environment report from live or manual weather |
//! | `profile` | Manage the stored health profile |
//! | `config` | Manage CLI configuration |
//! | `completions` | Generate shell completions |
//!
//! # Configuration
//!
//! Settings are stored in `~/.config/ehs/config.toml` (or the path in
//! `EHS_CONFIG`). The OpenWeather key can also come from
//! `OPENWEATHER_API_KEY`.

mod cli;
mod commands;
mod config;
mod format;
mod util;

use std::io;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use ehs_core::Priority;

use crate::cli::{Cli, Commands, OutputArgs};
use crate::commands::{
    EvaluateArgs, ReportArgs, cmd_config, cmd_evaluate, cmd_profile, cmd_report,
};
use crate::config::Config;
use crate::format::FormatOptions;
use crate::util::resolve_format;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Handle completions command early (before tracing init)
    if let Commands::Completions { shell } = cli.command {
        let mut cmd = Cli::command();
        clap_complete::generate(shell, &mut cmd, "ehs", &mut io::stdout());
        return Ok(());
    }

    let filter = if cli.quiet {
        EnvFilter::new("warn")
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let config = Config::load();
    let no_color = cli.no_color || config.no_color;
    let output = cli.output.as_ref();

    let options = |args: &OutputArgs| {
        FormatOptions::new(no_color)
            .with_compact(cli.compact)
            .with_no_header(args.no_header)
    };
    let priority = |args: &OutputArgs| {
        if args.most_severe {
            Priority::MostSevere
        } else {
            Priority::LastMatch
        }
    };

    match cli.command {
        Commands::Evaluate {
            noise,
            exposure,
            oxygen,
            aqi,
            explain,
            output: out_args,
        } => {
            let format = resolve_format(out_args.format, cli.json, &config);
            let args = EvaluateArgs {
                noise,
                exposure,
                oxygen,
                aqi,
                explain,
                priority: priority(&out_args),
            };
            cmd_evaluate(args, format, output, &options(&out_args))?;
        }
        Commands::Report {
            weather,
            noise_db,
            noise_minutes,
            aqi,
            output: out_args,
        } => {
            let format = resolve_format(out_args.format, cli.json, &config);
            let args = ReportArgs {
                weather,
                noise_db,
                noise_minutes,
                aqi,
                priority: priority(&out_args),
            };
            let opts = options(&out_args);
            cmd_report(
                args,
                config.profile.clone(),
                config.city.clone(),
                config.api_key.clone(),
                format,
                output,
                &opts,
            )
            .await?;
        }
        Commands::Profile { action } => {
            cmd_profile(action, cli.quiet)?;
        }
        Commands::Config { action } => {
            cmd_config(action, cli.quiet)?;
        }
        Commands::Completions { .. } => {
            // Already handled above
            unreachable!()
        }
    }

    Ok(())
}
