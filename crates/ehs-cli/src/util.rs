//! Utility functions for CLI operations.

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::ValueEnum;

use crate::cli::OutputFormat;
use crate::config::Config;

/// Write output to file or stdout.
pub fn write_output(output: Option<&PathBuf>, content: &str) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write to {}", path.display()))?;
        }
        None => {
            print!("{}", content);
            io::stdout().flush()?;
        }
    }
    Ok(())
}

/// Pick the output format: explicit `--format`, then `--json`, then the
/// configured default, then text.
pub fn resolve_format(explicit: Option<OutputFormat>, json: bool, config: &Config) -> OutputFormat {
    if let Some(format) = explicit {
        return format;
    }
    if json {
        return OutputFormat::Json;
    }
    config
        .format
        .as_deref()
        .and_then(|f| OutputFormat::from_str(f, true).ok())
        .unwrap_or_default()
}

/// Parse an output format name, listing valid names on failure.
pub fn parse_format(value: &str) -> Result<OutputFormat> {
    match OutputFormat::from_str(value, true) {
        Ok(format) => Ok(format),
        Err(_) => bail!(
            "Invalid format '{}'. Valid values: text, json, csv",
            value
        ),
    }
}
