//! Output formatting utilities for text, JSON, and CSV output.

use anyhow::Result;
use owo_colors::OwoColorize;
use serde::Serialize;

use ehs_core::{HeatLevel, NoiseRisk, OxygenStatus};
use ehs_types::Status;

/// Formatting options for output.
#[derive(Debug, Clone, Copy, Default)]
pub struct FormatOptions {
    /// Disable colored output.
    pub no_color: bool,
    /// Omit header row in CSV output.
    pub no_header: bool,
    /// Use compact JSON output (no pretty-printing).
    pub compact: bool,
}

impl FormatOptions {
    pub fn new(no_color: bool) -> Self {
        Self {
            no_color,
            ..Default::default()
        }
    }

    /// Create with no_header option for CSV output.
    pub fn with_no_header(mut self, no_header: bool) -> Self {
        self.no_header = no_header;
        self
    }

    /// Create with compact JSON option.
    pub fn with_compact(mut self, compact: bool) -> Self {
        self.compact = compact;
        self
    }

    /// Serialize to JSON, pretty unless compact output was requested.
    pub fn as_json<T: Serialize>(&self, value: &T) -> Result<String> {
        let json = if self.compact {
            serde_json::to_string(value)?
        } else {
            serde_json::to_string_pretty(value)?
        };
        Ok(format!("{}\n", json))
    }
}

/// Escape a value for CSV output.
pub fn csv_escape(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

/// Format an optional number for CSV (empty when absent).
pub fn csv_number(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

/// Format an optional number with a unit for text output.
pub fn format_optional(value: Option<f64>, unit: &str) -> String {
    match value {
        Some(v) => format!("{:.2}{}", v, unit),
        None => "n/a".to_string(),
    }
}

/// Format a recommendation status with its color.
pub fn format_status(status: Status, no_color: bool) -> String {
    let label = status.as_str();
    if no_color {
        return label.to_string();
    }
    match status {
        Status::Safe => format!("{}", label.green().bold()),
        Status::Caution => format!("{}", label.yellow().bold()),
        Status::Danger => format!("{}", label.red().bold()),
    }
}

/// Color for a three-level category: 0 = good, 1 = caution, 2 = bad.
fn paint(text: &str, level: Option<u8>, no_color: bool) -> String {
    if no_color {
        return text.to_string();
    }
    match level {
        Some(0) => format!("{}", text.green()),
        Some(1) => format!("{}", text.yellow()),
        Some(_) => format!("{}", text.red()),
        None => format!("{}", text.dimmed()),
    }
}

pub fn format_heat_level(level: HeatLevel, no_color: bool) -> String {
    let severity = match level {
        HeatLevel::Safe => Some(0),
        HeatLevel::Caution => Some(1),
        HeatLevel::Danger => Some(2),
        HeatLevel::Unknown => None,
    };
    paint(&level.to_string(), severity, no_color)
}

pub fn format_oxygen_status(status: OxygenStatus, no_color: bool) -> String {
    let severity = match status {
        OxygenStatus::Safe => Some(0),
        OxygenStatus::MildRisk => Some(1),
        OxygenStatus::HighRisk => Some(2),
        OxygenStatus::Unknown => None,
    };
    paint(&status.to_string(), severity, no_color)
}

pub fn format_noise_risk(risk: NoiseRisk, no_color: bool) -> String {
    let severity = match risk {
        NoiseRisk::Safe => Some(0),
        NoiseRisk::Caution => Some(1),
        NoiseRisk::HighRisk => Some(2),
        NoiseRisk::Unknown => None,
    };
    paint(&risk.to_string(), severity, no_color)
}
