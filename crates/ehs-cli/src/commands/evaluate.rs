//! Evaluate command implementation.

use std::path::PathBuf;

use anyhow::Result;
use owo_colors::OwoColorize;
use serde::Serialize;

use ehs_core::{Finding, Priority, evaluate_with, findings};
use ehs_types::{Readings, Recommendation};

use crate::cli::OutputFormat;
use crate::format::{FormatOptions, csv_escape, format_status};
use crate::util::write_output;

/// Arguments for the evaluate command.
pub struct EvaluateArgs {
    pub noise: f64,
    pub exposure: f64,
    pub oxygen: Option<f64>,
    pub aqi: Option<f64>,
    pub explain: bool,
    pub priority: Priority,
}

pub fn cmd_evaluate(
    args: EvaluateArgs,
    format: OutputFormat,
    output: Option<&PathBuf>,
    opts: &FormatOptions,
) -> Result<()> {
    let readings = Readings::new(args.noise, args.exposure)
        .with_oxygen(args.oxygen)
        .with_air_quality(args.aqi);

    let matched = findings(&readings);
    let recommendation = evaluate_with(&readings, args.priority);

    let content = match format {
        OutputFormat::Json => format_evaluate_json(&recommendation, &matched, args.explain, opts)?,
        OutputFormat::Csv => format_evaluate_csv(&recommendation, opts),
        OutputFormat::Text => {
            format_evaluate_text(&recommendation, &matched, args.explain, args.priority, opts)
        }
    };

    write_output(output, &content)
}

fn format_evaluate_text(
    recommendation: &Recommendation,
    matched: &[Finding],
    explain: bool,
    priority: Priority,
    opts: &FormatOptions,
) -> String {
    let mut out = format!(
        "Status: {}\n  Primary:   {}\n  Secondary: {}\n",
        format_status(recommendation.status, opts.no_color),
        recommendation.primary_action,
        recommendation.secondary_action
    );

    if explain {
        out.push('\n');
        if matched.is_empty() {
            out.push_str("No rule group matched; readings are within safe limits.\n");
        } else {
            out.push_str("Matched rule groups (in evaluation order):\n");
            for finding in matched {
                out.push_str(&format!(
                    "  {:<12} {} - {}\n",
                    finding.group.name(),
                    format_status(finding.recommendation.status, opts.no_color),
                    finding.recommendation.primary_action
                ));
            }
            let rule = match priority {
                Priority::LastMatch => "last matching group wins",
                Priority::MostSevere => "most severe finding wins",
            };
            let note = format!("Result: {}", rule);
            if opts.no_color {
                out.push_str(&note);
            } else {
                out.push_str(&format!("{}", note.dimmed()));
            }
            out.push('\n');
        }
    }

    out
}

fn format_evaluate_json(
    recommendation: &Recommendation,
    matched: &[Finding],
    explain: bool,
    opts: &FormatOptions,
) -> Result<String> {
    #[derive(Serialize)]
    #[serde(rename_all = "camelCase")]
    struct EvaluateJson<'a> {
        #[serde(flatten)]
        recommendation: &'a Recommendation,
        #[serde(skip_serializing_if = "Option::is_none")]
        matched: Option<&'a [Finding]>,
    }

    let json = EvaluateJson {
        recommendation,
        matched: explain.then_some(matched),
    };
    opts.as_json(&json)
}

fn format_evaluate_csv(recommendation: &Recommendation, opts: &FormatOptions) -> String {
    let row = format!(
        "{},{},{}\n",
        recommendation.status,
        csv_escape(&recommendation.primary_action),
        csv_escape(&recommendation.secondary_action)
    );
    if opts.no_header {
        row
    } else {
        format!("status,primary_action,secondary_action\n{}", row)
    }
}
