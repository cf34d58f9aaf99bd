//! Report command implementation.

use std::path::PathBuf;

use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use tracing::info;

use ehs_core::{
    EnvironmentReport, Location, NoiseExposure, Priority, ReportBuilder, WeatherClient,
    WeatherObservation, WeatherSource,
};
use ehs_types::HealthProfile;

use crate::cli::{OutputFormat, WeatherArgs};
use crate::format::{
    FormatOptions, csv_escape, csv_number, format_heat_level, format_noise_risk,
    format_optional, format_oxygen_status, format_status,
};
use crate::util::write_output;

/// Arguments for the report command.
pub struct ReportArgs {
    pub weather: WeatherArgs,
    pub noise_db: Option<f64>,
    pub noise_minutes: Option<f64>,
    pub aqi: Option<f64>,
    pub priority: Priority,
}

pub async fn cmd_report(
    args: ReportArgs,
    profile: HealthProfile,
    default_city: Option<String>,
    config_api_key: Option<String>,
    format: OutputFormat,
    output: Option<&PathBuf>,
    opts: &FormatOptions,
) -> Result<()> {
    let weather = resolve_weather(&args.weather, default_city, config_api_key).await?;

    let report = ReportBuilder::new()
        .profile(profile)
        .priority(args.priority)
        .build(
            &weather,
            NoiseExposure::new(args.noise_db, args.noise_minutes),
            args.aqi,
        );

    let content = match format {
        OutputFormat::Json => opts.as_json(&report)?,
        OutputFormat::Csv => format_report_csv(&report, opts),
        OutputFormat::Text => format_report_text(&report, opts),
    };

    write_output(output, &content)
}

/// Use the manual values if given, otherwise look up live weather.
async fn resolve_weather(
    args: &WeatherArgs,
    default_city: Option<String>,
    config_api_key: Option<String>,
) -> Result<WeatherObservation> {
    if let (Some(t), Some(h), Some(p)) = (args.temperature, args.humidity, args.pressure) {
        let mut obs = WeatherObservation::new(t, h, p);
        obs.city = args.city.clone().or(default_city);
        return Ok(obs);
    }

    let location = Location::resolve(args.city.clone().or(default_city), args.lat, args.lon);
    let key = args
        .api_key
        .clone()
        .or(config_api_key)
        .ok_or(ehs_core::Error::MissingApiKey)?;

    info!(?location, "Looking up current weather");
    let client = WeatherClient::new(key)?;
    let obs = client
        .current(&location)
        .await
        .context("Failed to look up current weather")?;
    Ok(obs)
}

fn format_report_text(report: &EnvironmentReport, opts: &FormatOptions) -> String {
    let heading = |s: &str| {
        if opts.no_color {
            s.to_string()
        } else {
            format!("{}", s.bold())
        }
    };

    let place = match (&report.city, report.lat, report.lon) {
        (Some(city), _, _) => city.clone(),
        (None, Some(lat), Some(lon)) => format!("{:.4}, {:.4}", lat, lon),
        _ => "manual readings".to_string(),
    };

    let mut out = String::new();
    out.push_str(&format!("{}\n", heading(&format!("Environment report: {}", place))));
    out.push_str(&format!(
        "  Weather:     {:.1}°C, {:.0}% humidity, {:.1} hPa\n",
        report.temperature, report.humidity, report.pressure
    ));

    out.push_str(&format!("\n{}\n", heading("Heat")));
    out.push_str(&format!(
        "  Heat index:  {} ({})\n  {}\n",
        format_optional(report.heat_index, "°C"),
        format_heat_level(report.heat_level, opts.no_color),
        report.comfort_message
    ));

    out.push_str(&format!("\n{}\n", heading("Oxygen & altitude")));
    out.push_str(&format!(
        "  Altitude:    {}\n  Oxygen:      {} ({})\n  Your limit:  {:.2}%\n  Max safe:    {}\n  Extra climb: {}\n",
        format_optional(report.current_altitude_m, " m"),
        format_optional(report.oxygen_percent, "%"),
        format_oxygen_status(report.oxygen_status, opts.no_color),
        report.personal_min_oxygen,
        format_optional(report.max_safe_altitude_m, " m"),
        format_optional(report.extra_safe_ascent_m, " m"),
    ));

    out.push_str(&format!("\n{}\n", heading("Noise")));
    out.push_str(&format!(
        "  Dose:        {} ({})\n  {}\n",
        format_optional(report.noise_dose_percent, "%"),
        format_noise_risk(report.noise_status, opts.no_color),
        report.noise_message
    ));

    let rec = &report.recommendation;
    out.push_str(&format!("\n{}\n", heading("Recommendation")));
    out.push_str(&format!(
        "  Status:      {}\n  Primary:     {}\n  Secondary:   {}\n",
        format_status(rec.status, opts.no_color),
        rec.primary_action,
        rec.secondary_action
    ));

    out
}

fn format_report_csv(report: &EnvironmentReport, opts: &FormatOptions) -> String {
    let row = format!(
        "{},{},{},{},{},{},{},{},{},{},{},{},{},{}\n",
        csv_escape(report.city.as_deref().unwrap_or("")),
        report.temperature,
        report.humidity,
        report.pressure,
        csv_number(report.heat_index),
        report.heat_level,
        csv_number(report.current_altitude_m),
        csv_number(report.oxygen_percent),
        report.oxygen_status,
        csv_number(report.max_safe_altitude_m),
        csv_number(report.noise_dose_percent),
        report.noise_status,
        csv_number(report.air_quality_index),
        report.recommendation.status,
    );
    if opts.no_header {
        row
    } else {
        format!(
            "city,temperature_c,humidity,pressure_hpa,heat_index_c,heat_level,altitude_m,\
             oxygen_percent,oxygen_status,max_safe_altitude_m,noise_dose_percent,noise_status,\
             air_quality_index,status\n{}",
            row
        )
    }
}
