//! CLI argument definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Output format for commands
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Csv,
}

#[derive(Parser)]
#[command(name = "ehs")]
#[command(author, version, about = "Environmental health and safety recommendations", long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output as JSON (shorthand for --format json)
    #[arg(long, global = true)]
    pub json: bool,

    /// Output compact JSON (no pretty-printing)
    #[arg(long, global = true)]
    pub compact: bool,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR")]
    pub no_color: bool,

    /// Write output to file instead of stdout
    #[arg(short, long, global = true)]
    pub output: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Reusable output format arguments
#[derive(Debug, Clone, Args)]
pub struct OutputArgs {
    /// Output format (defaults to the configured format, then text)
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Omit header row in CSV output (useful for appending)
    #[arg(long)]
    pub no_header: bool,

    /// Let the most severe rule group win instead of the last one that matched
    #[arg(long)]
    pub most_severe: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Evaluate noise, oxygen, and air quality readings
    Evaluate {
        /// Noise level in dB
        #[arg(short, long, allow_negative_numbers = true)]
        noise: f64,

        /// Exposure time in minutes
        #[arg(short, long, allow_negative_numbers = true)]
        exposure: f64,

        /// Oxygen level in percent
        #[arg(long)]
        oxygen: Option<f64>,

        /// Air quality index
        #[arg(long)]
        aqi: Option<f64>,

        /// List every rule group that matched
        #[arg(long)]
        explain: bool,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Build an environment report from live weather or manual values
    Report {
        #[command(flatten)]
        weather: WeatherArgs,

        /// Noise level in dB
        #[arg(long)]
        noise_db: Option<f64>,

        /// Noise exposure in minutes
        #[arg(long)]
        noise_minutes: Option<f64>,

        /// Air quality index
        #[arg(long)]
        aqi: Option<f64>,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Manage the stored health profile
    Profile {
        #[command(subcommand)]
        action: ProfileAction,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Where the weather for a report comes from
#[derive(Debug, Clone, Args)]
pub struct WeatherArgs {
    /// City to look up (defaults to the configured city, then Pune)
    #[arg(long, conflicts_with_all = ["lat", "lon"])]
    pub city: Option<String>,

    /// Latitude to look up
    #[arg(long, requires = "lon", allow_negative_numbers = true)]
    pub lat: Option<f64>,

    /// Longitude to look up
    #[arg(long, requires = "lat", allow_negative_numbers = true)]
    pub lon: Option<f64>,

    /// Manual temperature in °C (skips the weather lookup)
    #[arg(long, requires_all = ["humidity", "pressure"], allow_negative_numbers = true)]
    pub temperature: Option<f64>,

    /// Manual relative humidity in percent
    #[arg(long, requires_all = ["temperature", "pressure"])]
    pub humidity: Option<f64>,

    /// Manual pressure in hPa
    #[arg(long, requires_all = ["temperature", "humidity"])]
    pub pressure: Option<f64>,

    /// OpenWeather API key (overrides config)
    #[arg(long, env = "OPENWEATHER_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,
}

/// Health profile subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum ProfileAction {
    /// Show the stored profile and its oxygen limit
    Show,

    /// Set age and/or conditions
    Set {
        /// Age in years
        #[arg(long)]
        age: Option<u32>,

        /// Comma-separated conditions (e.g., "asthma,copd"); empty clears them
        #[arg(long)]
        conditions: Option<String>,
    },

    /// Remove the stored profile
    Clear,
}

/// Configuration keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ConfigKey {
    /// Default city for reports
    City,
    /// OpenWeather API key
    ApiKey,
    /// Default output format
    Format,
    /// Disable colored output
    NoColor,
}

/// Configuration subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Get a configuration value
    Get {
        /// Configuration key
        #[arg(value_enum)]
        key: ConfigKey,
    },

    /// Set a configuration value
    Set {
        /// Configuration key
        #[arg(value_enum)]
        key: ConfigKey,
        /// Configuration value
        value: String,
    },

    /// Unset (remove) a configuration value
    Unset {
        /// Configuration key to remove
        #[arg(value_enum)]
        key: ConfigKey,
    },

    /// Show configuration file path
    Path,
}

/// Parse boolean argument with flexible input
pub fn parse_bool_arg(s: &str) -> Result<bool, String> {
    match s.to_lowercase().as_str() {
        "true" | "yes" | "on" | "1" | "enable" | "enabled" => Ok(true),
        "false" | "no" | "off" | "0" | "disable" | "disabled" => Ok(false),
        _ => Err(format!(
            "Invalid boolean value '{}'. Use true/false, yes/no, on/off, or 1/0",
            s
        )),
    }
}
