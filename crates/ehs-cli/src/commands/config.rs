//! Config command implementation.

use anyhow::{Context, Result, bail};

use crate::cli::{ConfigAction, ConfigKey, parse_bool_arg};
use crate::config::{Config, mask_secret};
use crate::util::parse_format;

pub fn cmd_config(action: ConfigAction, quiet: bool) -> Result<()> {
    let mut config = Config::load();

    match action {
        ConfigAction::Show => {
            let mut shown = config.clone();
            shown.api_key = shown.api_key.as_deref().map(mask_secret);
            let content = toml::to_string_pretty(&shown).context("Failed to serialize config")?;
            if content.trim().is_empty() && !quiet {
                println!("No configuration set.");
            } else {
                print!("{}", content);
            }
        }
        ConfigAction::Get { key } => match get_value(&config, key) {
            Some(value) => println!("{}", value),
            None => bail!("{} is not set", key_name(key)),
        },
        ConfigAction::Set { key, value } => {
            set_value(&mut config, key, &value)?;
            config.save()?;
            if !quiet {
                println!("Set {} = {}", key_name(key), display_value(key, &value));
            }
        }
        ConfigAction::Unset { key } => {
            unset_value(&mut config, key);
            config.save()?;
            if !quiet {
                println!("Unset {}", key_name(key));
            }
        }
        ConfigAction::Path => {
            println!("{}", Config::path().display());
        }
    }

    Ok(())
}

fn key_name(key: ConfigKey) -> &'static str {
    match key {
        ConfigKey::City => "city",
        ConfigKey::ApiKey => "api_key",
        ConfigKey::Format => "format",
        ConfigKey::NoColor => "no_color",
    }
}

fn display_value(key: ConfigKey, value: &str) -> String {
    match key {
        ConfigKey::ApiKey => mask_secret(value),
        _ => value.to_string(),
    }
}

fn get_value(config: &Config, key: ConfigKey) -> Option<String> {
    match key {
        ConfigKey::City => config.city.clone(),
        ConfigKey::ApiKey => config.api_key.as_deref().map(mask_secret),
        ConfigKey::Format => config.format.clone(),
        ConfigKey::NoColor => Some(config.no_color.to_string()),
    }
}

fn set_value(config: &mut Config, key: ConfigKey, value: &str) -> Result<()> {
    let trimmed = value.trim();
    match key {
        ConfigKey::City => {
            if trimmed.is_empty() {
                bail!("City cannot be empty");
            }
            config.city = Some(trimmed.to_string());
        }
        ConfigKey::ApiKey => {
            if trimmed.is_empty() {
                bail!("API key cannot be empty");
            }
            config.api_key = Some(trimmed.to_string());
        }
        ConfigKey::Format => {
            parse_format(trimmed)?;
            config.format = Some(trimmed.to_lowercase());
        }
        ConfigKey::NoColor => {
            config.no_color = parse_bool_arg(trimmed).map_err(anyhow::Error::msg)?;
        }
    }
    Ok(())
}

fn unset_value(config: &mut Config, key: ConfigKey) {
    match key {
        ConfigKey::City => config.city = None,
        ConfigKey::ApiKey => config.api_key = None,
        ConfigKey::Format => config.format = None,
        ConfigKey::NoColor => config.no_color = false,
    }
}
