//! Health profile command implementation.

use anyhow::{Result, bail};

use ehs_types::HealthProfile;

use crate::cli::ProfileAction;
use crate::config::Config;

pub fn cmd_profile(action: ProfileAction, quiet: bool) -> Result<()> {
    let mut config = Config::load();

    match action {
        ProfileAction::Show => {
            print!("{}", describe_profile(&config.profile));
            if config.profile.is_anonymous() && !quiet {
                println!();
                println!("Set a profile with: ehs profile set --age 60 --conditions asthma");
            }
        }
        ProfileAction::Set { age, conditions } => {
            if age.is_none() && conditions.is_none() {
                bail!("Nothing to set. Pass --age and/or --conditions.");
            }
            apply_profile_update(&mut config.profile, age, conditions.as_deref());
            config.save()?;

            if !quiet {
                println!("Profile updated.");
                print!("{}", describe_profile(&config.profile));
            }
        }
        ProfileAction::Clear => {
            if config.profile.is_anonymous() {
                if !quiet {
                    println!("No profile stored.");
                }
            } else {
                config.profile = HealthProfile::default();
                config.save()?;
                if !quiet {
                    println!("Profile cleared.");
                }
            }
        }
    }

    Ok(())
}

/// Merge the given fields into the profile. An empty conditions list
/// removes all conditions.
fn apply_profile_update(profile: &mut HealthProfile, age: Option<u32>, conditions: Option<&str>) {
    if let Some(age) = age {
        profile.age = Some(age);
    }
    if let Some(conditions) = conditions {
        profile.conditions = HealthProfile::parse_conditions(conditions);
    }
}

fn describe_profile(profile: &HealthProfile) -> String {
    let age = profile
        .age
        .map(|a| a.to_string())
        .unwrap_or_else(|| "not set".to_string());
    let conditions = if profile.conditions.is_empty() {
        "none".to_string()
    } else {
        profile
            .conditions
            .iter()
            .map(|c| c.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    };

    format!(
        "Age:                {}\nConditions:         {}\nMinimum safe O2:    {:.1}%\n",
        age,
        conditions,
        profile.min_safe_oxygen()
    )
}
