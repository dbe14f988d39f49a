//! `gradebook config` handlers
//!
//! Handlers return an error message instead of exiting; `main` reports it and
//! sets the exit status.

use crate::args::ConfigSubcommand;
use gradebook::config::Config;
use gradebook::{info, warn};
use std::io::{self, BufRead, Write};

/// Dispatch a config subcommand; no subcommand shows the whole config
///
/// # Errors
/// Returns a message for unknown keys, invalid values, or a config file that
/// cannot be written.
pub fn run(
    subcommand: Option<ConfigSubcommand>,
    config: &mut Config,
    defaults: &Config,
) -> Result<(), String> {
    match subcommand {
        None | Some(ConfigSubcommand::Get { key: None }) => {
            print!("{config}");
            Ok(())
        }
        Some(ConfigSubcommand::Get { key: Some(key) }) => {
            let value = config.get(&key).ok_or_else(|| Config::unknown_key(&key))?;
            println!("{value}");
            Ok(())
        }
        Some(ConfigSubcommand::Set { key, value }) => {
            config.set(&key, &value)?;
            persist(config)?;
            // grading values are stored canonicalised, so echo what was kept
            let stored = config.get(&key).unwrap_or(value);
            info!("Config updated: {key} = {stored}");
            println!("{key} = {stored}");
            Ok(())
        }
        Some(ConfigSubcommand::Unset { key }) => {
            config.unset(&key, defaults)?;
            persist(config)?;
            let restored = config.get(&key).unwrap_or_default();
            info!("Config reset: {key} = {restored}");
            println!("{key} = {restored} (default)");
            Ok(())
        }
        Some(ConfigSubcommand::Reset) => reset(&mut io::stdin().lock()),
    }
}

fn persist(config: &Config) -> Result<(), String> {
    config.save().map_err(|e| {
        format!(
            "Failed to save {}: {e}",
            Config::get_config_file_path().display()
        )
    })
}

/// Remove the config file after a `y`/`yes` answer read from `input`
fn reset(input: &mut impl BufRead) -> Result<(), String> {
    let path = Config::get_config_file_path();
    if !path.exists() {
        println!("Config already at defaults");
        return Ok(());
    }

    print!("Reset {} to defaults? (y/n): ", path.display());
    io::stdout().flush().ok();

    let mut answer = String::new();
    input
        .read_line(&mut answer)
        .map_err(|e| format!("Failed to read confirmation: {e}"))?;

    if confirmed(&answer) {
        Config::reset().map_err(|e| format!("Failed to remove {}: {e}", path.display()))?;
        info!("Config file {} removed", path.display());
        println!("Config reset to defaults");
    } else {
        warn!("Config reset cancelled");
    }
    Ok(())
}

fn confirmed(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}
