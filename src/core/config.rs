//! Configuration module for `gradebook`

use crate::core::grading::{AggregationMode, GradingPolicy, MissingWork};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// Default CLI configuration loaded based on build profile.
/// Uses release defaults in release mode, debug defaults in debug mode.
#[cfg(not(debug_assertions))]
const CONFIG_DEFAULTS: &str = include_str!("../../assets/DefaultCLIConfigRelease.toml");

#[cfg(debug_assertions)]
const CONFIG_DEFAULTS: &str = include_str!("../../assets/DefaultCLIConfigDebug.toml");

#[cfg(not(debug_assertions))]
const CONFIG_FILE_NAME: &str = "config.toml";

#[cfg(debug_assertions)]
const CONFIG_FILE_NAME: &str = "dconfig.toml";

/// Placeholder expanded to the gradebook config directory
const DIR_VARIABLE: &str = "$GRADEBOOK";

/// Logging configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug)
    #[serde(default)]
    pub level: String,
    /// Log file path
    #[serde(default)]
    pub file: String,
    /// Enable verbose output
    #[serde(default)]
    pub verbose: bool,
}

/// Default grading policy configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GradingConfig {
    /// Aggregation mode (points, weighted)
    #[serde(default)]
    pub mode: String,
    /// Missing-work policy (exclude, zero_fill)
    #[serde(default)]
    pub missing_work: String,
}

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Logging settings
    pub logging: LoggingConfig,
    /// Grading policy settings
    #[serde(default)]
    pub grading: GradingConfig,
}

/// Optional CLI overrides for configuration values
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    /// Override logging level
    pub level: Option<String>,
    /// Override log file path
    pub file: Option<String>,
    /// Override verbose flag
    pub verbose: Option<bool>,
    /// Override aggregation mode
    pub mode: Option<String>,
    /// Override missing-work policy
    pub missing_work: Option<String>,
}

impl Config {
    /// Get the `$GRADEBOOK` directory path
    ///
    /// Returns:
    /// - Linux: `~/.config/gradebook`
    /// - macOS: `~/Library/Application Support/gradebook`
    /// - Windows: `%APPDATA%\gradebook`
    #[must_use]
    pub fn get_gradebook_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("gradebook")
    }

    /// Merge missing fields from defaults into this config
    ///
    /// Only fields that are empty here and non-empty in `defaults` are taken,
    /// so settings added in newer releases reach existing config files while
    /// user values are kept.
    ///
    /// # Returns
    ///
    /// `true` if any fields were added/changed, `false` otherwise
    pub fn merge_defaults(&mut self, defaults: &Self) -> bool {
        let mut changed = false;
        let mut fill = |target: &mut String, default: &str| {
            if target.is_empty() && !default.is_empty() {
                default.clone_into(target);
                changed = true;
            }
        };

        fill(&mut self.logging.level, &defaults.logging.level);
        fill(&mut self.logging.file, &defaults.logging.file);
        fill(&mut self.grading.mode, &defaults.grading.mode);
        fill(&mut self.grading.missing_work, &defaults.grading.missing_work);

        changed
    }

    /// Apply CLI-provided overrides onto the loaded configuration
    ///
    /// Overrides affect this run only; the config file is not modified.
    /// Only non-`None` values replace config values.
    pub fn apply_overrides(&mut self, overrides: &ConfigOverrides) {
        if let Some(level) = &overrides.level {
            self.logging.level.clone_from(level);
        }
        if let Some(file) = &overrides.file {
            self.logging.file.clone_from(file);
        }
        if let Some(verbose) = overrides.verbose {
            self.logging.verbose = verbose;
        }
        if let Some(mode) = &overrides.mode {
            self.grading.mode.clone_from(mode);
        }
        if let Some(missing_work) = &overrides.missing_work {
            self.grading.missing_work.clone_from(missing_work);
        }
    }

    /// Get the user config file path
    ///
    /// - `config.toml` for release builds
    /// - `dconfig.toml` for debug builds (allows separate debug config)
    #[must_use]
    pub fn get_config_file_path() -> PathBuf {
        Self::get_gradebook_dir().join(CONFIG_FILE_NAME)
    }

    /// Expand `$GRADEBOOK` in a string to the config directory path
    #[must_use]
    fn expand_variables(value: &str) -> String {
        if value.contains(DIR_VARIABLE) {
            let gradebook_dir = Self::get_gradebook_dir();
            value.replace(DIR_VARIABLE, gradebook_dir.to_str().unwrap_or("."))
        } else {
            value.to_string()
        }
    }

    /// Initialize config from a TOML string
    ///
    /// Missing fields take their serde defaults (empty strings or false).
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML cannot be parsed or doesn't match the expected schema
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        let mut config: Self = toml::from_str(toml_str)?;
        config.logging.file = Self::expand_variables(&config.logging.file);
        Ok(config)
    }

    /// Load configuration from embedded defaults
    ///
    /// # Panics
    /// Panics if the embedded default configuration cannot be parsed.
    #[must_use]
    pub fn from_defaults() -> Self {
        Self::from_toml(CONFIG_DEFAULTS).expect("Failed to parse compiled-in default configuration")
    }

    /// Load configuration from the user config file, or create it from defaults
    ///
    /// See [`load_from`](Config::load_from).
    #[must_use]
    pub fn load() -> Self {
        Self::load_from(&Self::get_config_file_path())
    }

    /// Load configuration from `config_file`, or create it from defaults
    ///
    /// - If the file exists: load it, merge missing fields from defaults,
    ///   and save it back when fields were added
    /// - On first run: create the directory and save the defaults
    ///
    /// Falls back to defaults if the file cannot be read or parsed. Failed
    /// writes are logged as warnings.
    #[must_use]
    pub fn load_from(config_file: &Path) -> Self {
        let defaults = Self::from_defaults();

        if !config_file.exists() {
            if let Err(e) = defaults.save_to(config_file) {
                crate::warn!("Could not write default config to {}: {e}", config_file.display());
            }
            return defaults;
        }

        let parsed = fs::read_to_string(config_file)
            .map_err(|e| e.to_string())
            .and_then(|content| Self::from_toml(&content).map_err(|e| e.to_string()));

        match parsed {
            Ok(mut config) => {
                if config.merge_defaults(&defaults) {
                    if let Err(e) = config.save_to(config_file) {
                        crate::warn!(
                            "Could not write merged config to {}: {e}",
                            config_file.display()
                        );
                    }
                }
                config
            }
            Err(e) => {
                crate::warn!(
                    "Ignoring unreadable config {}: {e}",
                    config_file.display()
                );
                defaults
            }
        }
    }

    /// Save configuration to the user config file
    ///
    /// # Errors
    /// Same as [`save_to`](Config::save_to).
    pub fn save(&self) -> Result<(), Box<dyn std::error::Error>> {
        self.save_to(&Self::get_config_file_path())
    }

    /// Save configuration to `config_file`, creating its directory if needed
    ///
    /// # Errors
    /// Returns an error if the config cannot be serialized, or the directory or
    /// file cannot be written.
    pub fn save_to(&self, config_file: &Path) -> Result<(), Box<dyn std::error::Error>> {
        if let Some(parent) = config_file.parent() {
            fs::create_dir_all(parent)?;
        }
        let toml_str = toml::to_string_pretty(self)?;
        fs::write(config_file, toml_str)?;
        Ok(())
    }

    /// Build the grading policy described by the `[grading]` section
    ///
    /// Empty values fall back to the policy defaults (weighted, exclude).
    ///
    /// # Errors
    /// Returns an error message if `mode` or `missing_work` is not recognised.
    pub fn grading_policy(&self) -> Result<GradingPolicy, String> {
        let mode = if self.grading.mode.is_empty() {
            AggregationMode::default()
        } else {
            self.grading.mode.parse()?
        };
        let missing_work = if self.grading.missing_work.is_empty() {
            MissingWork::default()
        } else {
            self.grading.missing_work.parse()?
        };
        Ok(GradingPolicy::new(mode, missing_work))
    }

    /// Keys accepted by [`get`](Config::get), [`set`](Config::set) and
    /// [`unset`](Config::unset); `missing-work` is also accepted as an alias
    pub const KEYS: [&'static str; 5] = ["level", "file", "verbose", "mode", "missing_work"];

    /// Error message for a key outside [`Config::KEYS`]
    #[must_use]
    pub fn unknown_key(key: &str) -> String {
        format!(
            "Unknown config key: '{key}' (expected one of: {})",
            Self::KEYS.join(", ")
        )
    }

    /// Get a configuration value by key
    ///
    /// Supported keys: see [`Config::KEYS`].
    #[must_use]
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "level" => Some(self.logging.level.clone()),
            "file" => Some(self.logging.file.clone()),
            "verbose" => Some(self.logging.verbose.to_string()),
            "mode" => Some(self.grading.mode.clone()),
            "missing_work" | "missing-work" => Some(self.grading.missing_work.clone()),
            _ => None,
        }
    }

    /// Set a configuration value by key
    ///
    /// Values are validated: `level` must be a log level, `verbose` a
    /// boolean, `mode` and `missing_work` valid policy names. Grading values
    /// are stored in their canonical spelling.
    ///
    /// Note: This method updates the in-memory config. Call [`save()`](Config::save) to persist changes.
    ///
    /// # Errors
    /// Returns an error if the key is unknown or the value is invalid.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), String> {
        match key {
            "level" => {
                let level: crate::logger::Level = value.parse()?;
                self.logging.level = level.to_string();
            }
            "file" => self.logging.file = value.to_string(),
            "verbose" => {
                self.logging.verbose = value
                    .parse::<bool>()
                    .map_err(|_| format!("Invalid boolean value for 'verbose': '{value}'"))?;
            }
            "mode" => self.grading.mode = value.parse::<AggregationMode>()?.to_string(),
            "missing_work" | "missing-work" => {
                self.grading.missing_work = value.parse::<MissingWork>()?.to_string();
            }
            _ => return Err(Self::unknown_key(key)),
        }
        Ok(())
    }

    /// Unset a configuration value by key (reset to its default)
    ///
    /// Note: This method updates the in-memory config. Call [`save()`](Config::save) to persist changes.
    ///
    /// # Errors
    /// Returns an error if the key is not recognized.
    pub fn unset(&mut self, key: &str, defaults: &Self) -> Result<(), String> {
        match key {
            "level" => self.logging.level.clone_from(&defaults.logging.level),
            "file" => self.logging.file.clone_from(&defaults.logging.file),
            "verbose" => self.logging.verbose = defaults.logging.verbose,
            "mode" => self.grading.mode.clone_from(&defaults.grading.mode),
            "missing_work" | "missing-work" => self
                .grading
                .missing_work
                .clone_from(&defaults.grading.missing_work),
            _ => return Err(Self::unknown_key(key)),
        }
        Ok(())
    }

    /// Reset all configuration to defaults
    ///
    /// Deletes the configuration file so the next [`load()`](Config::load)
    /// recreates it. Succeeds if there is no file.
    ///
    /// # Errors
    /// Returns an error if the config file exists but cannot be deleted.
    pub fn reset() -> Result<(), std::io::Error> {
        let config_file = Self::get_config_file_path();
        if config_file.exists() {
            fs::remove_file(config_file)?;
        }
        Ok(())
    }
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[logging]")?;
        writeln!(f, "  level = \"{}\"", self.logging.level)?;
        writeln!(f, "  file = \"{}\"", self.logging.file)?;
        writeln!(f, "  verbose = {}", self.logging.verbose)?;

        writeln!(f, "\n[grading]")?;
        writeln!(f, "  mode = \"{}\"", self.grading.mode)?;
        writeln!(f, "  missing_work = \"{}\"", self.grading.missing_work)?;

        Ok(())
    }
}
