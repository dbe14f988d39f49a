//! CLI argument definitions for `gradebook`

use clap::{builder::BoolishValueParser, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use gradebook::config::ConfigOverrides;
use gradebook::logger::Level;
use gradebook::{AggregationMode, MissingWork};

/// CLI log level argument
///
/// Converts to lowercase strings for config storage and to `logger::Level`
/// for runtime use.
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum LogLevelArg {
    /// Error-level logging
    Error,
    /// Warning-level logging
    Warn,
    /// Info-level logging
    Info,
    /// Debug-level logging
    Debug,
}

impl From<LogLevelArg> for Level {
    fn from(arg: LogLevelArg) -> Self {
        match arg {
            LogLevelArg::Error => Self::Error,
            LogLevelArg::Warn => Self::Warn,
            LogLevelArg::Info => Self::Info,
            LogLevelArg::Debug => Self::Debug,
        }
    }
}

impl std::fmt::Display for LogLevelArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", Level::from(*self))
    }
}

/// Grade aggregation mode argument
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum ModeArg {
    /// Raw points over raw maximums
    Points,
    /// Per-item fractions averaged by weight
    Weighted,
}

impl From<ModeArg> for AggregationMode {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::Points => Self::Points,
            ModeArg::Weighted => Self::Weighted,
        }
    }
}

/// Missing-work policy argument
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum MissingWorkArg {
    /// Leave missing work out of the grade
    Exclude,
    /// Count missing work as zero
    ZeroFill,
}

impl From<MissingWorkArg> for MissingWork {
    fn from(arg: MissingWorkArg) -> Self {
        match arg {
            MissingWorkArg::Exclude => Self::Exclude,
            MissingWorkArg::ZeroFill => Self::ZeroFill,
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum ConfigSubcommand {
    /// Display configuration values.
    ///
    /// If a KEY is provided, displays only that configuration value.
    /// If no KEY is provided, displays all configuration values.
    Get {
        /// Optional configuration key to display (e.g., `level`, `mode`, `missing_work`)
        #[arg(value_name = "KEY")]
        key: Option<String>,
    },
    /// Set a configuration value.
    Set {
        /// Configuration key to set
        #[arg(value_name = "KEY")]
        key: String,
        /// Value to set
        #[arg(value_name = "VALUE")]
        value: String,
    },
    /// Unset a configuration value.
    Unset {
        /// Configuration key to unset
        #[arg(value_name = "KEY")]
        key: String,
    },
    /// Reset configuration to defaults (requires confirmation).
    Reset,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage configuration.
    ///
    /// If no subcommand is provided, displays all configuration values.
    Config {
        #[command(subcommand)]
        subcommand: Option<ConfigSubcommand>,
    },
    /// Show the effective grading policy.
    ///
    /// Combines the config file's `[grading]` section with any
    /// `--grading-mode` / `--missing-work` overrides.
    Policy,
}

#[derive(Parser, Debug)]
#[command(
    name = "gradebook",
    about = "Gradebook command-line interface",
    version = env!("CARGO_PKG_VERSION")
)]
pub struct Cli {
    /// Set the runtime log level (error|warn|info|debug). Falls back to config if omitted.
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevelArg>,

    /// Enable verbose output (runtime only)
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,

    /// Enable debug-level logging and runtime debug flag (shorthand)
    #[arg(long = "debug")]
    pub debug_flag: bool,

    /// Write runtime logs to a file
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    // --- Config overrides ---
    /// Override config logging level
    #[arg(long = "config-level", value_enum)]
    pub config_level: Option<LogLevelArg>,

    /// Override config log file path
    #[arg(long = "config-log-file", value_name = "PATH")]
    pub config_log_file: Option<PathBuf>,

    /// Override config verbose flag (true/false)
    #[arg(long = "config-verbose", value_parser = BoolishValueParser::new())]
    pub config_verbose: Option<bool>,

    /// Override the grade aggregation mode
    #[arg(long = "grading-mode", value_enum)]
    pub grading_mode: Option<ModeArg>,

    /// Override the missing-work policy
    #[arg(long = "missing-work", value_enum)]
    pub missing_work: Option<MissingWorkArg>,

    /// Subcommand to execute.
    /// A subcommand is required to run the CLI.
    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Convert CLI flags into config overrides
    ///
    /// `None` fields leave the loaded configuration untouched. Policy values
    /// are stored in their canonical config spelling.
    pub fn to_config_overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            level: self.config_level.map(|lvl| lvl.to_string()),
            file: self
                .config_log_file
                .as_ref()
                .map(|p| p.to_string_lossy().to_string()),
            verbose: self.config_verbose,
            mode: self
                .grading_mode
                .map(|m| AggregationMode::from(m).to_string()),
            missing_work: self
                .missing_work
                .map(|m| MissingWork::from(m).to_string()),
        }
    }
}
