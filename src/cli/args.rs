//! CLI argument definitions for `installcalc`

use clap::{builder::BoolishValueParser, Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use installment_calc::config::ConfigOverrides;
use installment_calc::core::input::RawInput;
use installment_calc::core::models::Theme;
use installment_calc::core::report::ReportFormat;
use installment_calc::logger::Level;

/// CLI log level argument
///
/// Converts to lowercase strings for config storage and to
/// [`Level`] for runtime use.
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

/// Theme argument
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum ThemeArg {
    /// Dark palette
    Dark,
    /// Light palette
    Light,
    /// Switch away from the stored theme
    Toggle,
}

impl ThemeArg {
    /// Theme to store, given the one currently stored
    #[must_use]
    pub const fn resolve(self, current: Theme) -> Theme {
        match self {
            Self::Dark => Theme::Dark,
            Self::Light => Theme::Light,
            Self::Toggle => current.toggled(),
        }
    }
}

/// Credit and discount inputs, taken verbatim
///
/// Blank values count as zero. Validation happens in the library so that
/// every field error is reported at once.
#[derive(Debug, Clone, Default, Args)]
pub struct CalcInputArgs {
    /// Credits for new courses
    #[arg(long = "new", value_name = "CREDITS", allow_hyphen_values = true)]
    pub new_credit: Option<String>,

    /// Credits for courses retaken for the first time
    #[arg(long = "retake-first", value_name = "CREDITS", allow_hyphen_values = true)]
    pub retake_first_credit: Option<String>,

    /// Credits for courses retaken more than once
    #[arg(long = "retake-non-first", value_name = "CREDITS", allow_hyphen_values = true)]
    pub retake_non_first_credit: Option<String>,

    /// Scholarship percentage (0-100)
    #[arg(long, value_name = "PERCENT", allow_hyphen_values = true)]
    pub scholarship: Option<String>,

    /// Waiver percentage (0-100)
    #[arg(long, value_name = "PERCENT", allow_hyphen_values = true)]
    pub waiver: Option<String>,
}

impl CalcInputArgs {
    /// Raw form values for validation
    #[must_use]
    pub fn to_raw_input(&self) -> RawInput {
        RawInput {
            new_credit: self.new_credit.clone().unwrap_or_default(),
            retake_first_credit: self.retake_first_credit.clone().unwrap_or_default(),
            retake_non_first_credit: self.retake_non_first_credit.clone().unwrap_or_default(),
            scholarship: self.scholarship.clone().unwrap_or_default(),
            waiver: self.waiver.clone().unwrap_or_default(),
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum SettingsSubcommand {
    /// Display the current fee schedule.
    Show,
    /// Update the fee schedule.
    ///
    /// Values not given are taken from the current schedule. Retake rates and
    /// installment shares are percentages; the shares must total 100.
    Set {
        /// Fee per credit
        #[arg(long, value_name = "AMOUNT", allow_negative_numbers = true)]
        per_credit_fee: Option<f64>,

        /// Flat semester fee
        #[arg(long, value_name = "AMOUNT", allow_negative_numbers = true)]
        semester_fee: Option<f64>,

        /// Payable percentage for first-time retakes
        #[arg(long, value_name = "PERCENT", allow_negative_numbers = true)]
        retake_first_rate: Option<f64>,

        /// Payable percentage for repeated retakes
        #[arg(long, value_name = "PERCENT", allow_negative_numbers = true)]
        retake_non_first_rate: Option<f64>,

        /// Installment shares in percent, one per installment
        #[arg(long, value_name = "PERCENT", num_args = 1.., allow_negative_numbers = true)]
        installments: Option<Vec<f64>>,
    },
    /// Change the number of installments, keeping earlier shares where possible.
    Resize {
        /// New installment count
        #[arg(value_name = "COUNT")]
        count: usize,

        /// Persist the resized schedule
        #[arg(long)]
        save: bool,
    },
    /// Restore the default fee schedule (requires confirmation).
    Reset {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(Debug, Subcommand)]
pub enum ConfigSubcommand {
    /// Display configuration values.
    ///
    /// If a KEY is provided, displays only that configuration value.
    /// If no KEY is provided, displays all configuration values.
    Get {
        /// Optional configuration key to display (e.g., `level`, `storage_file`)
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
    /// Compute the fee breakdown and installment schedule.
    Calc {
        #[command(flatten)]
        input: CalcInputArgs,
    },
    /// Manage the fee schedule.
    ///
    /// If no subcommand is provided, displays the current schedule.
    Settings {
        #[command(subcommand)]
        subcommand: Option<SettingsSubcommand>,
    },
    /// Show or set the display theme.
    Theme {
        /// Theme to store (or `toggle`); omit to print the current one
        #[arg(value_enum)]
        theme: Option<ThemeArg>,
    },
    /// Write the fee breakdown to a Markdown or HTML file.
    Report {
        #[command(flatten)]
        input: CalcInputArgs,

        /// Report format: markdown (md) or html
        #[arg(short, long, value_name = "FORMAT", default_value = "html")]
        format: ReportFormat,

        /// Output file path (optional; defaults to the configured reports directory)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
    /// Manage configuration.
    ///
    /// If no subcommand is provided, displays all configuration values.
    Config {
        #[command(subcommand)]
        subcommand: Option<ConfigSubcommand>,
    },
}

#[derive(Parser, Debug)]
#[command(
    name = "installcalc",
    about = "Tuition fee and installment calculator",
    version = env!("CARGO_PKG_VERSION")
)]
pub struct Cli {
    /// Set the runtime log level (error|warn|info|debug). Falls back to config if omitted.
    #[arg(long, value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Enable verbose output (runtime only)
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    /// Enable debug-level logging and runtime debug flag (shorthand)
    #[arg(long = "debug", global = true)]
    pub debug_flag: bool,

    /// Write runtime logs to a file
    #[arg(long, value_name = "PATH", global = true)]
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

    /// Override config storage file
    #[arg(long = "config-storage-file", value_name = "PATH")]
    pub config_storage_file: Option<PathBuf>,

    /// Override config storage file (short form)
    #[arg(long = "storage-file", value_name = "PATH")]
    pub storage_file: Option<PathBuf>,

    /// Override config reports directory
    #[arg(long = "config-reports-dir", value_name = "DIR")]
    pub config_reports_dir: Option<PathBuf>,

    /// Override config reports directory (short form)
    #[arg(long = "reports-dir", value_name = "DIR")]
    pub reports_dir: Option<PathBuf>,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Convert CLI flags into config overrides
    ///
    /// Short-form flags (e.g., `--storage-file`) take precedence over
    /// long-form flags (e.g., `--config-storage-file`) when both are given.
    pub fn to_config_overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            level: self.config_level.map(|lvl| lvl.to_string()),
            file: self
                .config_log_file
                .as_ref()
                .map(|p| p.to_string_lossy().to_string()),
            verbose: self.config_verbose,
            storage_file: self
                .storage_file
                .as_ref()
                .or(self.config_storage_file.as_ref())
                .map(|p| p.to_string_lossy().to_string()),
            reports_dir: self
                .reports_dir
                .as_ref()
                .or(self.config_reports_dir.as_ref())
                .map(|p| p.to_string_lossy().to_string()),
        }
    }
}
