//! Application configuration for `installcalc`
//!
//! The configuration is a small TOML file kept next to the persisted fee
//! settings. It controls logging and where the storage file and reports
//! live. Fee settings themselves are not part of this file; they are kept in
//! the key-value store (see [`crate::core::store`]).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// Default CLI configuration loaded based on build profile.
#[cfg(not(debug_assertions))]
const CONFIG_DEFAULTS: &str = include_str!("assets/DefaultCLIConfigRelease.toml");

#[cfg(debug_assertions)]
const CONFIG_DEFAULTS: &str = include_str!("assets/DefaultCLIConfigDebug.toml");

#[cfg(not(debug_assertions))]
const CONFIG_FILE_NAME: &str = "config.toml";

#[cfg(debug_assertions)]
const CONFIG_FILE_NAME: &str = "dconfig.toml";

/// Variable expanded to the application directory in path values
const APP_DIR_VAR: &str = "$INSTALL_CALC";

/// Logging configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug)
    #[serde(default)]
    pub level: String,
    /// Log file path, empty to disable file logging
    #[serde(default)]
    pub file: String,
    /// Enable verbose output
    #[serde(default)]
    pub verbose: bool,
}

/// Paths configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PathsConfig {
    /// JSON file backing the settings and theme store
    #[serde(default)]
    pub storage_file: String,
    /// Directory for report output files
    #[serde(default)]
    pub reports_dir: String,
}

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Logging settings
    pub logging: LoggingConfig,
    /// Path settings
    #[serde(default)]
    pub paths: PathsConfig,
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
    /// Override storage file path
    pub storage_file: Option<String>,
    /// Override reports output directory
    pub reports_dir: Option<String>,
}

impl Config {
    /// Get the `$INSTALL_CALC` directory path
    ///
    /// Returns:
    /// - Linux: `~/.config/installcalc`
    /// - macOS: `~/Library/Application Support/installcalc`
    /// - Windows: `%APPDATA%\installcalc`
    #[must_use]
    pub fn get_app_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("installcalc")
    }

    /// Merge missing fields from defaults into this config
    ///
    /// Only fields that are empty here and non-empty in `defaults` are
    /// updated, so upgrades pick up new keys without clobbering user values.
    ///
    /// # Returns
    ///
    /// `true` if any fields were added, `false` otherwise
    #[allow(clippy::useless_let_if_seq)]
    pub fn merge_defaults(&mut self, defaults: &Self) -> bool {
        let mut changed = false;

        if self.logging.level.is_empty() && !defaults.logging.level.is_empty() {
            self.logging.level.clone_from(&defaults.logging.level);
            changed = true;
        }
        if self.logging.file.is_empty() && !defaults.logging.file.is_empty() {
            self.logging.file.clone_from(&defaults.logging.file);
            changed = true;
        }

        if self.paths.storage_file.is_empty() && !defaults.paths.storage_file.is_empty() {
            self.paths
                .storage_file
                .clone_from(&defaults.paths.storage_file);
            changed = true;
        }
        if self.paths.reports_dir.is_empty() && !defaults.paths.reports_dir.is_empty() {
            self.paths
                .reports_dir
                .clone_from(&defaults.paths.reports_dir);
            changed = true;
        }

        changed
    }

    /// Apply CLI-provided overrides onto the loaded configuration
    ///
    /// Overrides last for this run only; the file on disk is untouched.
    pub fn apply_overrides(&mut self, overrides: &ConfigOverrides) {
        if let Some(level) = &overrides.level {
            self.logging.level.clone_from(level);
        }
        if let Some(file) = &overrides.file {
            self.logging.file = Self::expand_variables(file);
        }
        if let Some(verbose) = overrides.verbose {
            self.logging.verbose = verbose;
        }
        if let Some(storage_file) = &overrides.storage_file {
            self.paths.storage_file = Self::expand_variables(storage_file);
        }
        if let Some(reports_dir) = &overrides.reports_dir {
            self.paths.reports_dir = Self::expand_variables(reports_dir);
        }
    }

    /// Get the user config file path
    ///
    /// `config.toml` for release builds, `dconfig.toml` for debug builds,
    /// inside [`get_app_dir`](Self::get_app_dir).
    #[must_use]
    pub fn get_config_file_path() -> PathBuf {
        Self::get_app_dir().join(CONFIG_FILE_NAME)
    }

    /// Expand `$INSTALL_CALC` in a string to the application directory
    #[must_use]
    pub fn expand_variables(value: &str) -> String {
        if value.contains(APP_DIR_VAR) {
            let app_dir = Self::get_app_dir();
            value.replace(APP_DIR_VAR, app_dir.to_str().unwrap_or("."))
        } else {
            value.to_string()
        }
    }

    /// Initialize config from a TOML string
    ///
    /// Missing fields fall back to their serde defaults and `$INSTALL_CALC`
    /// is expanded in every path value.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML cannot be parsed or doesn't match the expected schema
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        let mut config: Self = toml::from_str(toml_str)?;

        config.logging.file = Self::expand_variables(&config.logging.file);
        config.paths.storage_file = Self::expand_variables(&config.paths.storage_file);
        config.paths.reports_dir = Self::expand_variables(&config.paths.reports_dir);

        Ok(config)
    }

    /// Load configuration from embedded defaults
    ///
    /// # Panics
    /// Panics if the embedded default configuration is invalid TOML. The
    /// defaults are compiled into the binary and covered by tests.
    #[must_use]
    pub fn from_defaults() -> Self {
        Self::from_toml(CONFIG_DEFAULTS).expect("Failed to parse compiled-in default configuration")
    }

    /// Load configuration from the user config file, creating it on first run
    ///
    /// Falls back to defaults if the file cannot be read or parsed.
    #[must_use]
    pub fn load() -> Self {
        Self::load_from(&Self::get_config_file_path())
    }

    /// Load configuration from `config_file`, creating it from defaults if absent
    ///
    /// An existing file has missing fields merged in from defaults and is
    /// rewritten when that adds anything.
    #[must_use]
    pub fn load_from(config_file: &Path) -> Self {
        let defaults = Self::from_defaults();

        if config_file.exists() {
            if let Ok(content) = fs::read_to_string(config_file) {
                if let Ok(mut config) = Self::from_toml(&content) {
                    if config.merge_defaults(&defaults) {
                        let _ = config.save_to(config_file);
                    }
                    return config;
                }
            }
        } else {
            let _ = defaults.save_to(config_file);
            return defaults;
        }

        defaults
    }

    /// Save configuration to the user config file
    ///
    /// # Errors
    /// Returns an error if the directory cannot be created, the config
    /// cannot be serialized, or the file cannot be written.
    pub fn save(&self) -> Result<(), Box<dyn std::error::Error>> {
        self.save_to(&Self::get_config_file_path())
    }

    /// Save configuration to `config_file`
    ///
    /// # Errors
    /// Returns an error if the directory cannot be created, the config
    /// cannot be serialized, or the file cannot be written.
    pub fn save_to(&self, config_file: &Path) -> Result<(), Box<dyn std::error::Error>> {
        if let Some(parent) = config_file.parent() {
            fs::create_dir_all(parent)?;
        }
        let toml_str = toml::to_string_pretty(self)?;
        fs::write(config_file, toml_str)?;
        Ok(())
    }

    /// Get a configuration value by key
    ///
    /// Supported keys: `level`, `file`, `verbose`, `storage_file`,
    /// `reports_dir` (dashed spellings accepted for the path keys).
    #[must_use]
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "level" => Some(self.logging.level.clone()),
            "file" => Some(self.logging.file.clone()),
            "verbose" => Some(self.logging.verbose.to_string()),
            "storage_file" | "storage-file" => Some(self.paths.storage_file.clone()),
            "reports_dir" | "reports-dir" => Some(self.paths.reports_dir.clone()),
            _ => None,
        }
    }

    /// Set a configuration value by key
    ///
    /// Updates the in-memory config only; call [`save()`](Config::save) to persist.
    ///
    /// # Errors
    /// Returns an error if the key is not recognized, the level is unknown,
    /// or `verbose` is not a boolean.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), String> {
        match key {
            "level" => {
                let level = value
                    .parse::<crate::logger::Level>()
                    .map_err(|_| format!("Invalid log level: '{value}'"))?;
                self.logging.level = level.as_str().to_string();
            }
            "file" => self.logging.file = value.to_string(),
            "verbose" => {
                self.logging.verbose = value
                    .parse::<bool>()
                    .map_err(|_| format!("Invalid boolean value for 'verbose': '{value}'"))?;
            }
            "storage_file" | "storage-file" => self.paths.storage_file = value.to_string(),
            "reports_dir" | "reports-dir" => self.paths.reports_dir = value.to_string(),
            _ => return Err(format!("Unknown config key: '{key}'")),
        }
        Ok(())
    }

    /// Unset a configuration value by key (reset to its default)
    ///
    /// # Errors
    /// Returns an error if the key is not recognized.
    pub fn unset(&mut self, key: &str, defaults: &Self) -> Result<(), String> {
        match key {
            "level" => self.logging.level.clone_from(&defaults.logging.level),
            "file" => self.logging.file.clone_from(&defaults.logging.file),
            "verbose" => self.logging.verbose = defaults.logging.verbose,
            "storage_file" | "storage-file" => self
                .paths
                .storage_file
                .clone_from(&defaults.paths.storage_file),
            "reports_dir" | "reports-dir" => self
                .paths
                .reports_dir
                .clone_from(&defaults.paths.reports_dir),
            _ => return Err(format!("Unknown config key: '{key}'")),
        }
        Ok(())
    }

    /// Reset all configuration to defaults by deleting the config file
    ///
    /// The next [`load()`](Config::load) recreates it. Succeeds if the file
    /// does not exist.
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

        writeln!(f, "\n[paths]")?;
        writeln!(f, "  storage_file = \"{}\"", self.paths.storage_file)?;
        writeln!(f, "  reports_dir = \"{}\"", self.paths.reports_dir)?;

        Ok(())
    }
}
