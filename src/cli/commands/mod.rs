//! CLI command handlers for `installcalc`.
//!
//! Each subcommand is implemented in its own submodule.

pub mod calc;
pub mod config;
pub mod report;
pub mod settings;
pub mod theme;

use installment_calc::config::Config;
use installment_calc::core::store::{FileStore, SettingsStore};
use installment_calc::debug;
use std::io::{self, Write};

/// Open the settings store at the configured storage file
pub fn open_store(config: &Config) -> SettingsStore<FileStore> {
    debug!("Using storage file {}", config.paths.storage_file);
    SettingsStore::new(FileStore::new(&config.paths.storage_file))
}

/// Ask a yes/no question on stdin; anything but `y`/`yes` means no
pub fn confirm(prompt: &str) -> bool {
    print!("{prompt} (y/n): ");
    io::stdout().flush().ok();

    let mut response = String::new();
    io::stdin().read_line(&mut response).ok();

    let response = response.trim();
    response.eq_ignore_ascii_case("y") || response.eq_ignore_ascii_case("yes")
}
