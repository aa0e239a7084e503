//! Command-line interface entry point for `installcalc`

mod args;
mod commands;

use args::{Cli, Command};
use clap::Parser;
use installment_calc::config::Config;
use installment_calc::{debug, info};
use installment_calc::logger::{
    current_level, enable_debug, enable_verbose, init_file_logging, set_level, Level,
};

fn main() {
    let args = Cli::parse();

    // Load configuration once at startup and apply CLI overrides to it
    let mut config = Config::load();
    let defaults = Config::from_defaults();
    config.apply_overrides(&args.to_config_overrides());

    // CLI flag overrides config logging.level; fallback warn
    let mut level = args
        .log_level
        .map(Level::from)
        .or_else(|| config.logging.level.parse().ok())
        .unwrap_or(Level::Warn);

    if args.debug_flag || level == Level::Debug {
        level = Level::Debug;
        enable_debug();
    }

    let verbose = args.verbose || config.logging.verbose;
    if verbose {
        enable_verbose();
    }
    set_level(level);
    debug!("Log level set to {}", current_level());

    // File logging: CLI flag wins, otherwise config logging.file if set
    let config_log_path: Option<std::path::PathBuf> = if config.logging.file.is_empty() {
        None
    } else {
        Some(std::path::PathBuf::from(&config.logging.file))
    };

    if let Some(log_path) = args.log_file.as_ref().or(config_log_path.as_ref()) {
        let display_path = log_path.to_string_lossy();
        if init_file_logging(log_path) {
            info!("File logging initialized at: {display_path}");
        } else {
            eprintln!("✗ Failed to initialize file logging at: {display_path}");
        }
    }

    match args.command {
        Command::Calc { input } => {
            commands::calc::run(&input.to_raw_input(), &config);
        }
        Command::Settings { subcommand } => {
            commands::settings::run(subcommand, &config);
        }
        Command::Theme { theme } => {
            commands::theme::run(theme, &config);
        }
        Command::Report {
            input,
            format,
            output,
        } => {
            commands::report::run(&input.to_raw_input(), format, output.as_deref(), &config);
        }
        Command::Config { subcommand } => {
            commands::config::run(subcommand, &mut config, &defaults);
        }
    }
}
