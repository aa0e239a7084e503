//! Internal logger for `installcalc`.
//! Feature flags: `log-info`, `log-debug`, `verbose`, `file-logging`.
//!
//! `warn!` and `error!` always emit. Native targets print to stdout/stderr
//! unless a log file has been opened, in which case tagged messages go there.

use std::fmt::{self, Arguments};
use std::str::FromStr;
#[cfg(feature = "log-debug")]
use std::sync::atomic::AtomicBool;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::LazyLock;

#[cfg(feature = "file-logging")]
use std::{
    fs::{File, OpenOptions},
    io::Write,
    sync::Mutex,
};

/// Logging levels.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Level {
    /// Error-level messages (always enabled).
    Error = 1,
    /// Warning-level messages (always enabled).
    Warn = 2,
    /// Info-level messages (requires `log-info` feature).
    Info = 3,
    /// Debug-level messages (requires `log-debug` feature and runtime enablement).
    Debug = 4,
}

impl Level {
    /// Lowercase name as stored in the config file
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
        }
    }

    const fn tag(self) -> &'static str {
        match self {
            Self::Error => "[ERROR]",
            Self::Warn => "[WARN]",
            Self::Info => "[INFO]",
            Self::Debug => "[DEBUG]",
        }
    }
}

impl FromStr for Level {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "error" | "err" => Ok(Self::Error),
            "warn" | "warning" => Ok(Self::Warn),
            "info" => Ok(Self::Info),
            "debug" => Ok(Self::Debug),
            _ => Err(format!("Unknown log level: '{s}'")),
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

const fn default_level() -> u8 {
    if cfg!(feature = "log-debug") {
        Level::Debug as u8
    } else if cfg!(feature = "log-info") {
        Level::Info as u8
    } else {
        Level::Warn as u8
    }
}

static LOG_LEVEL: LazyLock<AtomicU8> = LazyLock::new(|| AtomicU8::new(default_level()));
#[cfg(feature = "log-debug")]
static DEBUG_ENABLED: AtomicBool = AtomicBool::new(false);
#[cfg(feature = "verbose")]
static VERBOSE_ENABLED: AtomicBool = AtomicBool::new(false);
#[cfg(feature = "file-logging")]
static LOG_FILE: LazyLock<Mutex<Option<File>>> = LazyLock::new(|| Mutex::new(None));

/// Set the global log level.
pub fn set_level(level: Level) {
    LOG_LEVEL.store(level as u8, Ordering::SeqCst);
}

/// Current global log level.
#[must_use]
pub fn current_level() -> Level {
    match LOG_LEVEL.load(Ordering::SeqCst) {
        1 => Level::Error,
        2 => Level::Warn,
        3 => Level::Info,
        _ => Level::Debug,
    }
}

#[must_use]
/// Parse level from string (case-insensitive) and set it. Returns `true` on success.
pub fn set_level_from_str(level: &str) -> bool {
    level.parse::<Level>().map(set_level).is_ok()
}

#[cfg(feature = "log-debug")]
/// Enable debug logging at runtime.
pub fn enable_debug() {
    DEBUG_ENABLED.store(true, Ordering::SeqCst);
}
#[cfg(not(feature = "log-debug"))]
/// Enable debug logging at runtime (no-op when `log-debug` feature is disabled).
pub fn enable_debug() {}

#[cfg(feature = "log-debug")]
/// Returns whether debug logging is enabled.
pub fn is_debug_enabled() -> bool {
    DEBUG_ENABLED.load(Ordering::SeqCst)
}
#[cfg(not(feature = "log-debug"))]
/// Returns whether debug logging is enabled (always false when feature is disabled).
pub const fn is_debug_enabled() -> bool {
    false
}

#[cfg(feature = "verbose")]
/// Enable verbose output at runtime.
pub fn enable_verbose() {
    VERBOSE_ENABLED.store(true, Ordering::SeqCst);
}
#[cfg(not(feature = "verbose"))]
/// Enable verbose output at runtime (no-op when `verbose` feature is disabled).
pub fn enable_verbose() {}

#[cfg(feature = "verbose")]
/// Returns whether verbose output is enabled.
pub fn is_verbose_enabled() -> bool {
    VERBOSE_ENABLED.load(Ordering::SeqCst)
}
#[cfg(not(feature = "verbose"))]
/// Returns whether verbose output is enabled (always false when feature is disabled).
pub const fn is_verbose_enabled() -> bool {
    false
}

#[cfg(feature = "file-logging")]
#[must_use]
/// Initialize file logging to a specific path. Returns `true` on success.
///
/// Missing parent directories are created first.
pub fn init_file_logging(path: &std::path::Path) -> bool {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && std::fs::create_dir_all(parent).is_err() {
            return false;
        }
    }
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .is_ok_and(|file| {
            LOG_FILE.lock().is_ok_and(|mut log_file| {
                *log_file = Some(file);
                true
            })
        })
}

#[cfg(not(feature = "file-logging"))]
/// Initialize file logging (no-op when `file-logging` feature is disabled).
pub fn init_file_logging(_path: &std::path::Path) -> bool {
    false
}

/// Returns `true` when the message was written to the log file.
#[cfg(feature = "file-logging")]
fn write_to_file(message: &str) -> bool {
    let Ok(mut log_file) = LOG_FILE.lock() else {
        return false;
    };
    let Some(file) = log_file.as_mut() else {
        return false;
    };
    let _ = writeln!(file, "{message}");
    let _ = file.flush();
    true
}

#[cfg(not(feature = "file-logging"))]
const fn write_to_file(_message: &str) -> bool {
    false
}

fn emit(level: Level, msg: &str) {
    let line = format!("{} {msg}", level.tag());
    if write_to_file(&line) {
        return;
    }
    match level {
        Level::Error | Level::Warn => eprintln!("{line}"),
        Level::Info | Level::Debug => println!("{line}"),
    }
}

fn should_log(level: Level) -> bool {
    match level {
        Level::Info if !cfg!(feature = "log-info") => return false,
        Level::Debug if !cfg!(feature = "log-debug") => return false,
        _ => {}
    }
    let current = LOG_LEVEL.load(Ordering::SeqCst);
    (level as u8) <= current && (level != Level::Debug || is_debug_enabled())
}

/// Internal logging dispatcher used by public macros.
pub fn log_impl(level: Level, args: Arguments) {
    if should_log(level) {
        emit(level, &args.to_string());
    }
}

#[macro_export]
/// Logs an error-level message (always enabled).
macro_rules! error { ($($arg:tt)*) => { $crate::logger::log_impl($crate::logger::Level::Error, format_args!($($arg)*)) }; }
#[macro_export]
/// Logs a warning-level message (always enabled).
macro_rules! warn  { ($($arg:tt)*) => { $crate::logger::log_impl($crate::logger::Level::Warn,  format_args!($($arg)*)) }; }
#[macro_export]
/// Logs an info-level message (requires `log-info` feature).
macro_rules! info  { ($($arg:tt)*) => { $crate::logger::log_impl($crate::logger::Level::Info,  format_args!($($arg)*)) }; }
#[macro_export]
/// Logs a debug-level message (requires `log-debug` feature and runtime enablement).
macro_rules! debug { ($($arg:tt)*) => { $crate::logger::log_impl($crate::logger::Level::Debug, format_args!($($arg)*)) }; }
#[macro_export]
/// Prints a verbose message when verbose output is enabled. Never written to log files.
macro_rules! verbose {
    ($($arg:tt)*) => {
        if $crate::logger::is_verbose_enabled() { println!($($arg)*); }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_from_str_aliases() {
        assert_eq!("ERR".parse::<Level>(), Ok(Level::Error));
        assert_eq!("warning".parse::<Level>(), Ok(Level::Warn));
        assert_eq!("Info".parse::<Level>(), Ok(Level::Info));
        assert_eq!("debug".parse::<Level>(), Ok(Level::Debug));
        assert!("trace".parse::<Level>().is_err());
    }

    #[test]
    fn test_level_display_matches_config_spelling() {
        assert_eq!(Level::Warn.to_string(), "warn");
        assert_eq!(Level::Debug.as_str(), "debug");
    }
}
