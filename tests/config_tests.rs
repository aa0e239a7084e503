//! Integration tests for configuration management

use installment_calc::config::{Config, ConfigOverrides};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Helper to create a temporary config directory
fn setup_temp_config() -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_file = temp_dir.path().join("nested").join("config.toml");
    (temp_dir, config_file)
}

#[test]
fn test_config_from_defaults() {
    let config = Config::from_defaults();

    assert!(
        !config.logging.level.is_empty(),
        "Default log level should not be empty"
    );
    assert!(
        !config.paths.storage_file.is_empty(),
        "Default storage_file should not be empty"
    );
    assert!(
        !config.paths.reports_dir.is_empty(),
        "Default reports_dir should not be empty"
    );
}

#[test]
fn test_config_from_toml_basic() {
    let toml_str = r#"
[logging]
level = "info"
file = "/tmp/test.log"
verbose = true

[paths]
storage_file = "./storage.json"
reports_dir = "./reports"
"#;

    let config = Config::from_toml(toml_str).expect("Failed to parse TOML");

    assert_eq!(config.logging.level, "info");
    assert_eq!(config.logging.file, "/tmp/test.log");
    assert!(config.logging.verbose);
    assert_eq!(config.paths.storage_file, "./storage.json");
    assert_eq!(config.paths.reports_dir, "./reports");
}

#[test]
fn test_config_from_toml_partial() {
    let toml_str = r#"
[logging]
level = "error"
"#;

    let config = Config::from_toml(toml_str).expect("Failed to parse partial TOML");

    assert_eq!(config.logging.level, "error");
    assert_eq!(config.logging.file, "");
    assert!(!config.logging.verbose);
    assert_eq!(config.paths.storage_file, "");
}

#[test]
fn test_config_variable_expansion() {
    let toml_str = r#"
[logging]
file = "$INSTALL_CALC/test.log"

[paths]
storage_file = "$INSTALL_CALC/storage.json"
"#;

    let config = Config::from_toml(toml_str).expect("Failed to parse TOML with variables");

    assert!(config.logging.file.contains("installcalc"));
    assert!(!config.logging.file.contains("$INSTALL_CALC"));
    assert!(config.paths.storage_file.ends_with("storage.json"));
    assert!(!config.paths.storage_file.contains("$INSTALL_CALC"));
}

#[test]
fn test_config_get_set() {
    let mut config = Config::from_defaults();

    assert!(config.get("level").is_some());

    config.set("level", "debug").expect("Failed to set level");
    assert_eq!(config.get("level").unwrap(), "debug");

    config
        .set("verbose", "true")
        .expect("Failed to set verbose");
    assert_eq!(config.get("verbose").unwrap(), "true");
    assert!(config.logging.verbose);
    assert!(config.set("verbose", "maybe").is_err());

    config
        .set("storage-file", "/tmp/s.json")
        .expect("Failed to set storage file");
    assert_eq!(config.get("storage_file").unwrap(), "/tmp/s.json");

    assert!(config.get("unknown_key").is_none());
    assert!(config.set("unknown_key", "value").is_err());
}

#[test]
fn test_config_unset() {
    let mut config = Config::from_defaults();
    let defaults = Config::from_defaults();

    config.set("level", "error").expect("Failed to set level");
    config.set("reports_dir", "/elsewhere").expect("Failed to set reports_dir");

    config
        .unset("level", &defaults)
        .expect("Failed to unset level");
    config
        .unset("reports_dir", &defaults)
        .expect("Failed to unset reports_dir");
    assert_eq!(config.logging.level, defaults.logging.level);
    assert_eq!(config.paths.reports_dir, defaults.paths.reports_dir);
    assert!(config.unset("nope", &defaults).is_err());
}

#[test]
fn test_config_save_and_load() {
    let (_temp_dir, config_file) = setup_temp_config();

    let mut config = Config::from_defaults();
    config.set("level", "info").expect("Failed to set level");
    config
        .set("storage_file", "/data/fees.json")
        .expect("Failed to set storage file");
    config.save_to(&config_file).expect("Failed to save config");

    let loaded = Config::load_from(&config_file);
    assert_eq!(loaded.logging.level, "info");
    assert_eq!(loaded.paths.storage_file, "/data/fees.json");
}

#[test]
fn test_load_from_creates_missing_file() {
    let (_temp_dir, config_file) = setup_temp_config();
    assert!(!config_file.exists());

    let config = Config::load_from(&config_file);

    assert!(config_file.exists());
    assert_eq!(config.logging.level, Config::from_defaults().logging.level);
}

#[test]
fn test_load_from_fills_new_fields() {
    let (_temp_dir, config_file) = setup_temp_config();
    fs::create_dir_all(config_file.parent().unwrap()).unwrap();
    fs::write(&config_file, "[logging]\nlevel = \"error\"\n").unwrap();

    let config = Config::load_from(&config_file);

    assert_eq!(config.logging.level, "error");
    assert!(!config.paths.storage_file.is_empty());
    let rewritten = fs::read_to_string(&config_file).unwrap();
    assert!(rewritten.contains("storage_file"));
}

#[test]
fn test_load_from_unparsable_file_uses_defaults() {
    let (_temp_dir, config_file) = setup_temp_config();
    fs::create_dir_all(config_file.parent().unwrap()).unwrap();
    fs::write(&config_file, "this is = = not toml").unwrap();

    let config = Config::load_from(&config_file);

    assert_eq!(config.logging.level, Config::from_defaults().logging.level);
}

#[test]
fn test_config_overrides_apply() {
    let mut config = Config::from_defaults();

    let overrides = ConfigOverrides {
        level: Some("error".to_string()),
        file: Some("/custom/path.log".to_string()),
        verbose: Some(true),
        storage_file: Some("$INSTALL_CALC/other.json".to_string()),
        reports_dir: Some("./custom_reports".to_string()),
    };

    config.apply_overrides(&overrides);

    assert_eq!(config.logging.level, "error");
    assert_eq!(config.logging.file, "/custom/path.log");
    assert!(config.logging.verbose);
    assert!(config.paths.storage_file.ends_with("other.json"));
    assert!(!config.paths.storage_file.contains("$INSTALL_CALC"));
    assert_eq!(config.paths.reports_dir, "./custom_reports");
}

#[test]
fn test_config_overrides_partial() {
    let mut config = Config::from_defaults();
    let before = config.paths.storage_file.clone();

    let overrides = ConfigOverrides {
        level: Some("debug".to_string()),
        ..ConfigOverrides::default()
    };

    config.apply_overrides(&overrides);

    assert_eq!(config.logging.level, "debug");
    assert_eq!(config.paths.storage_file, before);
}

#[test]
fn test_config_display_format() {
    let config = Config::from_defaults();
    let display_str = format!("{config}");

    assert!(display_str.contains("[logging]"));
    assert!(display_str.contains("[paths]"));
    assert!(display_str.contains("level"));
    assert!(display_str.contains("storage_file"));
    assert!(display_str.contains("reports_dir"));
}

#[test]
fn test_merge_defaults_adds_missing_fields() {
    let toml_str = r#"
[logging]
level = "error"
file = ""
verbose = false

[paths]
storage_file = ""
reports_dir = ""
"#;

    let mut config = Config::from_toml(toml_str).expect("Failed to parse minimal config");
    let defaults = Config::from_defaults();

    let changed = config.merge_defaults(&defaults);

    assert!(
        changed,
        "merge_defaults should return true when fields are added"
    );
    assert_eq!(config.paths.storage_file, defaults.paths.storage_file);
}

#[test]
fn test_merge_defaults_preserves_existing() {
    let toml_str = r#"
[logging]
level = "error"
file = "/my/custom/path.log"
verbose = false

[paths]
storage_file = "/my/store.json"
reports_dir = "/my/reports"
"#;

    let mut config = Config::from_toml(toml_str).expect("Failed to parse config");
    let defaults = Config::from_defaults();

    assert!(!config.merge_defaults(&defaults));
    assert_eq!(config.logging.level, "error");
    assert_eq!(config.logging.file, "/my/custom/path.log");
    assert_eq!(config.paths.storage_file, "/my/store.json");
}

#[test]
fn test_get_app_dir() {
    let dir = Config::get_app_dir();

    assert!(dir.to_string_lossy().contains("installcalc"));
    assert_ne!(dir, PathBuf::from("."));
}

#[test]
fn test_get_config_file_path() {
    let path = Config::get_config_file_path();

    let path_str = path.to_string_lossy();
    assert!(path_str.ends_with("config.toml") || path_str.ends_with("dconfig.toml"));
}
