//! Integration tests for loading `AppConfig` from TOML files.

use beat_core::{AppConfig, ConfigError, PriceField, WindowSelector};
use std::path::PathBuf;

fn write_temp_config(name: &str, contents: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!(
        "beat-config-{}-{}.toml",
        name,
        std::process::id()
    ));
    std::fs::write(&path, contents).expect("Failed to write temp config");
    path
}

#[test]
fn test_missing_file_uses_defaults() {
    let path = std::env::temp_dir().join("beat-config-does-not-exist.toml");
    let config = AppConfig::load(&path).expect("defaults should load");

    assert_eq!(config.compare.default_benchmark, "VOO");
    assert_eq!(config.compare.request_timeout_secs, 30);
    assert_eq!(config.data.max_retries, 2);
}

#[test]
fn test_partial_file_overrides_defaults() {
    let path = write_temp_config(
        "partial",
        r#"
[compare]
timezone = "Asia/Seoul"
price_field = "unadjusted"
default_window = "5y"

[logging]
level = "debug"
"#,
    );

    let config = AppConfig::load(&path).expect("config should load");
    std::fs::remove_file(&path).ok();

    assert_eq!(config.compare.timezone().unwrap(), chrono_tz::Asia::Seoul);
    assert_eq!(config.compare.price_field().unwrap(), PriceField::Unadjusted);
    assert_eq!(config.compare.default_window().unwrap(), WindowSelector::Y5);
    // untouched keys keep their defaults
    assert_eq!(config.compare.default_benchmark, "VOO");
    assert_eq!(config.logging.level, "debug");
    assert_eq!(config.logging.format, "compact");
}

#[test]
fn test_invalid_timezone_is_rejected() {
    let path = write_temp_config(
        "bad-tz",
        r#"
[compare]
timezone = "Nowhere/Special"
"#,
    );

    let result = AppConfig::load(&path);
    std::fs::remove_file(&path).ok();

    assert!(matches!(result, Err(ConfigError::Validation(_))));
}
