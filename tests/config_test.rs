//! Integration tests for Settings layered loading.
//!
//! These tests run without a global config (temp directories only),
//! so they effectively test local config merging with defaults.

use std::fs;

use tempfile::TempDir;

use pyrpath::config::{local_config_path, Settings};

#[test]
fn given_no_local_config_when_load_then_uses_defaults() {
    // Arrange
    let dir = TempDir::new().unwrap();

    // Act
    let settings = Settings::load(Some(dir.path())).expect("load settings");

    // Assert
    assert!(settings.search.strict_rows);
    assert_eq!(settings.replay.step_delay_ms, 850);
    assert_eq!(settings.replay.marker_delay_ms, 0);
    assert_eq!(settings.layout.cell_width, 60.0);
}

#[test]
fn given_local_config_when_load_then_overrides_specified_values() {
    // Arrange
    let dir = TempDir::new().unwrap();
    let local = r#"
[search]
strict_rows = false

[replay]
step_delay_ms = 100
"#;
    fs::write(local_config_path(dir.path()), local).unwrap();

    // Act
    let settings = Settings::load(Some(dir.path())).expect("load settings");

    // Assert
    assert!(!settings.search.strict_rows);
    assert_eq!(settings.replay.step_delay_ms, 100);
    assert_eq!(
        settings.replay.marker_delay_ms, 0,
        "unspecified values keep their defaults"
    );
}

#[test]
fn given_invalid_toml_when_load_then_config_error_names_file() {
    let dir = TempDir::new().unwrap();
    fs::write(local_config_path(dir.path()), "[replay\nstep_delay_ms = ").unwrap();

    let err = Settings::load(Some(dir.path())).unwrap_err();

    assert!(err.to_string().contains(".pyrpath.toml"));
}

#[test]
fn given_explicit_file_when_load_from_then_applies_it() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("custom.toml");
    fs::write(&path, "[layout]\ncell_width = 30.0\ncell_height = 40.0\n").unwrap();

    let settings = Settings::load_from(&path).unwrap();

    assert_eq!(settings.layout().cell_width, 30.0);
    assert_eq!(settings.layout().cell_height, 40.0);
}

#[test]
fn given_missing_file_when_load_from_then_errors() {
    let dir = TempDir::new().unwrap();

    let result = Settings::load_from(&dir.path().join("nope.toml"));

    assert!(result.is_err());
}

#[test]
fn given_settings_when_rendering_toml_then_round_trips_through_load_from() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("dump.toml");
    let mut settings = Settings::default();
    settings.replay.step_delay_ms = 5;

    fs::write(&path, settings.to_toml().unwrap()).unwrap();

    assert_eq!(Settings::load_from(&path).unwrap(), settings);
}
