//! Settings file round trips in a scratch directory.

use std::fs;
use std::path::PathBuf;

use tally_core::Mode;
use tally_settings::{Settings, SettingsError, Theme};
use tempfile::TempDir;

fn load(path: PathBuf) -> Result<Settings, SettingsError> {
    Settings::load_with(Some(path), |_| None)
}

#[test]
fn save_then_load_round_trips() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("settings.toml");

    let settings = Settings {
        tax_rate: 0.08,
        precision: 2,
        grouping: false,
        scientific: true,
        theme: Theme::Dark,
        mode: Mode::Expression,
    };
    let written = settings.save(Some(path.clone())).unwrap();
    assert_eq!(written, path);

    let contents = fs::read_to_string(&path).unwrap();
    assert!(contents.contains("tax_rate = 0.08"));
    assert!(contents.contains("mode = \"expression\""));

    let loaded = load(path).unwrap();
    assert_eq!(loaded.precision, 2);
    assert_eq!(loaded.theme, Theme::Dark);
    assert!(loaded.scientific);
}

#[test]
fn missing_file_yields_defaults() {
    let dir = TempDir::new().unwrap();
    let loaded = load(dir.path().join("absent.toml")).unwrap();
    assert_eq!(loaded.precision, Settings::default().precision);
    assert_eq!(loaded.theme, Theme::Light);
}

#[test]
fn partial_file_keeps_other_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("settings.toml");
    fs::write(&path, "precision = 5\ntheme = \"dark\"\n").unwrap();

    let loaded = load(path).unwrap();
    assert_eq!(loaded.precision, 5);
    assert_eq!(loaded.theme, Theme::Dark);
    assert!(loaded.grouping);
}

#[test]
fn out_of_range_file_values_are_clamped() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("settings.toml");
    fs::write(&path, "tax_rate = 3.0\nprecision = 12\n").unwrap();

    let loaded = load(path).unwrap();
    assert_eq!(loaded.tax_rate, 1.0);
    assert_eq!(loaded.precision, 6);
}

#[test]
fn malformed_file_is_a_parse_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("settings.toml");
    fs::write(&path, "precision = = 3").unwrap();

    let result = load(path);
    assert!(matches!(result, Err(SettingsError::Parse(_))));
}

#[test]
fn lookup_overrides_file_values() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("settings.toml");
    fs::write(&path, "precision = 5\nmode = \"sequential\"\n").unwrap();

    let loaded = Settings::load_with(Some(path), |key| match key {
        "TALLY_PRECISION" => Some("2".to_string()),
        "TALLY_MODE" => Some("expression".to_string()),
        _ => None,
    })
    .unwrap();
    assert_eq!(loaded.precision, 2);
    assert_eq!(loaded.mode, Mode::Expression);
}
