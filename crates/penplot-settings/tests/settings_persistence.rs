//! Settings round trips through real files

use penplot_core::LengthUnit;
use penplot_settings::{Config, SettingsError, SettingsPersistence};
use tempfile::TempDir;

fn customised() -> Config {
    let mut config = Config::default();
    config.machine.width = 11.0;
    config.machine.height = 8.5;
    config.machine.unit = LengthUnit::In;
    config.sampling.step = 2.5;
    config.placement.snap_to_grid = true;
    config.placement.snap_step_mm = 5.0;
    config.playback.tick_ms = 16;
    config.nudge.move_mm = 0.5;
    config
}

#[test]
fn test_toml_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested/config.toml");

    customised().save_to_file(&path).unwrap();
    let loaded = Config::load_from_file(&path).unwrap();
    assert_eq!(loaded, customised());
}

#[test]
fn test_json_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.json");

    customised().save_to_file(&path).unwrap();
    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.contains("\"unit\": \"in\""));
    assert_eq!(Config::load_from_file(&path).unwrap(), customised());
}

#[test]
fn test_invalid_file_rejected_on_load() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[sampling]\nstep = -1.0\n").unwrap();

    assert!(matches!(
        Config::load_from_file(&path),
        Err(SettingsError::InvalidSetting { .. })
    ));

    let store = SettingsPersistence::open_or_default(&path);
    assert_eq!(*store.config(), Config::default());
}

#[test]
fn test_malformed_toml() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[machine\nwidth = ").unwrap();
    assert!(matches!(
        Config::load_from_file(&path),
        Err(SettingsError::TomlError(_))
    ));
}

#[test]
fn test_store_edit_and_save() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("penplot/config.toml");

    let mut store = SettingsPersistence::open(&path).unwrap();
    store.config_mut().placement.show_grid = false;
    store.save().unwrap();

    let reopened = SettingsPersistence::open(&path).unwrap();
    assert!(!reopened.config().placement.show_grid);

    let mut bad = Config::default();
    bad.placement.grid_step_mm = 0.0;
    let mut store = reopened;
    assert!(store.replace(bad).is_err());
    assert!(!store.config().placement.show_grid);
}
