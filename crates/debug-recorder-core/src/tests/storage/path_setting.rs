use crate::{PathSetting, RecorderError, TomlPathSetting};

use std::path::PathBuf;

use tempfile::TempDir;

/// WHAT: A missing setting file loads as absent
/// WHY: First launch has no resumable recording
#[test]
#[allow(clippy::unwrap_used)]
fn given_missing_file_when_loading_then_none() {
    // Given: A setting path that does not exist
    let dir = TempDir::new().unwrap();
    let setting = TomlPathSetting::new(dir.path().join("recorder_state.toml"));

    // When: Loading
    let value = setting.load().unwrap();

    // Then: No path is persisted
    assert_eq!(value, None);
}

/// WHAT: A stored path survives a fresh instance and clearing removes it
/// WHY: The setting is how a recording survives process death
#[test]
#[allow(clippy::unwrap_used)]
fn given_stored_path_when_reloading_then_path_restored_until_cleared() {
    // Given: A setting in a nested, not yet created directory
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config").join("recorder_state.toml");
    let log_dir = PathBuf::from("/var/cache/app/debug/logs/run");

    // When: Storing through one instance and loading through another
    TomlPathSetting::new(&path).store(Some(&log_dir)).unwrap();
    let restored = TomlPathSetting::new(&path).load().unwrap();

    // Then: The path round-trips, and clearing empties it
    assert_eq!(restored, Some(log_dir));
    let setting = TomlPathSetting::new(&path);
    setting.store(None).unwrap();
    assert_eq!(setting.load().unwrap(), None);
    assert!(!path.with_extension("toml.tmp").exists());
}

/// WHAT: A corrupt file is reported as a setting error
/// WHY: Parse failures must not be mistaken for "no recording"
#[test]
#[allow(clippy::unwrap_used)]
fn given_corrupt_file_when_loading_then_setting_error() {
    // Given: A file that is not valid TOML
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("recorder_state.toml");
    std::fs::write(&path, "log_dir = = broken").unwrap();

    // When: Loading
    let result = TomlPathSetting::new(&path).load();

    // Then: Setting error
    assert!(matches!(result, Err(RecorderError::Setting { .. })));
}
