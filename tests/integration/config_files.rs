// Config file loading and saving

use deckprofile::config::Config;
use std::fs;
use std::time::Duration;

#[test]
fn test_missing_file_is_created_with_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("config.toml");

    let config = Config::load_from(&path).unwrap();
    assert_eq!(config.activation.timeout(), Duration::from_secs(5));
    assert!(path.exists(), "default config should be written");

    let written = fs::read_to_string(&path).unwrap();
    assert!(written.contains("timeout_secs = 5"));
}

#[test]
fn test_saved_config_is_loaded_back() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");

    let mut config = Config::default();
    config.activation.timeout_secs = 30;
    config.simulation.stall = true;
    config.save_to(&path).unwrap();

    let loaded = Config::load_from(&path).unwrap();
    assert_eq!(loaded.activation.timeout_secs, 30);
    assert!(loaded.simulation.stall);
}

#[test]
fn test_malformed_file_reports_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "[activation]\ntimeout_secs = \"soon\"\n").unwrap();

    let err = Config::load_from(&path).unwrap_err();
    assert!(format!("{:#}", err).contains("Failed to parse config file"));
}
