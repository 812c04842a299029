use std::time::Duration;

use pmoconfig::Config;
use pmosync::{SyncConfigExt, SyncSettings};

#[test]
fn test_default_sync_settings() {
    let temp_dir = tempfile::tempdir().unwrap();
    let config = Config::load_config(temp_dir.path().to_str().unwrap()).unwrap();

    assert_eq!(config.get_sync_settings().unwrap(), SyncSettings::default());
}

#[test]
fn test_sync_settings_roundtrip() {
    let temp_dir = tempfile::tempdir().unwrap();
    let config = Config::load_config(temp_dir.path().to_str().unwrap()).unwrap();

    config.set_polling_interval(Duration::from_millis(250)).unwrap();
    config.set_sync_backoff(Duration::from_secs(10)).unwrap();
    config.set_bool(&["matrix", "startup_screensaver"], false).unwrap();

    let settings = config.get_sync_settings().unwrap();
    assert_eq!(settings.polling_interval, Duration::from_millis(250));
    assert_eq!(settings.backoff, Duration::from_secs(10));
    assert!(!settings.startup_screensaver);
}
