use pmoconfig::Config;
use tempfile::TempDir;

fn load_in_tempdir() -> (TempDir, Config) {
    let temp_dir = tempfile::tempdir().unwrap();
    let config = Config::load_config(temp_dir.path().to_str().unwrap()).unwrap();
    (temp_dir, config)
}

#[test]
fn test_defaults_are_embedded() {
    let (_temp_dir, config) = load_in_tempdir();

    assert_eq!(config.get_log_min_level().unwrap(), "INFO");
    assert_eq!(config.get_u64(&["matrix", "target_resolution"], 0).unwrap(), 64);
    assert_eq!(
        config.get_string(&["matrix", "hostname"]).unwrap().as_deref(),
        Some("LedMatrix")
    );
    assert!(config.get_bool(&["matrix", "startup_screensaver"], false).unwrap());
}

#[test]
fn test_load_writes_config_file() {
    let (temp_dir, _config) = load_in_tempdir();
    assert!(temp_dir.path().join("config.yaml").exists());
}

#[test]
fn test_external_file_is_merged() {
    let temp_dir = tempfile::tempdir().unwrap();
    std::fs::write(
        temp_dir.path().join("config.yaml"),
        "Matrix:\n  HostName: Kitchen\n",
    )
    .unwrap();

    let config = Config::load_config(temp_dir.path().to_str().unwrap()).unwrap();

    assert_eq!(
        config.get_string(&["matrix", "hostname"]).unwrap().as_deref(),
        Some("Kitchen")
    );
    // Les autres valeurs par défaut restent présentes
    assert_eq!(config.get_u64(&["sync", "backoff_ms"], 0).unwrap(), 3000);
}

#[test]
fn test_setters_persist() {
    let temp_dir = tempfile::tempdir().unwrap();
    let dir = temp_dir.path().to_str().unwrap();

    {
        let config = Config::load_config(dir).unwrap();
        config.set_string(&["spotify", "refresh_token"], "abc").unwrap();
        config.set_u64(&["sync", "polling_interval_ms"], 250).unwrap();
        config.set_bool(&["matrix", "startup_screensaver"], false).unwrap();
    }

    let reloaded = Config::load_config(dir).unwrap();
    assert_eq!(
        reloaded.get_string(&["spotify", "refresh_token"]).unwrap().as_deref(),
        Some("abc")
    );
    assert_eq!(reloaded.get_u64(&["sync", "polling_interval_ms"], 0).unwrap(), 250);
    assert!(!reloaded.get_bool(&["matrix", "startup_screensaver"], true).unwrap());
}

#[test]
fn test_blank_strings_are_none() {
    let (_temp_dir, config) = load_in_tempdir();
    assert_eq!(config.get_string(&["spotify", "client_id"]).unwrap(), None);
    assert_eq!(config.get_string(&["does", "not", "exist"]).unwrap(), None);
}

#[test]
fn test_invalid_number_is_error() {
    let (_temp_dir, config) = load_in_tempdir();
    config.set_string(&["sync", "backoff_ms"], "soon").unwrap();
    assert!(config.get_u64(&["sync", "backoff_ms"], 3000).is_err());
    assert_eq!(config.get_u64(&["sync", "missing_key"], 42).unwrap(), 42);
}
