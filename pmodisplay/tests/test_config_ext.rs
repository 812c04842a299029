use std::time::Duration;

use pmoconfig::Config;
use pmodisplay::DisplayConfigExt;

#[test]
fn test_matrix_defaults() {
    let temp_dir = tempfile::tempdir().unwrap();
    let config = Config::load_config(temp_dir.path().to_str().unwrap()).unwrap();

    assert_eq!(config.get_matrix_hostname().unwrap(), "LedMatrix");
    assert_eq!(config.get_post_timeout().unwrap(), Duration::from_secs(5));
}

#[test]
fn test_matrix_display_from_config() {
    let temp_dir = tempfile::tempdir().unwrap();
    let config = Config::load_config(temp_dir.path().to_str().unwrap()).unwrap();

    // Adresse littérale : aucune résolution réseau
    config.set_matrix_hostname("127.0.0.1").unwrap();
    config.set_u64(&["matrix", "post_timeout_ms"], 1500).unwrap();

    assert_eq!(config.get_post_timeout().unwrap(), Duration::from_millis(1500));
    let display = config.create_matrix_display().unwrap();
    assert_eq!(display.endpoints().image_url, "http://127.0.0.1/image");
    assert_eq!(
        display.endpoints().screensaver_url,
        "http://127.0.0.1/screensaver"
    );
}
