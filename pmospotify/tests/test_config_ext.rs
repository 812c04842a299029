use std::time::Duration;

use mockito::Matcher;
use pmoconfig::Config;
use pmospotify::{Credentials, SpotifyAuth, SpotifyClient, SpotifyConfigExt};

fn config() -> (tempfile::TempDir, Config) {
    let temp_dir = tempfile::tempdir().unwrap();
    let config = Config::load_config(temp_dir.path().to_str().unwrap()).unwrap();
    (temp_dir, config)
}

#[test]
fn test_credentials_roundtrip() {
    let (_dir, config) = config();
    let credentials =
        Credentials::new("my-client", "my-secret", "http://127.0.0.1:8888/callback").unwrap();

    config.set_spotify_credentials(&credentials).unwrap();
    assert_eq!(config.get_spotify_credentials().unwrap(), credentials);
}

#[test]
fn test_refresh_token_persists() {
    let (dir, config) = config();
    assert_eq!(config.get_spotify_refresh_token().unwrap(), None);

    config.set_spotify_refresh_token("refresh-1").unwrap();

    let reloaded = Config::load_config(dir.path().to_str().unwrap()).unwrap();
    assert_eq!(
        reloaded.get_spotify_refresh_token().unwrap().as_deref(),
        Some("refresh-1")
    );
}

#[test]
fn test_request_timeout() {
    let (_dir, config) = config();
    assert_eq!(
        config.get_spotify_request_timeout().unwrap(),
        Duration::from_secs(5)
    );

    config
        .set_u64(&["spotify", "request_timeout_ms"], 1200)
        .unwrap();
    assert_eq!(
        config.get_spotify_request_timeout().unwrap(),
        Duration::from_millis(1200)
    );
}

#[test]
fn test_rotated_refresh_token_is_saved() {
    let (dir, config) = config();
    config.set_spotify_refresh_token("refresh-1").unwrap();

    let mut server = mockito::Server::new();
    let token = server
        .mock("POST", "/api/token")
        .match_body(Matcher::UrlEncoded(
            "refresh_token".into(),
            "refresh-1".into(),
        ))
        .with_status(200)
        .with_body(
            r#"{"access_token": "access-2", "expires_in": 3600, "refresh_token": "refresh-2"}"#,
        )
        .expect(1)
        .create();
    let playing = server
        .mock("GET", "/me/player/currently-playing")
        .match_query(Matcher::Any)
        .match_header("authorization", "Bearer access-2")
        .with_status(204)
        .create();

    let credentials =
        Credentials::new("my-client", "my-secret", "http://127.0.0.1:8888/callback").unwrap();
    let auth = SpotifyAuth::new(credentials, Duration::from_secs(2))
        .unwrap()
        .with_token_url(format!("{}/api/token", server.url()))
        .with_refresh_token(config.get_spotify_refresh_token().unwrap());
    let auth = config.persist_refresh_token_rotations(auth);
    let mut client = SpotifyClient::new(auth, Duration::from_secs(2))
        .unwrap()
        .with_api_base(server.url());

    assert!(client.currently_playing().unwrap().is_idle());
    token.assert();
    playing.assert();

    let reloaded = Config::load_config(dir.path().to_str().unwrap()).unwrap();
    assert_eq!(
        reloaded.get_spotify_refresh_token().unwrap().as_deref(),
        Some("refresh-2")
    );
}
