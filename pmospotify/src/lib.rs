//! # pmospotify - Source "en cours de lecture" Spotify
//!
//! Client minimal de l'API Web Spotify : authentification OAuth
//! (Authorization Code + refresh token) et lecture de l'état
//! `currently-playing`, converti en [`pmosync::PlaybackState`].
//!
//! ## Utilisation
//!
//! ```rust,no_run
//! use pmospotify::{Credentials, SpotifyAuth, SpotifyClient};
//! use std::time::Duration;
//!
//! let credentials = Credentials::new("client-id", "client-secret", "http://127.0.0.1:8888/callback")?;
//! let auth = SpotifyAuth::new(credentials, Duration::from_secs(5))?
//!     .with_refresh_token(Some("stored-refresh-token".to_string()));
//! let mut client = SpotifyClient::new(auth, Duration::from_secs(5))?;
//! let state = client.currently_playing()?;
//! println!("{:?}", state);
//! # Ok::<(), pmospotify::SpotifyError>(())
//! ```

pub mod auth;
pub mod client;
pub mod error;
pub mod models;

#[cfg(feature = "pmoconfig")]
pub mod config_ext;

pub use auth::{
    extract_code, prompt_authorization, AccessToken, Credentials, RotationHook, SpotifyAuth,
};
pub use client::{SpotifyClient, API_BASE_URL, DEFAULT_REQUEST_TIMEOUT};
pub use error::{Result, SpotifyError};
pub use models::{Album, CurrentlyPlaying, PlayingItem};

#[cfg(feature = "pmoconfig")]
pub use config_ext::SpotifyConfigExt;
