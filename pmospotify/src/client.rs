//! Client de l'API Web Spotify
//!
//! Seul l'endpoint "currently playing" est utilisé. Les épisodes de
//! podcast sont demandés explicitement (`additional_types=episode`).

use std::time::Duration;

use pmosync::{PlaybackProvider, PlaybackState};
use reqwest::StatusCode;
use reqwest::blocking::{Client, Response};
use reqwest::header::RETRY_AFTER;
use tracing::{debug, warn};

use crate::auth::SpotifyAuth;
use crate::error::{Result, SpotifyError};
use crate::models::CurrentlyPlaying;

/// URL de base de l'API Web Spotify
pub const API_BASE_URL: &str = "https://api.spotify.com/v1";

/// Timeout par défaut des requêtes vers l'API
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

/// Client Spotify authentifié
pub struct SpotifyClient {
    http: Client,
    api_base: String,
    auth: SpotifyAuth,
}

impl SpotifyClient {
    pub fn new(auth: SpotifyAuth, timeout: Duration) -> Result<Self> {
        let http = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            http,
            api_base: API_BASE_URL.to_string(),
            auth,
        })
    }

    /// Remplace l'URL de base de l'API (serveur de test)
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into().trim_end_matches('/').to_string();
        self
    }

    pub fn auth(&self) -> &SpotifyAuth {
        &self.auth
    }

    pub fn auth_mut(&mut self) -> &mut SpotifyAuth {
        &mut self.auth
    }

    /// Interroge l'état de lecture courant
    ///
    /// # Errors
    ///
    /// * `SpotifyError::Unauthorized` - jeton refusé, il sera renouvelé au
    ///   prochain appel
    /// * `SpotifyError::RateLimited` - quota dépassé
    pub fn currently_playing(&mut self) -> Result<PlaybackState> {
        let token = self.auth.access_token()?;
        let url = format!("{}/me/player/currently-playing", self.api_base);

        debug!("GET {}", url);
        let response = self
            .http
            .get(&url)
            .bearer_auth(token)
            .query(&[("additional_types", "episode")])
            .send()?;

        self.handle_response(response)
    }

    fn handle_response(&mut self, response: Response) -> Result<PlaybackState> {
        let status = response.status();
        debug!("Response status: {}", status);

        match status {
            StatusCode::NO_CONTENT => return Ok(PlaybackState::Idle),
            StatusCode::UNAUTHORIZED => {
                self.auth.invalidate();
                let message = response.text().unwrap_or_default();
                warn!("Spotify rejected the access token: {}", message);
                return Err(SpotifyError::Unauthorized(message));
            }
            StatusCode::TOO_MANY_REQUESTS => {
                let retry_after = response
                    .headers()
                    .get(RETRY_AFTER)
                    .and_then(|v| v.to_str().ok())
                    .and_then(|v| v.trim().parse::<u64>().ok())
                    .map(Duration::from_secs);
                return Err(SpotifyError::RateLimited { retry_after });
            }
            _ => {}
        }

        if !status.is_success() {
            let error_text = response.text().unwrap_or_default();
            warn!("API error ({}): {}", status.as_u16(), error_text);
            return Err(SpotifyError::from_status_code(status.as_u16(), error_text));
        }

        let text = response.text()?;
        if text.trim().is_empty() {
            return Ok(PlaybackState::Idle);
        }

        let playing: CurrentlyPlaying = serde_json::from_str(&text)?;
        Ok(playing.into_playback_state())
    }
}

impl PlaybackProvider for SpotifyClient {
    fn current_playback(&mut self) -> anyhow::Result<PlaybackState> {
        Ok(self.currently_playing()?)
    }
}
