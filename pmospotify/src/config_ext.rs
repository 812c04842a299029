//! Extension pour intégrer la configuration Spotify dans pmoconfig
//!
//! Ce module fournit le trait `SpotifyConfigExt` qui ajoute à
//! `pmoconfig::Config` les paramètres de l'application Spotify et la
//! persistance du refresh token.

use std::env;
use std::io;
use std::time::Duration;

use anyhow::{Context, Result};
use pmoconfig::Config;
use tracing::{info, warn};

use crate::auth::{prompt_authorization, Credentials, SpotifyAuth};
use crate::client::{SpotifyClient, DEFAULT_REQUEST_TIMEOUT};

/// Trait d'extension pour gérer la configuration Spotify dans pmoconfig
///
/// # Exemple
///
/// ```rust,ignore
/// use pmoconfig::Config;
/// use pmospotify::SpotifyConfigExt;
///
/// let config = Config::load_config("")?;
/// let client = config.authenticate_spotify()?;
/// ```
pub trait SpotifyConfigExt {
    /// Paramètres de l'application Spotify
    ///
    /// Lus dans la section `spotify`, à défaut dans les variables
    /// `CLIENT_ID`, `CLIENT_SECRET` et `REDIRECT_URI`.
    ///
    /// # Errors
    ///
    /// Retourne une erreur si l'un des trois paramètres manque.
    fn get_spotify_credentials(&self) -> Result<Credentials>;

    /// Définit les paramètres de l'application Spotify
    fn set_spotify_credentials(&self, credentials: &Credentials) -> Result<()>;

    /// Refresh token obtenu lors d'une autorisation précédente
    fn get_spotify_refresh_token(&self) -> Result<Option<String>>;

    /// Mémorise le refresh token
    fn set_spotify_refresh_token(&self, token: &str) -> Result<()>;

    /// Timeout des requêtes vers l'API (default: 5 s)
    fn get_spotify_request_timeout(&self) -> Result<Duration>;

    /// Sauvegarde chaque refresh token émis par la suite pour `auth`
    fn persist_refresh_token_rotations(&self, auth: SpotifyAuth) -> SpotifyAuth;

    /// Crée un client authentifié
    ///
    /// Utilise le refresh token mémorisé, sinon lance l'autorisation
    /// interactive sur l'entrée standard. Tout refresh token émis, au
    /// démarrage comme pendant la boucle, est sauvegardé.
    fn authenticate_spotify(&self) -> Result<SpotifyClient>;
}

fn setting(config: &Config, key: &str, legacy_env: &str) -> Result<Option<String>> {
    if let Some(value) = config.get_string(&["spotify", key])? {
        return Ok(Some(value));
    }
    Ok(env::var(legacy_env).ok().filter(|v| !v.trim().is_empty()))
}

impl SpotifyConfigExt for Config {
    fn get_spotify_credentials(&self) -> Result<Credentials> {
        let client_id = setting(self, "client_id", "CLIENT_ID")?.unwrap_or_default();
        let client_secret = setting(self, "client_secret", "CLIENT_SECRET")?.unwrap_or_default();
        let redirect_uri = setting(self, "redirect_uri", "REDIRECT_URI")?.unwrap_or_default();

        Credentials::new(client_id, client_secret, redirect_uri)
            .context("Spotify credentials are not configured")
    }

    fn set_spotify_credentials(&self, credentials: &Credentials) -> Result<()> {
        self.set_string(&["spotify", "client_id"], &credentials.client_id)?;
        self.set_string(&["spotify", "client_secret"], &credentials.client_secret)?;
        self.set_string(&["spotify", "redirect_uri"], &credentials.redirect_uri)
    }

    fn get_spotify_refresh_token(&self) -> Result<Option<String>> {
        self.get_string(&["spotify", "refresh_token"])
    }

    fn set_spotify_refresh_token(&self, token: &str) -> Result<()> {
        self.set_string(&["spotify", "refresh_token"], token)
    }

    fn get_spotify_request_timeout(&self) -> Result<Duration> {
        let default = DEFAULT_REQUEST_TIMEOUT.as_millis() as u64;
        let millis = self.get_u64(&["spotify", "request_timeout_ms"], default)?;
        Ok(Duration::from_millis(millis))
    }

    fn persist_refresh_token_rotations(&self, auth: SpotifyAuth) -> SpotifyAuth {
        let config = self.clone();
        auth.on_refresh_token_rotated(move |token| {
            match config.set_spotify_refresh_token(token) {
                Ok(()) => info!("Spotify refresh token saved to configuration"),
                Err(e) => warn!("Cannot save Spotify refresh token: {:#}", e),
            }
        })
    }

    fn authenticate_spotify(&self) -> Result<SpotifyClient> {
        let credentials = self.get_spotify_credentials()?;
        let timeout = self.get_spotify_request_timeout()?;
        let stored = self.get_spotify_refresh_token()?;

        let auth = SpotifyAuth::new(credentials, timeout)?.with_refresh_token(stored);
        let mut auth = self.persist_refresh_token_rotations(auth);

        if auth.refresh_token().is_some() {
            auth.refresh()
                .context("Cannot refresh Spotify access token, clear spotify.refresh_token to re-authorize")?;
        } else {
            prompt_authorization(&mut auth, io::stdin().lock())
                .context("Spotify authorization failed")?;
        }

        Ok(SpotifyClient::new(auth, timeout)?)
    }
}
