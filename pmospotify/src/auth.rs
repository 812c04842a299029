//! Module d'authentification OAuth pour l'API Web Spotify
//!
//! Flux "Authorization Code" :
//! 1. l'utilisateur ouvre l'URL d'autorisation et colle l'URL de redirection ;
//! 2. le `code` extrait est échangé contre un jeton d'accès et un refresh token ;
//! 3. le refresh token est ensuite utilisé pour renouveler le jeton d'accès
//!    avant son expiration, sans nouvelle interaction.

use std::io::BufRead;
use std::time::{Duration, Instant};

use reqwest::blocking::Client;
use serde::Deserialize;
use tracing::{debug, info, warn};
use url::Url;

use crate::error::{Result, SpotifyError};

/// Page d'autorisation de Spotify
pub const AUTHORIZE_URL: &str = "https://accounts.spotify.com/authorize";

/// Endpoint d'échange des jetons
pub const TOKEN_URL: &str = "https://accounts.spotify.com/api/token";

/// Seule permission nécessaire
pub const SCOPE: &str = "user-read-currently-playing";

/// Marge avant expiration en deçà de laquelle le jeton est renouvelé
const REFRESH_MARGIN: Duration = Duration::from_secs(60);

/// Paramètres de l'application Spotify
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
}

impl Credentials {
    /// # Errors
    ///
    /// `SpotifyError::Configuration` si l'un des champs est vide.
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        redirect_uri: impl Into<String>,
    ) -> Result<Self> {
        let credentials = Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            redirect_uri: redirect_uri.into(),
        };

        for (name, value) in [
            ("client_id", &credentials.client_id),
            ("client_secret", &credentials.client_secret),
            ("redirect_uri", &credentials.redirect_uri),
        ] {
            if value.trim().is_empty() {
                return Err(SpotifyError::Configuration(format!("{} is not set", name)));
            }
        }

        Ok(credentials)
    }
}

/// Jeton d'accès et son échéance
#[derive(Debug, Clone)]
pub struct AccessToken {
    value: String,
    expires_at: Instant,
}

impl AccessToken {
    pub fn new(value: impl Into<String>, expires_in: Duration) -> Self {
        Self {
            value: value.into(),
            expires_at: Instant::now() + expires_in,
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// Vrai si le jeton reste valide au moins `margin`
    pub fn is_fresh(&self, margin: Duration) -> bool {
        self.expires_at
            .checked_duration_since(Instant::now())
            .is_some_and(|left| left > margin)
    }
}

/// Réponse de l'endpoint /api/token
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    expires_in: u64,
    #[serde(default)]
    refresh_token: Option<String>,
    #[serde(default)]
    scope: Option<String>,
}

/// Corps d'erreur OAuth
#[derive(Debug, Deserialize)]
struct TokenErrorResponse {
    error: String,
    #[serde(default)]
    error_description: Option<String>,
}

/// Appelé avec chaque nouveau refresh token émis par Spotify
pub type RotationHook = Box<dyn FnMut(&str) + Send>;

/// Gestionnaire de jetons Spotify
pub struct SpotifyAuth {
    client: Client,
    credentials: Credentials,
    token_url: String,
    refresh_token: Option<String>,
    access_token: Option<AccessToken>,
    on_rotate: Option<RotationHook>,
}

impl SpotifyAuth {
    pub fn new(credentials: Credentials, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            credentials,
            token_url: TOKEN_URL.to_string(),
            refresh_token: None,
            access_token: None,
            on_rotate: None,
        })
    }

    /// Remplace l'endpoint des jetons (serveur de test)
    pub fn with_token_url(mut self, token_url: impl Into<String>) -> Self {
        self.token_url = token_url.into();
        self
    }

    /// Reprend un refresh token obtenu lors d'une session précédente
    pub fn with_refresh_token(mut self, refresh_token: Option<String>) -> Self {
        self.refresh_token = refresh_token.filter(|t| !t.trim().is_empty());
        self
    }

    /// Enregistre un observateur des nouveaux refresh tokens
    ///
    /// Appelé après l'échange initial du code comme après un
    /// renouvellement, dès que Spotify émet un refresh token différent.
    pub fn on_refresh_token_rotated(mut self, hook: impl FnMut(&str) + Send + 'static) -> Self {
        self.on_rotate = Some(Box::new(hook));
        self
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    pub fn refresh_token(&self) -> Option<&str> {
        self.refresh_token.as_deref()
    }

    /// Vérifie si un jeton d'accès encore valide est disponible
    pub fn is_authenticated(&self) -> bool {
        self.access_token
            .as_ref()
            .is_some_and(|t| t.is_fresh(REFRESH_MARGIN))
    }

    /// URL à ouvrir dans un navigateur pour autoriser l'application
    pub fn authorize_url(&self) -> Result<String> {
        let url = Url::parse_with_params(
            AUTHORIZE_URL,
            &[
                ("client_id", self.credentials.client_id.as_str()),
                ("response_type", "code"),
                ("redirect_uri", self.credentials.redirect_uri.as_str()),
                ("scope", SCOPE),
            ],
        )
        .map_err(|e| SpotifyError::Configuration(format!("invalid authorize URL: {}", e)))?;
        Ok(url.into())
    }

    /// Échange un code d'autorisation contre les jetons
    pub fn exchange_code(&mut self, code: &str) -> Result<()> {
        info!("Exchanging Spotify authorization code");
        let redirect_uri = self.credentials.redirect_uri.clone();
        self.request_token(&[
            ("grant_type", "authorization_code"),
            ("code", code),
            ("redirect_uri", redirect_uri.as_str()),
        ])
    }

    /// Renouvelle le jeton d'accès à partir du refresh token
    ///
    /// # Errors
    ///
    /// `SpotifyError::Authorization` si aucun refresh token n'est connu.
    pub fn refresh(&mut self) -> Result<()> {
        let refresh_token = self.refresh_token.clone().ok_or_else(|| {
            SpotifyError::Authorization("no refresh token available".to_string())
        })?;

        debug!("Refreshing Spotify access token");
        self.request_token(&[
            ("grant_type", "refresh_token"),
            ("refresh_token", refresh_token.as_str()),
        ])
    }

    /// Jeton d'accès valide, renouvelé si nécessaire
    pub fn access_token(&mut self) -> Result<String> {
        if !self.is_authenticated() {
            self.refresh()?;
        }

        self.access_token
            .as_ref()
            .map(|t| t.value().to_string())
            .ok_or_else(|| SpotifyError::Authorization("token endpoint returned no token".into()))
    }

    /// Oublie le jeton d'accès courant ; le prochain appel le renouvelle
    pub fn invalidate(&mut self) {
        debug!("Invalidating Spotify access token");
        self.access_token = None;
    }

    fn request_token(&mut self, form: &[(&str, &str)]) -> Result<()> {
        let response = self
            .client
            .post(&self.token_url)
            .basic_auth(
                &self.credentials.client_id,
                Some(&self.credentials.client_secret),
            )
            .form(form)
            .send()?;

        let status = response.status();
        let text = response.text()?;

        if !status.is_success() {
            let message = match serde_json::from_str::<TokenErrorResponse>(&text) {
                Ok(body) => match body.error_description {
                    Some(description) => format!("{}: {}", body.error, description),
                    None => body.error,
                },
                Err(_) => text,
            };
            warn!("Token endpoint error ({}): {}", status.as_u16(), message);
            return Err(SpotifyError::Authorization(message));
        }

        let token: TokenResponse = serde_json::from_str(&text)?;
        debug!(
            "Obtained access token valid for {}s (scope: {:?})",
            token.expires_in, token.scope
        );

        if let Some(rotated) = token.refresh_token.filter(|t| !t.is_empty()) {
            if self.refresh_token.as_deref() != Some(rotated.as_str()) {
                info!("Spotify issued a new refresh token");
                if let Some(hook) = self.on_rotate.as_mut() {
                    hook(&rotated);
                }
                self.refresh_token = Some(rotated);
            }
        }
        self.access_token = Some(AccessToken::new(
            token.access_token,
            Duration::from_secs(token.expires_in),
        ));
        Ok(())
    }
}

/// Extrait le code d'autorisation de l'URL de redirection
///
/// Accepte l'URL complète ou le code seul.
pub fn extract_code(redirect: &str) -> Result<String> {
    let redirect = redirect.trim();
    if redirect.is_empty() {
        return Err(SpotifyError::Authorization("empty redirect URL".to_string()));
    }

    let Ok(url) = Url::parse(redirect) else {
        return Ok(redirect.to_string());
    };

    let mut code = None;
    for (key, value) in url.query_pairs() {
        match key.as_ref() {
            "error" => {
                return Err(SpotifyError::Authorization(format!(
                    "authorization denied: {}",
                    value
                )));
            }
            "code" if !value.is_empty() => code = Some(value.into_owned()),
            _ => {}
        }
    }

    code.ok_or_else(|| {
        SpotifyError::Authorization("redirect URL carries no `code` parameter".to_string())
    })
}

/// Autorisation interactive
///
/// Affiche l'URL d'autorisation puis lit l'URL de redirection sur `input`.
pub fn prompt_authorization(auth: &mut SpotifyAuth, mut input: impl BufRead) -> Result<()> {
    let url = auth.authorize_url()?;
    println!("Open this URL in your browser to authorize the application:\n\n    {url}\n");
    println!("Then paste the URL you were redirected to:");

    let mut line = String::new();
    input
        .read_line(&mut line)
        .map_err(|e| SpotifyError::Authorization(format!("cannot read redirect URL: {}", e)))?;

    let code = extract_code(&line)?;
    auth.exchange_code(&code)
}
