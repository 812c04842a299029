//! Gestion des erreurs pour le client Spotify

use std::time::Duration;

use thiserror::Error;

/// Type Result personnalisé pour pmospotify
pub type Result<T> = std::result::Result<T, SpotifyError>;

/// Erreurs possibles lors de l'utilisation du client Spotify
#[derive(Error, Debug)]
pub enum SpotifyError {
    /// Jeton refusé ou expiré (401/403)
    #[error("Authentication failed: {0}")]
    Unauthorized(String),

    /// Quota dépassé (429)
    #[error("Rate limit exceeded{}", retry_hint(.retry_after))]
    RateLimited { retry_after: Option<Duration> },

    /// Erreur de l'API Web Spotify
    #[error("Spotify API error (code {code}): {message}")]
    Api { code: u16, message: String },

    /// Erreur HTTP
    #[error("HTTP error")]
    Http(#[from] reqwest::Error),

    /// Erreur de parsing JSON
    #[error("JSON parsing error")]
    JsonParse(#[from] serde_json::Error),

    /// Paramètres client manquants ou invalides
    #[error("Spotify configuration error: {0}")]
    Configuration(String),

    /// Échec du flux d'autorisation OAuth
    #[error("Spotify authorization error: {0}")]
    Authorization(String),
}

fn retry_hint(retry_after: &Option<Duration>) -> String {
    match retry_after {
        Some(delay) => format!(", retry after {}s", delay.as_secs()),
        None => String::new(),
    }
}

impl SpotifyError {
    /// Crée une erreur API depuis un code de statut HTTP et un message
    pub fn from_status_code(code: u16, message: impl Into<String>) -> Self {
        match code {
            401 | 403 => Self::Unauthorized(message.into()),
            429 => Self::RateLimited { retry_after: None },
            _ => Self::Api {
                code,
                message: message.into(),
            },
        }
    }

    /// Vérifie si l'erreur impose un rafraîchissement du jeton
    pub fn is_auth_error(&self) -> bool {
        matches!(self, SpotifyError::Unauthorized(_))
    }

    /// Vérifie si l'erreur est une erreur de rate limiting
    pub fn is_rate_limit(&self) -> bool {
        matches!(self, SpotifyError::RateLimited { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_status_code() {
        assert!(SpotifyError::from_status_code(401, "expired").is_auth_error());
        assert!(SpotifyError::from_status_code(403, "scope").is_auth_error());
        assert!(SpotifyError::from_status_code(429, "").is_rate_limit());
        assert!(matches!(
            SpotifyError::from_status_code(502, "bad gateway"),
            SpotifyError::Api { code: 502, .. }
        ));
    }

    #[test]
    fn test_rate_limit_message() {
        let err = SpotifyError::RateLimited {
            retry_after: Some(Duration::from_secs(7)),
        };
        assert_eq!(err.to_string(), "Rate limit exceeded, retry after 7s");

        let err = SpotifyError::RateLimited { retry_after: None };
        assert_eq!(err.to_string(), "Rate limit exceeded");
    }
}
