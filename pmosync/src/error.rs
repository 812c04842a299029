//! Erreurs d'un cycle de synchronisation
//!
//! Toutes sont récupérables : la boucle les journalise puis attend le
//! délai de repli avant le cycle suivant.
//!
//! Les messages ne recopient pas leur cause : [`error_chain`] parcourt
//! `source()` pour produire le message complet.

use std::error::Error as StdError;

use pmocovers::CoverError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SyncError {
    /// La requête d'état de lecture a échoué
    #[error("Playback query failed")]
    Playback(#[from] anyhow::Error),

    /// Sélection, téléchargement ou décodage de la pochette impossible
    #[error("Cannot prepare cover for {content_id}")]
    Cover {
        content_id: String,
        #[source]
        source: CoverError,
    },

    /// La matrice n'a pas accusé réception
    #[error("Matrix did not acknowledge the {0}")]
    Delivery(DeliveryKind),
}

/// Nature de l'envoi refusé
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryKind {
    Frame,
    Screensaver,
}

impl std::fmt::Display for DeliveryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DeliveryKind::Frame => f.write_str("cover frame"),
            DeliveryKind::Screensaver => f.write_str("screensaver intent"),
        }
    }
}

/// Message d'une erreur suivi de toutes ses causes, séparés par `: `
pub fn error_chain(err: &(dyn StdError + 'static)) -> String {
    anyhow::Chain::new(err)
        .map(|cause| cause.to_string())
        .collect::<Vec<_>>()
        .join(": ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cover_chain_is_not_repeated() {
        let err = SyncError::Cover {
            content_id: "album-1".to_string(),
            source: CoverError::HttpStatus {
                status: 404,
                url: "https://i.scdn.co/image/64".to_string(),
            },
        };

        assert_eq!(
            error_chain(&err),
            "Cannot prepare cover for album-1: Cover image server answered 404 for https://i.scdn.co/image/64"
        );
    }

    #[test]
    fn test_playback_chain_includes_cause() {
        let err = SyncError::from(anyhow::anyhow!("429 Too Many Requests"));
        assert_eq!(error_chain(&err), "Playback query failed: 429 Too Many Requests");
    }
}
