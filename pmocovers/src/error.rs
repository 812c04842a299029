//! Gestion des erreurs pour la préparation des couvertures

use thiserror::Error;

/// Type Result personnalisé pour pmocovers
pub type Result<T> = std::result::Result<T, CoverError>;

/// Erreurs possibles lors de la sélection ou de la normalisation d'une couverture
#[derive(Error, Debug)]
pub enum CoverError {
    /// Aucune variante d'image disponible pour le contenu courant
    #[error("No cover image candidates available")]
    EmptyCandidateList,

    /// Échec de transport (DNS, connexion, timeout) lors du téléchargement
    #[error("Cannot fetch cover image")]
    Fetch(#[from] reqwest::Error),

    /// Le serveur d'images a répondu avec un statut non 2xx
    #[error("Cover image server answered {status} for {url}")]
    HttpStatus { status: u16, url: String },

    /// Données d'image illisibles ou format non supporté
    #[error("Cannot decode cover image")]
    Decode(#[from] image::ImageError),

    /// Résolutions incohérentes (art > target, division non entière, zéro)
    #[error("Invalid resolutions: art {art} / target {target} ({reason})")]
    InvalidResolution {
        art: u32,
        target: u32,
        reason: &'static str,
    },

    /// Un buffer de frame n'a pas la taille attendue
    #[error("Frame buffer has {actual} bytes, expected {expected}")]
    FrameSize { expected: usize, actual: usize },
}
