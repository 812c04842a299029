use thiserror::Error;

pub type Result<T> = std::result::Result<T, DisplayError>;

/// Échecs d'un envoi vers la matrice
///
/// Ces erreurs ne sortent jamais de `MatrixDisplay::send_*` : elles sont
/// journalisées puis converties en `false`.
#[derive(Error, Debug)]
pub enum DisplayError {
    /// Transport (connexion, DNS, timeout)
    #[error("HTTP error")]
    Http(#[from] ureq::Error),

    /// Réponse non 2xx du panneau
    #[error("{url} answered HTTP {status}")]
    Status { url: String, status: u16 },
}
