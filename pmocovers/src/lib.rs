//! # pmocovers - Préparation des couvertures pour la matrice LED
//!
//! Cette crate transforme les pochettes exposées par un fournisseur de
//! lecture en bitmaps bruts directement affichables par le panneau.
//!
//! ## Fonctionnalités
//!
//! - Sélection de la plus petite variante exploitable ([`resolve`])
//! - Téléchargement avec timeout borné
//! - Réduction Lanczos vers la résolution de l'art, agrandissement au plus
//!   proche voisin vers la résolution du panneau
//! - Remplissage noir centré si les dimensions annoncées étaient fausses
//! - Sortie RGB brute de taille fixe ([`NormalizedFrame`])
//!
//! ## Utilisation
//!
//! ```rust,no_run
//! use pmocovers::{CoverNormalizer, ImageVariant};
//! use std::time::Duration;
//!
//! let normalizer = CoverNormalizer::new(64, 64, Duration::from_secs(3))?;
//! let candidates = vec![
//!     ImageVariant::new("https://i.scdn.co/image/large", Some(640)),
//!     ImageVariant::new("https://i.scdn.co/image/small", Some(64)),
//! ];
//! let frame = normalizer.render(&candidates)?;
//! assert_eq!(frame.len(), 64 * 64 * 3);
//! # Ok::<(), pmocovers::CoverError>(())
//! ```

pub mod error;
pub mod frame;
pub mod normalize;
pub mod variant;

#[cfg(feature = "pmoconfig")]
pub mod config_ext;

pub use error::{CoverError, Result};
pub use frame::NormalizedFrame;
pub use normalize::{check_resolutions, normalize_image, pad_to_square, CoverNormalizer};
pub use variant::{resolve, CoverSelection, ImageVariant};

#[cfg(feature = "pmoconfig")]
pub use config_ext::CoverConfigExt;
