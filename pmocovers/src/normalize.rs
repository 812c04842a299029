//! Téléchargement et normalisation des couvertures
//!
//! Une couverture sélectionnée est téléchargée, décodée, réduite à la
//! résolution de l'art (filtre Lanczos), agrandie à la résolution de la
//! matrice (plus proche voisin, pour garder des pixels nets), convertie en
//! RGB puis sérialisée en buffer brut.

use std::time::Duration;

use image::{imageops::FilterType, DynamicImage, Rgb, RgbImage};
use reqwest::blocking::Client;
use tracing::{debug, warn};

use crate::error::{CoverError, Result};
use crate::frame::NormalizedFrame;
use crate::variant::{resolve, CoverSelection, ImageVariant};

/// Timeout par défaut du téléchargement d'une couverture
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(3);

/// Vérifie qu'une paire de résolutions est utilisable
///
/// L'art ne peut pas dépasser la matrice et doit la diviser exactement,
/// sinon l'agrandissement au plus proche voisin produit des blocs inégaux.
pub fn check_resolutions(art_resolution: u32, target_resolution: u32) -> Result<()> {
    let invalid = |reason| CoverError::InvalidResolution {
        art: art_resolution,
        target: target_resolution,
        reason,
    };

    if art_resolution == 0 || target_resolution == 0 {
        return Err(invalid("resolutions must be positive"));
    }
    if art_resolution > target_resolution {
        return Err(invalid("art resolution exceeds target resolution"));
    }
    if target_resolution % art_resolution != 0 {
        return Err(invalid("art resolution must divide target resolution"));
    }
    Ok(())
}

/// Centre une image dans un carré noir de côté `size`
///
/// L'image est d'abord mise à l'échelle en conservant ses proportions pour
/// que son plus grand côté vaille `size`.
pub fn pad_to_square(img: &RgbImage, size: u32) -> RgbImage {
    let (width, height) = img.dimensions();

    // Calculer les dimensions après mise à l'échelle
    let (new_width, new_height) = if width >= height {
        let scaled = (height as f64 * size as f64 / width as f64).round() as u32;
        (size, scaled.clamp(1, size))
    } else {
        let scaled = (width as f64 * size as f64 / height as f64).round() as u32;
        (scaled.clamp(1, size), size)
    };

    let resized = image::imageops::resize(img, new_width, new_height, FilterType::Lanczos3);

    let mut square = RgbImage::from_pixel(size, size, Rgb([0, 0, 0]));

    // Calculer la position pour centrer l'image redimensionnée
    let x = (size - new_width) / 2;
    let y = (size - new_height) / 2;

    image::imageops::overlay(&mut square, &resized, x.into(), y.into());

    square
}

/// Transforme les octets d'une image en frame pour la matrice
///
/// Fonction pure : même entrée, même sortie, octet pour octet.
///
/// # Errors
///
/// * `CoverError::Decode` - image illisible
pub fn normalize_image(
    bytes: &[u8],
    selection: &CoverSelection,
    art_resolution: u32,
    target_resolution: u32,
) -> Result<NormalizedFrame> {
    let mut image: DynamicImage = image::load_from_memory(bytes)?;
    debug!(
        width = image.width(),
        height = image.height(),
        oversized = selection.oversized(),
        "Decoded cover image"
    );

    if selection.oversized() {
        image = image.resize_exact(art_resolution, art_resolution, FilterType::Lanczos3);
    }

    if art_resolution != target_resolution {
        image = image.resize_exact(target_resolution, target_resolution, FilterType::Nearest);
    }

    let mut rgb = image.into_rgb8();

    // Les dimensions annoncées par le fournisseur sont parfois fausses
    if rgb.width() != target_resolution || rgb.height() != target_resolution {
        warn!(
            "Image was not the right size. Expected: {}x{}. Actual: {}x{}. Padding image to fit...",
            target_resolution,
            target_resolution,
            rgb.width(),
            rgb.height()
        );
        rgb = pad_to_square(&rgb, target_resolution);
    }

    NormalizedFrame::new(target_resolution, rgb.into_raw())
}

/// Pipeline complet : sélection, téléchargement et normalisation
///
/// Le client HTTP est conservé entre les cycles pour réutiliser les
/// connexions. Aucun retry n'est fait ici.
#[derive(Debug, Clone)]
pub struct CoverNormalizer {
    client: Client,
    art_resolution: u32,
    target_resolution: u32,
}

impl CoverNormalizer {
    /// Crée un normaliseur
    ///
    /// # Errors
    ///
    /// * `CoverError::InvalidResolution` - voir [`check_resolutions`]
    /// * `CoverError::Fetch` - le client HTTP n'a pas pu être construit
    pub fn new(art_resolution: u32, target_resolution: u32, timeout: Duration) -> Result<Self> {
        check_resolutions(art_resolution, target_resolution)?;
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            art_resolution,
            target_resolution,
        })
    }

    pub fn art_resolution(&self) -> u32 {
        self.art_resolution
    }

    pub fn target_resolution(&self) -> u32 {
        self.target_resolution
    }

    /// Télécharge les octets bruts d'une image
    ///
    /// # Errors
    ///
    /// * `CoverError::Fetch` - erreur de transport ou timeout
    /// * `CoverError::HttpStatus` - réponse non 2xx
    pub fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        debug!("GET {}", url);
        let response = self.client.get(url).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(CoverError::HttpStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }
        Ok(response.bytes()?.to_vec())
    }

    /// Télécharge et normalise la variante sélectionnée
    pub fn normalize(&self, selection: &CoverSelection) -> Result<NormalizedFrame> {
        let bytes = self.fetch(selection.url())?;
        normalize_image(
            &bytes,
            selection,
            self.art_resolution,
            self.target_resolution,
        )
    }

    /// Sélectionne la meilleure variante puis la normalise
    pub fn render(&self, candidates: &[ImageVariant]) -> Result<NormalizedFrame> {
        let selection = resolve(candidates, self.art_resolution)?;
        debug!(url = selection.url(), oversized = selection.oversized(), "Selected cover variant");
        self.normalize(&selection)
    }
}
