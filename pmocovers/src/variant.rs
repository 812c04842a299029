//! Sélection de la variante de couverture à télécharger
//!
//! Les fournisseurs exposent plusieurs tailles d'une même pochette, triées de
//! la plus grande à la plus petite. On retient la plus petite qui n'est pas
//! plus petite que la résolution de l'art, pour limiter la bande passante
//! sans jamais agrandir une image floue.

use crate::error::{CoverError, Result};
use serde::{Deserialize, Serialize};

/// Une taille disponible pour une couverture
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageVariant {
    pub url: String,
    #[serde(default)]
    pub height: Option<u32>,
    #[serde(default)]
    pub width: Option<u32>,
}

impl ImageVariant {
    /// Variante dont seule la hauteur est connue
    pub fn new(url: impl Into<String>, height: Option<u32>) -> Self {
        Self {
            url: url.into(),
            height,
            width: None,
        }
    }

    pub fn with_width(mut self, width: Option<u32>) -> Self {
        self.width = width;
        self
    }
}

/// Variante retenue pour un cycle de synchronisation
///
/// `oversized` indique que l'image doit être réduite à la résolution de
/// l'art avant toute autre transformation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoverSelection {
    url: String,
    oversized: bool,
}

impl CoverSelection {
    pub fn new(url: impl Into<String>, oversized: bool) -> Self {
        Self {
            url: url.into(),
            oversized,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn oversized(&self) -> bool {
        self.oversized
    }
}

/// Choisit la variante à télécharger
///
/// Les candidats sont parcourus du plus petit au plus grand :
/// 1. une hauteur égale à `art_resolution` est retenue telle quelle ;
/// 2. sinon la première hauteur supérieure est retenue, à réduire ;
/// 3. si aucune hauteur n'est exploitable, la première (la plus grande)
///    variante est retenue, à réduire.
///
/// # Errors
///
/// * `CoverError::EmptyCandidateList` - aucune variante fournie
pub fn resolve(candidates: &[ImageVariant], art_resolution: u32) -> Result<CoverSelection> {
    let largest = candidates.first().ok_or(CoverError::EmptyCandidateList)?;

    for variant in candidates.iter().rev() {
        match variant.height {
            Some(height) if height == art_resolution => {
                return Ok(CoverSelection::new(variant.url.clone(), false));
            }
            Some(height) if height > art_resolution => {
                return Ok(CoverSelection::new(variant.url.clone(), true));
            }
            _ => continue,
        }
    }

    Ok(CoverSelection::new(largest.url.clone(), true))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spotify_like(heights: &[Option<u32>]) -> Vec<ImageVariant> {
        heights
            .iter()
            .enumerate()
            .map(|(i, h)| ImageVariant::new(format!("https://i.scdn.co/image/{i}"), *h))
            .collect()
    }

    #[test]
    fn test_exact_match_not_oversized() {
        let candidates = spotify_like(&[Some(640), Some(300), Some(64)]);
        let selection = resolve(&candidates, 64).unwrap();
        assert_eq!(selection.url(), "https://i.scdn.co/image/2");
        assert!(!selection.oversized());
    }

    #[test]
    fn test_smallest_larger_variant() {
        let candidates = spotify_like(&[Some(640), Some(300)]);
        let selection = resolve(&candidates, 64).unwrap();
        assert_eq!(selection.url(), "https://i.scdn.co/image/1");
        assert!(selection.oversized());
    }

    #[test]
    fn test_exact_match_wins_over_larger() {
        let candidates = spotify_like(&[Some(640), Some(300), Some(64)]);
        let selection = resolve(&candidates, 300).unwrap();
        assert_eq!(selection.url(), "https://i.scdn.co/image/1");
        assert!(!selection.oversized());
    }

    #[test]
    fn test_smaller_variants_are_skipped() {
        let candidates = spotify_like(&[Some(640), Some(300), Some(64)]);
        let selection = resolve(&candidates, 128).unwrap();
        assert_eq!(selection.url(), "https://i.scdn.co/image/1");
        assert!(selection.oversized());
    }

    #[test]
    fn test_unknown_heights_take_largest() {
        let candidates = spotify_like(&[None, None, None]);
        let selection = resolve(&candidates, 64).unwrap();
        assert_eq!(selection.url(), "https://i.scdn.co/image/0");
        assert!(selection.oversized());
    }

    #[test]
    fn test_unknown_heights_are_skipped_when_others_match() {
        let candidates = spotify_like(&[None, Some(300), None]);
        let selection = resolve(&candidates, 64).unwrap();
        assert_eq!(selection.url(), "https://i.scdn.co/image/1");
    }

    #[test]
    fn test_all_too_small_takes_largest() {
        // Panneau plus grand que toutes les variantes
        let candidates = spotify_like(&[Some(64), Some(32)]);
        let selection = resolve(&candidates, 128).unwrap();
        assert_eq!(selection.url(), "https://i.scdn.co/image/0");
        assert!(selection.oversized());
    }

    #[test]
    fn test_empty_candidates() {
        assert!(matches!(
            resolve(&[], 64),
            Err(CoverError::EmptyCandidateList)
        ));
    }

    #[test]
    fn test_new_does_not_invent_width() {
        let variant = ImageVariant::new("https://x/a", Some(64));
        assert_eq!(variant.height, Some(64));
        assert_eq!(variant.width, None);

        let variant = variant.with_width(Some(48));
        assert_eq!(variant.width, Some(48));
    }

    #[test]
    fn test_deserialize_null_height() {
        let json = r#"[{"url":"https://x/a","height":null,"width":null},{"url":"https://x/b","height":64,"width":64}]"#;
        let variants: Vec<ImageVariant> = serde_json::from_str(json).unwrap();
        assert_eq!(variants[0].height, None);
        assert_eq!(variants[1].height, Some(64));
    }
}
