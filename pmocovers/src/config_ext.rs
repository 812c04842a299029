//! Extension pour intégrer les paramètres de couverture dans pmoconfig
//!
//! Ce module fournit le trait `CoverConfigExt` qui ajoute à
//! `pmoconfig::Config` les résolutions de la matrice et le timeout de
//! téléchargement des pochettes.

use std::time::Duration;

use anyhow::Result;
use pmoconfig::Config;

use crate::normalize::{CoverNormalizer, DEFAULT_FETCH_TIMEOUT};

const DEFAULT_TARGET_RESOLUTION: u64 = 64;
const DEFAULT_ART_RESOLUTION: u64 = 64;

/// Trait d'extension pour gérer les paramètres de couverture dans pmoconfig
///
/// # Exemple
///
/// ```rust,ignore
/// use pmoconfig::Config;
/// use pmocovers::CoverConfigExt;
///
/// let config = Config::load_config("")?;
/// let normalizer = config.create_cover_normalizer()?;
/// ```
pub trait CoverConfigExt {
    /// Résolution native (carrée) du panneau LED (default: 64)
    fn get_target_resolution(&self) -> Result<u32>;

    /// Définit la résolution native du panneau
    fn set_target_resolution(&self, resolution: u32) -> Result<()>;

    /// Résolution de l'art avant agrandissement (default: 64)
    fn get_art_resolution(&self) -> Result<u32>;

    /// Définit la résolution de l'art
    fn set_art_resolution(&self, resolution: u32) -> Result<()>;

    /// Timeout du téléchargement d'une pochette (default: 3 s)
    fn get_cover_fetch_timeout(&self) -> Result<Duration>;

    /// Crée un normaliseur configuré
    ///
    /// # Errors
    ///
    /// Échoue si les résolutions configurées sont incohérentes.
    fn create_cover_normalizer(&self) -> Result<CoverNormalizer>;
}

impl CoverConfigExt for Config {
    fn get_target_resolution(&self) -> Result<u32> {
        let value = self.get_u64(&["matrix", "target_resolution"], DEFAULT_TARGET_RESOLUTION)?;
        Ok(u32::try_from(value)?)
    }

    fn set_target_resolution(&self, resolution: u32) -> Result<()> {
        self.set_u64(&["matrix", "target_resolution"], resolution.into())
    }

    fn get_art_resolution(&self) -> Result<u32> {
        let value = self.get_u64(&["matrix", "art_resolution"], DEFAULT_ART_RESOLUTION)?;
        Ok(u32::try_from(value)?)
    }

    fn set_art_resolution(&self, resolution: u32) -> Result<()> {
        self.set_u64(&["matrix", "art_resolution"], resolution.into())
    }

    fn get_cover_fetch_timeout(&self) -> Result<Duration> {
        let default = DEFAULT_FETCH_TIMEOUT.as_millis() as u64;
        let millis = self.get_u64(&["covers", "fetch_timeout_ms"], default)?;
        Ok(Duration::from_millis(millis))
    }

    fn create_cover_normalizer(&self) -> Result<CoverNormalizer> {
        Ok(CoverNormalizer::new(
            self.get_art_resolution()?,
            self.get_target_resolution()?,
            self.get_cover_fetch_timeout()?,
        )?)
    }
}
