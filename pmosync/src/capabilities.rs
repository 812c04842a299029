// pmosync/src/capabilities.rs
use anyhow::Result;
use pmocovers::{CoverNormalizer, ImageVariant, NormalizedFrame};

use crate::state::PlaybackState;

/// Source de l'état de lecture courant
///
/// Implémenté par le client Spotify. `&mut self` car l'implémentation peut
/// rafraîchir son jeton d'accès entre deux appels.
pub trait PlaybackProvider {
    fn current_playback(&mut self) -> Result<PlaybackState>;
}

/// Transforme une liste de variantes en frame affichable
pub trait CoverRenderer {
    fn render(&self, candidates: &[ImageVariant]) -> pmocovers::Result<NormalizedFrame>;
}

/// Panneau recevant les frames et l'écran de veille
///
/// Les deux méthodes retournent `true` uniquement si le panneau a accusé
/// réception ; elles ne paniquent ni ne retournent d'erreur.
pub trait DisplaySink {
    fn send_frame(&self, frame: &NormalizedFrame) -> bool;
    fn send_screensaver(&self) -> bool;
}

impl CoverRenderer for CoverNormalizer {
    fn render(&self, candidates: &[ImageVariant]) -> pmocovers::Result<NormalizedFrame> {
        CoverNormalizer::render(self, candidates)
    }
}
