//! Boucle de synchronisation pochette → matrice
//!
//! Un cycle :
//! 1. interroge l'état de lecture ;
//! 2. rien en lecture : envoie l'écran de veille s'il n'est pas déjà actif ;
//! 3. nouveau contenu : sélectionne, normalise et envoie la pochette ;
//! 4. attend le reste de l'intervalle de polling, ou le délai de repli
//!    après un échec.
//!
//! L'état n'avance qu'après un accusé de réception de la matrice, si bien
//! qu'un envoi raté est retenté au cycle suivant.

use std::thread;
use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use crate::capabilities::{CoverRenderer, DisplaySink, PlaybackProvider};
use crate::error::{error_chain, DeliveryKind, SyncError};
use crate::state::{EngineState, PlaybackState};

/// Intervalle de polling par défaut
pub const DEFAULT_POLLING_INTERVAL: Duration = Duration::from_millis(500);

/// Délai de repli par défaut après un cycle en échec
pub const DEFAULT_BACKOFF: Duration = Duration::from_secs(3);

/// Réglages de cadence de la boucle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncSettings {
    pub polling_interval: Duration,
    pub backoff: Duration,
    pub startup_screensaver: bool,
}

impl Default for SyncSettings {
    fn default() -> Self {
        Self {
            polling_interval: DEFAULT_POLLING_INTERVAL,
            backoff: DEFAULT_BACKOFF,
            startup_screensaver: true,
        }
    }
}

/// Résultat d'un cycle réussi
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleOutcome {
    /// Nouvelle pochette affichée
    Displayed(String),
    /// La pochette courante est déjà affichée
    AlreadyDisplayed,
    /// Rien en lecture, écran de veille envoyé
    ScreensaverShown,
    /// Rien en lecture, écran de veille déjà actif
    StayedIdle,
}

/// Temps restant à dormir pour que le cycle dure `interval`
///
/// Jamais négatif ; un cycle trop long n'est pas raccourci.
pub fn remaining_sleep(elapsed: Duration, interval: Duration) -> Duration {
    interval.saturating_sub(elapsed)
}

/// Moteur de synchronisation
///
/// Possède ses trois collaborateurs et l'unique [`EngineState`].
pub struct SyncEngine<P, R, D> {
    provider: P,
    renderer: R,
    display: D,
    settings: SyncSettings,
    state: EngineState,
}

impl<P, R, D> SyncEngine<P, R, D>
where
    P: PlaybackProvider,
    R: CoverRenderer,
    D: DisplaySink,
{
    pub fn new(provider: P, renderer: R, display: D, settings: SyncSettings) -> Self {
        Self {
            provider,
            renderer,
            display,
            settings,
            state: EngineState::new(),
        }
    }

    pub fn state(&self) -> &EngineState {
        &self.state
    }

    pub fn settings(&self) -> &SyncSettings {
        &self.settings
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    /// Envoie l'écran de veille avant le premier cycle
    ///
    /// Un échec n'est pas bloquant : le premier cycle sans lecture
    /// retentera l'envoi.
    pub fn announce_startup(&mut self) -> bool {
        if self.display.send_screensaver() {
            self.state.mark_screensaver();
            true
        } else {
            false
        }
    }

    /// Exécute un cycle sans attente
    ///
    /// # Errors
    ///
    /// Toute erreur laisse l'état inchangé.
    pub fn step(&mut self) -> Result<CycleOutcome, SyncError> {
        match self.provider.current_playback()? {
            PlaybackState::Idle => self.on_idle(),
            PlaybackState::Active {
                content_id,
                candidates,
            } => self.on_active(content_id, &candidates),
        }
    }

    fn on_idle(&mut self) -> Result<CycleOutcome, SyncError> {
        if self.state.screensaver_active() {
            return Ok(CycleOutcome::StayedIdle);
        }

        if self.display.send_screensaver() {
            self.state.mark_screensaver();
            Ok(CycleOutcome::ScreensaverShown)
        } else {
            Err(SyncError::Delivery(DeliveryKind::Screensaver))
        }
    }

    fn on_active(
        &mut self,
        content_id: String,
        candidates: &[pmocovers::ImageVariant],
    ) -> Result<CycleOutcome, SyncError> {
        if self.state.is_showing(&content_id) {
            return Ok(CycleOutcome::AlreadyDisplayed);
        }

        info!(content_id = %content_id, "Now playing new content, updating matrix");
        let frame = match self.renderer.render(candidates) {
            Ok(frame) => frame,
            Err(source) => return Err(SyncError::Cover { content_id, source }),
        };

        if self.display.send_frame(&frame) {
            self.state.mark_displayed(content_id.clone());
            Ok(CycleOutcome::Displayed(content_id))
        } else {
            Err(SyncError::Delivery(DeliveryKind::Frame))
        }
    }

    /// Pause à observer après un cycle
    pub fn pause_after(
        &self,
        result: &Result<CycleOutcome, SyncError>,
        elapsed: Duration,
    ) -> Duration {
        match result {
            Ok(_) => remaining_sleep(elapsed, self.settings.polling_interval),
            Err(_) => self.settings.backoff,
        }
    }

    /// Exécute un cycle complet, attente comprise
    pub fn run_cycle(&mut self) -> Result<CycleOutcome, SyncError> {
        let cycle_start = Instant::now();
        let result = self.step();

        match &result {
            Ok(outcome) => debug!(?outcome, "Sync cycle completed"),
            Err(e) => warn!("Sync cycle failed, backing off: {}", error_chain(e)),
        }

        let pause = self.pause_after(&result, cycle_start.elapsed());
        if !pause.is_zero() {
            thread::sleep(pause);
        }
        result
    }

    /// Boucle infinie ; le processus est arrêté de l'extérieur
    pub fn run(&mut self) -> ! {
        if self.settings.startup_screensaver {
            self.announce_startup();
        }

        info!(
            polling_ms = self.settings.polling_interval.as_millis() as u64,
            backoff_ms = self.settings.backoff.as_millis() as u64,
            "Starting sync loop"
        );

        loop {
            let _ = self.run_cycle();
        }
    }
}
