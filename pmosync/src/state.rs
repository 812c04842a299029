use pmocovers::ImageVariant;

/// État de lecture normalisé, indépendant du fournisseur
///
/// Construit juste après la requête "currently playing" : le reste du
/// moteur ne voit jamais la forme des payloads (piste, épisode, ...).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaybackState {
    /// Rien en cours de lecture
    Idle,
    /// Un album ou un épisode en cours
    Active {
        /// Identité visuelle du contenu (album, ou épisode lui-même)
        content_id: String,
        /// Variantes de pochette, de la plus grande à la plus petite
        candidates: Vec<ImageVariant>,
    },
}

impl PlaybackState {
    pub fn active(content_id: impl Into<String>, candidates: Vec<ImageVariant>) -> Self {
        Self::Active {
            content_id: content_id.into(),
            candidates,
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }
}

/// Seul état conservé d'un cycle à l'autre
///
/// Les transitions n'ont lieu qu'après une livraison confirmée par la
/// matrice : aucun contenu n'est jamais marqué affiché par anticipation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EngineState {
    last_displayed: Option<String>,
    screensaver_active: bool,
}

impl EngineState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Contenu actuellement affiché, s'il y en a un
    pub fn last_displayed(&self) -> Option<&str> {
        self.last_displayed.as_deref()
    }

    pub fn screensaver_active(&self) -> bool {
        self.screensaver_active
    }

    pub fn is_showing(&self, content_id: &str) -> bool {
        self.last_displayed.as_deref() == Some(content_id)
    }

    pub(crate) fn mark_displayed(&mut self, content_id: String) {
        self.last_displayed = Some(content_id);
        self.screensaver_active = false;
    }

    pub(crate) fn mark_screensaver(&mut self) {
        self.last_displayed = None;
        self.screensaver_active = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state() {
        let state = EngineState::new();
        assert_eq!(state.last_displayed(), None);
        assert!(!state.screensaver_active());
    }

    #[test]
    fn test_transitions() {
        let mut state = EngineState::new();

        state.mark_screensaver();
        assert!(state.screensaver_active());

        state.mark_displayed("album:1".to_string());
        assert!(state.is_showing("album:1"));
        assert!(!state.screensaver_active());

        state.mark_screensaver();
        assert_eq!(state.last_displayed(), None);
        assert!(!state.is_showing("album:1"));
    }
}
