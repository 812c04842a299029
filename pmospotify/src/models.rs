//! Modèles de données de l'endpoint `currently-playing`

use pmocovers::ImageVariant;
use pmosync::PlaybackState;
use serde::Deserialize;
use tracing::debug;

/// Réponse de `/me/player/currently-playing`
#[derive(Debug, Clone, Deserialize)]
pub struct CurrentlyPlaying {
    #[serde(default)]
    pub is_playing: bool,
    /// `track`, `episode`, `ad` ou `unknown`
    #[serde(default)]
    pub currently_playing_type: Option<String>,
    #[serde(default)]
    pub item: Option<PlayingItem>,
}

/// Piste ou épisode en cours
///
/// Une piste porte ses pochettes dans `album`, un épisode directement
/// dans `images`.
#[derive(Debug, Clone, Deserialize)]
pub struct PlayingItem {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub album: Option<Album>,
    #[serde(default)]
    pub images: Vec<ImageVariant>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Album {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub images: Vec<ImageVariant>,
}

impl PlayingItem {
    /// Identifiant du contenu dont la pochette est affichée
    ///
    /// Toutes les pistes d'un même album partagent le même identifiant.
    pub fn content_id(&self) -> Option<&str> {
        match &self.album {
            Some(album) => album.id.as_deref(),
            None => self.id.as_deref(),
        }
    }

    pub fn images(&self) -> &[ImageVariant] {
        match &self.album {
            Some(album) => &album.images,
            None => &self.images,
        }
    }
}

impl CurrentlyPlaying {
    /// Convertit la réponse en état de lecture
    ///
    /// Un contenu sans identifiant (fichier local) est traité comme une
    /// absence de lecture.
    pub fn into_playback_state(self) -> PlaybackState {
        let Some(item) = self.item else {
            return PlaybackState::Idle;
        };

        match item.content_id() {
            Some(id) => {
                let id = id.to_string();
                let candidates = item.images().to_vec();
                PlaybackState::active(id, candidates)
            }
            None => {
                debug!(
                    "Playing item {:?} has no identifier, treating as idle",
                    item.name
                );
                PlaybackState::Idle
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_track_uses_album() {
        let json = r#"{
            "is_playing": true,
            "currently_playing_type": "track",
            "item": {
                "id": "track-1",
                "name": "Song",
                "type": "track",
                "album": {
                    "id": "album-1",
                    "name": "Album",
                    "images": [
                        {"url": "https://i.scdn.co/image/640", "height": 640, "width": 640},
                        {"url": "https://i.scdn.co/image/300", "height": 300, "width": 300},
                        {"url": "https://i.scdn.co/image/64", "height": 64, "width": 64}
                    ]
                }
            }
        }"#;

        let playing: CurrentlyPlaying = serde_json::from_str(json).unwrap();
        match playing.into_playback_state() {
            PlaybackState::Active {
                content_id,
                candidates,
            } => {
                assert_eq!(content_id, "album-1");
                assert_eq!(candidates.len(), 3);
                assert_eq!(candidates[2].height, Some(64));
            }
            PlaybackState::Idle => panic!("expected an active state"),
        }
    }

    #[test]
    fn test_episode_uses_item() {
        let json = r#"{
            "currently_playing_type": "episode",
            "item": {
                "id": "episode-9",
                "type": "episode",
                "images": [{"url": "https://i.scdn.co/image/ep", "height": null, "width": null}]
            }
        }"#;

        let playing: CurrentlyPlaying = serde_json::from_str(json).unwrap();
        match playing.into_playback_state() {
            PlaybackState::Active {
                content_id,
                candidates,
            } => {
                assert_eq!(content_id, "episode-9");
                assert_eq!(candidates[0].height, None);
            }
            PlaybackState::Idle => panic!("expected an active state"),
        }
    }

    #[test]
    fn test_null_item_is_idle() {
        let json = r#"{"is_playing": false, "currently_playing_type": "ad", "item": null}"#;
        let playing: CurrentlyPlaying = serde_json::from_str(json).unwrap();
        assert!(playing.into_playback_state().is_idle());
    }

    #[test]
    fn test_local_file_is_idle() {
        let json = r#"{
            "item": {"id": null, "name": "Local", "album": {"id": null, "images": []}}
        }"#;
        let playing: CurrentlyPlaying = serde_json::from_str(json).unwrap();
        assert!(playing.into_playback_state().is_idle());
    }
}
