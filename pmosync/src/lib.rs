//! # pmosync - Moteur de synchronisation pochette → matrice LED
//!
//! Ce crate orchestre un cycle de polling borné : état de lecture,
//! détection de changement d'album, préparation de la pochette et envoi
//! vers le panneau, avec repli sur l'écran de veille quand rien ne joue.
//!
//! Les collaborateurs sont abstraits par trois traits
//! ([`PlaybackProvider`], [`CoverRenderer`], [`DisplaySink`]) pour que le
//! moteur ne dépende ni du fournisseur de lecture ni du transport HTTP.
//!
//! ## Utilisation
//!
//! ```rust,ignore
//! use pmosync::{SyncEngine, SyncSettings};
//!
//! let mut engine = SyncEngine::new(spotify, normalizer, matrix, SyncSettings::default());
//! engine.run();
//! ```

pub mod capabilities;
pub mod engine;
pub mod error;
pub mod state;

#[cfg(feature = "pmoconfig")]
pub mod config_ext;

pub use capabilities::{CoverRenderer, DisplaySink, PlaybackProvider};
pub use engine::{remaining_sleep, CycleOutcome, SyncEngine, SyncSettings};
pub use error::{error_chain, DeliveryKind, SyncError};
pub use state::{EngineState, PlaybackState};

#[cfg(feature = "pmoconfig")]
pub use config_ext::SyncConfigExt;
