//! # pmodisplay - Pilotage HTTP de la matrice LED
//!
//! Le panneau est découvert par son nom mDNS (`LedMatrix.local` par
//! défaut), résolu une seule fois au démarrage, puis reçoit :
//!
//! - les frames RGB brutes produites par `pmocovers` sur `POST /image` ;
//! - l'intention d'écran de veille sur `POST /screensaver`.
//!
//! [`MatrixDisplay`] implémente [`pmosync::DisplaySink`].
//!
//! ## Utilisation
//!
//! ```rust,no_run
//! use pmodisplay::{MatrixDisplay, DEFAULT_POST_TIMEOUT};
//!
//! let matrix = MatrixDisplay::discover("LedMatrix", DEFAULT_POST_TIMEOUT);
//! if !matrix.send_screensaver() {
//!     eprintln!("matrix unreachable");
//! }
//! ```

pub mod device;
pub mod error;

#[cfg(feature = "pmoconfig")]
pub mod config_ext;

pub use device::{
    mdns_hostname, resolve_device_address, DisplayEndpoints, MatrixDisplay, DEFAULT_POST_TIMEOUT,
};
pub use error::{DisplayError, Result};

#[cfg(feature = "pmoconfig")]
pub use config_ext::DisplayConfigExt;

impl pmosync::DisplaySink for MatrixDisplay {
    fn send_frame(&self, frame: &pmocovers::NormalizedFrame) -> bool {
        MatrixDisplay::send_frame(self, frame)
    }

    fn send_screensaver(&self) -> bool {
        MatrixDisplay::send_screensaver(self)
    }
}
