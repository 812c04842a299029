//! Extension pour intégrer la matrice LED dans pmoconfig

use std::time::Duration;

use anyhow::Result;
use pmoconfig::Config;

use crate::device::{MatrixDisplay, DEFAULT_POST_TIMEOUT};

const DEFAULT_MATRIX_HOSTNAME: &str = "LedMatrix";

/// Trait d'extension pour gérer la matrice LED dans pmoconfig
pub trait DisplayConfigExt {
    /// Nom mDNS du panneau, sans le suffixe `.local` (default: "LedMatrix")
    fn get_matrix_hostname(&self) -> Result<String>;

    /// Définit le nom du panneau
    fn set_matrix_hostname(&self, hostname: &str) -> Result<()>;

    /// Timeout d'un POST vers le panneau (default: 5 s)
    fn get_post_timeout(&self) -> Result<Duration>;

    /// Résout le panneau et crée le client HTTP
    fn create_matrix_display(&self) -> Result<MatrixDisplay>;
}

impl DisplayConfigExt for Config {
    fn get_matrix_hostname(&self) -> Result<String> {
        Ok(self
            .get_string(&["matrix", "hostname"])?
            .unwrap_or_else(|| DEFAULT_MATRIX_HOSTNAME.to_string()))
    }

    fn set_matrix_hostname(&self, hostname: &str) -> Result<()> {
        self.set_string(&["matrix", "hostname"], hostname)
    }

    fn get_post_timeout(&self) -> Result<Duration> {
        let default = DEFAULT_POST_TIMEOUT.as_millis() as u64;
        let millis = self.get_u64(&["matrix", "post_timeout_ms"], default)?;
        Ok(Duration::from_millis(millis))
    }

    fn create_matrix_display(&self) -> Result<MatrixDisplay> {
        let hostname = self.get_matrix_hostname()?;
        let timeout = self.get_post_timeout()?;
        Ok(MatrixDisplay::discover(&hostname, timeout))
    }
}
