//! Extension pour intégrer la cadence de synchronisation dans pmoconfig

use std::time::Duration;

use anyhow::Result;
use pmoconfig::Config;

use crate::engine::{SyncSettings, DEFAULT_BACKOFF, DEFAULT_POLLING_INTERVAL};

/// Trait d'extension pour gérer la boucle de synchronisation dans pmoconfig
pub trait SyncConfigExt {
    /// Intervalle entre deux requêtes d'état (default: 500 ms)
    fn get_polling_interval(&self) -> Result<Duration>;

    /// Définit l'intervalle de polling
    fn set_polling_interval(&self, interval: Duration) -> Result<()>;

    /// Délai de repli après un cycle en échec (default: 3 s)
    fn get_sync_backoff(&self) -> Result<Duration>;

    /// Définit le délai de repli
    fn set_sync_backoff(&self, backoff: Duration) -> Result<()>;

    /// Envoyer l'écran de veille au démarrage (default: true)
    fn get_startup_screensaver(&self) -> Result<bool>;

    /// Regroupe les réglages de la boucle
    fn get_sync_settings(&self) -> Result<SyncSettings>;
}

impl SyncConfigExt for Config {
    fn get_polling_interval(&self) -> Result<Duration> {
        let default = DEFAULT_POLLING_INTERVAL.as_millis() as u64;
        let millis = self.get_u64(&["sync", "polling_interval_ms"], default)?;
        Ok(Duration::from_millis(millis))
    }

    fn set_polling_interval(&self, interval: Duration) -> Result<()> {
        self.set_u64(&["sync", "polling_interval_ms"], interval.as_millis() as u64)
    }

    fn get_sync_backoff(&self) -> Result<Duration> {
        let default = DEFAULT_BACKOFF.as_millis() as u64;
        let millis = self.get_u64(&["sync", "backoff_ms"], default)?;
        Ok(Duration::from_millis(millis))
    }

    fn set_sync_backoff(&self, backoff: Duration) -> Result<()> {
        self.set_u64(&["sync", "backoff_ms"], backoff.as_millis() as u64)
    }

    fn get_startup_screensaver(&self) -> Result<bool> {
        self.get_bool(&["matrix", "startup_screensaver"], true)
    }

    fn get_sync_settings(&self) -> Result<SyncSettings> {
        Ok(SyncSettings {
            polling_interval: self.get_polling_interval()?,
            backoff: self.get_sync_backoff()?,
            startup_screensaver: self.get_startup_screensaver()?,
        })
    }
}
