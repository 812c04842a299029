//! Client HTTP de la matrice LED
//!
//! Le panneau expose deux endpoints :
//! - `POST /image` : bitmap RGB brut, `application/octet-stream`
//! - `POST /screensaver` : corps vide, quitte la dernière pochette
//!
//! Les envois ne lèvent jamais d'erreur : un échec est journalisé et
//! signalé par `false`, la boucle de synchronisation décide du reste.

use std::fmt;
use std::net::{IpAddr, ToSocketAddrs};
use std::time::Duration;

use pmocovers::NormalizedFrame;
use pmosync::error_chain;
use tracing::{debug, info, warn};
use ureq::Agent;

use crate::error::{DisplayError, Result};

/// Timeout par défaut d'un POST vers la matrice
pub const DEFAULT_POST_TIMEOUT: Duration = Duration::from_secs(5);

const MDNS_DOMAIN: &str = ".local";

/// Complète un nom de machine en nom mDNS (`<name>.local`)
///
/// Une adresse IP littérale est conservée telle quelle.
pub fn mdns_hostname(name: &str) -> String {
    let name = name.trim().trim_end_matches('.');
    if name.parse::<IpAddr>().is_ok() || name.to_ascii_lowercase().ends_with(MDNS_DOMAIN) {
        name.to_string()
    } else {
        format!("{}{}", name, MDNS_DOMAIN)
    }
}

/// Résout le nom du panneau une fois pour toutes
///
/// Évite une résolution mDNS à chaque requête. En cas d'échec, le nom est
/// retourné tel quel pour que la résolution soit retentée à la connexion.
pub fn resolve_device_address(hostname: &str) -> String {
    match (hostname, 80).to_socket_addrs() {
        Ok(addrs) => match preferred_address(addrs.map(|a| a.ip())) {
            Some(address) => address,
            None => {
                warn!(
                    "Hostname {} resolved to no address. Using hostname (will resolve on connect)",
                    hostname
                );
                hostname.to_string()
            }
        },
        Err(e) => {
            warn!(
                "Failed to resolve mDNS hostname on init. Using {} (will resolve on connect). Error: {}",
                hostname, e
            );
            hostname.to_string()
        }
    }
}

/// Première adresse IPv4, sinon la première adresse, au format URL
fn preferred_address(addrs: impl IntoIterator<Item = IpAddr>) -> Option<String> {
    let addrs: Vec<IpAddr> = addrs.into_iter().collect();
    let chosen = addrs
        .iter()
        .find(|ip| ip.is_ipv4())
        .or_else(|| addrs.first())?;
    Some(match chosen {
        IpAddr::V4(ip) => ip.to_string(),
        IpAddr::V6(ip) => format!("[{}]", ip),
    })
}

/// URLs des deux endpoints du panneau
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayEndpoints {
    pub image_url: String,
    pub screensaver_url: String,
}

impl DisplayEndpoints {
    /// Construit les endpoints à partir d'une adresse `host[:port]`
    pub fn for_address(address: &str) -> Self {
        Self {
            image_url: format!("http://{}/image", address),
            screensaver_url: format!("http://{}/screensaver", address),
        }
    }
}

/// Panneau LED joignable en HTTP
#[derive(Clone)]
pub struct MatrixDisplay {
    agent: Agent,
    endpoints: DisplayEndpoints,
}

impl fmt::Debug for MatrixDisplay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MatrixDisplay")
            .field("endpoints", &self.endpoints)
            .finish()
    }
}

impl MatrixDisplay {
    /// Crée un client vers des endpoints déjà connus
    pub fn new(endpoints: DisplayEndpoints, timeout: Duration) -> Self {
        Self {
            agent: build_agent(timeout),
            endpoints,
        }
    }

    /// Résout `<name>.local` puis crée le client
    pub fn discover(name: &str, timeout: Duration) -> Self {
        let hostname = mdns_hostname(name);
        let address = resolve_device_address(&hostname);
        info!("LED matrix {} reachable at {}", hostname, address);
        Self::new(DisplayEndpoints::for_address(&address), timeout)
    }

    pub fn endpoints(&self) -> &DisplayEndpoints {
        &self.endpoints
    }

    /// Envoie une frame vers `/image`
    ///
    /// Retourne `true` uniquement sur une réponse 2xx.
    pub fn send_frame(&self, frame: &NormalizedFrame) -> bool {
        match self.post_frame(frame) {
            Ok(()) => {
                info!("Successfully sent image to matrix ({} bytes)", frame.len());
                true
            }
            Err(e) => {
                warn!("Failed to send image to matrix: {}", error_chain(&e));
                false
            }
        }
    }

    /// Demande l'écran de veille via `/screensaver`
    ///
    /// Retourne `true` uniquement sur une réponse 2xx.
    pub fn send_screensaver(&self) -> bool {
        match self.post_screensaver() {
            Ok(()) => {
                info!("Successfully sent screensaver intent to matrix");
                true
            }
            Err(e) => {
                warn!("Failed to send screensaver intent to matrix: {}", error_chain(&e));
                false
            }
        }
    }

    fn post_frame(&self, frame: &NormalizedFrame) -> Result<()> {
        let url = &self.endpoints.image_url;
        debug!("POST {} ({} bytes)", url, frame.len());
        let response = self
            .agent
            .post(url.as_str())
            .header("Content-Type", "application/octet-stream")
            .send(frame.as_bytes())?;
        check_status(url, response.status().as_u16())
    }

    fn post_screensaver(&self) -> Result<()> {
        let url = &self.endpoints.screensaver_url;
        debug!("POST {}", url);
        let response = self.agent.post(url.as_str()).send_empty()?;
        check_status(url, response.status().as_u16())
    }
}

fn check_status(url: &str, status: u16) -> Result<()> {
    if (200..300).contains(&status) {
        Ok(())
    } else {
        Err(DisplayError::Status {
            url: url.to_string(),
            status,
        })
    }
}

fn build_agent(timeout: Duration) -> Agent {
    // Les statuts 4xx/5xx sont traités par check_status
    Agent::config_builder()
        .timeout_global(Some(timeout))
        .http_status_as_error(false)
        .build()
        .into()
}
