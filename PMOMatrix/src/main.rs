use std::env;
use std::process;

use pmoconfig::Config;
use pmocovers::CoverConfigExt;
use pmodisplay::DisplayConfigExt;
use pmospotify::SpotifyConfigExt;
use pmosync::{SyncConfigExt, SyncEngine};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Arrête le processus avant l'entrée dans la boucle
fn fatal(what: &str, err: anyhow::Error) -> ! {
    error!("❌ {}: {:#}", what, err);
    process::exit(1);
}

/// Initialise le logging ; `RUST_LOG` prime sur la configuration
fn init_logging(config: &Config) {
    let level = config
        .get_log_min_level()
        .unwrap_or_else(|_| "INFO".to_string())
        .to_lowercase();

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();
}

fn main() {
    // Répertoire de configuration optionnel en premier argument
    let config_dir = env::args().nth(1).unwrap_or_default();

    let config = match Config::load_config(&config_dir) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Cannot load configuration: {:#}", e);
            process::exit(1);
        }
    };

    init_logging(&config);
    info!(
        "🚀 Starting PMOMatrix {} (config: {})",
        env!("CARGO_PKG_VERSION"),
        config.directory()
    );

    // ========== PHASE 1 : Validation et préparation ==========

    let normalizer = config
        .create_cover_normalizer()
        .unwrap_or_else(|e| fatal("Invalid matrix resolutions", e));
    info!(
        "🖼️ Covers rendered at {}px on a {}px panel",
        normalizer.art_resolution(),
        normalizer.target_resolution()
    );

    let settings = config
        .get_sync_settings()
        .unwrap_or_else(|e| fatal("Invalid sync settings", e));

    // ========== PHASE 2 : Collaborateurs externes ==========

    info!("🎵 Authenticating with Spotify...");
    let spotify = config
        .authenticate_spotify()
        .unwrap_or_else(|e| fatal("Spotify authentication failed", e));
    info!("✅ Spotify session ready");

    let matrix = config
        .create_matrix_display()
        .unwrap_or_else(|e| fatal("Invalid matrix settings", e));
    info!("📡 Matrix endpoint: {}", matrix.endpoints().image_url);

    // ========== PHASE 3 : Boucle de synchronisation ==========

    SyncEngine::new(spotify, normalizer, matrix, settings).run()
}
