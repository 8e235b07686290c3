pub mod app;
pub mod config;
pub mod ipc;
pub mod notification;
pub mod server;
pub mod shutdown;

use std::path::PathBuf;

use config::AppConfig;

/// Determine the data directory for the application.
/// Priority: NOTIFY_BANNER_DATA_DIR env var > ~/.notify-banner
pub fn data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("NOTIFY_BANNER_DATA_DIR") {
        return PathBuf::from(dir);
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".notify-banner")
}

/// Load .env from multiple candidate paths.
fn load_dotenv() {
    let candidates = [".env", "../.env"];
    for path in &candidates {
        if dotenvy::from_filename(path).is_ok() {
            tracing::info!("Loaded .env from: {path}");
            return;
        }
    }
    tracing::debug!("No .env file found, using system environment variables");
}

/// Create the data directory and load configuration.
pub fn init_foundation() -> Result<(AppConfig, PathBuf), anyhow::Error> {
    load_dotenv();

    let dir = data_dir();
    std::fs::create_dir_all(&dir)?;

    let config = AppConfig::load(&dir);
    tracing::info!(
        port = config.api_listen_port,
        max_banners = config.max_banners,
        "Settings loaded"
    );
    Ok((config, dir))
}
