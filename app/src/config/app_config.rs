//! Runtime application configuration loaded from the config file with
//! environment overrides.

use std::path::Path;

use serde::{Deserialize, Serialize};

pub const DEFAULT_API_PORT: u16 = 14969;

/// Runtime configuration. Every field has a default so a partial (or
/// absent) config file is always usable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Port the HTTP ingestion gateway listens on; 0 disables it.
    #[serde(default = "default_api_port")]
    pub api_listen_port: u16,
    /// Addresses the gateway binds; one listener per address.
    #[serde(default = "default_bind_addresses")]
    pub bind_addresses: Vec<String>,
    /// Maximum number of banners on screen at once.
    #[serde(default = "default_max_banners")]
    pub max_banners: usize,
    /// Banner height in pixels, used for stacking offsets.
    #[serde(default = "default_banner_height")]
    pub banner_height: u32,
    /// Vertical gap between stacked banners in pixels.
    #[serde(default = "default_banner_spacing")]
    pub banner_spacing: u32,
    /// Admission queue capacity.
    #[serde(default = "default_queue_capacity")]
    pub queue_capacity: usize,
    /// Display scheduler poll cadence in milliseconds.
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
}

fn default_api_port() -> u16 {
    DEFAULT_API_PORT
}

fn default_bind_addresses() -> Vec<String> {
    vec!["127.0.0.1".to_string()]
}

fn default_max_banners() -> usize {
    4
}

fn default_banner_height() -> u32 {
    100
}

fn default_banner_spacing() -> u32 {
    10
}

fn default_queue_capacity() -> usize {
    100
}

fn default_poll_interval_ms() -> u64 {
    100
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_listen_port: default_api_port(),
            bind_addresses: default_bind_addresses(),
            max_banners: default_max_banners(),
            banner_height: default_banner_height(),
            banner_spacing: default_banner_spacing(),
            queue_capacity: default_queue_capacity(),
            poll_interval_ms: default_poll_interval_ms(),
        }
    }
}

impl AppConfig {
    /// Load configuration from `config.json` under the data directory.
    /// A missing file is written out with defaults; an unreadable file is
    /// logged and replaced by defaults. Environment variables win last.
    pub fn load(data_dir: &Path) -> Self {
        let path = data_dir.join("config.json");
        let mut config = if path.exists() {
            match std::fs::read_to_string(&path) {
                Ok(raw) => match serde_json::from_str::<AppConfig>(&raw) {
                    Ok(config) => config,
                    Err(e) => {
                        tracing::warn!(path = %path.display(), error = %e, "invalid config file, using defaults");
                        AppConfig::default()
                    }
                },
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "could not read config file, using defaults");
                    AppConfig::default()
                }
            }
        } else {
            let config = AppConfig::default();
            config.save(&path);
            config
        };

        if let Ok(v) = std::env::var("NOTIFY_BANNER_PORT") {
            if let Ok(port) = v.parse::<u16>() {
                config.api_listen_port = port;
            }
        }

        config.max_banners = config.max_banners.max(1);
        config.queue_capacity = config.queue_capacity.max(1);
        config.poll_interval_ms = config.poll_interval_ms.max(10);
        config
    }

    fn save(&self, path: &Path) {
        let raw = match serde_json::to_string_pretty(self) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!(error = %e, "could not serialize default config");
                return;
            }
        };
        if let Err(e) = std::fs::write(path, raw) {
            tracing::warn!(path = %path.display(), error = %e, "could not write default config file");
        }
    }
}
