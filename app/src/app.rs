use std::sync::Arc;

use banner_core::AdmissionQueue;
use tokio::sync::RwLock;
use tokio_util::sync::CancellationToken;

use crate::config::AppConfig;

/// Application shared state accessible from the HTTP handlers, the IPC
/// receiver, and the display scheduler.
#[derive(Clone)]
pub struct SharedState {
    inner: Arc<SharedStateInner>,
}

struct SharedStateInner {
    /// Pending banner requests, shared across all ingestion paths.
    queue: AdmissionQueue,
    /// Application configuration (reloadable)
    config: RwLock<AppConfig>,
    /// Cancelled once, on shutdown or an exit-after-show completion.
    shutdown: CancellationToken,
}

impl SharedState {
    pub fn new(queue: AdmissionQueue, config: AppConfig) -> Self {
        Self {
            inner: Arc::new(SharedStateInner {
                queue,
                config: RwLock::new(config),
                shutdown: CancellationToken::new(),
            }),
        }
    }

    pub fn queue(&self) -> &AdmissionQueue {
        &self.inner.queue
    }

    pub fn shutdown_token(&self) -> &CancellationToken {
        &self.inner.shutdown
    }

    pub fn api_listen_port(&self) -> u16 {
        // Read from config; fallback to the stock port.
        self.inner
            .config
            .try_read()
            .map(|c| c.api_listen_port)
            .unwrap_or(crate::config::DEFAULT_API_PORT)
    }

    /// Get a read lock on the current config.
    pub async fn config(&self) -> tokio::sync::RwLockReadGuard<'_, AppConfig> {
        self.inner.config.read().await
    }
}
