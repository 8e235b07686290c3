//! Single-instance coordination over a Unix domain socket.
//!
//! Exactly one process owns the well-known socket at a time. The owner
//! (active instance) runs the receiver loop in [`server`]; every other
//! launch (secondary) forwards its request through [`client`] and exits.

pub mod client;
pub mod server;

use std::io;
use std::path::Path;
use std::time::Duration;

use tokio::net::{UnixListener, UnixStream};
use tokio::time::timeout;

/// How long a connect attempt to the active instance may take.
pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(2);

/// Name of the coordination socket under the data directory.
pub const SOCKET_NAME: &str = "banner.sock";

/// Try to claim the active role. Returns the bound receiver socket, or
/// `None` when a live instance already owns the channel. A socket file
/// with nobody listening behind it is stale and gets replaced.
pub async fn try_become_active(socket_path: &Path) -> io::Result<Option<UnixListener>> {
    if socket_path.exists() {
        match timeout(CONNECT_TIMEOUT, UnixStream::connect(socket_path)).await {
            Ok(Ok(_probe)) => {
                tracing::debug!(path = %socket_path.display(), "active instance already running");
                return Ok(None);
            }
            Ok(Err(_)) | Err(_) => {
                tracing::info!(path = %socket_path.display(), "removing stale instance socket");
                std::fs::remove_file(socket_path)?;
            }
        }
    }

    if let Some(parent) = socket_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let listener = UnixListener::bind(socket_path)?;
    tracing::info!(path = %socket_path.display(), "claimed active instance role");
    Ok(Some(listener))
}
