use std::path::Path;
use std::time::Duration;

use tokio::time::sleep;

use crate::app::SharedState;

pub async fn graceful_shutdown(state: &SharedState, socket_path: &Path) {
    tracing::info!("Shutdown sequence started");

    state.shutdown_token().cancel();
    tracing::info!("Shutdown: background loops cancelled");

    if socket_path.exists() {
        match std::fs::remove_file(socket_path) {
            Ok(()) => tracing::info!("Shutdown: instance socket removed"),
            Err(e) => {
                tracing::warn!(error = %e, "Shutdown: could not remove instance socket");
            }
        }
    }

    sleep(Duration::from_millis(200)).await;
    tracing::info!("Shutdown sequence completed");
}
