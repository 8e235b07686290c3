//! Secondary-instance side: forward one request to the active instance.

use std::path::Path;

use anyhow::{Context, Result};
use banner_core::NotificationRequest;
use tokio::io::AsyncWriteExt;
use tokio::net::UnixStream;
use tokio::time::timeout;

use super::CONNECT_TIMEOUT;

/// Connect to the active instance and hand over the request: one line with
/// our PID, then the JSON payload, then EOF.
pub async fn forward(socket_path: &Path, request: &NotificationRequest) -> Result<()> {
    let mut stream = timeout(CONNECT_TIMEOUT, UnixStream::connect(socket_path))
        .await
        .context("timed out connecting to active instance")?
        .with_context(|| format!("failed to connect to {}", socket_path.display()))?;

    let payload = serde_json::to_string(request).context("failed to serialize request")?;
    stream
        .write_all(format!("{}\n", std::process::id()).as_bytes())
        .await
        .context("failed to write pid")?;
    stream
        .write_all(payload.as_bytes())
        .await
        .context("failed to write payload")?;
    stream
        .shutdown()
        .await
        .context("failed to close stream")?;

    tracing::info!(title = %request.title, "forwarded notification to active instance");
    Ok(())
}
