//! Receiver loop run by the active instance.

use anyhow::{Context, Result, bail};
use banner_core::{AdmissionQueue, NotificationRequest};
use tokio::io::{AsyncBufReadExt, AsyncReadExt, BufReader};
use tokio::net::{UnixListener, UnixStream};
use tokio_util::sync::CancellationToken;

/// Accept forwarded requests until shutdown. A bad connection or payload
/// is logged and dropped; the loop itself never dies.
pub async fn run_receiver(
    listener: UnixListener,
    queue: AdmissionQueue,
    shutdown: CancellationToken,
) {
    loop {
        tokio::select! {
            _ = shutdown.cancelled() => break,
            accepted = listener.accept() => match accepted {
                Ok((stream, _addr)) => {
                    if let Err(e) = handle_forward(stream, &queue).await {
                        tracing::warn!(error = %e, "dropping forwarded notification");
                    }
                }
                Err(e) => tracing::warn!(error = %e, "instance socket accept failed"),
            },
        }
    }
    tracing::info!("instance receiver stopped");
}

/// One forwarded request: a line with the sender's PID, then the JSON
/// payload, terminated by the sender closing its end.
async fn handle_forward(stream: UnixStream, queue: &AdmissionQueue) -> Result<()> {
    let mut reader = BufReader::new(stream);

    let mut pid_line = String::new();
    reader
        .read_line(&mut pid_line)
        .await
        .context("failed to read sender pid")?;
    let pid = pid_line.trim().parse::<u32>().ok();

    let mut payload = String::new();
    reader
        .read_to_string(&mut payload)
        .await
        .context("failed to read payload")?;
    if payload.trim().is_empty() {
        bail!("empty payload");
    }

    let request: NotificationRequest =
        serde_json::from_str(payload.trim()).context("failed to parse payload")?;
    if !request.has_message() {
        bail!("forwarded request has no message");
    }

    tracing::info!(pid, title = %request.title, "received forwarded notification");
    queue.enqueue(request);
    Ok(())
}
