pub mod api;
pub mod router;

use std::net::SocketAddr;

use anyhow::{Result, bail};
use tokio::net::TcpListener;

use crate::app::SharedState;

/// Bind the ingestion gateway on every configured address and serve until
/// shutdown. A single failed bind is logged and skipped; only a total bind
/// failure is an error (the IPC path keeps working either way).
pub async fn start_server(state: SharedState) -> Result<()> {
    let (port, addresses) = {
        let config = state.config().await;
        (config.api_listen_port, config.bind_addresses.clone())
    };
    if port == 0 {
        tracing::info!("ingestion gateway disabled (port 0)");
        return Ok(());
    }

    let mut listeners = Vec::new();
    for address in &addresses {
        let addr = format!("{address}:{port}");
        match TcpListener::bind(&addr).await {
            Ok(listener) => {
                tracing::info!("ingestion gateway listening on http://{addr}");
                listeners.push(listener);
            }
            Err(e) => {
                tracing::error!(%addr, error = %e, "failed to bind gateway listener");
            }
        }
    }
    if listeners.is_empty() {
        bail!("no gateway listener could be bound on port {port}");
    }

    let mut handles = Vec::new();
    for listener in listeners {
        handles.push(tokio::spawn(serve(state.clone(), listener)));
    }
    for handle in handles {
        let _ = handle.await;
    }
    Ok(())
}

/// Serve one bound listener until the shutdown token fires.
pub async fn serve(state: SharedState, listener: TcpListener) {
    let shutdown_token = state.shutdown_token().clone();
    let app = router::create_router(state);

    let result = axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(async move { shutdown_token.cancelled().await })
    .await;

    if let Err(e) = result {
        tracing::error!(error = %e, "gateway listener stopped with error");
    }
}
