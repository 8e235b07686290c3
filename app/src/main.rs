//! Banner daemon entry point.
//!
//! A launch either claims the active role (and runs the ingestion gateway,
//! the instance receiver, and the display scheduler) or forwards its
//! request to the instance that already holds that role and exits.

use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::EnvFilter;

use banner_core::AdmissionQueue;
use notify_banner_lib::app::SharedState;
use notify_banner_lib::notification::{
    DisplayScheduler, HeadlessPresenter, NoSuppression, SchedulerConfig, presentation_spec,
};
use notify_banner_lib::{config, ipc, server, shutdown};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let launch = config::cli::parse();
    let (app_config, data_dir) = notify_banner_lib::init_foundation()?;
    let socket_path = data_dir.join(ipc::SOCKET_NAME);

    let Some(listener) = ipc::try_become_active(&socket_path).await? else {
        // Another instance owns the display; hand the request over and exit.
        if let Some(request) = launch.request {
            if let Err(e) = ipc::client::forward(&socket_path, &request).await {
                tracing::warn!(error = %e, "could not reach active instance, banner will not appear");
            }
        } else {
            tracing::info!("active instance already running, nothing to forward");
        }
        return Ok(());
    };

    let queue = AdmissionQueue::with_capacity(app_config.queue_capacity);
    let scheduler_config = SchedulerConfig {
        max_slots: app_config.max_banners,
        banner_height: app_config.banner_height,
        banner_spacing: app_config.banner_spacing,
        poll_interval: Duration::from_millis(app_config.poll_interval_ms),
    };
    let state = SharedState::new(queue, app_config);

    if let Some(request) = launch.request {
        state.queue().enqueue(request);
    }

    // Instance receiver
    tokio::spawn(ipc::server::run_receiver(
        listener,
        state.queue().clone(),
        state.shutdown_token().clone(),
    ));

    // Ingestion gateway
    let s = state.clone();
    tokio::spawn(async move {
        if let Err(e) = server::start_server(s).await {
            tracing::error!(error = %e, "ingestion gateway failed");
        }
    });

    // Display scheduler
    let scheduler = DisplayScheduler::new(
        state.queue().clone(),
        Arc::new(HeadlessPresenter),
        Arc::new(NoSuppression),
        presentation_spec,
        scheduler_config,
        state.shutdown_token().clone(),
    );
    tokio::spawn(scheduler.run());

    tracing::info!(
        port = state.api_listen_port(),
        "notify-banner running. Press Ctrl+C to stop."
    );

    tokio::select! {
        _ = tokio::signal::ctrl_c() => tracing::info!("interrupt received"),
        _ = state.shutdown_token().cancelled() => {}
    }

    shutdown::graceful_shutdown(&state, &socket_path).await;
    Ok(())
}
