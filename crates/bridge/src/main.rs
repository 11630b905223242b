//! `epaper-bridge` entry point

use anyhow::{Context, Result};
use bridge::{gateway, Bridge, BridgeConfig};
use clap::Parser;
use platform::NoVendorDriver;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = BridgeConfig::parse();
    tracing::info!(
        title = %platform::config::app_title(),
        model = %config.model,
        bind = %config.bind,
        "starting"
    );

    let startup = config.clone();
    let bridge = tokio::task::spawn_blocking(move || Bridge::start(&startup, Box::new(NoVendorDriver)))
        .await
        .context("startup task failed")?
        .context("display initialization failed")?;

    let listener = tokio::net::TcpListener::bind(config.bind)
        .await
        .with_context(|| format!("cannot listen on {}", config.bind))?;
    let served = gateway::serve(listener, bridge.state(), shutdown_signal()).await;

    // Put the panel to sleep even when the server failed
    tokio::task::spawn_blocking(move || bridge.shutdown())
        .await
        .context("shutdown task failed")??;
    served.context("HTTP gateway failed")
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "cannot listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "cannot listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => tracing::info!("received Ctrl+C"),
        () = terminate => tracing::info!("received SIGTERM"),
    }
}
