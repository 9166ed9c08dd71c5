//! Serve command implementation.

use std::net::SocketAddr;

use anyhow::{Context, Result};
use tracing::info;

use crate::{
    config::DashboardConfig,
    dashboard::{self, AppState},
    data::{self, Provider},
};

/// Run the web dashboard until Ctrl-C.
pub(crate) async fn serve(bind: Option<String>, port: Option<u16>, provider: Option<Provider>) -> Result<()> {
    let mut config = DashboardConfig::from_env();
    if let Some(bind) = bind {
        config.bind = bind;
    }
    if let Some(port) = port {
        config.port = port;
    }
    if let Some(provider) = provider {
        config.provider = provider;
    }

    let source = data::returns_source(config.provider)?;
    let addr: SocketAddr = format!("{}:{}", config.bind, config.port)
        .parse()
        .with_context(|| format!("invalid bind address {}:{}", config.bind, config.port))?;
    let provider = config.provider;
    let app = dashboard::router(AppState::new(config, source));

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    info!(%provider, "MarketMomentum listening on http://{addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    info!("Shutting down");
}
