// prompt-proxy - Rate-limited, caching HTTP front-end for the Anthropic Messages API
// Author: kelexine (https://github.com/kelexine)

use anyhow::Result;
use clap::Parser;
use prompt_proxy::cli::Args;
use prompt_proxy::config::AppConfig;
use prompt_proxy::keys;
use prompt_proxy::server::{create_router, AppState};
use prompt_proxy::utils::clock::SystemClock;
use prompt_proxy::utils::logging;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::signal;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    // Phase 1: Load configuration
    let mut config = AppConfig::load(args.config.as_deref())?;
    args.apply(&mut config);

    // Phase 2: Initialize logging
    logging::init(&config.logging)?;
    info!("Starting prompt-proxy v{}", env!("CARGO_PKG_VERSION"));

    // Phase 3: Resolve the upstream credential
    let api_key = keys::resolve(&config.anthropic);
    if api_key.is_some() {
        info!("AI: enabled (model {})", config.anthropic.model);
    } else {
        warn!(
            "AI: disabled (set anthropic.api_key in config.toml or {})",
            config.anthropic.api_key_env
        );
    }

    // Phase 4: Build and start HTTP server
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    let state = AppState::new(config, api_key, Arc::new(SystemClock))?;
    let app = create_router(state);

    info!("Serving at http://{}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    // Phase 5: Run server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down gracefully");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C signal");
        },
        _ = terminate => {
            info!("Received SIGTERM signal");
        },
    }
}
