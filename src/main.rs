// trilingo - trilingual community site gateway for the Gemini API

use anyhow::Result;
use clap::Parser;
use std::net::SocketAddr;
use tokio::signal;
use tracing::info;
use trilingo::cli::Args;
use trilingo::config::AppConfig;
use trilingo::content::ProjectStore;
use trilingo::gemini::GeminiClient;
use trilingo::server::create_router;
use trilingo::utils::logging;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    // Phase 1: Load configuration
    let config = AppConfig::load_from(args.config.as_deref())?;

    // Phase 2: Initialize logging
    logging::init(&config.logging)?;
    info!("Starting trilingo v{}", env!("CARGO_PKG_VERSION"));

    // Phase 3: Create Gemini client (fails fast without an API key)
    let gemini_client = GeminiClient::new(&config.gemini, &config.performance)?;
    info!("Using Gemini model {}", gemini_client.model());

    // Phase 3.5: Handle --check flag (connectivity probe)
    if args.check {
        let latency = gemini_client.check_connectivity().await?;
        info!("Gemini API reachable in {:?}", latency);
        return Ok(());
    }

    // Phase 4: Open the project store
    let projects = ProjectStore::new(&config.content.data_path);
    info!("Serving project data from {}", projects.data_path().display());

    // Phase 5: Build and start HTTP server
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    let app = create_router(config, gemini_client, projects)?;

    info!("Starting server on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    // Phase 6: Run server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down gracefully");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
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
