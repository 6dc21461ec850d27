//! Courier CLI and REST API entry point.
//!
//! Binary name: `courier`
//!
//! Parses CLI arguments, loads configuration, initializes logging, then
//! either starts the REST API server or initializes the database.

mod cli;
mod http;
mod state;

use anyhow::Context;
use clap::Parser;

use courier_infra::config::load_config;
use courier_observe::tracing_setup::{LogOptions, init_tracing, shutdown_tracing};
use courier_types::config::ServiceConfig;

use cli::{Cli, Commands};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let options = LogOptions {
        default_filter: cli.log_filter().to_string(),
        json: cli.log_json,
        enable_otel: cli.otel,
    };
    init_tracing(&options).map_err(|e| anyhow::anyhow!("failed to initialize tracing: {e}"))?;

    let mut config = load_config(&cli.config).await;
    if let Some(database) = &cli.database {
        config.database_path = database.display().to_string();
    }

    let result = match cli.command {
        Commands::Serve { host, port } => serve(config, host, port).await,
        Commands::InitDb => cli::db::init_db(&config).await,
    };

    shutdown_tracing();
    result
}

async fn serve(
    mut config: ServiceConfig,
    host: Option<String>,
    port: Option<u16>,
) -> anyhow::Result<()> {
    if let Some(host) = host {
        config.server.host = host;
    }
    if let Some(port) = port {
        config.server.port = port;
    }

    let state = AppState::init(&config).await?;
    let pool = state.db_pool().clone();

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    tracing::info!(%addr, app = %config.app_name, "listening");

    let router = http::router::build_router(state);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    pool.close().await;
    tracing::info!("server stopped");
    Ok(())
}

/// Wait for Ctrl+C or SIGTERM for graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
