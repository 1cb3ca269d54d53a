//! carbridged - carbridge server daemon
//!
//! Serves the stable vehicle REST API and forwards each request to the
//! upstream vendor API.
//!
//! Usage:
//!   carbridged [OPTIONS]
//!
//! If no config file is provided, the built-in defaults are used: listen on
//! 0.0.0.0:3000 and talk to the vendor's fixed address.

mod config;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use carbridge_api::{create_router, AppState};
use carbridge_client::UpstreamClient;
use clap::{Parser, ValueEnum};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;

const DEFAULT_LOG_FILTER: &str = "carbridged=info,carbridge_api=info,carbridge_client=info,carbridge_core=info,tower_http=info";

#[derive(Parser)]
#[command(name = "carbridged")]
#[command(author, version, about = "Stable vehicle REST API over the vendor API")]
struct Cli {
    /// Config file (TOML)
    #[arg(short, long, env = "CARBRIDGE_CONFIG")]
    config: Option<PathBuf>,

    /// Port to listen on (overrides server.port)
    #[arg(short, long, env = "CARBRIDGE_PORT")]
    port: Option<u16>,

    /// Vendor API base URL (overrides upstream.base_url)
    #[arg(short, long, env = "CARBRIDGE_UPSTREAM_URL")]
    upstream_url: Option<String>,

    /// Log output format
    #[arg(long, value_enum, default_value = "text")]
    log_format: LogFormat,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum LogFormat {
    Text,
    Json,
}

fn init_logging(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_LOG_FILTER.into());
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Text => registry.with(tracing_subscriber::fmt::layer()).init(),
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json())
            .init(),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_logging(cli.log_format);

    tracing::info!("Starting carbridged");

    let config = match cli.config {
        Some(ref path) => {
            tracing::info!("Loading config from: {}", path.display());
            Config::load_from(path)?
        }
        None => {
            tracing::info!("No config file provided, using defaults");
            Config::default()
        }
    }
    .merge_with_args(cli.port, cli.upstream_url.as_deref());
    config.validate()?;

    // One client for the whole process; handlers share its connection pool
    let client = UpstreamClient::with_config(
        &config.upstream.base_url,
        config.upstream.timeout(),
        config.upstream.connect_timeout(),
    )
    .with_context(|| format!("Invalid upstream URL: {}", config.upstream.base_url))?;
    tracing::info!(upstream = %client.base_url(), "Upstream client ready");

    let state = AppState::new(Arc::new(client));
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind((config.server.host.as_str(), config.server.port))
        .await
        .with_context(|| {
            format!(
                "Failed to bind {}:{}",
                config.server.host, config.server.port
            )
        })?;
    tracing::info!("Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("carbridged stopped");
    Ok(())
}

/// Resolves on Ctrl-C or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
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
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
