//! Zip Code Directory Service - Main Entry Point
//!
//! Loads the zip code dataset once, then serves lookup and ranking over HTTP.
//!
//! Usage:
//!     zipcode-server --dataset zips.csv --port 8000
//!     zipcode-server --address 127.0.0.1:8000 --api-token s3cret
//!
//! Environment variables mirror the flags (`ZIPCODE_DATASET`, `ZIPCODE_PORT`,
//! `ZIPCODE_API_TOKEN`, `OIDC_OP_TOKEN_ENDPOINT`, ...); `RUST_LOG` overrides
//! `--log-level`.

use std::sync::Arc;

use clap::Parser;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::{error, info, warn};
use zipcode_core::{DatasetLoader, QueryService};
use zipcode_server::{build_router, telemetry, AppState, OidcTokenClient, Result, ServerArgs};

#[tokio::main]
async fn main() -> Result<()> {
    let args = ServerArgs::parse();

    telemetry::init(args.log_filter());

    info!("Initializing zip code directory service");
    info!("  Version: {}", env!("CARGO_PKG_VERSION"));

    // The directory is loaded before anything listens; a bad dataset stops start-up
    let directory = match DatasetLoader::new().load_path(&args.dataset) {
        Ok(directory) => directory,
        Err(err) => {
            error!(error = %err, "Failed to load zip code dataset");
            return Err(err.into());
        }
    };
    let entries = directory.len();

    let mut state = AppState::new(QueryService::new(Arc::new(directory)));

    match &args.api_token {
        Some(token) => state = state.with_api_token(token.clone()),
        None => warn!("No API token configured, directory routes are unauthenticated"),
    }

    match args.oidc_config() {
        Some(config) => {
            info!(endpoint = %config.token_endpoint, "OIDC token exchange enabled");
            state = state.with_exchanger(Arc::new(OidcTokenClient::new(config)?));
        }
        None => info!("OIDC settings incomplete, token exchange disabled"),
    }

    let addr = args.bind_addr()?;
    let listener = TcpListener::bind(addr).await?;

    info!(address = %addr, entries = entries, "Starting zip code directory service");

    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Service shutdown complete");
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
            info!("Received Ctrl+C, shutting down");
        }
        _ = terminate => {
            info!("Received terminate signal, shutting down");
        }
    }
}
