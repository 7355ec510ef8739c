//! Stockscan API Server
//!
//! HTTP API around the signal engine: health, metrics, active config, batch
//! scans and single-ticker signals. Stateless, callers supply the bars.

use dotenvy::dotenv;
use std::env;
use stockscan::config::EngineConfig;
use stockscan::core::http::start_server;
use stockscan::logging;
use tokio::signal;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    logging::init_logging();

    let port = env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8080);

    // A bad config is fatal here, before anything listens.
    let config = EngineConfig::from_env()?;

    let env = stockscan::config::get_environment();
    info!("Starting Stockscan API Server");
    info!(environment = %env, rules_version = config.scoring.version, "Environment");
    info!(port = port, "HTTP Server: http://0.0.0.0:{}", port);

    let server_handle = tokio::spawn(async move {
        if let Err(e) = start_server(port, config).await {
            error!(error = %e, "HTTP server error");
        }
    });

    tokio::select! {
        _ = signal::ctrl_c() => {
            info!("Shutting down API server...");
        }
        _ = server_handle => {
            error!("HTTP server stopped");
        }
    }

    Ok(())
}
