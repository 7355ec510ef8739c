//! Stockscan Worker
//!
//! Scans the watchlist on a cron schedule, logs the text report and every
//! signal not announced before.

use dotenvy::dotenv;
use std::env;
use std::sync::Arc;
use stockscan::config::EngineConfig;
use stockscan::core::scanner::Scanner;
use stockscan::core::scheduler::{ScanScheduler, DEFAULT_SCHEDULES};
use stockscan::jobs::{parse_watchlist, ScanJob};
use stockscan::logging;
use stockscan::metrics::Metrics;
use stockscan::reporting::{format_scan_report, format_signal_detail};
use stockscan::services::JsonDirectorySource;
use stockscan::signals::SignalEngine;
use tokio::signal;
use tracing::{error, info, warn};

async fn run_scan(job: Arc<ScanJob>) {
    let result = tokio::task::spawn_blocking(move || job.run()).await;
    match result {
        Ok(Ok(outcome)) => {
            info!(report = %format_scan_report(&outcome.report), "Scan report");
            for signal in &outcome.fresh {
                info!(
                    ticker = %signal.ticker,
                    label = %signal.label,
                    score = signal.composite_score,
                    detail = %format_signal_detail(signal),
                    "New signal"
                );
            }
        }
        Ok(Err(e)) => error!(error = %e, "Scan failed"),
        Err(e) => error!(error = %e, "Scan task panicked"),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    logging::init_logging();

    let env = stockscan::config::get_environment();
    info!("Starting Stockscan Worker");
    info!(environment = %env, "Environment");

    let config = EngineConfig::from_env()?;
    let watchlist = parse_watchlist(&env::var("WATCHLIST").unwrap_or_default());
    if watchlist.is_empty() {
        return Err("WATCHLIST must name at least one ticker".into());
    }
    let data_dir = env::var("DATA_DIR").unwrap_or_else(|_| "data".to_string());
    let run_once = env::var("RUN_ONCE")
        .map(|v| matches!(v.trim(), "1" | "true" | "yes"))
        .unwrap_or(false);

    info!(tickers = ?watchlist, data_dir = %data_dir, "Watchlist loaded");

    let metrics = Arc::new(Metrics::new()?);
    let engine = Arc::new(SignalEngine::new(config)?);
    let scanner = Arc::new(Scanner::new(engine)?.with_metrics(metrics));
    let source = Arc::new(JsonDirectorySource::new(data_dir));
    let job = Arc::new(ScanJob::new(watchlist, source, scanner));

    if run_once {
        run_scan(job).await;
        return Ok(());
    }

    let schedules = env::var("SCAN_SCHEDULES").unwrap_or_else(|_| DEFAULT_SCHEDULES.to_string());
    let scheduler = ScanScheduler::new(&schedules)?;
    scheduler
        .start(move || {
            let job = job.clone();
            async move { run_scan(job).await }
        })
        .await;

    info!("Worker started, waiting for shutdown signal...");
    signal::ctrl_c().await?;
    warn!("Shutting down worker...");
    scheduler.stop().await;

    Ok(())
}
