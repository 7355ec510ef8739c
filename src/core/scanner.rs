//! Scan orchestrator: evaluates many tickers on a bounded worker pool and
//! ranks the results.

use std::cmp::Reverse;
use std::sync::Arc;
use std::time::Instant;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{EngineError, Result};
use crate::metrics::Metrics;
use crate::models::{Bar, PriceSeries, ScanReport, Signal, SkipReason, SkippedTicker};
use crate::signals::SignalEngine;

/// What the caller could supply for one ticker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TickerInput {
    Series { series: PriceSeries },
    /// No usable series; recorded as a skip, never dropped.
    Unavailable { reason: SkipReason, detail: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanRequest {
    pub ticker: String,
    pub input: TickerInput,
}

impl ScanRequest {
    pub fn new(ticker: impl Into<String>, series: PriceSeries) -> Self {
        Self {
            ticker: ticker.into(),
            input: TickerInput::Series { series },
        }
    }

    /// The data collaborator could not supply a series.
    pub fn unavailable(ticker: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            ticker: ticker.into(),
            input: TickerInput::Unavailable {
                reason: SkipReason::DataUnavailable,
                detail: detail.into(),
            },
        }
    }

    /// Validates raw bars; a malformed series becomes a skipped entry.
    pub fn from_bars(ticker: impl Into<String>, bars: Vec<Bar>) -> Self {
        let ticker = ticker.into();
        match PriceSeries::new(bars) {
            Ok(series) => Self::new(ticker, series),
            Err(e) => Self {
                ticker,
                input: TickerInput::Unavailable {
                    reason: SkipReason::from_error(&e),
                    detail: e.to_string(),
                },
            },
        }
    }
}

enum Outcome {
    Scored(Signal),
    Skipped(SkippedTicker),
}

pub struct Scanner {
    engine: Arc<SignalEngine>,
    pool: rayon::ThreadPool,
    metrics: Option<Arc<Metrics>>,
}

impl Scanner {
    /// Worker count comes from `scan.workers`.
    pub fn new(engine: Arc<SignalEngine>) -> Result<Self> {
        let workers = engine.config().scan.workers;
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|i| format!("scan-worker-{}", i))
            .build()
            .map_err(|e| EngineError::Configuration(format!("cannot build worker pool: {}", e)))?;
        Ok(Self {
            engine,
            pool,
            metrics: None,
        })
    }

    pub fn with_metrics(mut self, metrics: Arc<Metrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    pub fn engine(&self) -> &SignalEngine {
        &self.engine
    }

    /// Score every request. Per-ticker failures become skipped entries;
    /// only a configuration error fails the whole scan. Signals are ordered
    /// by descending |score| with ties in input order, skipped entries keep
    /// input order.
    pub fn scan(&self, requests: &[ScanRequest]) -> Result<ScanReport> {
        let started = Instant::now();
        let engine = &self.engine;

        let outcomes: Vec<Result<Outcome>> = self.pool.install(|| {
            requests
                .par_iter()
                .map(|request| evaluate_one(engine, request))
                .collect()
        });

        let mut report = ScanReport::default();
        for outcome in outcomes {
            match outcome? {
                Outcome::Scored(signal) => report.signals.push(signal),
                Outcome::Skipped(skipped) => {
                    warn!(
                        ticker = %skipped.ticker,
                        reason = skipped.reason.as_str(),
                        detail = %skipped.detail,
                        "Ticker skipped"
                    );
                    report.skipped.push(skipped);
                }
            }
        }
        report
            .signals
            .sort_by_key(|s| Reverse(s.composite_score.abs()));

        let elapsed = started.elapsed();
        if let Some(metrics) = &self.metrics {
            metrics.record_scan(&report, elapsed);
        }
        info!(
            requested = requests.len(),
            scored = report.signals.len(),
            skipped = report.skipped.len(),
            duration_ms = elapsed.as_millis() as u64,
            "Scan completed"
        );
        Ok(report)
    }
}

fn evaluate_one(engine: &SignalEngine, request: &ScanRequest) -> Result<Outcome> {
    let series = match &request.input {
        TickerInput::Series { series } => series,
        TickerInput::Unavailable { reason, detail } => {
            return Ok(Outcome::Skipped(SkippedTicker {
                ticker: request.ticker.clone(),
                reason: *reason,
                detail: detail.clone(),
            }))
        }
    };
    match engine.evaluate(&request.ticker, series) {
        Ok(signal) => Ok(Outcome::Scored(signal)),
        Err(e) if e.is_skippable() => Ok(Outcome::Skipped(SkippedTicker {
            ticker: request.ticker.clone(),
            reason: SkipReason::from_error(&e),
            detail: e.to_string(),
        })),
        Err(e) => Err(e),
    }
}
