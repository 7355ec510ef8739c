//! HTTP endpoint server using Axum

use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{Json, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::RwLock;
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{error, info, Level};

use crate::config::EngineConfig;
use crate::core::scanner::{ScanRequest, Scanner, TickerInput};
use crate::error::EngineError;
use crate::metrics::Metrics;
use crate::models::{Bar, ScanFilter, ScanReport, Signal, SkipReason};
use crate::signals::SignalEngine;

#[derive(Clone)]
pub struct AppState {
    pub health: Arc<RwLock<HealthStatus>>,
    pub metrics: Arc<Metrics>,
    pub start_time: Arc<Instant>,
    pub scanner: Arc<Scanner>,
}

impl AppState {
    pub fn new(config: EngineConfig) -> Result<Self, Box<dyn std::error::Error>> {
        let metrics = Arc::new(Metrics::new()?);
        let engine = Arc::new(SignalEngine::new(config)?);
        let scanner = Scanner::new(engine)?.with_metrics(metrics.clone());
        Ok(Self {
            health: Arc::new(RwLock::new(HealthStatus::default())),
            metrics,
            start_time: Arc::new(Instant::now()),
            scanner: Arc::new(scanner),
        })
    }
}

#[derive(Clone, Debug)]
pub struct HealthStatus {
    pub status: String,
}

impl Default for HealthStatus {
    fn default() -> Self {
        Self {
            status: "healthy".to_string(),
        }
    }
}

type ApiError = (StatusCode, Json<Value>);

fn api_error(status: StatusCode, message: impl Into<String>) -> ApiError {
    (status, Json(json!({ "error": message.into() })))
}

pub async fn health_check(State(state): State<AppState>) -> Result<Json<Value>, StatusCode> {
    let health = state.health.read().await;
    let uptime_seconds = state.start_time.elapsed().as_secs();
    Ok(Json(json!({
        "status": health.status,
        "uptime_seconds": uptime_seconds,
        "service": "stockscan-signal-engine"
    })))
}

pub async fn metrics_handler(State(state): State<AppState>) -> Result<String, StatusCode> {
    state
        .metrics
        .export()
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)
}

/// Middleware to track HTTP request metrics
async fn metrics_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let start = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    state.metrics.http_requests_in_flight.inc();
    let response = next.run(request).await;
    let status = response.status();
    let duration = start.elapsed();
    state.metrics.http_requests_in_flight.dec();

    state.metrics.http_requests_total.inc();
    state
        .metrics
        .http_request_duration_seconds
        .observe(duration.as_secs_f64());

    if status.is_server_error() {
        error!(
            method = %method,
            path = %path,
            status = %status,
            duration_ms = duration.as_millis(),
            "HTTP request error"
        );
    }

    response
}

/// Active configuration, including the rule table version
async fn get_config(State(state): State<AppState>) -> Json<Value> {
    let config = state.scanner.engine().config();
    Json(json!({
        "rules_version": config.scoring.version,
        "config": config,
    }))
}

#[derive(Debug, Deserialize)]
pub struct TickerPayload {
    pub ticker: String,
    pub bars: Vec<Bar>,
}

#[derive(Debug, Deserialize)]
pub struct ScanPayload {
    pub tickers: Vec<TickerPayload>,
    #[serde(default)]
    pub filter: Option<ScanFilter>,
}

/// Scan a batch of tickers whose bars are supplied in the body
async fn scan(
    State(state): State<AppState>,
    Json(payload): Json<ScanPayload>,
) -> Result<Json<ScanReport>, ApiError> {
    let requests: Vec<ScanRequest> = payload
        .tickers
        .into_iter()
        .map(|t| ScanRequest::from_bars(t.ticker, t.bars))
        .collect();

    let scanner = state.scanner.clone();
    let report = tokio::task::spawn_blocking(move || scanner.scan(&requests))
        .await
        .map_err(|e| {
            error!(error = %e, "Scan task failed");
            api_error(StatusCode::INTERNAL_SERVER_ERROR, "scan task failed")
        })?
        .map_err(|e| {
            error!(error = %e, "Scan failed");
            api_error(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        })?;

    Ok(Json(match payload.filter {
        Some(filter) => report.filtered(&filter),
        None => report,
    }))
}

/// Score a single ticker; a skip is reported as 422 with its reason
async fn signal(
    State(state): State<AppState>,
    Json(payload): Json<TickerPayload>,
) -> Result<Json<Signal>, ApiError> {
    let request = ScanRequest::from_bars(payload.ticker, payload.bars);
    let series = match request.input {
        TickerInput::Series { series } => series,
        TickerInput::Unavailable { reason, detail } => {
            return Err(skip_response(&request.ticker, reason, detail));
        }
    };

    let scanner = state.scanner.clone();
    let ticker = request.ticker.clone();
    let result = tokio::task::spawn_blocking(move || scanner.engine().evaluate(&ticker, &series))
        .await
        .map_err(|e| {
            error!(error = %e, "Signal task failed");
            api_error(StatusCode::INTERNAL_SERVER_ERROR, "signal task failed")
        })?;

    match result {
        Ok(signal) => Ok(Json(signal)),
        Err(e @ EngineError::Configuration(_)) => {
            Err(api_error(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))
        }
        Err(e) => Err(skip_response(
            &request.ticker,
            SkipReason::from_error(&e),
            e.to_string(),
        )),
    }
}

fn skip_response(ticker: &str, reason: SkipReason, detail: String) -> ApiError {
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(json!({
            "ticker": ticker,
            "reason": reason,
            "detail": detail,
        })),
    )
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/metrics", get(metrics_handler))
        .route("/api/config", get(get_config))
        .route("/api/scan", post(scan))
        .route("/api/signal", post(signal))
        .layer(
            ServiceBuilder::new()
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(DefaultMakeSpan::new().level(Level::DEBUG))
                        .on_request(DefaultOnRequest::new().level(Level::DEBUG))
                        .on_response(DefaultOnResponse::new().level(Level::DEBUG)),
                )
                .layer(axum::middleware::from_fn_with_state(
                    state.clone(),
                    metrics_middleware,
                ))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

pub async fn start_server(port: u16, config: EngineConfig) -> Result<(), Box<dyn std::error::Error>> {
    let state = AppState::new(config)?;
    let app = create_router(state);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port)).await?;

    info!(port = port, "HTTP server listening on port {}", port);
    info!(
        "Metrics endpoint available at http://0.0.0.0:{}/metrics",
        port
    );
    axum::serve(listener, app).await?;

    Ok(())
}
