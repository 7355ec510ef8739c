//! Test utilities for API server integration tests

use axum_test::TestServer;
use serde_json::{json, Value};
use std::sync::Arc;
use stockscan::config::EngineConfig;
use stockscan::core::http::{create_router, AppState};
use stockscan::metrics::Metrics;
use stockscan::models::Bar;

/// Test helper for API server integration tests
#[allow(dead_code)]
pub struct TestApiServer {
    pub server: TestServer,
    pub metrics: Arc<Metrics>,
}

impl TestApiServer {
    pub async fn new() -> Self {
        Self::with_config(EngineConfig::default()).await
    }

    pub async fn with_config(config: EngineConfig) -> Self {
        let state = AppState::new(config).expect("app state initialization");
        let metrics = state.metrics.clone();

        let app = create_router(state);
        let server = TestServer::new(app).expect("start test server");

        Self { server, metrics }
    }
}

pub fn ticker_payload(ticker: &str, bars: &[Bar]) -> Value {
    json!({ "ticker": ticker, "bars": bars })
}
