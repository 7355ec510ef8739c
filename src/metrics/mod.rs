//! Prometheus metrics for the HTTP surface and the scan orchestrator

use std::time::Duration;

use prometheus::{
    Encoder, Histogram, HistogramOpts, IntCounter, IntCounterVec, IntGauge, Opts, Registry,
    TextEncoder,
};

use crate::models::ScanReport;

pub struct Metrics {
    registry: Registry,
    pub http_requests_total: IntCounter,
    pub http_request_duration_seconds: Histogram,
    pub http_requests_in_flight: IntGauge,
    pub scans_total: IntCounter,
    pub tickers_scored_total: IntCounter,
    /// Labelled by skip reason.
    pub tickers_skipped_total: IntCounterVec,
    pub scan_duration_seconds: Histogram,
}

impl Metrics {
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new_custom(Some("stockscan".to_string()), None)?;

        let http_requests_total =
            IntCounter::new("http_requests_total", "Total HTTP requests served")?;
        let http_request_duration_seconds = Histogram::with_opts(HistogramOpts::new(
            "http_request_duration_seconds",
            "HTTP request latency",
        ))?;
        let http_requests_in_flight =
            IntGauge::new("http_requests_in_flight", "HTTP requests currently in flight")?;
        let scans_total = IntCounter::new("scans_total", "Completed scans")?;
        let tickers_scored_total =
            IntCounter::new("tickers_scored_total", "Tickers that produced a signal")?;
        let tickers_skipped_total = IntCounterVec::new(
            Opts::new("tickers_skipped_total", "Tickers skipped during a scan"),
            &["reason"],
        )?;
        let scan_duration_seconds = Histogram::with_opts(
            HistogramOpts::new("scan_duration_seconds", "Wall time of one scan")
                .buckets(vec![0.01, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0]),
        )?;

        registry.register(Box::new(http_requests_total.clone()))?;
        registry.register(Box::new(http_request_duration_seconds.clone()))?;
        registry.register(Box::new(http_requests_in_flight.clone()))?;
        registry.register(Box::new(scans_total.clone()))?;
        registry.register(Box::new(tickers_scored_total.clone()))?;
        registry.register(Box::new(tickers_skipped_total.clone()))?;
        registry.register(Box::new(scan_duration_seconds.clone()))?;

        Ok(Self {
            registry,
            http_requests_total,
            http_request_duration_seconds,
            http_requests_in_flight,
            scans_total,
            tickers_scored_total,
            tickers_skipped_total,
            scan_duration_seconds,
        })
    }

    pub fn record_scan(&self, report: &ScanReport, elapsed: Duration) {
        self.scans_total.inc();
        self.tickers_scored_total.inc_by(report.signals.len() as u64);
        for skipped in &report.skipped {
            self.tickers_skipped_total
                .with_label_values(&[skipped.reason.as_str()])
                .inc();
        }
        self.scan_duration_seconds.observe(elapsed.as_secs_f64());
    }

    /// Text exposition format
    pub fn export(&self) -> Result<String, prometheus::Error> {
        let mut buffer = Vec::new();
        TextEncoder::new().encode(&self.registry.gather(), &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
    }
}
