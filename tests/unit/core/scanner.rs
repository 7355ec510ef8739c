//! Unit tests for the scan orchestrator

use std::sync::Arc;

use stockscan::config::EngineConfig;
use stockscan::core::scanner::{ScanRequest, Scanner, TickerInput};
use stockscan::metrics::Metrics;
use stockscan::models::{Bar, SignalLabel, SkipReason};
use stockscan::signals::SignalEngine;

use crate::fixtures::{bars_from_closes, day, linear_series, wave_bars, wave_series};

fn scanner() -> Scanner {
    let engine = Arc::new(SignalEngine::new(EngineConfig::default()).unwrap());
    Scanner::new(engine).unwrap()
}

#[test]
fn test_short_ticker_is_skipped_not_fatal() {
    let requests = vec![
        ScanRequest::new("AAAA", wave_series(250, 0.3)),
        ScanRequest::new("BBBB", wave_series(250, 1.1)),
        ScanRequest::new("SHRT", linear_series(10, 100.0, 1.0)),
        ScanRequest::new("CCCC", wave_series(250, 2.0)),
        ScanRequest::new("DDDD", wave_series(250, 2.7)),
    ];
    let report = scanner().scan(&requests).unwrap();

    assert_eq!(report.signals.len(), 4);
    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.total(), 5);
    assert_eq!(report.skipped[0].ticker, "SHRT");
    assert_eq!(report.skipped[0].reason, SkipReason::InsufficientData);
}

#[test]
fn test_signals_sorted_by_absolute_score() {
    let requests: Vec<ScanRequest> = (0..8)
        .map(|i| ScanRequest::new(format!("T{}", i), wave_series(240, 0.4 * i as f64 + 0.1)))
        .collect();
    let report = scanner().scan(&requests).unwrap();
    assert_eq!(report.signals.len(), 8);
    for pair in report.signals.windows(2) {
        assert!(pair[0].composite_score.abs() >= pair[1].composite_score.abs());
    }
}

#[test]
fn test_ties_keep_input_order() {
    let series = wave_series(250, 0.9);
    let tickers = ["ZZZZ", "AAAA", "MMMM", "BBBB"];
    let requests: Vec<ScanRequest> = tickers
        .iter()
        .map(|t| ScanRequest::new(*t, series.clone()))
        .collect();
    let report = scanner().scan(&requests).unwrap();
    let order: Vec<&str> = report.signals.iter().map(|s| s.ticker.as_str()).collect();
    assert_eq!(order, tickers.to_vec());
}

#[test]
fn test_scan_is_deterministic() {
    let requests: Vec<ScanRequest> = (0..6)
        .map(|i| ScanRequest::new(format!("T{}", i), wave_series(230, 0.5 * i as f64)))
        .collect();
    let scanner = scanner();
    assert_eq!(scanner.scan(&requests).unwrap(), scanner.scan(&requests).unwrap());
}

#[test]
fn test_empty_scan() {
    let report = scanner().scan(&[]).unwrap();
    assert!(report.signals.is_empty());
    assert!(report.skipped.is_empty());
}

#[test]
fn test_malformed_bars_become_skips() {
    let mut bars = bars_from_closes(&[10.0, 11.0, 12.0], 1_000.0);
    bars.swap(0, 1);
    let request = ScanRequest::from_bars("BAD", bars);
    assert!(matches!(
        request.input,
        TickerInput::Unavailable {
            reason: SkipReason::MalformedSeries,
            ..
        }
    ));

    let nan = vec![Bar::new(day(0), 1.0, f64::NAN, 1.0, 1.0, 1.0)];
    let requests = vec![
        request,
        ScanRequest::from_bars("NAN", nan),
        ScanRequest::unavailable("GONE", "no data"),
        ScanRequest::from_bars("GOOD", wave_bars(250, 1.7)),
    ];
    let report = scanner().scan(&requests).unwrap();
    assert_eq!(report.signals.len(), 1);
    let reasons: Vec<SkipReason> = report.skipped.iter().map(|s| s.reason).collect();
    assert_eq!(
        reasons,
        vec![
            SkipReason::MalformedSeries,
            SkipReason::MalformedSeries,
            SkipReason::DataUnavailable
        ]
    );
}

#[test]
fn test_scan_records_metrics() {
    let metrics = Arc::new(Metrics::new().unwrap());
    let scanner = scanner().with_metrics(metrics.clone());
    let requests = vec![
        ScanRequest::new("GOOD", wave_series(250, 0.2)),
        ScanRequest::new("SHRT", linear_series(5, 100.0, 1.0)),
    ];
    scanner.scan(&requests).unwrap();

    assert_eq!(metrics.scans_total.get(), 1);
    assert_eq!(metrics.tickers_scored_total.get(), 1);
    let exported = metrics.export().unwrap();
    assert!(exported.contains("insufficient_data"));
}

#[test]
fn test_single_worker_gives_same_ranking() {
    let mut config = EngineConfig::default();
    config.scan.workers = 1;
    let single = Scanner::new(Arc::new(SignalEngine::new(config).unwrap())).unwrap();
    let requests: Vec<ScanRequest> = (0..5)
        .map(|i| ScanRequest::new(format!("T{}", i), wave_series(220, 0.6 * i as f64 + 0.2)))
        .collect();
    let parallel = scanner().scan(&requests).unwrap();
    let serial = single.scan(&requests).unwrap();
    assert_eq!(parallel, serial);
    assert!(parallel
        .signals
        .iter()
        .all(|s| s.label != SignalLabel::Hold || s.plan.levels().is_none()));
}
