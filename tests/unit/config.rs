//! Unit tests for configuration loading and validation

use std::io::Write;

use stockscan::config::{EngineConfig, VwapAnchor, RULES_VERSION};
use stockscan::EngineError;

fn is_configuration_error<T>(result: Result<T, EngineError>) -> bool {
    matches!(result, Err(EngineError::Configuration(_)))
}

#[test]
fn test_defaults_are_valid() {
    let config = EngineConfig::default();
    config.validate().unwrap();
    assert_eq!(config.scoring.version, RULES_VERSION);
    assert_eq!(config.scoring.caps.composite, 20);
    assert_eq!(config.plan.reward_multiples, vec![1.5, 2.5]);
    assert_eq!(config.indicators.vwap_anchor, VwapAnchor::Session);
}

#[test]
fn test_partial_json_keeps_other_defaults() {
    let config = EngineConfig::from_json_str(
        r#"{"scan": {"workers": 2}, "indicators": {"vwap_anchor": "series"}}"#,
    )
    .unwrap();
    assert_eq!(config.scan.workers, 2);
    assert_eq!(config.scan.min_history, 200);
    assert_eq!(config.indicators.vwap_anchor, VwapAnchor::Series);
    assert_eq!(config.indicators.rsi, 14);
}

#[test]
fn test_unknown_keys_are_rejected() {
    assert!(is_configuration_error(EngineConfig::from_json_str(
        r#"{"scan": {"wokers": 2}}"#
    )));
    assert!(is_configuration_error(EngineConfig::from_json_str("not json")));
}

#[test]
fn test_period_errors() {
    let mut config = EngineConfig::default();
    config.indicators.rsi = 0;
    assert!(is_configuration_error(config.validate()));

    let mut config = EngineConfig::default();
    config.indicators.ema_fast = 50;
    assert!(is_configuration_error(config.validate()));

    let mut config = EngineConfig::default();
    config.indicators.bollinger_std_dev = -1.0;
    assert!(is_configuration_error(config.validate()));
}

#[test]
fn test_label_boundaries_must_be_ordered() {
    let mut config = EngineConfig::default();
    config.scoring.labels.buy = 16;
    assert!(is_configuration_error(config.validate()));

    let mut config = EngineConfig::default();
    config.scoring.labels.strong_sell = -25;
    assert!(is_configuration_error(config.validate()));
}

#[test]
fn test_obv_window_needs_two_bars() {
    let mut config = EngineConfig::default();
    config.scoring.volume.obv_window = 1;
    assert!(is_configuration_error(config.validate()));
    config.scoring.volume.obv_window = 2;
    assert!(config.validate().is_ok());
}

#[test]
fn test_caps_must_not_be_negative() {
    let mut config = EngineConfig::default();
    config.scoring.caps.momentum = -1;
    assert!(is_configuration_error(config.validate()));
}

#[test]
fn test_plan_multiples_must_increase() {
    let mut config = EngineConfig::default();
    config.plan.reward_multiples = vec![2.0, 1.5];
    assert!(is_configuration_error(config.validate()));

    config.plan.reward_multiples = vec![1.0, 2.0, 3.0, 4.0];
    assert!(is_configuration_error(config.validate()));

    config.plan.reward_multiples = vec![1.0, 2.0, 3.0];
    config.validate().unwrap();
}

#[test]
fn test_scan_needs_workers() {
    let mut config = EngineConfig::default();
    config.scan.workers = 0;
    assert!(is_configuration_error(config.validate()));
}

#[test]
fn test_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, r#"{{"plan": {{"atr_multiplier": 2.0}}}}"#).unwrap();
    let config = EngineConfig::from_file(file.path()).unwrap();
    assert_eq!(config.plan.atr_multiplier, 2.0);

    assert!(is_configuration_error(EngineConfig::from_file(
        "/nonexistent/engine.json"
    )));
}
