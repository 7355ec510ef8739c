//! Unit tests for the indicator registry

use stockscan::config::IndicatorPeriods;
use stockscan::indicators::registry::{names, Indicator, IndicatorCategory, IndicatorRegistry};
use stockscan::indicators::trend::Ema;
use stockscan::EngineError;

#[test]
fn test_standard_registry_covers_every_category() {
    let registry = IndicatorRegistry::standard(&IndicatorPeriods::default());
    assert_eq!(registry.len(), 18);
    for category in IndicatorCategory::all() {
        assert!(!registry.by_category(category).is_empty());
    }
    assert_eq!(
        registry.by_category(IndicatorCategory::Volume),
        vec![names::OBV, names::VWAP, names::MFI, names::VOLUME_RATIO]
    );
}

#[test]
fn test_standard_registry_lookback_is_long_sma() {
    let registry = IndicatorRegistry::standard(&IndicatorPeriods::default());
    assert_eq!(registry.longest_lookback(), 200);
    assert_eq!(registry.get(names::ADX).unwrap().lookback(), 28);
    assert_eq!(registry.get(names::RSI).unwrap().lookback(), 15);
}

#[test]
fn test_standard_registry_reports_ema_pair() {
    let registry = IndicatorRegistry::standard(&IndicatorPeriods::default());
    let pairs = registry.pairs();
    assert_eq!(pairs.len(), 1);
    assert_eq!(pairs[0].fast, names::EMA_FAST);
    assert_eq!(pairs[0].slow, names::EMA_SLOW);
}

#[test]
fn test_register_rejects_duplicate_names() {
    let mut registry = IndicatorRegistry::new();
    registry.register(Box::new(Ema::new("ema_9", 9))).unwrap();
    let err = registry.register(Box::new(Ema::new("ema_9", 12))).unwrap_err();
    assert!(matches!(err, EngineError::Configuration(_)));
    assert_eq!(registry.names(), vec!["ema_9"]);
}

#[test]
fn test_register_pair_requires_known_indicators() {
    let mut registry = IndicatorRegistry::new();
    registry.register(Box::new(Ema::new("ema_9", 9))).unwrap();
    assert!(matches!(
        registry.register_pair("ema_9", "ema_21"),
        Err(EngineError::Configuration(_))
    ));

    registry.register(Box::new(Ema::new("ema_21", 21))).unwrap();
    registry.register_pair("ema_9", "ema_21").unwrap();
    assert_eq!(registry.pairs().len(), 1);
}
