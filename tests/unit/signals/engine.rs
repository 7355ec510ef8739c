//! Unit tests for the per-ticker signal engine

use stockscan::config::{EngineConfig, IndicatorPeriods, ScanConfig};
use stockscan::indicators::registry::{names, IndicatorCategory};
use stockscan::models::{
    IndicatorReading, IndicatorSnapshot, PriceSeries, ReadingValue, SignalLabel, TradeDirection,
    TradePlan,
};
use stockscan::signals::SignalEngine;
use stockscan::EngineError;

use crate::fixtures::{
    bars_with_volumes, constant_series, linear_series, price_context, wave_series,
};

fn scalar(value: f64) -> IndicatorReading {
    IndicatorReading::available(ReadingValue::Scalar(value))
}

fn engine() -> SignalEngine {
    SignalEngine::new(EngineConfig::default()).unwrap()
}

/// Trend aligned with a trending ADX, RSI leaving oversold and a volume
/// surge on an up bar.
fn strong_buy_snapshot() -> IndicatorSnapshot {
    let mut price = price_context(105.0, 103.0);
    price.swing_low = 100.0;
    IndicatorSnapshot::new(price)
        .with_reading(names::EMA_FAST, scalar(102.0))
        .with_reading(names::EMA_SLOW, scalar(100.0))
        .with_reading(names::ADX, scalar(30.0))
        .with_reading(
            names::RSI,
            scalar(33.0).with_previous(ReadingValue::Scalar(28.0)),
        )
        .with_reading(names::VOLUME_RATIO, scalar(2.0))
        .with_reading(names::ATR, scalar(2.0))
}

#[test]
fn test_aligned_setup_is_strong_buy() {
    let signal = engine()
        .evaluate_snapshot("BBCA", &strong_buy_snapshot())
        .unwrap();

    assert_eq!(signal.composite_score, 15);
    assert_eq!(signal.label, SignalLabel::StrongBuy);
    assert_eq!(signal.category(IndicatorCategory::Trend).unwrap().score, 6);
    assert_eq!(signal.category(IndicatorCategory::Momentum).unwrap().score, 5);
    assert_eq!(signal.category(IndicatorCategory::Volume).unwrap().score, 4);
    assert_eq!(signal.category(IndicatorCategory::Volatility).unwrap().score, 0);

    let levels = signal.plan.levels().unwrap();
    assert_eq!(levels.direction, TradeDirection::Long);
    assert_eq!(levels.entry_price, 105.0);
    assert_eq!(levels.stop_loss_price, 102.0);
    assert_eq!(levels.target_prices, vec![109.5, 112.5]);
    assert_eq!(signal.price, 105.0);
}

/// Steady uptrend into a two-bar pullback that drives a short RSI below 30,
/// then an up bar on roughly twice the average volume.
fn pullback_bounce_series() -> PriceSeries {
    let mut closes: Vec<f64> = (0..240).map(|i| 100.0 + i as f64).collect();
    closes.extend([337.0, 335.0, 336.0]);
    let mut volumes = vec![1_000.0; closes.len()];
    if let Some(last) = volumes.last_mut() {
        *last = 2_200.0;
    }
    PriceSeries::new(bars_with_volumes(&closes, &volumes)).unwrap()
}

#[test]
fn test_pullback_bounce_series_is_strong_buy() {
    let config = EngineConfig {
        indicators: IndicatorPeriods {
            rsi: 3,
            ..IndicatorPeriods::default()
        },
        ..EngineConfig::default()
    };
    let engine = SignalEngine::new(config).unwrap();
    let series = pullback_bounce_series();

    let snapshot = engine.snapshot(&series).unwrap();
    let rsi = snapshot.reading(names::RSI).unwrap();
    let previous_rsi = rsi.previous().and_then(|v| v.scalar()).unwrap();
    assert!(previous_rsi < 30.0, "previous RSI {}", previous_rsi);
    assert!(snapshot.scalar(names::RSI).unwrap() >= 30.0);
    assert!(snapshot.scalar(names::ADX).unwrap() > 25.0);
    assert!(snapshot.scalar(names::VOLUME_RATIO).unwrap() >= 2.0);
    let (fast, slow) = (
        snapshot.scalar(names::EMA_FAST).unwrap(),
        snapshot.scalar(names::EMA_SLOW).unwrap(),
    );
    assert!(336.0 > fast && fast > slow);

    let signal = engine.evaluate("BBRI", &series).unwrap();
    assert_eq!(signal.label, SignalLabel::StrongBuy);
    assert!(signal.composite_score >= 15, "score {}", signal.composite_score);
    assert_eq!(signal.category(IndicatorCategory::Trend).unwrap().score, 6);
    assert!(signal.category(IndicatorCategory::Momentum).unwrap().score >= 5);
    assert_eq!(signal.category(IndicatorCategory::Volume).unwrap().score, 4);
    assert!(signal.category(IndicatorCategory::Volatility).unwrap().score >= 0);

    let volume = signal.category(IndicatorCategory::Volume).unwrap();
    let obv = volume
        .contributions
        .iter()
        .find(|c| c.indicator == names::OBV)
        .expect("OBV contribution");
    assert_eq!(obv.points, 1);
    let momentum = signal.category(IndicatorCategory::Momentum).unwrap();
    assert!(momentum.contributions.iter().all(|c| c.points > 0));

    let levels = signal.plan.levels().unwrap();
    assert_eq!(levels.direction, TradeDirection::Long);
    assert!(levels.stop_loss_price < levels.entry_price);
    assert!(levels.target_prices[0] > levels.entry_price);
}

#[test]
fn test_key_reasons_are_strongest_first() {
    let signal = engine()
        .evaluate_snapshot("BBCA", &strong_buy_snapshot())
        .unwrap();
    let reasons = signal.key_reasons(2);
    assert_eq!(reasons.len(), 2);
    assert_eq!(reasons[0].points, 6);
    assert_eq!(reasons[1].points, 5);
}

#[test]
fn test_directional_label_without_atr_is_degenerate() {
    let mut snapshot = strong_buy_snapshot();
    snapshot.readings.remove(names::ATR);
    assert!(matches!(
        engine().evaluate_snapshot("BBCA", &snapshot),
        Err(EngineError::DegenerateRisk(_))
    ));
}

#[test]
fn test_short_history_is_insufficient() {
    let result = engine().evaluate("TLKM", &linear_series(10, 100.0, 1.0));
    match result {
        Err(EngineError::InsufficientData {
            required, available, ..
        }) => {
            assert_eq!(required, 200);
            assert_eq!(available, 10);
        }
        other => panic!("expected InsufficientData, got {:?}", other),
    }
}

#[test]
fn test_flat_series_holds_or_reports_degenerate_risk() {
    match engine().evaluate("FLAT", &constant_series(250, 100.0)) {
        Ok(signal) => {
            assert_eq!(signal.label, SignalLabel::Hold);
            assert_eq!(signal.plan, TradePlan::NotApplicable);
        }
        Err(e) => assert!(matches!(e, EngineError::DegenerateRisk(_)), "{:?}", e),
    }
}

#[test]
fn test_evaluation_is_deterministic() {
    let engine = engine();
    let series = wave_series(260, 1.3);
    let first = engine.evaluate("ASII", &series).unwrap();
    let second = engine.evaluate("ASII", &series).unwrap();
    assert_eq!(first, second);
    assert!((-20..=20).contains(&first.composite_score));
    assert_eq!(first.category_scores.len(), 4);
}

#[test]
fn test_liquidity_floor_skips_thin_tickers() {
    let config = EngineConfig {
        scan: ScanConfig {
            min_average_volume: Some(1_000_000.0),
            ..ScanConfig::default()
        },
        ..EngineConfig::default()
    };
    let engine = SignalEngine::new(config).unwrap();
    assert!(matches!(
        engine.evaluate("THIN", &wave_series(250, 0.4)),
        Err(EngineError::Illiquid { .. })
    ));
}

#[test]
fn test_invalid_config_is_rejected() {
    let mut config = EngineConfig::default();
    config.plan.reward_multiples.clear();
    assert!(matches!(
        SignalEngine::new(config),
        Err(EngineError::Configuration(_))
    ));
}
