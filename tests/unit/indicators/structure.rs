//! Unit tests for swing levels, support/resistance and candle patterns

use stockscan::indicators::structure::{
    calculate_support_resistance, detect_pattern, distance_pct, swing_high, swing_low,
};
use stockscan::models::{Bar, CandlePattern, PriceSeries};

use crate::fixtures::{day, linear_series, series_from_closes};

fn series_of(bars: &[(f64, f64, f64, f64)]) -> PriceSeries {
    let bars = bars
        .iter()
        .enumerate()
        .map(|(i, &(o, h, l, c))| Bar::new(day(i), o, h, l, c, 1_000.0))
        .collect();
    PriceSeries::new(bars).unwrap()
}

#[test]
fn test_swing_levels_include_current_bar() {
    let series = series_from_closes(&[10.0, 8.0, 12.0, 11.0]);
    // lows: 9.5, 7.5, 7.5, 10.5 ; highs: 10.5, 10.5, 12.5, 12.5
    assert_eq!(swing_low(&series, 2), Some(7.5));
    assert_eq!(swing_low(&series, 1), Some(10.5));
    assert_eq!(swing_high(&series, 2), Some(12.5));
    assert_eq!(swing_high(&series, 100), Some(12.5));
    assert_eq!(swing_low(&series, 0), None);
}

#[test]
fn test_support_below_close_in_uptrend() {
    let series = linear_series(20, 100.0, 1.0);
    let (support, resistance) = calculate_support_resistance(&series, 20);
    let close = series.last().unwrap().close;
    assert!(support.unwrap() < close);
    // every high in the upper third sits below the latest close
    assert_eq!(resistance, None);
}

#[test]
fn test_resistance_above_close_in_downtrend() {
    let series = linear_series(20, 200.0, -1.0);
    let (support, resistance) = calculate_support_resistance(&series, 20);
    let close = series.last().unwrap().close;
    assert!(resistance.unwrap() > close);
    assert_eq!(support, None);
}

#[test]
fn test_distance_pct() {
    assert!((distance_pct(100.0, 95.0) - 5.0).abs() < 1e-12);
    assert!((distance_pct(100.0, 110.0) - 10.0).abs() < 1e-12);
    assert_eq!(distance_pct(0.0, 10.0), 0.0);
}

#[test]
fn test_detects_hammer_on_latest_bar() {
    let series = series_of(&[(11.0, 11.2, 10.4, 10.5), (10.0, 10.25, 9.0, 10.2)]);
    assert_eq!(detect_pattern(&series), Some(CandlePattern::Hammer));
}

#[test]
fn test_detects_bearish_engulfing() {
    let series = series_of(&[(10.0, 11.1, 9.9, 11.0), (11.2, 11.3, 9.7, 9.8)]);
    assert_eq!(detect_pattern(&series), Some(CandlePattern::BearishEngulfing));
}

#[test]
fn test_flat_bar_has_no_pattern() {
    let series = series_of(&[(10.0, 10.0, 10.0, 10.0), (10.0, 10.0, 10.0, 10.0)]);
    assert_eq!(detect_pattern(&series), None);
}
