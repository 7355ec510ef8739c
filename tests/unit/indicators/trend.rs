//! Unit tests for trend indicators

use stockscan::indicators::trend::{
    calculate_adx, calculate_ema, calculate_macd, calculate_sma, calculate_supertrend,
};
use stockscan::EngineError;

use crate::fixtures::{linear_series, series_from_closes};

#[test]
fn test_ema_insufficient_data() {
    let series = linear_series(10, 100.0, 1.0);
    match calculate_ema(&series, 20) {
        Err(EngineError::InsufficientData {
            required, available, ..
        }) => {
            assert_eq!(required, 20);
            assert_eq!(available, 10);
        }
        other => panic!("expected InsufficientData, got {:?}", other),
    }
}

#[test]
fn test_ema_is_aligned_and_seeded_from_sma() {
    let series = series_from_closes(&[2.0, 4.0, 6.0, 8.0]);
    let ema = calculate_ema(&series, 3).unwrap();
    assert_eq!(ema.len(), 4);
    assert_eq!(ema[0], None);
    assert_eq!(ema[1], None);
    assert!((ema[2].unwrap() - 4.0).abs() < 1e-12);
    // k = 0.5: 8 * 0.5 + 4 * 0.5
    assert!((ema[3].unwrap() - 6.0).abs() < 1e-12);
}

#[test]
fn test_sma_window() {
    let series = series_from_closes(&[1.0, 2.0, 3.0, 4.0, 5.0]);
    let sma = calculate_sma(&series, 3).unwrap();
    assert_eq!(sma, vec![None, None, Some(2.0), Some(3.0), Some(4.0)]);
}

#[test]
fn test_macd_positive_in_uptrend() {
    let series = linear_series(60, 100.0, 1.0);
    let macd = calculate_macd(&series, 12, 26, 9).unwrap();
    assert_eq!(macd.macd.len(), 60);
    // first MACD value on bar slow - 1, first signal value signal - 1 bars later
    assert!(macd.macd[24].is_none());
    assert!(macd.macd[25].is_some());
    assert!(macd.signal[32].is_none());
    assert!(macd.signal[33].is_some());
    assert!(macd.macd[59].unwrap() > 0.0);
}

#[test]
fn test_macd_requires_slow_plus_signal_history() {
    let series = linear_series(33, 100.0, 1.0);
    assert!(matches!(
        calculate_macd(&series, 12, 26, 9),
        Err(EngineError::InsufficientData { required: 34, .. })
    ));
}

#[test]
fn test_adx_first_value_after_two_periods() {
    let series = linear_series(28, 100.0, 1.0);
    let adx = calculate_adx(&series, 14).unwrap();
    assert!(adx[26].is_none());
    let last = adx[27].unwrap();
    // only upward directional movement
    assert!(last > 50.0, "ADX {} should read a strong trend", last);
    assert!(last <= 100.0);
}

#[test]
fn test_adx_insufficient_data() {
    let series = linear_series(27, 100.0, 1.0);
    assert!(calculate_adx(&series, 14).is_err());
}

#[test]
fn test_supertrend_tracks_direction() {
    let up = calculate_supertrend(&linear_series(40, 100.0, 1.0), 10, 3.0).unwrap();
    assert_eq!(up.direction[39], Some(1.0));
    assert!(up.value[39].unwrap() < 139.0);

    let down = calculate_supertrend(&linear_series(40, 200.0, -1.0), 10, 3.0).unwrap();
    assert_eq!(down.direction[39], Some(-1.0));
    assert!(down.value[39].unwrap() > 161.0);
}
