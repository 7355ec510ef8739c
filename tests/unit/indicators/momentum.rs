//! Unit tests for momentum indicators

use stockscan::indicators::momentum::{
    calculate_cci, calculate_roc, calculate_rsi, calculate_stochastic, calculate_williams_r,
};
use stockscan::EngineError;

use crate::fixtures::{constant_series, linear_series, series_from_closes};

#[test]
fn test_rsi_needs_period_plus_one_bars() {
    let series = linear_series(14, 100.0, 1.0);
    assert!(matches!(
        calculate_rsi(&series, 14),
        Err(EngineError::InsufficientData { required: 15, .. })
    ));

    let series = linear_series(15, 100.0, 1.0);
    let rsi = calculate_rsi(&series, 14).unwrap();
    assert!(rsi[13].is_none());
    assert!(rsi[14].is_some());
}

#[test]
fn test_rsi_saturates_without_losses() {
    let rsi = calculate_rsi(&linear_series(30, 100.0, 1.0), 14).unwrap();
    assert_eq!(rsi[29], Some(100.0));
}

#[test]
fn test_rsi_zero_without_gains() {
    let rsi = calculate_rsi(&linear_series(30, 200.0, -1.0), 14).unwrap();
    assert_eq!(rsi[29], Some(0.0));
}

#[test]
fn test_rsi_flat_series_reads_neutral() {
    let rsi = calculate_rsi(&constant_series(30, 100.0), 14).unwrap();
    assert_eq!(rsi[29], Some(50.0));
}

#[test]
fn test_rsi_stays_in_range() {
    let closes = [
        44.34, 44.09, 44.15, 43.61, 44.33, 44.83, 45.10, 45.42, 45.84, 46.08, 45.89, 46.03,
        45.61, 46.28, 46.28, 46.00, 46.03, 46.41, 46.22, 45.64,
    ];
    let rsi = calculate_rsi(&series_from_closes(&closes), 14).unwrap();
    for value in rsi.into_iter().flatten() {
        assert!((0.0..=100.0).contains(&value));
    }
}

#[test]
fn test_stochastic_lookback_and_flat_range() {
    let series = constant_series(20, 50.0);
    let stoch = calculate_stochastic(&series, 14, 3).unwrap();
    assert!(stoch.k[12].is_none());
    assert_eq!(stoch.k[13], Some(50.0));
    assert!(stoch.d[14].is_none());
    assert_eq!(stoch.d[15], Some(50.0));

    assert!(calculate_stochastic(&constant_series(15, 50.0), 14, 3).is_err());
}

#[test]
fn test_stochastic_near_top_in_uptrend() {
    let stoch = calculate_stochastic(&linear_series(30, 100.0, 1.0), 14, 3).unwrap();
    let k = stoch.k[29].unwrap();
    assert!(k > 80.0 && k <= 100.0, "%K {}", k);
}

#[test]
fn test_williams_r_flat_and_trending() {
    let flat = calculate_williams_r(&constant_series(20, 10.0), 14).unwrap();
    assert_eq!(flat[19], Some(-50.0));

    let up = calculate_williams_r(&linear_series(20, 100.0, 1.0), 14).unwrap();
    let value = up[19].unwrap();
    assert!(value > -20.0 && value <= 0.0);
}

#[test]
fn test_cci_flat_series_is_zero() {
    let cci = calculate_cci(&constant_series(25, 10.0), 20).unwrap();
    assert!(cci[18].is_none());
    assert_eq!(cci[24], Some(0.0));
}

#[test]
fn test_cci_positive_above_mean() {
    let cci = calculate_cci(&linear_series(25, 100.0, 1.0), 20).unwrap();
    assert!(cci[24].unwrap() > 0.0);
}

#[test]
fn test_roc_percent_change() {
    let series = series_from_closes(&[100.0, 105.0, 110.0]);
    let roc = calculate_roc(&series, 2).unwrap();
    assert_eq!(roc[1], None);
    assert!((roc[2].unwrap() - 10.0).abs() < 1e-12);
}

#[test]
fn test_roc_zero_base_reads_zero() {
    let series = series_from_closes(&[0.0, 1.0, 2.0]);
    let roc = calculate_roc(&series, 1).unwrap();
    assert_eq!(roc[1], Some(0.0));
    assert!((roc[2].unwrap() - 100.0).abs() < 1e-12);
}
