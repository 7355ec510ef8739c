//! Unit tests for volatility indicators

use stockscan::indicators::volatility::{
    calculate_atr, calculate_bollinger_bands, calculate_keltner, true_ranges,
};

use crate::fixtures::{constant_series, linear_series, series_from_closes};

#[test]
fn test_true_range_first_bar_is_high_minus_low() {
    let series = series_from_closes(&[10.0, 12.0]);
    let tr = true_ranges(&series);
    assert_eq!(tr[0], 1.0);
    // high 12.5, low 9.5
    assert_eq!(tr[1], 3.0);
}

#[test]
fn test_atr_wilder_seed() {
    let atr = calculate_atr(&linear_series(20, 100.0, 1.0), 14).unwrap();
    assert!(atr[12].is_none());
    // TR is 1 on the first bar and 2 afterwards
    assert!((atr[13].unwrap() - 27.0 / 14.0).abs() < 1e-12);
    assert!(atr[19].unwrap() > atr[13].unwrap());
    assert!(atr[19].unwrap() < 2.0);
}

#[test]
fn test_atr_zero_on_flat_series() {
    let atr = calculate_atr(&constant_series(20, 100.0), 14).unwrap();
    assert_eq!(atr[19], Some(0.0));
}

#[test]
fn test_bollinger_bands_order_and_width() {
    let bands = calculate_bollinger_bands(&linear_series(30, 100.0, 1.0), 20, 2.0).unwrap();
    let (upper, middle, lower) = (
        bands.upper[29].unwrap(),
        bands.middle[29].unwrap(),
        bands.lower[29].unwrap(),
    );
    assert!(upper > middle && middle > lower);
    assert!((middle - 119.5).abs() < 1e-9);
    assert!(((upper - middle) - (middle - lower)).abs() < 1e-9);
}

#[test]
fn test_bollinger_zero_width_on_flat_series() {
    let bands = calculate_bollinger_bands(&constant_series(25, 100.0), 20, 2.0).unwrap();
    assert_eq!(bands.upper[24], bands.lower[24]);
    assert_eq!(bands.middle[24], Some(100.0));
    assert!(bands.middle[18].is_none());
}

#[test]
fn test_keltner_wraps_ema_with_atr() {
    let bands = calculate_keltner(&linear_series(30, 100.0, 1.0), 20, 2.0).unwrap();
    let (upper, middle, lower) = (
        bands.upper[29].unwrap(),
        bands.middle[29].unwrap(),
        bands.lower[29].unwrap(),
    );
    assert!(upper > middle && middle > lower);

    let flat = calculate_keltner(&constant_series(25, 100.0), 20, 2.0).unwrap();
    assert!((flat.upper[24].unwrap() - 100.0).abs() < 1e-9);
    assert!((flat.lower[24].unwrap() - 100.0).abs() < 1e-9);
}
