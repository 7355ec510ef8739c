//! Deterministic price series builders shared by unit and integration tests

#![allow(dead_code)]

use chrono::{DateTime, Duration, TimeZone, Utc};
use stockscan::models::{Bar, PriceContext, PriceSeries, TrendTag};

pub fn day(i: usize) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap() + Duration::days(i as i64)
}

/// Bars whose open is the previous close and whose wicks extend 0.5 past
/// the body.
pub fn bars_from_closes(closes: &[f64], volume: f64) -> Vec<Bar> {
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| {
            let open = if i == 0 { close } else { closes[i - 1] };
            Bar::new(
                day(i),
                open,
                open.max(close) + 0.5,
                open.min(close) - 0.5,
                close,
                volume,
            )
        })
        .collect()
}

/// Like `bars_from_closes`, with a volume per bar.
pub fn bars_with_volumes(closes: &[f64], volumes: &[f64]) -> Vec<Bar> {
    bars_from_closes(closes, 0.0)
        .into_iter()
        .zip(volumes)
        .map(|(bar, &volume)| Bar { volume, ..bar })
        .collect()
}

pub fn series_from_closes(closes: &[f64]) -> PriceSeries {
    PriceSeries::new(bars_from_closes(closes, 1_000.0)).unwrap()
}

pub fn linear_series(n: usize, start: f64, step: f64) -> PriceSeries {
    let closes: Vec<f64> = (0..n).map(|i| start + step * i as f64).collect();
    series_from_closes(&closes)
}

/// Flat OHLC at `price` with constant volume.
pub fn constant_series(n: usize, price: f64) -> PriceSeries {
    let bars = (0..n)
        .map(|i| Bar::new(day(i), price, price, price, price, 1_000.0))
        .collect();
    PriceSeries::new(bars).unwrap()
}

/// Oscillating series with drift; `seed` shifts phase and slope.
pub fn wave_bars(n: usize, seed: f64) -> Vec<Bar> {
    let mut bars = Vec::with_capacity(n);
    let mut prev = 100.0 + 10.0 * seed.sin();
    for i in 0..n {
        let t = i as f64;
        let close = 100.0 + 10.0 * (t * 0.3 + seed).sin() + 0.05 * t * seed;
        let open = prev;
        let high = open.max(close) + 0.5 + 0.1 * (t + seed).cos().abs();
        let low = open.min(close) - 0.5;
        let volume = 1_000.0 + 300.0 * ((t * 0.7 + seed).sin() + 1.0);
        bars.push(Bar::new(day(i), open, high, low, close, volume));
        prev = close;
    }
    bars
}

pub fn wave_series(n: usize, seed: f64) -> PriceSeries {
    PriceSeries::new(wave_bars(n, seed)).unwrap()
}

pub fn price_context(close: f64, previous_close: f64) -> PriceContext {
    PriceContext {
        close,
        previous_close,
        trend: TrendTag::Flat,
        swing_low: close - 5.0,
        swing_high: close + 5.0,
        support: None,
        resistance: None,
        pattern: None,
        window_change: None,
        as_of: day(0),
    }
}
