//! Support and resistance levels detection

use crate::models::PriceSeries;

/// Lowest low of the last `lookback` bars (current bar included).
pub fn swing_low(series: &PriceSeries, lookback: usize) -> Option<f64> {
    recent(series, lookback).map(|bars| bars.iter().map(|b| b.low).fold(f64::INFINITY, f64::min))
}

/// Highest high of the last `lookback` bars (current bar included).
pub fn swing_high(series: &PriceSeries, lookback: usize) -> Option<f64> {
    recent(series, lookback)
        .map(|bars| bars.iter().map(|b| b.high).fold(f64::NEG_INFINITY, f64::max))
}

fn recent(series: &PriceSeries, lookback: usize) -> Option<&[crate::models::Bar]> {
    let bars = series.bars();
    if bars.is_empty() || lookback == 0 {
        return None;
    }
    Some(&bars[bars.len().saturating_sub(lookback)..])
}

/// Support and resistance from the lower third of recent lows and the upper
/// third of recent highs. Support is only reported below the current close
/// and resistance only above it.
pub fn calculate_support_resistance(series: &PriceSeries, lookback: usize) -> (Option<f64>, Option<f64>) {
    let Some(bars) = recent(series, lookback) else {
        return (None, None);
    };
    let close = bars[bars.len() - 1].close;

    let mut lows: Vec<f64> = bars.iter().map(|b| b.low).collect();
    let mut highs: Vec<f64> = bars.iter().map(|b| b.high).collect();
    lows.sort_by(|a, b| a.total_cmp(b));
    highs.sort_by(|a, b| b.total_cmp(a));

    let support = lows.get(lows.len() / 3).copied().filter(|s| *s < close);
    let resistance = highs.get(highs.len() / 3).copied().filter(|r| *r > close);
    (support, resistance)
}

/// Distance from `price` to `level`, in percent of price.
pub fn distance_pct(price: f64, level: f64) -> f64 {
    if price == 0.0 {
        return 0.0;
    }
    ((level - price) / price).abs() * 100.0
}
