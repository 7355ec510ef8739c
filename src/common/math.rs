//! Numeric building blocks shared by the indicator library.
//!
//! Every `*_series` helper returns a vector aligned with its input: one entry
//! per input value, `None` while the lookback window is still incomplete.

/// Aligned indicator output: one slot per bar, `None` = undefined.
pub type Series = Vec<Option<f64>>;

/// Simple average of the last `period` values.
pub fn sma(values: &[f64], period: usize) -> Option<f64> {
    if period == 0 || values.len() < period {
        return None;
    }
    let window = &values[values.len() - period..];
    Some(window.iter().sum::<f64>() / period as f64)
}

/// Next EMA value given the previous one.
pub fn ema_from_previous(value: f64, previous: f64, period: usize) -> f64 {
    let k = 2.0 / (period as f64 + 1.0);
    value * k + previous * (1.0 - k)
}

/// Population standard deviation of the last `period` values.
pub fn standard_deviation(values: &[f64], period: usize) -> Option<f64> {
    let mean = sma(values, period)?;
    let window = &values[values.len() - period..];
    let variance = window.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / period as f64;
    Some(variance.sqrt())
}

pub fn true_range(high: f64, low: f64, prev_close: f64) -> f64 {
    (high - low)
        .max((high - prev_close).abs())
        .max((low - prev_close).abs())
}

/// Windowed simple moving average.
pub fn sma_series(values: &[f64], period: usize) -> Series {
    let mut out = vec![None; values.len()];
    if period == 0 || values.len() < period {
        return out;
    }
    let mut sum: f64 = values[..period].iter().sum();
    out[period - 1] = Some(sum / period as f64);
    for i in period..values.len() {
        sum += values[i] - values[i - period];
        out[i] = Some(sum / period as f64);
    }
    out
}

/// EMA seeded from the SMA of its first window.
pub fn ema_series(values: &[f64], period: usize) -> Series {
    let mut out = vec![None; values.len()];
    if period == 0 || values.len() < period {
        return out;
    }
    let mut prev = values[..period].iter().sum::<f64>() / period as f64;
    out[period - 1] = Some(prev);
    for i in period..values.len() {
        prev = ema_from_previous(values[i], prev, period);
        out[i] = Some(prev);
    }
    out
}

/// Wilder's smoothing (RMA), seeded from the SMA of the first window.
pub fn wilder_series(values: &[f64], period: usize) -> Series {
    let mut out = vec![None; values.len()];
    if period == 0 || values.len() < period {
        return out;
    }
    let p = period as f64;
    let mut prev = values[..period].iter().sum::<f64>() / p;
    out[period - 1] = Some(prev);
    for i in period..values.len() {
        prev = (prev * (p - 1.0) + values[i]) / p;
        out[i] = Some(prev);
    }
    out
}

/// Rolling population standard deviation.
pub fn std_dev_series(values: &[f64], period: usize) -> Series {
    let mut out = vec![None; values.len()];
    if period == 0 || values.len() < period {
        return out;
    }
    for i in period - 1..values.len() {
        out[i] = standard_deviation(&values[..=i], period);
    }
    out
}

pub fn rolling_max(values: &[f64], period: usize) -> Series {
    rolling(values, period, |w| w.iter().copied().fold(f64::MIN, f64::max))
}

pub fn rolling_min(values: &[f64], period: usize) -> Series {
    rolling(values, period, |w| w.iter().copied().fold(f64::MAX, f64::min))
}

fn rolling(values: &[f64], period: usize, f: impl Fn(&[f64]) -> f64) -> Series {
    let mut out = vec![None; values.len()];
    if period == 0 || values.len() < period {
        return out;
    }
    for i in period - 1..values.len() {
        out[i] = Some(f(&values[i + 1 - period..=i]));
    }
    out
}

/// Applies a `*_series` helper to a series that carries a leading undefined
/// prefix (e.g. MACD line before the slow EMA is seeded). The output keeps
/// the same alignment as `values`.
pub fn over_defined(values: &[Option<f64>], f: impl Fn(&[f64]) -> Series) -> Series {
    let start = match values.iter().position(Option::is_some) {
        Some(i) => i,
        None => return vec![None; values.len()],
    };
    let defined: Vec<f64> = values[start..].iter().map(|v| v.unwrap_or(0.0)).collect();
    let mut out = vec![None; start];
    out.extend(f(&defined));
    out
}

/// Index of the first defined value.
pub fn first_defined(series: &[Option<f64>]) -> Option<usize> {
    series.iter().position(Option::is_some)
}
