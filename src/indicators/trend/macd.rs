//! MACD (Moving Average Convergence Divergence) indicator
//!
//! MACD = EMA(fast) - EMA(slow)
//! Signal = EMA(signal) of MACD
//! Histogram = MACD - Signal

use crate::common::math::{self, Series};
use crate::error::Result;
use crate::indicators::ensure_history;
use crate::indicators::registry::{Indicator, IndicatorCategory};
use crate::models::{IndicatorOutput, MacdSeries, PriceSeries};

pub fn calculate_macd(
    series: &PriceSeries,
    fast_period: usize,
    slow_period: usize,
    signal_period: usize,
) -> Result<MacdSeries> {
    ensure_history(
        format!("MACD({},{},{})", fast_period, slow_period, signal_period),
        series.len(),
        slow_period + signal_period - 1,
    )?;

    let closes = series.closes();
    let fast = math::ema_series(&closes, fast_period);
    let slow = math::ema_series(&closes, slow_period);

    let macd: Series = fast
        .iter()
        .zip(slow.iter())
        .map(|(f, s)| Some((*f)? - (*s)?))
        .collect();
    let signal = math::over_defined(&macd, |v| math::ema_series(v, signal_period));
    let histogram = macd
        .iter()
        .zip(signal.iter())
        .map(|(m, s)| Some((*m)? - (*s)?))
        .collect();

    Ok(MacdSeries {
        macd,
        signal,
        histogram,
    })
}

pub struct Macd {
    name: String,
    fast: usize,
    slow: usize,
    signal: usize,
}

impl Macd {
    pub fn new(name: &str, fast: usize, slow: usize, signal: usize) -> Self {
        Self {
            name: name.to_string(),
            fast,
            slow,
            signal,
        }
    }
}

impl Indicator for Macd {
    fn name(&self) -> &str {
        &self.name
    }

    fn category(&self) -> IndicatorCategory {
        IndicatorCategory::Trend
    }

    fn lookback(&self) -> usize {
        self.slow + self.signal - 1
    }

    fn compute(&self, series: &PriceSeries) -> Result<IndicatorOutput> {
        calculate_macd(series, self.fast, self.slow, self.signal).map(IndicatorOutput::Macd)
    }
}
