//! ATR (Average True Range) indicator

use crate::common::math::{self, Series};
use crate::error::Result;
use crate::indicators::ensure_history;
use crate::indicators::registry::{Indicator, IndicatorCategory};
use crate::models::{IndicatorOutput, PriceSeries};

/// True range per bar. The first bar has no previous close, so it uses
/// high - low.
pub fn true_ranges(series: &PriceSeries) -> Vec<f64> {
    let bars = series.bars();
    bars.iter()
        .enumerate()
        .map(|(i, bar)| {
            if i == 0 {
                bar.high - bar.low
            } else {
                math::true_range(bar.high, bar.low, bars[i - 1].close)
            }
        })
        .collect()
}

/// Calculate ATR with Wilder's smoothing. First value lands on bar
/// `period - 1`.
pub fn calculate_atr(series: &PriceSeries, period: usize) -> Result<Series> {
    ensure_history(format!("ATR({})", period), series.len(), period)?;
    Ok(math::wilder_series(&true_ranges(series), period))
}

pub struct Atr {
    name: String,
    period: usize,
}

impl Atr {
    pub fn new(name: &str, period: usize) -> Self {
        Self {
            name: name.to_string(),
            period,
        }
    }
}

impl Indicator for Atr {
    fn name(&self) -> &str {
        &self.name
    }

    fn category(&self) -> IndicatorCategory {
        IndicatorCategory::Volatility
    }

    fn lookback(&self) -> usize {
        self.period
    }

    fn compute(&self, series: &PriceSeries) -> Result<IndicatorOutput> {
        calculate_atr(series, self.period).map(|values| IndicatorOutput::Line { values })
    }
}
