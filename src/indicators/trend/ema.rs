//! EMA (Exponential Moving Average) indicator

use crate::common::math::{self, Series};
use crate::error::Result;
use crate::indicators::ensure_history;
use crate::indicators::registry::{Indicator, IndicatorCategory};
use crate::models::{IndicatorOutput, PriceSeries};

/// Calculate EMA of closes, seeded from the SMA of the first `period` bars
pub fn calculate_ema(series: &PriceSeries, period: usize) -> Result<Series> {
    ensure_history(format!("EMA({})", period), series.len(), period)?;
    Ok(math::ema_series(&series.closes(), period))
}

pub struct Ema {
    name: String,
    period: usize,
}

impl Ema {
    pub fn new(name: &str, period: usize) -> Self {
        Self {
            name: name.to_string(),
            period,
        }
    }
}

impl Indicator for Ema {
    fn name(&self) -> &str {
        &self.name
    }

    fn category(&self) -> IndicatorCategory {
        IndicatorCategory::Trend
    }

    fn lookback(&self) -> usize {
        self.period
    }

    fn compute(&self, series: &PriceSeries) -> Result<IndicatorOutput> {
        calculate_ema(series, self.period).map(|values| IndicatorOutput::Line { values })
    }

    fn tracks_price(&self) -> bool {
        true
    }
}
