//! SMA (Simple Moving Average) indicator

use crate::common::math::{self, Series};
use crate::error::Result;
use crate::indicators::ensure_history;
use crate::indicators::registry::{Indicator, IndicatorCategory};
use crate::models::{IndicatorOutput, PriceSeries};

pub fn calculate_sma(series: &PriceSeries, period: usize) -> Result<Series> {
    ensure_history(format!("SMA({})", period), series.len(), period)?;
    Ok(math::sma_series(&series.closes(), period))
}

pub struct Sma {
    name: String,
    period: usize,
}

impl Sma {
    pub fn new(name: &str, period: usize) -> Self {
        Self {
            name: name.to_string(),
            period,
        }
    }
}

impl Indicator for Sma {
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
        calculate_sma(series, self.period).map(|values| IndicatorOutput::Line { values })
    }

    fn tracks_price(&self) -> bool {
        true
    }
}
