//! Bollinger Bands indicator
//!
//! Middle Band = SMA(period)
//! Upper Band = Middle + (std_dev * standard deviation)
//! Lower Band = Middle - (std_dev * standard deviation)

use crate::common::math;
use crate::error::Result;
use crate::indicators::ensure_history;
use crate::indicators::registry::{Indicator, IndicatorCategory};
use crate::models::{BandSeries, IndicatorOutput, PriceSeries};

pub fn calculate_bollinger_bands(series: &PriceSeries, period: usize, std_dev: f64) -> Result<BandSeries> {
    ensure_history(format!("Bollinger({})", period), series.len(), period)?;

    let closes = series.closes();
    let middle = math::sma_series(&closes, period);
    let deviation = math::std_dev_series(&closes, period);

    let mut upper = vec![None; closes.len()];
    let mut lower = vec![None; closes.len()];
    for i in 0..closes.len() {
        if let (Some(m), Some(sd)) = (middle[i], deviation[i]) {
            upper[i] = Some(m + std_dev * sd);
            lower[i] = Some(m - std_dev * sd);
        }
    }

    Ok(BandSeries { upper, middle, lower })
}

pub struct Bollinger {
    name: String,
    period: usize,
    std_dev: f64,
}

impl Bollinger {
    pub fn new(name: &str, period: usize, std_dev: f64) -> Self {
        Self {
            name: name.to_string(),
            period,
            std_dev,
        }
    }
}

impl Indicator for Bollinger {
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
        calculate_bollinger_bands(series, self.period, self.std_dev).map(IndicatorOutput::Band)
    }

    fn tracks_price(&self) -> bool {
        true
    }
}
