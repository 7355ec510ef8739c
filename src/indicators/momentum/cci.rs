//! CCI (Commodity Channel Index)

use crate::common::math::{self, Series};
use crate::error::Result;
use crate::indicators::ensure_history;
use crate::indicators::registry::{Indicator, IndicatorCategory};
use crate::models::{IndicatorOutput, PriceSeries};

const LAMBERT_CONSTANT: f64 = 0.015;

/// CCI = (TP - SMA(TP)) / (0.015 * mean deviation). Zero deviation reads 0.
pub fn calculate_cci(series: &PriceSeries, period: usize) -> Result<Series> {
    ensure_history(format!("CCI({})", period), series.len(), period)?;

    let tp = series.typical_prices();
    let sma = math::sma_series(&tp, period);
    Ok((0..tp.len())
        .map(|i| {
            let mean = sma[i]?;
            let window = &tp[i + 1 - period..=i];
            let mean_dev = window.iter().map(|v| (v - mean).abs()).sum::<f64>() / period as f64;
            Some(if mean_dev > 0.0 {
                (tp[i] - mean) / (LAMBERT_CONSTANT * mean_dev)
            } else {
                0.0
            })
        })
        .collect())
}

pub struct Cci {
    name: String,
    period: usize,
}

impl Cci {
    pub fn new(name: &str, period: usize) -> Self {
        Self {
            name: name.to_string(),
            period,
        }
    }
}

impl Indicator for Cci {
    fn name(&self) -> &str {
        &self.name
    }

    fn category(&self) -> IndicatorCategory {
        IndicatorCategory::Momentum
    }

    fn lookback(&self) -> usize {
        self.period
    }

    fn compute(&self, series: &PriceSeries) -> Result<IndicatorOutput> {
        calculate_cci(series, self.period).map(|values| IndicatorOutput::Line { values })
    }
}
