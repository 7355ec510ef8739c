//! ROC (Rate of Change), in percent

use crate::common::math::Series;
use crate::error::Result;
use crate::indicators::ensure_history;
use crate::indicators::registry::{Indicator, IndicatorCategory};
use crate::models::{IndicatorOutput, PriceSeries};

pub fn calculate_roc(series: &PriceSeries, period: usize) -> Result<Series> {
    ensure_history(format!("ROC({})", period), series.len(), period + 1)?;

    let closes = series.closes();
    Ok((0..closes.len())
        .map(|i| {
            if i < period {
                return None;
            }
            let base = closes[i - period];
            Some(if base != 0.0 {
                100.0 * (closes[i] - base) / base
            } else {
                0.0
            })
        })
        .collect())
}

pub struct Roc {
    name: String,
    period: usize,
}

impl Roc {
    pub fn new(name: &str, period: usize) -> Self {
        Self {
            name: name.to_string(),
            period,
        }
    }
}

impl Indicator for Roc {
    fn name(&self) -> &str {
        &self.name
    }

    fn category(&self) -> IndicatorCategory {
        IndicatorCategory::Momentum
    }

    fn lookback(&self) -> usize {
        self.period + 1
    }

    fn compute(&self, series: &PriceSeries) -> Result<IndicatorOutput> {
        calculate_roc(series, self.period).map(|values| IndicatorOutput::Line { values })
    }
}
