//! Williams %R

use crate::common::math::{self, Series};
use crate::error::Result;
use crate::indicators::ensure_history;
use crate::indicators::registry::{Indicator, IndicatorCategory};
use crate::models::{IndicatorOutput, PriceSeries};

/// %R = -100 * (highest high - close) / (highest high - lowest low), in
/// [-100, 0]. A zero-width range reads -50.
pub fn calculate_williams_r(series: &PriceSeries, period: usize) -> Result<Series> {
    ensure_history(format!("Williams%R({})", period), series.len(), period)?;

    let closes = series.closes();
    let highest = math::rolling_max(&series.highs(), period);
    let lowest = math::rolling_min(&series.lows(), period);
    Ok((0..closes.len())
        .map(|i| {
            let (hh, ll) = (highest[i]?, lowest[i]?);
            let range = hh - ll;
            Some(if range > 0.0 {
                -100.0 * (hh - closes[i]) / range
            } else {
                -50.0
            })
        })
        .collect())
}

pub struct WilliamsR {
    name: String,
    period: usize,
}

impl WilliamsR {
    pub fn new(name: &str, period: usize) -> Self {
        Self {
            name: name.to_string(),
            period,
        }
    }
}

impl Indicator for WilliamsR {
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
        calculate_williams_r(series, self.period).map(|values| IndicatorOutput::Line { values })
    }
}
