//! Stochastic oscillator (%K, %D)

use crate::common::math;
use crate::error::Result;
use crate::indicators::ensure_history;
use crate::indicators::registry::{Indicator, IndicatorCategory};
use crate::models::{IndicatorOutput, PriceSeries, StochasticSeries};

/// %K = 100 * (close - lowest low) / (highest high - lowest low) over
/// `k_period`; %D = SMA(%K, `d_period`). A zero-width range reads 50.
pub fn calculate_stochastic(
    series: &PriceSeries,
    k_period: usize,
    d_period: usize,
) -> Result<StochasticSeries> {
    ensure_history(
        format!("Stochastic({},{})", k_period, d_period),
        series.len(),
        k_period + d_period - 1,
    )?;

    let closes = series.closes();
    let highest = math::rolling_max(&series.highs(), k_period);
    let lowest = math::rolling_min(&series.lows(), k_period);

    let k: Vec<Option<f64>> = (0..closes.len())
        .map(|i| {
            let (hh, ll) = (highest[i]?, lowest[i]?);
            let range = hh - ll;
            Some(if range > 0.0 {
                100.0 * (closes[i] - ll) / range
            } else {
                50.0
            })
        })
        .collect();
    let d = math::over_defined(&k, |v| math::sma_series(v, d_period));

    Ok(StochasticSeries { k, d })
}

pub struct Stochastic {
    name: String,
    k_period: usize,
    d_period: usize,
}

impl Stochastic {
    pub fn new(name: &str, k_period: usize, d_period: usize) -> Self {
        Self {
            name: name.to_string(),
            k_period,
            d_period,
        }
    }
}

impl Indicator for Stochastic {
    fn name(&self) -> &str {
        &self.name
    }

    fn category(&self) -> IndicatorCategory {
        IndicatorCategory::Momentum
    }

    fn lookback(&self) -> usize {
        self.k_period + self.d_period - 1
    }

    fn compute(&self, series: &PriceSeries) -> Result<IndicatorOutput> {
        calculate_stochastic(series, self.k_period, self.d_period).map(IndicatorOutput::Stochastic)
    }
}
