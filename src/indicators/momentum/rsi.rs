//! RSI (Relative Strength Index) indicator
//!
//! RSI = 100 - (100 / (1 + RS)), RS = Wilder-average gain / average loss

use crate::common::math::{self, Series};
use crate::error::Result;
use crate::indicators::ensure_history;
use crate::indicators::registry::{Indicator, IndicatorCategory};
use crate::models::{IndicatorOutput, PriceSeries};

/// Calculate RSI. Zero average loss saturates at 100, except a window with
/// neither gains nor losses, which reads 50 rather than an extreme.
pub fn calculate_rsi(series: &PriceSeries, period: usize) -> Result<Series> {
    ensure_history(format!("RSI({})", period), series.len(), period + 1)?;

    let closes = series.closes();
    let mut gains = Vec::with_capacity(closes.len() - 1);
    let mut losses = Vec::with_capacity(closes.len() - 1);
    for pair in closes.windows(2) {
        let change = pair[1] - pair[0];
        gains.push(change.max(0.0));
        losses.push((-change).max(0.0));
    }

    let avg_gain = math::wilder_series(&gains, period);
    let avg_loss = math::wilder_series(&losses, period);

    let mut out = vec![None; closes.len()];
    for j in 0..gains.len() {
        if let (Some(gain), Some(loss)) = (avg_gain[j], avg_loss[j]) {
            out[j + 1] = Some(rsi_from_averages(gain, loss));
        }
    }
    Ok(out)
}

fn rsi_from_averages(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_loss == 0.0 {
        return if avg_gain == 0.0 { 50.0 } else { 100.0 };
    }
    let rs = avg_gain / avg_loss;
    100.0 - (100.0 / (1.0 + rs))
}

pub struct Rsi {
    name: String,
    period: usize,
}

impl Rsi {
    pub fn new(name: &str, period: usize) -> Self {
        Self {
            name: name.to_string(),
            period,
        }
    }
}

impl Indicator for Rsi {
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
        calculate_rsi(series, self.period).map(|values| IndicatorOutput::Line { values })
    }
}
