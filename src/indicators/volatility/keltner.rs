//! Keltner Channels: EMA of closes wrapped by a multiple of ATR

use crate::error::Result;
use crate::indicators::ensure_history;
use crate::indicators::registry::{Indicator, IndicatorCategory};
use crate::indicators::trend::calculate_ema;
use crate::indicators::volatility::atr::calculate_atr;
use crate::models::{BandSeries, IndicatorOutput, PriceSeries};

pub fn calculate_keltner(series: &PriceSeries, period: usize, multiplier: f64) -> Result<BandSeries> {
    ensure_history(format!("Keltner({})", period), series.len(), period)?;

    let middle = calculate_ema(series, period)?;
    let atr = calculate_atr(series, period)?;

    let mut upper = vec![None; middle.len()];
    let mut lower = vec![None; middle.len()];
    for i in 0..middle.len() {
        if let (Some(m), Some(a)) = (middle[i], atr[i]) {
            upper[i] = Some(m + multiplier * a);
            lower[i] = Some(m - multiplier * a);
        }
    }

    Ok(BandSeries { upper, middle, lower })
}

pub struct Keltner {
    name: String,
    period: usize,
    multiplier: f64,
}

impl Keltner {
    pub fn new(name: &str, period: usize, multiplier: f64) -> Self {
        Self {
            name: name.to_string(),
            period,
            multiplier,
        }
    }
}

impl Indicator for Keltner {
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
        calculate_keltner(series, self.period, self.multiplier).map(IndicatorOutput::Band)
    }

    fn tracks_price(&self) -> bool {
        true
    }
}
