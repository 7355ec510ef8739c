//! SuperTrend indicator
//!
//! ATR bands around the bar midpoint that ratchet in the trend direction;
//! the trend flips when the close breaks the opposite band.

use crate::error::Result;
use crate::indicators::ensure_history;
use crate::indicators::registry::{Indicator, IndicatorCategory};
use crate::indicators::volatility::atr::calculate_atr;
use crate::models::{IndicatorOutput, PriceSeries, SuperTrendSeries};

pub fn calculate_supertrend(
    series: &PriceSeries,
    period: usize,
    multiplier: f64,
) -> Result<SuperTrendSeries> {
    ensure_history(
        format!("SuperTrend({},{})", period, multiplier),
        series.len(),
        period,
    )?;

    let bars = series.bars();
    let atr = calculate_atr(series, period)?;
    let n = bars.len();
    let mut value = vec![None; n];
    let mut direction = vec![None; n];

    let mut final_upper = 0.0;
    let mut final_lower = 0.0;
    let mut uptrend = true;
    let mut seeded = false;

    for i in 0..n {
        let Some(atr_value) = atr[i] else { continue };
        let hl2 = (bars[i].high + bars[i].low) / 2.0;
        let basic_upper = hl2 + multiplier * atr_value;
        let basic_lower = hl2 - multiplier * atr_value;
        let close = bars[i].close;

        if !seeded {
            final_upper = basic_upper;
            final_lower = basic_lower;
            uptrend = close >= hl2;
            seeded = true;
        } else {
            let prev_close = bars[i - 1].close;
            if basic_upper < final_upper || prev_close > final_upper {
                final_upper = basic_upper;
            }
            if basic_lower > final_lower || prev_close < final_lower {
                final_lower = basic_lower;
            }
            if uptrend && close < final_lower {
                uptrend = false;
            } else if !uptrend && close > final_upper {
                uptrend = true;
            }
        }

        value[i] = Some(if uptrend { final_lower } else { final_upper });
        direction[i] = Some(if uptrend { 1.0 } else { -1.0 });
    }

    Ok(SuperTrendSeries { value, direction })
}

pub struct SuperTrend {
    name: String,
    period: usize,
    multiplier: f64,
}

impl SuperTrend {
    pub fn new(name: &str, period: usize, multiplier: f64) -> Self {
        Self {
            name: name.to_string(),
            period,
            multiplier,
        }
    }
}

impl Indicator for SuperTrend {
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
        calculate_supertrend(series, self.period, self.multiplier).map(IndicatorOutput::SuperTrend)
    }
}
