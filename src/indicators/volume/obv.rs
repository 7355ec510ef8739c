//! OBV (On-Balance Volume)

use crate::common::math::Series;
use crate::error::Result;
use crate::indicators::ensure_history;
use crate::indicators::registry::{Indicator, IndicatorCategory};
use crate::models::{IndicatorOutput, PriceSeries};

/// Running total of volume signed by close-to-close direction, starting at 0.
pub fn calculate_obv(series: &PriceSeries) -> Result<Series> {
    ensure_history("OBV", series.len(), 1)?;

    let bars = series.bars();
    let mut total = 0.0;
    let mut out = Vec::with_capacity(bars.len());
    out.push(Some(total));
    for pair in bars.windows(2) {
        let (prev, bar) = (&pair[0], &pair[1]);
        if bar.close > prev.close {
            total += bar.volume;
        } else if bar.close < prev.close {
            total -= bar.volume;
        }
        out.push(Some(total));
    }
    Ok(out)
}

pub struct Obv {
    name: String,
}

impl Obv {
    pub fn new(name: &str) -> Self {
        Self { name: name.to_string() }
    }
}

impl Indicator for Obv {
    fn name(&self) -> &str {
        &self.name
    }

    fn category(&self) -> IndicatorCategory {
        IndicatorCategory::Volume
    }

    fn lookback(&self) -> usize {
        1
    }

    fn compute(&self, series: &PriceSeries) -> Result<IndicatorOutput> {
        calculate_obv(series).map(|values| IndicatorOutput::Line { values })
    }
}
