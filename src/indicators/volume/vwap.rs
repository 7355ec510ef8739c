//! VWAP (Volume Weighted Average Price)

use crate::common::math::Series;
use crate::config::VwapAnchor;
use crate::error::Result;
use crate::indicators::ensure_history;
use crate::indicators::registry::{Indicator, IndicatorCategory};
use crate::models::{IndicatorOutput, PriceSeries};

/// Cumulative sum(typical price * volume) / sum(volume). With a session
/// anchor the sums reset whenever the UTC calendar date changes. While the
/// cumulative volume is zero the value is the bar's typical price.
pub fn calculate_vwap(series: &PriceSeries, anchor: VwapAnchor) -> Result<Series> {
    ensure_history("VWAP", series.len(), 1)?;

    let mut out = Vec::with_capacity(series.len());
    let mut pv = 0.0;
    let mut volume = 0.0;
    let mut session = None;

    for bar in series.bars() {
        let date = bar.timestamp.date_naive();
        if anchor == VwapAnchor::Session && session != Some(date) {
            pv = 0.0;
            volume = 0.0;
        }
        session = Some(date);

        let tp = bar.typical_price();
        pv += tp * bar.volume;
        volume += bar.volume;
        out.push(Some(if volume > 0.0 { pv / volume } else { tp }));
    }
    Ok(out)
}

pub struct Vwap {
    name: String,
    anchor: VwapAnchor,
}

impl Vwap {
    pub fn new(name: &str, anchor: VwapAnchor) -> Self {
        Self {
            name: name.to_string(),
            anchor,
        }
    }
}

impl Indicator for Vwap {
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
        calculate_vwap(series, self.anchor).map(|values| IndicatorOutput::Line { values })
    }

    fn tracks_price(&self) -> bool {
        true
    }
}
