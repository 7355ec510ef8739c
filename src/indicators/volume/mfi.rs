//! MFI (Money Flow Index): a volume-weighted RSI over typical price

use crate::common::math::Series;
use crate::error::Result;
use crate::indicators::ensure_history;
use crate::indicators::registry::{Indicator, IndicatorCategory};
use crate::models::{IndicatorOutput, PriceSeries};

/// Zero negative flow saturates at 100, except a window with no flow in
/// either direction, which reads 50 rather than an extreme.
pub fn calculate_mfi(series: &PriceSeries, period: usize) -> Result<Series> {
    ensure_history(format!("MFI({})", period), series.len(), period + 1)?;

    let tp = series.typical_prices();
    let volumes = series.volumes();

    // Signed raw money flow per bar, index 0 has no direction.
    let mut positive = vec![0.0; tp.len()];
    let mut negative = vec![0.0; tp.len()];
    for i in 1..tp.len() {
        let flow = tp[i] * volumes[i];
        if tp[i] > tp[i - 1] {
            positive[i] = flow;
        } else if tp[i] < tp[i - 1] {
            negative[i] = flow;
        }
    }

    Ok((0..tp.len())
        .map(|i| {
            if i < period {
                return None;
            }
            let window = i + 1 - period..=i;
            let pos: f64 = positive[window.clone()].iter().sum();
            let neg: f64 = negative[window].iter().sum();
            Some(if neg == 0.0 {
                if pos == 0.0 {
                    50.0
                } else {
                    100.0
                }
            } else {
                100.0 - 100.0 / (1.0 + pos / neg)
            })
        })
        .collect())
}

pub struct Mfi {
    name: String,
    period: usize,
}

impl Mfi {
    pub fn new(name: &str, period: usize) -> Self {
        Self {
            name: name.to_string(),
            period,
        }
    }
}

impl Indicator for Mfi {
    fn name(&self) -> &str {
        &self.name
    }

    fn category(&self) -> IndicatorCategory {
        IndicatorCategory::Volume
    }

    fn lookback(&self) -> usize {
        self.period + 1
    }

    fn compute(&self, series: &PriceSeries) -> Result<IndicatorOutput> {
        calculate_mfi(series, self.period).map(|values| IndicatorOutput::Line { values })
    }
}
