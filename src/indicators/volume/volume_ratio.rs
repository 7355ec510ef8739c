//! Volume ratio: current volume over its rolling average (current bar
//! included)

use crate::common::math::{self, Series};
use crate::error::Result;
use crate::indicators::ensure_history;
use crate::indicators::registry::{Indicator, IndicatorCategory};
use crate::models::{IndicatorOutput, PriceSeries};

pub fn calculate_volume_ratio(series: &PriceSeries, period: usize) -> Result<Series> {
    ensure_history(format!("VolumeRatio({})", period), series.len(), period)?;

    let volumes = series.volumes();
    let average = math::sma_series(&volumes, period);
    Ok(volumes
        .iter()
        .zip(average)
        .map(|(volume, avg)| avg.map(|a| if a > 0.0 { volume / a } else { 1.0 }))
        .collect())
}

pub struct VolumeRatio {
    name: String,
    period: usize,
}

impl VolumeRatio {
    pub fn new(name: &str, period: usize) -> Self {
        Self {
            name: name.to_string(),
            period,
        }
    }
}

impl Indicator for VolumeRatio {
    fn name(&self) -> &str {
        &self.name
    }

    fn category(&self) -> IndicatorCategory {
        IndicatorCategory::Volume
    }

    fn lookback(&self) -> usize {
        self.period
    }

    fn compute(&self, series: &PriceSeries) -> Result<IndicatorOutput> {
        calculate_volume_ratio(series, self.period).map(|values| IndicatorOutput::Line { values })
    }
}
