//! ADX (Average Directional Index) indicator
//!
//! ADX measures trend strength regardless of direction:
//! +DM/-DM and true range are Wilder-smoothed into +DI/-DI, their normalised
//! spread is DX, and ADX is the Wilder average of DX.

use crate::common::math::{self, Series};
use crate::error::Result;
use crate::indicators::ensure_history;
use crate::indicators::registry::{Indicator, IndicatorCategory};
use crate::models::{IndicatorOutput, PriceSeries};

/// Calculate ADX. First value lands on bar `2 * period - 1`.
pub fn calculate_adx(series: &PriceSeries, period: usize) -> Result<Series> {
    ensure_history(format!("ADX({})", period), series.len(), 2 * period)?;

    let bars = series.bars();
    let n = bars.len();
    let mut tr_values = Vec::with_capacity(n - 1);
    let mut plus_dm_values = Vec::with_capacity(n - 1);
    let mut minus_dm_values = Vec::with_capacity(n - 1);

    for i in 1..n {
        tr_values.push(math::true_range(bars[i].high, bars[i].low, bars[i - 1].close));

        let up_move = bars[i].high - bars[i - 1].high;
        let down_move = bars[i - 1].low - bars[i].low;
        plus_dm_values.push(if up_move > down_move && up_move > 0.0 {
            up_move
        } else {
            0.0
        });
        minus_dm_values.push(if down_move > up_move && down_move > 0.0 {
            down_move
        } else {
            0.0
        });
    }

    let tr_smooth = math::wilder_series(&tr_values, period);
    let plus_smooth = math::wilder_series(&plus_dm_values, period);
    let minus_smooth = math::wilder_series(&minus_dm_values, period);

    let dx_values: Vec<f64> = (period - 1..n - 1)
        .filter_map(|j| {
            let (tr, plus, minus) = (tr_smooth[j]?, plus_smooth[j]?, minus_smooth[j]?);
            Some(directional_index(plus, minus, tr))
        })
        .collect();

    let adx = math::wilder_series(&dx_values, period);
    let mut out = vec![None; n];
    // dx_values[k] belongs to bar `period + k`
    for (k, value) in adx.into_iter().enumerate() {
        out[period + k] = value;
    }
    Ok(out)
}

fn directional_index(plus_dm: f64, minus_dm: f64, tr: f64) -> f64 {
    if tr <= 0.0 {
        return 0.0;
    }
    let plus_di = 100.0 * plus_dm / tr;
    let minus_di = 100.0 * minus_dm / tr;
    let di_sum = plus_di + minus_di;
    if di_sum > 0.0 {
        100.0 * (plus_di - minus_di).abs() / di_sum
    } else {
        0.0
    }
}

pub struct Adx {
    name: String,
    period: usize,
}

impl Adx {
    pub fn new(name: &str, period: usize) -> Self {
        Self {
            name: name.to_string(),
            period,
        }
    }
}

impl Indicator for Adx {
    fn name(&self) -> &str {
        &self.name
    }

    fn category(&self) -> IndicatorCategory {
        IndicatorCategory::Trend
    }

    fn lookback(&self) -> usize {
        2 * self.period
    }

    fn compute(&self, series: &PriceSeries) -> Result<IndicatorOutput> {
        calculate_adx(series, self.period).map(|values| IndicatorOutput::Line { values })
    }
}
