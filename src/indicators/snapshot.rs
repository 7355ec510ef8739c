//! Snapshot builder: runs every registered indicator over a series and keeps
//! only what the scorer needs about the latest bar.

use tracing::debug;

use crate::error::{EngineError, Result};
use crate::indicators::registry::{Indicator, IndicatorRegistry};
use crate::indicators::structure;
use crate::models::indicators::pair_key;
use crate::models::{
    CrossEvent, IndicatorOutput, IndicatorReading, IndicatorSnapshot, PriceContext, PriceSeries,
    ReadingValue, TrendTag,
};

/// Bars between the two values a window change compares, unless overridden.
pub const DEFAULT_CHANGE_WINDOW: usize = 10;

pub struct SnapshotBuilder {
    registry: IndicatorRegistry,
    structure_lookback: usize,
    swing_lookback: usize,
    change_window: usize,
}

impl SnapshotBuilder {
    pub fn new(registry: IndicatorRegistry, structure_lookback: usize, swing_lookback: usize) -> Self {
        Self {
            registry,
            structure_lookback,
            swing_lookback,
            change_window: DEFAULT_CHANGE_WINDOW,
        }
    }

    pub fn with_change_window(mut self, bars: usize) -> Self {
        self.change_window = bars;
        self
    }

    pub fn registry(&self) -> &IndicatorRegistry {
        &self.registry
    }

    /// Build the latest-bar snapshot. Indicators without enough history are
    /// recorded as unavailable; any other indicator error aborts the build.
    pub fn build(&self, series: &PriceSeries) -> Result<IndicatorSnapshot> {
        let price = self.price_context(series)?;
        let closes = series.closes();
        let mut snapshot = IndicatorSnapshot::new(price);
        let mut lines: Vec<(&str, Vec<Option<f64>>)> = Vec::new();

        for indicator in self.registry.iter() {
            let output = match indicator.compute(series) {
                Ok(output) => output,
                Err(EngineError::InsufficientData { .. }) => {
                    let reason = format!(
                        "needs {} bars, series has {}",
                        indicator.lookback(),
                        series.len()
                    );
                    debug!(indicator = indicator.name(), %reason, "Indicator unavailable");
                    snapshot = snapshot.with_reading(indicator.name(), IndicatorReading::Unavailable { reason });
                    continue;
                }
                Err(e) => return Err(e),
            };

            let reading = latest_reading(indicator, &output, &closes, self.change_window);
            if let IndicatorOutput::Line { values } = &output {
                lines.push((indicator.name(), values.clone()));
            }
            snapshot = snapshot.with_reading(indicator.name(), reading);
        }

        for pair in self.registry.pairs() {
            let find = |name: &str| lines.iter().find(|(n, _)| *n == name).map(|(_, v)| v);
            let event = match (find(pair.fast.as_str()), find(pair.slow.as_str())) {
                (Some(fast), Some(slow)) => line_cross(fast, slow),
                _ => CrossEvent::None,
            };
            snapshot.pair_crosses.insert(pair_key(&pair.fast, &pair.slow), event);
        }

        Ok(snapshot)
    }

    fn price_context(&self, series: &PriceSeries) -> Result<PriceContext> {
        let last = series
            .last()
            .ok_or_else(|| EngineError::insufficient("price series", 1, 0))?;
        let closes = series.closes();
        let previous_close = closes.len().checked_sub(2).map_or(last.close, |i| closes[i]);
        let (support, resistance) = structure::calculate_support_resistance(series, self.structure_lookback);

        Ok(PriceContext {
            close: last.close,
            previous_close,
            trend: TrendTag::from_last_three(&closes),
            swing_low: structure::swing_low(series, self.swing_lookback).unwrap_or(last.low),
            swing_high: structure::swing_high(series, self.swing_lookback).unwrap_or(last.high),
            support,
            resistance,
            pattern: structure::detect_pattern(series),
            window_change: closes
                .len()
                .checked_sub(self.change_window + 1)
                .map(|i| last.close - closes[i]),
            as_of: last.timestamp,
        })
    }
}

fn latest_reading(
    indicator: &dyn Indicator,
    output: &IndicatorOutput,
    closes: &[f64],
    change_window: usize,
) -> IndicatorReading {
    let n = closes.len();
    let Some(value) = output.value_at(n - 1) else {
        return IndicatorReading::Unavailable {
            reason: "undefined on the latest bar".to_string(),
        };
    };
    let previous = n.checked_sub(2).and_then(|i| output.value_at(i));

    let recent: Vec<f64> = (n.saturating_sub(3)..n)
        .filter_map(|i| output.value_at(i))
        .map(|v| v.primary())
        .collect();

    let window_change = (n - 1)
        .checked_sub(change_window)
        .and_then(|i| output.value_at(i))
        .map(|then| value.primary() - then.primary());

    let mut reading = IndicatorReading::available(value)
        .with_trend(TrendTag::from_last_three(&recent))
        .with_window_change(window_change);
    if let Some(prev) = previous {
        let cross = cross_event(indicator, &prev, &value, closes[n - 2], closes[n - 1]);
        reading = reading.with_previous(prev).with_cross(cross);
    }
    reading
}

/// Cross on the latest transition for indicators with a natural cross:
/// MACD line vs signal, %K vs %D, SuperTrend flip, close vs band middle and
/// close vs a price-tracking line.
fn cross_event(
    indicator: &dyn Indicator,
    prev: &ReadingValue,
    cur: &ReadingValue,
    prev_close: f64,
    close: f64,
) -> CrossEvent {
    match (*prev, *cur) {
        (ReadingValue::Macd { macd: pm, signal: ps, .. }, ReadingValue::Macd { macd, signal, .. }) => {
            CrossEvent::from_diffs(pm - ps, macd - signal)
        }
        (ReadingValue::Stochastic { k: pk, d: pd }, ReadingValue::Stochastic { k, d }) => {
            CrossEvent::from_diffs(pk - pd, k - d)
        }
        (ReadingValue::SuperTrend { uptrend: was_up, .. }, ReadingValue::SuperTrend { uptrend, .. }) => {
            match (was_up, uptrend) {
                (false, true) => CrossEvent::BullishCross,
                (true, false) => CrossEvent::BearishCross,
                _ => CrossEvent::None,
            }
        }
        (ReadingValue::Band { middle: pm, .. }, ReadingValue::Band { middle, .. }) => {
            CrossEvent::from_diffs(prev_close - pm, close - middle)
        }
        (ReadingValue::Scalar(pv), ReadingValue::Scalar(v)) if indicator.tracks_price() => {
            CrossEvent::from_diffs(prev_close - pv, close - v)
        }
        _ => CrossEvent::None,
    }
}

fn line_cross(fast: &[Option<f64>], slow: &[Option<f64>]) -> CrossEvent {
    let n = fast.len().min(slow.len());
    if n < 2 {
        return CrossEvent::None;
    }
    let diff = |i: usize| Some(fast[i]? - slow[i]?);
    match (diff(n - 2), diff(n - 1)) {
        (Some(prev), Some(cur)) => CrossEvent::from_diffs(prev, cur),
        _ => CrossEvent::None,
    }
}
