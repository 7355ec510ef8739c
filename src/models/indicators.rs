use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::common::math::Series;

/// Three-line output (Bollinger, Keltner).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BandSeries {
    pub upper: Series,
    pub middle: Series,
    pub lower: Series,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MacdSeries {
    pub macd: Series,
    pub signal: Series,
    pub histogram: Series,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StochasticSeries {
    pub k: Series,
    pub d: Series,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuperTrendSeries {
    pub value: Series,
    /// +1.0 uptrend, -1.0 downtrend, `None` before the ATR is seeded.
    pub direction: Series,
}

/// Full aligned output of one indicator run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum IndicatorOutput {
    Line { values: Series },
    Band(BandSeries),
    Macd(MacdSeries),
    Stochastic(StochasticSeries),
    SuperTrend(SuperTrendSeries),
}

impl IndicatorOutput {
    pub fn len(&self) -> usize {
        match self {
            Self::Line { values } => values.len(),
            Self::Band(b) => b.middle.len(),
            Self::Macd(m) => m.macd.len(),
            Self::Stochastic(s) => s.k.len(),
            Self::SuperTrend(s) => s.value.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Value(s) at bar `index`, if every component is defined there.
    pub fn value_at(&self, index: usize) -> Option<ReadingValue> {
        let at = |s: &Series| s.get(index).copied().flatten();
        match self {
            Self::Line { values } => at(values).map(ReadingValue::Scalar),
            Self::Band(b) => Some(ReadingValue::Band {
                upper: at(&b.upper)?,
                middle: at(&b.middle)?,
                lower: at(&b.lower)?,
            }),
            Self::Macd(m) => Some(ReadingValue::Macd {
                macd: at(&m.macd)?,
                signal: at(&m.signal)?,
                histogram: at(&m.histogram)?,
            }),
            Self::Stochastic(s) => Some(ReadingValue::Stochastic {
                k: at(&s.k)?,
                d: at(&s.d)?,
            }),
            Self::SuperTrend(s) => Some(ReadingValue::SuperTrend {
                value: at(&s.value)?,
                uptrend: at(&s.direction)? > 0.0,
            }),
        }
    }
}

/// Latest-bar value(s) of one indicator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum ReadingValue {
    Scalar(f64),
    Band { upper: f64, middle: f64, lower: f64 },
    Macd { macd: f64, signal: f64, histogram: f64 },
    Stochastic { k: f64, d: f64 },
    SuperTrend { value: f64, uptrend: bool },
}

impl ReadingValue {
    /// Component used for the trend tag.
    pub fn primary(&self) -> f64 {
        match *self {
            Self::Scalar(v) => v,
            Self::Band { middle, .. } => middle,
            Self::Macd { histogram, .. } => histogram,
            Self::Stochastic { k, .. } => k,
            Self::SuperTrend { value, .. } => value,
        }
    }

    pub fn scalar(&self) -> Option<f64> {
        match *self {
            Self::Scalar(v) => Some(v),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendTag {
    Rising,
    Falling,
    Flat,
}

impl TrendTag {
    /// Tag from the last three values: non-decreasing = rising,
    /// non-increasing = falling, all equal or mixed = flat.
    pub fn from_last_three(values: &[f64]) -> Self {
        if values.len() < 3 {
            return Self::Flat;
        }
        let w = &values[values.len() - 3..];
        let non_decreasing = w[0] <= w[1] && w[1] <= w[2];
        let non_increasing = w[0] >= w[1] && w[1] >= w[2];
        match (non_decreasing, non_increasing) {
            (true, false) => Self::Rising,
            (false, true) => Self::Falling,
            _ => Self::Flat,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CrossEvent {
    BullishCross,
    BearishCross,
    None,
}

impl CrossEvent {
    /// Compares the sign of (fast - slow) on the previous and latest bar.
    pub fn from_diffs(previous: f64, current: f64) -> Self {
        if previous <= 0.0 && current > 0.0 {
            Self::BullishCross
        } else if previous >= 0.0 && current < 0.0 {
            Self::BearishCross
        } else {
            Self::None
        }
    }
}

/// Snapshot entry for one indicator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum IndicatorReading {
    Available {
        value: ReadingValue,
        previous: Option<ReadingValue>,
        trend: TrendTag,
        cross: CrossEvent,
        /// Primary value now minus its value a fixed number of bars back.
        #[serde(default)]
        window_change: Option<f64>,
    },
    Unavailable {
        reason: String,
    },
}

impl IndicatorReading {
    pub fn available(value: ReadingValue) -> Self {
        Self::Available {
            value,
            previous: None,
            trend: TrendTag::Flat,
            cross: CrossEvent::None,
            window_change: None,
        }
    }

    pub fn with_previous(mut self, prev: ReadingValue) -> Self {
        if let Self::Available { previous, .. } = &mut self {
            *previous = Some(prev);
        }
        self
    }

    pub fn with_trend(mut self, tag: TrendTag) -> Self {
        if let Self::Available { trend, .. } = &mut self {
            *trend = tag;
        }
        self
    }

    pub fn with_cross(mut self, event: CrossEvent) -> Self {
        if let Self::Available { cross, .. } = &mut self {
            *cross = event;
        }
        self
    }

    pub fn with_window_change(mut self, change: Option<f64>) -> Self {
        if let Self::Available { window_change, .. } = &mut self {
            *window_change = change;
        }
        self
    }

    pub fn value(&self) -> Option<&ReadingValue> {
        match self {
            Self::Available { value, .. } => Some(value),
            Self::Unavailable { .. } => None,
        }
    }

    pub fn previous(&self) -> Option<&ReadingValue> {
        match self {
            Self::Available { previous, .. } => previous.as_ref(),
            Self::Unavailable { .. } => None,
        }
    }

    pub fn trend(&self) -> TrendTag {
        match self {
            Self::Available { trend, .. } => *trend,
            Self::Unavailable { .. } => TrendTag::Flat,
        }
    }

    pub fn cross(&self) -> CrossEvent {
        match self {
            Self::Available { cross, .. } => *cross,
            Self::Unavailable { .. } => CrossEvent::None,
        }
    }

    pub fn window_change(&self) -> Option<f64> {
        match self {
            Self::Available { window_change, .. } => *window_change,
            Self::Unavailable { .. } => None,
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, Self::Available { .. })
    }
}

/// Reversal candle detected on the latest bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CandlePattern {
    Hammer,
    BullishEngulfing,
    ShootingStar,
    BearishEngulfing,
}

impl CandlePattern {
    pub fn is_bullish(&self) -> bool {
        matches!(self, Self::Hammer | Self::BullishEngulfing)
    }
}

/// Price facts about the latest bars that are not indicator outputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceContext {
    pub close: f64,
    pub previous_close: f64,
    pub trend: TrendTag,
    pub swing_low: f64,
    pub swing_high: f64,
    pub support: Option<f64>,
    pub resistance: Option<f64>,
    pub pattern: Option<CandlePattern>,
    /// Close now minus the close a fixed number of bars back.
    #[serde(default)]
    pub window_change: Option<f64>,
    pub as_of: DateTime<Utc>,
}

impl PriceContext {
    pub fn is_up_bar(&self) -> bool {
        self.close > self.previous_close
    }

    pub fn is_down_bar(&self) -> bool {
        self.close < self.previous_close
    }
}

/// Latest-bar view of every registered indicator plus pair crosses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorSnapshot {
    pub price: PriceContext,
    pub readings: BTreeMap<String, IndicatorReading>,
    /// Cross events between two registered lines, keyed `fast/slow`.
    pub pair_crosses: BTreeMap<String, CrossEvent>,
}

impl IndicatorSnapshot {
    pub fn new(price: PriceContext) -> Self {
        Self {
            price,
            readings: BTreeMap::new(),
            pair_crosses: BTreeMap::new(),
        }
    }

    pub fn with_reading(mut self, name: &str, reading: IndicatorReading) -> Self {
        self.readings.insert(name.to_string(), reading);
        self
    }

    /// Available reading by name; unavailable and missing both yield `None`.
    pub fn reading(&self, name: &str) -> Option<&IndicatorReading> {
        self.readings.get(name).filter(|r| r.is_available())
    }

    pub fn value(&self, name: &str) -> Option<ReadingValue> {
        self.reading(name).and_then(|r| r.value().copied())
    }

    pub fn scalar(&self, name: &str) -> Option<f64> {
        self.value(name).and_then(|v| v.scalar())
    }

    pub fn pair_cross(&self, fast: &str, slow: &str) -> CrossEvent {
        self.pair_crosses
            .get(&pair_key(fast, slow))
            .copied()
            .unwrap_or(CrossEvent::None)
    }

    pub fn unavailable(&self) -> Vec<&str> {
        self.readings
            .iter()
            .filter(|(_, r)| !r.is_available())
            .map(|(name, _)| name.as_str())
            .collect()
    }
}

pub fn pair_key(fast: &str, slow: &str) -> String {
    format!("{}/{}", fast, slow)
}
