//! Indicator registry and trait system
//!
//! Indicators are registered under a name as boxed trait objects. The
//! snapshot builder walks the registry, so adding an indicator never touches
//! the scorer.

use serde::{Deserialize, Serialize};

use crate::config::IndicatorPeriods;
use crate::error::{EngineError, Result};
use crate::indicators::{momentum, trend, volatility, volume};
use crate::models::{IndicatorOutput, PriceSeries};

/// Indicator category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndicatorCategory {
    Trend,
    Momentum,
    Volume,
    Volatility,
}

impl IndicatorCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Trend => "trend",
            Self::Momentum => "momentum",
            Self::Volume => "volume",
            Self::Volatility => "volatility",
        }
    }

    /// Get all categories, in report order
    pub fn all() -> [IndicatorCategory; 4] {
        [Self::Trend, Self::Momentum, Self::Volume, Self::Volatility]
    }
}

/// Canonical names of the standard indicator set.
pub mod names {
    pub const EMA_FAST: &str = "ema_fast";
    pub const EMA_SLOW: &str = "ema_slow";
    pub const SMA_LONG: &str = "sma_long";
    pub const SUPERTREND: &str = "supertrend";
    pub const ADX: &str = "adx";
    pub const MACD: &str = "macd";
    pub const RSI: &str = "rsi";
    pub const STOCHASTIC: &str = "stochastic";
    pub const CCI: &str = "cci";
    pub const WILLIAMS_R: &str = "williams_r";
    pub const ROC: &str = "roc";
    pub const OBV: &str = "obv";
    pub const VWAP: &str = "vwap";
    pub const MFI: &str = "mfi";
    pub const VOLUME_RATIO: &str = "volume_ratio";
    pub const BOLLINGER: &str = "bollinger";
    pub const ATR: &str = "atr";
    pub const KELTNER: &str = "keltner";
}

/// Trait for all indicators: given a series, produce aligned values.
pub trait Indicator: Send + Sync {
    /// Name the reading is stored under in the snapshot
    fn name(&self) -> &str;

    /// Get the category this indicator belongs to
    fn category(&self) -> IndicatorCategory;

    /// Bars needed before the first defined value
    fn lookback(&self) -> usize;

    fn compute(&self, series: &PriceSeries) -> Result<IndicatorOutput>;

    /// Whether a price-versus-line cross is meaningful for this indicator
    fn tracks_price(&self) -> bool {
        false
    }
}

/// Two registered line indicators whose crossing is reported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrossPair {
    pub fast: String,
    pub slow: String,
}

/// Ordered set of named indicators
#[derive(Default)]
pub struct IndicatorRegistry {
    indicators: Vec<Box<dyn Indicator>>,
    pairs: Vec<CrossPair>,
}

impl IndicatorRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with every indicator the scorer knows about
    pub fn standard(p: &IndicatorPeriods) -> Self {
        let mut registry = Self::new();
        let all: Vec<Box<dyn Indicator>> = vec![
            Box::new(trend::Ema::new(names::EMA_FAST, p.ema_fast)),
            Box::new(trend::Ema::new(names::EMA_SLOW, p.ema_slow)),
            Box::new(trend::Sma::new(names::SMA_LONG, p.sma_long)),
            Box::new(trend::SuperTrend::new(
                names::SUPERTREND,
                p.supertrend_period,
                p.supertrend_multiplier,
            )),
            Box::new(trend::Adx::new(names::ADX, p.adx)),
            Box::new(trend::Macd::new(
                names::MACD,
                p.macd_fast,
                p.macd_slow,
                p.macd_signal,
            )),
            Box::new(momentum::Rsi::new(names::RSI, p.rsi)),
            Box::new(momentum::Stochastic::new(
                names::STOCHASTIC,
                p.stochastic_k,
                p.stochastic_d,
            )),
            Box::new(momentum::Cci::new(names::CCI, p.cci)),
            Box::new(momentum::WilliamsR::new(names::WILLIAMS_R, p.williams_r)),
            Box::new(momentum::Roc::new(names::ROC, p.roc)),
            Box::new(volume::Obv::new(names::OBV)),
            Box::new(volume::Vwap::new(names::VWAP, p.vwap_anchor)),
            Box::new(volume::Mfi::new(names::MFI, p.mfi)),
            Box::new(volume::VolumeRatio::new(names::VOLUME_RATIO, p.volume_ratio)),
            Box::new(volatility::Bollinger::new(
                names::BOLLINGER,
                p.bollinger_period,
                p.bollinger_std_dev,
            )),
            Box::new(volatility::Atr::new(names::ATR, p.atr)),
            Box::new(volatility::Keltner::new(
                names::KELTNER,
                p.keltner_period,
                p.keltner_multiplier,
            )),
        ];
        for indicator in all {
            registry.indicators.push(indicator);
        }
        registry.pairs.push(CrossPair {
            fast: names::EMA_FAST.to_string(),
            slow: names::EMA_SLOW.to_string(),
        });
        registry
    }

    /// Add an indicator; names must be unique
    pub fn register(&mut self, indicator: Box<dyn Indicator>) -> Result<()> {
        if self.get(indicator.name()).is_some() {
            return Err(EngineError::Configuration(format!(
                "indicator '{}' is already registered",
                indicator.name()
            )));
        }
        self.indicators.push(indicator);
        Ok(())
    }

    /// Report crosses between two already registered indicators
    pub fn register_pair(&mut self, fast: &str, slow: &str) -> Result<()> {
        for name in [fast, slow] {
            if self.get(name).is_none() {
                return Err(EngineError::Configuration(format!(
                    "cross pair references unknown indicator '{}'",
                    name
                )));
            }
        }
        self.pairs.push(CrossPair {
            fast: fast.to_string(),
            slow: slow.to_string(),
        });
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&dyn Indicator> {
        self.indicators
            .iter()
            .find(|i| i.name() == name)
            .map(|i| i.as_ref())
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn Indicator> {
        self.indicators.iter().map(|i| i.as_ref())
    }

    pub fn pairs(&self) -> &[CrossPair] {
        &self.pairs
    }

    pub fn names(&self) -> Vec<&str> {
        self.indicators.iter().map(|i| i.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.indicators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indicators.is_empty()
    }

    /// Longest lookback across registered indicators
    pub fn longest_lookback(&self) -> usize {
        self.indicators
            .iter()
            .map(|i| i.lookback())
            .max()
            .unwrap_or(0)
    }

    pub fn by_category(&self, category: IndicatorCategory) -> Vec<&str> {
        self.indicators
            .iter()
            .filter(|i| i.category() == category)
            .map(|i| i.name())
            .collect()
    }
}
