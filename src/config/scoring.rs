//! Versioned scoring rule table.
//!
//! Every threshold and point value the scorer uses lives here so a rule
//! change is a configuration diff, not a code change.

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};
use crate::models::signal::SignalLabel;

pub const RULES_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScoringConfig {
    pub version: u32,
    pub caps: CategoryCaps,
    pub labels: LabelBoundaries,
    pub trend: TrendRules,
    pub momentum: MomentumRules,
    pub volume: VolumeRules,
    pub volatility: VolatilityRules,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            version: RULES_VERSION,
            caps: CategoryCaps::default(),
            labels: LabelBoundaries::default(),
            trend: TrendRules::default(),
            momentum: MomentumRules::default(),
            volume: VolumeRules::default(),
            volatility: VolatilityRules::default(),
        }
    }
}

impl ScoringConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version == 0 {
            return Err(EngineError::Configuration(
                "scoring.version must be >= 1".to_string(),
            ));
        }
        self.caps.validate()?;
        self.labels.validate(self.caps.composite)?;
        self.trend.validate()?;
        self.momentum.validate()?;
        self.volume.validate()?;
        self.volatility.validate()
    }
}

/// Maximum absolute contribution per category and for the composite.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CategoryCaps {
    pub trend: i32,
    pub momentum: i32,
    pub volume: i32,
    pub volatility: i32,
    pub composite: i32,
}

impl Default for CategoryCaps {
    fn default() -> Self {
        Self {
            trend: 6,
            momentum: 6,
            volume: 4,
            volatility: 4,
            composite: 20,
        }
    }
}

impl CategoryCaps {
    fn validate(&self) -> Result<()> {
        let caps = [
            ("trend", self.trend),
            ("momentum", self.momentum),
            ("volume", self.volume),
            ("volatility", self.volatility),
        ];
        if let Some((name, cap)) = caps.iter().find(|(_, cap)| *cap < 0) {
            return Err(EngineError::Configuration(format!(
                "caps.{} must be non-negative, got {}",
                name, cap
            )));
        }
        if self.composite <= 0 {
            return Err(EngineError::Configuration(format!(
                "caps.composite must be positive, got {}",
                self.composite
            )));
        }
        Ok(())
    }
}

/// Lower bounds of each non-HOLD bucket. Boundaries are inclusive on the
/// stronger side: a score equal to `buy` is BUY, equal to `sell` is SELL.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LabelBoundaries {
    pub strong_buy: i32,
    pub buy: i32,
    pub sell: i32,
    pub strong_sell: i32,
}

impl Default for LabelBoundaries {
    fn default() -> Self {
        Self {
            strong_buy: 15,
            buy: 8,
            sell: -8,
            strong_sell: -15,
        }
    }
}

impl LabelBoundaries {
    pub fn label_for(&self, score: i32) -> SignalLabel {
        if score >= self.strong_buy {
            SignalLabel::StrongBuy
        } else if score >= self.buy {
            SignalLabel::Buy
        } else if score <= self.strong_sell {
            SignalLabel::StrongSell
        } else if score <= self.sell {
            SignalLabel::Sell
        } else {
            SignalLabel::Hold
        }
    }

    fn validate(&self, composite: i32) -> Result<()> {
        let ordered = -composite <= self.strong_sell
            && self.strong_sell < self.sell
            && self.sell < 0
            && 0 < self.buy
            && self.buy < self.strong_buy
            && self.strong_buy <= composite;
        if !ordered {
            return Err(EngineError::Configuration(format!(
                "label boundaries must satisfy -{c} <= strong_sell < sell < 0 < buy < strong_buy <= {c}, got {:?}",
                self,
                c = composite
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TrendRules {
    /// ADX above this marks a trending market.
    pub adx_threshold: f64,
    /// Price and EMAs stacked in one direction with ADX above threshold.
    pub strong_alignment_points: i32,
    /// Same stack without trend-strength confirmation.
    pub weak_alignment_points: i32,
    pub long_sma_points: i32,
    pub supertrend_flip_points: i32,
    pub supertrend_direction_points: i32,
    pub macd_histogram_turn_points: i32,
    pub macd_cross_points: i32,
    pub ema_cross_points: i32,
}

impl Default for TrendRules {
    fn default() -> Self {
        Self {
            adx_threshold: 25.0,
            strong_alignment_points: 6,
            weak_alignment_points: 2,
            long_sma_points: 1,
            supertrend_flip_points: 2,
            supertrend_direction_points: 1,
            macd_histogram_turn_points: 2,
            macd_cross_points: 1,
            ema_cross_points: 1,
        }
    }
}

impl TrendRules {
    fn validate(&self) -> Result<()> {
        check_range("trend.adx_threshold", self.adx_threshold, 0.0, 100.0)?;
        if self.weak_alignment_points > self.strong_alignment_points {
            return Err(EngineError::Configuration(
                "trend.weak_alignment_points must not exceed strong_alignment_points".to_string(),
            ));
        }
        check_points(
            "trend",
            &[
                self.strong_alignment_points,
                self.weak_alignment_points,
                self.long_sma_points,
                self.supertrend_flip_points,
                self.supertrend_direction_points,
                self.macd_histogram_turn_points,
                self.macd_cross_points,
                self.ema_cross_points,
            ],
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MomentumRules {
    pub rsi_oversold: f64,
    pub rsi_overbought: f64,
    /// RSI crossing up through oversold / down through overbought.
    pub rsi_cross_points: i32,
    /// RSI sitting beyond an extreme.
    pub rsi_extreme_points: i32,
    pub stochastic_oversold: f64,
    pub stochastic_overbought: f64,
    pub stochastic_cross_points: i32,
    pub cci_threshold: f64,
    pub cci_points: i32,
    pub williams_oversold: f64,
    pub williams_overbought: f64,
    pub williams_points: i32,
    pub roc_points: i32,
    pub pattern_points: i32,
}

impl Default for MomentumRules {
    fn default() -> Self {
        Self {
            rsi_oversold: 30.0,
            rsi_overbought: 70.0,
            rsi_cross_points: 5,
            rsi_extreme_points: 3,
            stochastic_oversold: 20.0,
            stochastic_overbought: 80.0,
            stochastic_cross_points: 3,
            cci_threshold: 100.0,
            cci_points: 1,
            williams_oversold: -80.0,
            williams_overbought: -20.0,
            williams_points: 1,
            roc_points: 1,
            pattern_points: 1,
        }
    }
}

impl MomentumRules {
    fn validate(&self) -> Result<()> {
        check_band("momentum.rsi", self.rsi_oversold, self.rsi_overbought, 0.0, 100.0)?;
        check_band(
            "momentum.stochastic",
            self.stochastic_oversold,
            self.stochastic_overbought,
            0.0,
            100.0,
        )?;
        check_band(
            "momentum.williams",
            self.williams_oversold,
            self.williams_overbought,
            -100.0,
            0.0,
        )?;
        if self.cci_threshold <= 0.0 {
            return Err(EngineError::Configuration(
                "momentum.cci_threshold must be positive".to_string(),
            ));
        }
        check_points(
            "momentum",
            &[
                self.rsi_cross_points,
                self.rsi_extreme_points,
                self.stochastic_cross_points,
                self.cci_points,
                self.williams_points,
                self.roc_points,
                self.pattern_points,
            ],
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct VolumeRules {
    /// Volume ratio at or above this is a surge.
    pub surge_ratio: f64,
    pub surge_points: i32,
    /// Bars over which the OBV change is compared with the close change.
    pub obv_window: usize,
    pub obv_divergence_points: i32,
    pub obv_confirmation_points: i32,
    pub mfi_oversold: f64,
    pub mfi_overbought: f64,
    pub mfi_points: i32,
    pub vwap_cross_points: i32,
}

impl Default for VolumeRules {
    fn default() -> Self {
        Self {
            surge_ratio: 1.5,
            surge_points: 4,
            obv_window: 10,
            obv_divergence_points: 2,
            obv_confirmation_points: 1,
            mfi_oversold: 20.0,
            mfi_overbought: 80.0,
            mfi_points: 1,
            vwap_cross_points: 1,
        }
    }
}

impl VolumeRules {
    fn validate(&self) -> Result<()> {
        if !(self.surge_ratio > 0.0) {
            return Err(EngineError::Configuration(
                "volume.surge_ratio must be positive".to_string(),
            ));
        }
        if self.obv_window < 2 {
            return Err(EngineError::Configuration(format!(
                "volume.obv_window must be at least 2, got {}",
                self.obv_window
            )));
        }
        check_band("volume.mfi", self.mfi_oversold, self.mfi_overbought, 0.0, 100.0)?;
        check_points(
            "volume",
            &[
                self.surge_points,
                self.obv_divergence_points,
                self.obv_confirmation_points,
                self.mfi_points,
                self.vwap_cross_points,
            ],
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct VolatilityRules {
    /// Position inside the band (0 = lower, 1 = upper) that counts as "near"
    /// a band edge.
    pub band_proximity: f64,
    pub mean_reversion_points: i32,
    pub exhaustion_points: i32,
}

impl Default for VolatilityRules {
    fn default() -> Self {
        Self {
            band_proximity: 0.2,
            mean_reversion_points: 2,
            exhaustion_points: 3,
        }
    }
}

impl VolatilityRules {
    fn validate(&self) -> Result<()> {
        check_range("volatility.band_proximity", self.band_proximity, 0.0, 0.5)?;
        check_points(
            "volatility",
            &[self.mean_reversion_points, self.exhaustion_points],
        )
    }
}

fn check_points(section: &str, points: &[i32]) -> Result<()> {
    if points.iter().any(|p| *p < 0) {
        return Err(EngineError::Configuration(format!(
            "{} point values must be non-negative",
            section
        )));
    }
    Ok(())
}

fn check_range(name: &str, value: f64, min: f64, max: f64) -> Result<()> {
    if !(value >= min && value <= max) {
        return Err(EngineError::Configuration(format!(
            "{} must be within [{}, {}], got {}",
            name, min, max, value
        )));
    }
    Ok(())
}

fn check_band(name: &str, low: f64, high: f64, min: f64, max: f64) -> Result<()> {
    check_range(name, low, min, max)?;
    check_range(name, high, min, max)?;
    if low >= high {
        return Err(EngineError::Configuration(format!(
            "{} oversold level {} must be below overbought level {}",
            name, low, high
        )));
    }
    Ok(())
}
