//! Engine configuration and process environment.
//!
//! All tunables are plain serde structs. Missing sections fall back to their
//! defaults, but unknown keys and malformed values are rejected: a bad config
//! is fatal at startup, never silently replaced.

pub mod scoring;

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{EngineError, Result};

pub use scoring::{
    CategoryCaps, LabelBoundaries, MomentumRules, ScoringConfig, TrendRules, VolatilityRules,
    VolumeRules, RULES_VERSION,
};

/// Deployment environment, from `ENVIRONMENT` (defaults to `sandbox`).
pub fn get_environment() -> String {
    std::env::var("ENVIRONMENT").unwrap_or_else(|_| "sandbox".to_string())
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    pub indicators: IndicatorPeriods,
    pub scoring: ScoringConfig,
    pub plan: PlanConfig,
    pub scan: ScanConfig,
}

impl EngineConfig {
    pub fn from_json_str(raw: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(raw)
            .map_err(|e| EngineError::Configuration(format!("invalid config json: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            EngineError::Configuration(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::from_json_str(&raw)
    }

    /// Config file named by `ENGINE_CONFIG`, or defaults when unset.
    pub fn from_env() -> Result<Self> {
        match std::env::var("ENGINE_CONFIG") {
            Ok(path) if !path.trim().is_empty() => Self::from_file(path.trim()),
            _ => {
                let config = Self::default();
                config.validate()?;
                Ok(config)
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        self.indicators.validate()?;
        self.scoring.validate()?;
        self.plan.validate()?;
        self.scan.validate()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VwapAnchor {
    /// Reset at each calendar-day change (UTC).
    #[default]
    Session,
    /// Cumulative over the whole series.
    Series,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct IndicatorPeriods {
    pub ema_fast: usize,
    pub ema_slow: usize,
    pub sma_long: usize,
    pub supertrend_period: usize,
    pub supertrend_multiplier: f64,
    pub adx: usize,
    pub macd_fast: usize,
    pub macd_slow: usize,
    pub macd_signal: usize,
    pub rsi: usize,
    pub stochastic_k: usize,
    pub stochastic_d: usize,
    pub cci: usize,
    pub williams_r: usize,
    pub roc: usize,
    pub mfi: usize,
    pub volume_ratio: usize,
    pub vwap_anchor: VwapAnchor,
    pub bollinger_period: usize,
    pub bollinger_std_dev: f64,
    pub atr: usize,
    pub keltner_period: usize,
    pub keltner_multiplier: f64,
    /// Bars searched for support/resistance.
    pub structure_lookback: usize,
}

impl Default for IndicatorPeriods {
    fn default() -> Self {
        Self {
            ema_fast: 20,
            ema_slow: 50,
            sma_long: 200,
            supertrend_period: 10,
            supertrend_multiplier: 3.0,
            adx: 14,
            macd_fast: 12,
            macd_slow: 26,
            macd_signal: 9,
            rsi: 14,
            stochastic_k: 14,
            stochastic_d: 3,
            cci: 20,
            williams_r: 14,
            roc: 12,
            mfi: 14,
            volume_ratio: 20,
            vwap_anchor: VwapAnchor::Session,
            bollinger_period: 20,
            bollinger_std_dev: 2.0,
            atr: 14,
            keltner_period: 20,
            keltner_multiplier: 2.0,
            structure_lookback: 20,
        }
    }
}

impl IndicatorPeriods {
    pub fn validate(&self) -> Result<()> {
        let periods = [
            ("ema_fast", self.ema_fast),
            ("ema_slow", self.ema_slow),
            ("sma_long", self.sma_long),
            ("supertrend_period", self.supertrend_period),
            ("adx", self.adx),
            ("macd_fast", self.macd_fast),
            ("macd_slow", self.macd_slow),
            ("macd_signal", self.macd_signal),
            ("rsi", self.rsi),
            ("stochastic_k", self.stochastic_k),
            ("stochastic_d", self.stochastic_d),
            ("cci", self.cci),
            ("williams_r", self.williams_r),
            ("roc", self.roc),
            ("mfi", self.mfi),
            ("volume_ratio", self.volume_ratio),
            ("bollinger_period", self.bollinger_period),
            ("atr", self.atr),
            ("keltner_period", self.keltner_period),
            ("structure_lookback", self.structure_lookback),
        ];
        if let Some((name, _)) = periods.iter().find(|(_, p)| *p == 0) {
            return Err(EngineError::Configuration(format!(
                "indicators.{} must be a positive period",
                name
            )));
        }
        if self.ema_fast >= self.ema_slow {
            return Err(EngineError::Configuration(format!(
                "indicators.ema_fast ({}) must be shorter than ema_slow ({})",
                self.ema_fast, self.ema_slow
            )));
        }
        if self.macd_fast >= self.macd_slow {
            return Err(EngineError::Configuration(format!(
                "indicators.macd_fast ({}) must be shorter than macd_slow ({})",
                self.macd_fast, self.macd_slow
            )));
        }
        let multipliers = [
            ("supertrend_multiplier", self.supertrend_multiplier),
            ("bollinger_std_dev", self.bollinger_std_dev),
            ("keltner_multiplier", self.keltner_multiplier),
        ];
        if let Some((name, m)) = multipliers.iter().find(|(_, m)| !(*m > 0.0)) {
            return Err(EngineError::Configuration(format!(
                "indicators.{} must be positive, got {}",
                name, m
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PlanConfig {
    /// Stop distance in ATRs.
    pub atr_multiplier: f64,
    /// Target distances as multiples of the entry-to-stop risk.
    pub reward_multiples: Vec<f64>,
    /// Limit entry this fraction better than the close (0 = enter at close).
    pub entry_pullback_pct: f64,
    /// Bars searched for the swing low/high stop reference.
    pub swing_lookback: usize,
    /// ATR at or below this fraction of price counts as zero volatility.
    pub min_atr_pct: f64,
}

impl Default for PlanConfig {
    fn default() -> Self {
        Self {
            atr_multiplier: 1.5,
            reward_multiples: vec![1.5, 2.5],
            entry_pullback_pct: 0.0,
            swing_lookback: 10,
            min_atr_pct: 1e-6,
        }
    }
}

impl PlanConfig {
    pub fn validate(&self) -> Result<()> {
        if !(self.atr_multiplier > 0.0) {
            return Err(EngineError::Configuration(format!(
                "plan.atr_multiplier must be positive, got {}",
                self.atr_multiplier
            )));
        }
        let count = self.reward_multiples.len();
        if !(1..=3).contains(&count) {
            return Err(EngineError::Configuration(format!(
                "plan.reward_multiples needs 1 to 3 entries, got {}",
                count
            )));
        }
        let increasing = self.reward_multiples.windows(2).all(|w| w[0] < w[1]);
        if !increasing || !(self.reward_multiples[0] > 0.0) {
            return Err(EngineError::Configuration(format!(
                "plan.reward_multiples must be positive and strictly increasing, got {:?}",
                self.reward_multiples
            )));
        }
        if !(0.0..0.5).contains(&self.entry_pullback_pct) {
            return Err(EngineError::Configuration(format!(
                "plan.entry_pullback_pct must be within [0, 0.5), got {}",
                self.entry_pullback_pct
            )));
        }
        if self.swing_lookback == 0 {
            return Err(EngineError::Configuration(
                "plan.swing_lookback must be positive".to_string(),
            ));
        }
        if !(self.min_atr_pct >= 0.0) {
            return Err(EngineError::Configuration(
                "plan.min_atr_pct must be non-negative".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScanConfig {
    /// Worker threads used to evaluate tickers in parallel.
    pub workers: usize,
    /// Bars required before a ticker is scored at all.
    pub min_history: usize,
    /// Skip tickers whose average volume is below this.
    pub min_average_volume: Option<f64>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            workers: 4,
            min_history: 200,
            min_average_volume: None,
        }
    }
}

impl ScanConfig {
    pub fn validate(&self) -> Result<()> {
        if self.workers == 0 {
            return Err(EngineError::Configuration(
                "scan.workers must be at least 1".to_string(),
            ));
        }
        if self.min_history < 3 {
            return Err(EngineError::Configuration(format!(
                "scan.min_history must be at least 3, got {}",
                self.min_history
            )));
        }
        if let Some(v) = self.min_average_volume {
            if !(v >= 0.0) {
                return Err(EngineError::Configuration(format!(
                    "scan.min_average_volume must be non-negative, got {}",
                    v
                )));
            }
        }
        Ok(())
    }
}
