//! Trade plan generation from the latest close, ATR and swing levels.

use crate::config::PlanConfig;
use crate::error::{EngineError, Result};
use crate::models::{PlanLevels, PriceContext, SignalLabel, TradeDirection, TradePlan};

pub struct TradePlanGenerator {
    config: PlanConfig,
}

impl TradePlanGenerator {
    pub fn new(config: PlanConfig) -> Self {
        Self { config }
    }

    /// HOLD yields `NotApplicable`. Directional labels yield a plan whose
    /// levels are strictly ordered, or `DegenerateRisk` when no such plan
    /// exists (zero ATR, stop collapsing onto entry).
    pub fn generate(&self, label: SignalLabel, price: &PriceContext, atr: Option<f64>) -> Result<TradePlan> {
        let Some(direction) = label.direction() else {
            return Ok(TradePlan::NotApplicable);
        };

        let atr = atr.ok_or_else(|| EngineError::DegenerateRisk("ATR unavailable".to_string()))?;
        if !(atr > self.config.min_atr_pct * price.close.abs()) {
            return Err(EngineError::DegenerateRisk(format!(
                "ATR {} is zero relative to price {}",
                atr, price.close
            )));
        }

        let c = &self.config;
        let Some(&first_multiple) = c.reward_multiples.first() else {
            return Err(EngineError::Configuration("plan.reward_multiples is empty".to_string()));
        };
        let (entry, stop) = match direction {
            TradeDirection::Long => {
                let entry = price.close * (1.0 - c.entry_pullback_pct);
                let atr_stop = entry - atr * c.atr_multiplier;
                // Tighter stop = closer to entry; the swing low only counts
                // while it sits below the entry.
                let stop = if price.swing_low < entry {
                    atr_stop.max(price.swing_low)
                } else {
                    atr_stop
                };
                (entry, stop)
            }
            TradeDirection::Short => {
                let entry = price.close * (1.0 + c.entry_pullback_pct);
                let atr_stop = entry + atr * c.atr_multiplier;
                let stop = if price.swing_high > entry {
                    atr_stop.min(price.swing_high)
                } else {
                    atr_stop
                };
                (entry, stop)
            }
        };

        let risk = (entry - stop).abs();
        if risk == 0.0 {
            return Err(EngineError::DegenerateRisk(format!(
                "stop {} equals entry {}",
                stop, entry
            )));
        }

        let step = match direction {
            TradeDirection::Long => risk,
            TradeDirection::Short => -risk,
        };
        let levels = PlanLevels {
            direction,
            entry_price: entry,
            stop_loss_price: stop,
            target_prices: c.reward_multiples.iter().map(|m| entry + step * m).collect(),
            risk_reward_ratio: first_multiple,
        };

        if !levels.is_consistent() {
            return Err(EngineError::DegenerateRisk(format!(
                "plan levels collapse: stop {}, entry {}, targets {:?}",
                levels.stop_loss_price, levels.entry_price, levels.target_prices
            )));
        }
        Ok(TradePlan::Active(levels))
    }
}
