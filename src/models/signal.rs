//! Signal, trade plan and category score value objects

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::indicators::registry::IndicatorCategory;

/// Final actionable label derived from the composite score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SignalLabel {
    StrongBuy,
    Buy,
    Hold,
    Sell,
    StrongSell,
}

impl SignalLabel {
    pub fn is_bullish(&self) -> bool {
        matches!(self, Self::StrongBuy | Self::Buy)
    }

    pub fn is_bearish(&self) -> bool {
        matches!(self, Self::StrongSell | Self::Sell)
    }

    pub fn is_strong(&self) -> bool {
        matches!(self, Self::StrongBuy | Self::StrongSell)
    }

    pub fn direction(&self) -> Option<TradeDirection> {
        if self.is_bullish() {
            Some(TradeDirection::Long)
        } else if self.is_bearish() {
            Some(TradeDirection::Short)
        } else {
            None
        }
    }
}

impl fmt::Display for SignalLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::StrongBuy => "STRONG BUY",
            Self::Buy => "BUY",
            Self::Hold => "HOLD",
            Self::Sell => "SELL",
            Self::StrongSell => "STRONG SELL",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TradeDirection {
    Long,
    Short,
}

/// One rule that fired while scoring a category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contribution {
    pub indicator: String,
    pub rule: String,
    pub points: i32,
}

/// Capped contribution of one category plus the rules behind it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryScore {
    pub category: IndicatorCategory,
    pub score: i32,
    /// Sum of contributions before the cap was applied.
    pub raw_score: i32,
    pub cap: i32,
    pub contributions: Vec<Contribution>,
}

impl CategoryScore {
    pub fn new(category: IndicatorCategory, cap: i32, contributions: Vec<Contribution>) -> Self {
        let raw_score: i32 = contributions.iter().map(|c| c.points).sum();
        Self {
            category,
            score: raw_score.clamp(-cap, cap),
            raw_score,
            cap,
            contributions,
        }
    }

    /// Human-readable status, relative to the category cap.
    pub fn status(&self) -> &'static str {
        if self.cap == 0 || self.score == 0 {
            return "neutral";
        }
        let strong = self.score.abs() * 2 > self.cap;
        match (self.score > 0, strong) {
            (true, true) => "strong bullish",
            (true, false) => "bullish",
            (false, true) => "strong bearish",
            (false, false) => "bearish",
        }
    }
}

/// Entry, stop and targets for a directional signal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanLevels {
    pub direction: TradeDirection,
    pub entry_price: f64,
    pub stop_loss_price: f64,
    pub target_prices: Vec<f64>,
    pub risk_reward_ratio: f64,
}

impl PlanLevels {
    /// Bullish: stop < entry < t1 < t2 ...; bearish reversed.
    pub fn is_consistent(&self) -> bool {
        if self.target_prices.is_empty() || self.target_prices.len() > 3 {
            return false;
        }
        let mut levels = vec![self.stop_loss_price, self.entry_price];
        levels.extend(self.target_prices.iter().copied());
        match self.direction {
            TradeDirection::Long => levels.windows(2).all(|w| w[0] < w[1]),
            TradeDirection::Short => levels.windows(2).all(|w| w[0] > w[1]),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum TradePlan {
    Active(PlanLevels),
    /// HOLD: no direction, so no numeric plan.
    NotApplicable,
}

impl TradePlan {
    pub fn levels(&self) -> Option<&PlanLevels> {
        match self {
            Self::Active(levels) => Some(levels),
            Self::NotApplicable => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KeyLevels {
    pub support: Option<f64>,
    pub resistance: Option<f64>,
}

/// Fully scored ticker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Signal {
    pub ticker: String,
    pub composite_score: i32,
    pub label: SignalLabel,
    pub category_scores: Vec<CategoryScore>,
    pub plan: TradePlan,
    pub as_of: DateTime<Utc>,
    pub price: f64,
    pub levels: KeyLevels,
}

impl Signal {
    pub fn category(&self, category: IndicatorCategory) -> Option<&CategoryScore> {
        self.category_scores.iter().find(|c| c.category == category)
    }

    /// Top contributions across all categories, strongest first.
    pub fn key_reasons(&self, limit: usize) -> Vec<&Contribution> {
        let mut all: Vec<&Contribution> = self
            .category_scores
            .iter()
            .flat_map(|c| c.contributions.iter())
            .filter(|c| c.points != 0)
            .collect();
        all.sort_by(|a, b| b.points.abs().cmp(&a.points.abs()));
        all.truncate(limit);
        all
    }
}
