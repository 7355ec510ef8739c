//! Category aggregation: caps, composite and label

use crate::config::scoring::ScoringConfig;
use crate::indicators::registry::IndicatorCategory;
use crate::models::{CategoryScore, Contribution, SignalLabel};

pub struct Aggregator;

impl Aggregator {
    /// Cap one category's contributions
    pub fn category(
        rules: &ScoringConfig,
        category: IndicatorCategory,
        contributions: Vec<Contribution>,
    ) -> CategoryScore {
        CategoryScore::new(category, rules.caps.get(category), contributions)
    }

    /// Sum of the capped category scores, re-clamped to the composite cap
    pub fn composite(rules: &ScoringConfig, categories: &[CategoryScore]) -> i32 {
        let cap = rules.caps.composite;
        categories.iter().map(|c| c.score).sum::<i32>().clamp(-cap, cap)
    }

    pub fn label(rules: &ScoringConfig, composite: i32) -> SignalLabel {
        rules.labels.label_for(composite)
    }
}
