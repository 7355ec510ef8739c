//! Per-category caps

use crate::config::scoring::CategoryCaps;
use crate::indicators::registry::IndicatorCategory;

impl CategoryCaps {
    /// Get the cap for a category
    pub fn get(&self, category: IndicatorCategory) -> i32 {
        match category {
            IndicatorCategory::Trend => self.trend,
            IndicatorCategory::Momentum => self.momentum,
            IndicatorCategory::Volume => self.volume,
            IndicatorCategory::Volatility => self.volatility,
        }
    }

    /// Largest composite the categories can produce before the composite
    /// clamp.
    pub fn category_total(&self) -> i32 {
        IndicatorCategory::all().iter().map(|c| self.get(*c)).sum()
    }
}
