//! Price structure: swing levels, support/resistance, candle patterns

pub mod patterns;
pub mod support_resistance;

pub use patterns::detect_pattern;
pub use support_resistance::{calculate_support_resistance, distance_pct, swing_high, swing_low};
