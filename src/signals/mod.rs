//! Signal scoring, trade planning and the per-ticker engine.

pub mod aggregation;
pub mod categories;
pub mod engine;
pub mod plan;
pub mod scoring;

pub use aggregation::Aggregator;
pub use engine::SignalEngine;
pub use plan::TradePlanGenerator;
pub use scoring::SignalScorer;
