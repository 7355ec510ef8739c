//! Shared data models spanning the engine layers.

pub mod bar;
pub mod indicators;
pub mod report;
pub mod signal;

pub use bar::{Bar, PriceSeries};
pub use indicators::{
    BandSeries, CandlePattern, CrossEvent, IndicatorOutput, IndicatorReading, IndicatorSnapshot,
    MacdSeries, PriceContext, ReadingValue, StochasticSeries, SuperTrendSeries, TrendTag,
};
pub use report::{ScanFilter, ScanReport, SkipReason, SkippedTicker};
pub use signal::{
    CategoryScore, Contribution, KeyLevels, PlanLevels, Signal, SignalLabel, TradeDirection,
    TradePlan,
};
