//! Trend indicators: EMA, SMA, SuperTrend, ADX, MACD

pub mod adx;
pub mod ema;
pub mod macd;
pub mod sma;
pub mod supertrend;

pub use adx::*;
pub use ema::*;
pub use macd::*;
pub use sma::*;
pub use supertrend::*;
