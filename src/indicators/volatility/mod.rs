//! Volatility indicators: ATR, Bollinger Bands, Keltner Channels

pub mod atr;
pub mod bollinger;
pub mod keltner;

pub use atr::*;
pub use bollinger::*;
pub use keltner::*;
