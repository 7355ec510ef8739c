//! Momentum indicators: RSI, Stochastic, CCI, Williams %R, ROC

pub mod cci;
pub mod roc;
pub mod rsi;
pub mod stochastic;
pub mod williams_r;

pub use cci::*;
pub use roc::*;
pub use rsi::*;
pub use stochastic::*;
pub use williams_r::*;
