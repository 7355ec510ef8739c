//! Volume indicators: OBV, VWAP, MFI, volume ratio

pub mod mfi;
pub mod obv;
pub mod volume_ratio;
pub mod vwap;

pub use mfi::*;
pub use obv::*;
pub use volume_ratio::*;
pub use vwap::*;
