//! External collaborators the engine is fed by.

pub mod market_data;

pub use market_data::{JsonDirectorySource, PriceSeriesSource, SourceError};
