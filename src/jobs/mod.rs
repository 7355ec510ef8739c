//! Background jobs run by the worker binary.

pub mod scan;

pub use scan::{parse_watchlist, ScanJob, ScanOutcome};
