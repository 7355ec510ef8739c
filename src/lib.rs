//! Stock scanner: technical indicator library, signal scoring engine and
//! scan orchestration, with HTTP and scheduled-worker hosts.

pub mod common;
pub mod config;
pub mod core;
pub mod error;
pub mod indicators;
pub mod jobs;
pub mod logging;
pub mod metrics;
pub mod models;
pub mod reporting;
pub mod services;
pub mod signals;

pub use error::{EngineError, Result};
