//! Engine error taxonomy

use thiserror::Error;

/// Errors produced by the indicator and signal engine.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    /// The series is too short for an indicator, or for scoring at all.
    #[error("insufficient data for {subject}: need {required} bars, have {available}")]
    InsufficientData {
        subject: String,
        required: usize,
        available: usize,
    },

    /// Zero or near-zero volatility makes a risk-based plan meaningless.
    #[error("degenerate risk: {0}")]
    DegenerateRisk(String),

    /// Malformed periods, caps, boundaries or multipliers.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Average volume below the configured liquidity floor.
    #[error("illiquid: average volume {average:.0} below minimum {minimum:.0}")]
    Illiquid { average: f64, minimum: f64 },

    /// Bars out of order, duplicated timestamps or non-finite values.
    #[error("malformed price series: {0}")]
    MalformedSeries(String),
}

impl EngineError {
    pub fn insufficient(subject: impl Into<String>, required: usize, available: usize) -> Self {
        Self::InsufficientData {
            subject: subject.into(),
            required,
            available,
        }
    }

    /// Whether the orchestrator should record this as a skipped ticker
    /// instead of failing the batch.
    pub fn is_skippable(&self) -> bool {
        !matches!(self, Self::Configuration(_))
    }
}

pub type Result<T> = std::result::Result<T, EngineError>;
