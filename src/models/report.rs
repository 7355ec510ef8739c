//! Scan report aggregates

use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::models::signal::{Signal, SignalLabel};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    InsufficientData,
    DegenerateRisk,
    MalformedSeries,
    Illiquid,
    DataUnavailable,
}

impl SkipReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InsufficientData => "insufficient_data",
            Self::DegenerateRisk => "degenerate_risk",
            Self::MalformedSeries => "malformed_series",
            Self::Illiquid => "illiquid",
            Self::DataUnavailable => "data_unavailable",
        }
    }

    pub fn from_error(error: &EngineError) -> Self {
        match error {
            EngineError::InsufficientData { .. } => Self::InsufficientData,
            EngineError::DegenerateRisk(_) => Self::DegenerateRisk,
            EngineError::Illiquid { .. } => Self::Illiquid,
            EngineError::MalformedSeries(_) | EngineError::Configuration(_) => {
                Self::MalformedSeries
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkippedTicker {
    pub ticker: String,
    pub reason: SkipReason,
    pub detail: String,
}

/// Result of one scan: scored signals (strongest first) and skipped tickers
/// (input order).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ScanReport {
    pub signals: Vec<Signal>,
    pub skipped: Vec<SkippedTicker>,
}

impl ScanReport {
    pub fn total(&self) -> usize {
        self.signals.len() + self.skipped.len()
    }

    /// Top `limit` STRONG_BUY and STRONG_SELL signals, in report order.
    pub fn strongest(&self, limit: usize) -> (Vec<&Signal>, Vec<&Signal>) {
        let pick = |label: SignalLabel| {
            self.signals
                .iter()
                .filter(|s| s.label == label)
                .take(limit)
                .collect::<Vec<_>>()
        };
        (pick(SignalLabel::StrongBuy), pick(SignalLabel::StrongSell))
    }

    /// Narrow the report; skipped entries are kept untouched.
    pub fn filtered(&self, filter: &ScanFilter) -> ScanReport {
        let mut signals: Vec<Signal> = self
            .signals
            .iter()
            .filter(|s| s.composite_score.abs() >= filter.min_abs_score)
            .filter(|s| filter.labels.is_empty() || filter.labels.contains(&s.label))
            .cloned()
            .collect();
        if let Some(limit) = filter.limit {
            signals.truncate(limit);
        }
        ScanReport {
            signals,
            skipped: self.skipped.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanFilter {
    pub min_abs_score: i32,
    pub labels: Vec<SignalLabel>,
    pub limit: Option<usize>,
}
