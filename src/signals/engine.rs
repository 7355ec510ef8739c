//! Per-ticker signal engine: snapshot, score, label, plan.

use tracing::debug;

use crate::config::EngineConfig;
use crate::error::{EngineError, Result};
use crate::indicators::registry::{names, IndicatorRegistry};
use crate::indicators::SnapshotBuilder;
use crate::models::{IndicatorSnapshot, KeyLevels, PriceSeries, Signal};
use crate::signals::aggregation::Aggregator;
use crate::signals::plan::TradePlanGenerator;
use crate::signals::scoring::SignalScorer;

/// Stateless between calls: the same series always yields the same signal.
pub struct SignalEngine {
    config: EngineConfig,
    snapshots: SnapshotBuilder,
    scorer: SignalScorer,
    planner: TradePlanGenerator,
}

impl SignalEngine {
    /// Engine over the standard indicator set. Fails on invalid config.
    pub fn new(config: EngineConfig) -> Result<Self> {
        let registry = IndicatorRegistry::standard(&config.indicators);
        Self::with_registry(config, registry)
    }

    /// Engine over a custom registry. Rules look indicators up by name, so
    /// indicators missing from the registry simply never fire.
    pub fn with_registry(config: EngineConfig, registry: IndicatorRegistry) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            snapshots: SnapshotBuilder::new(
                registry,
                config.indicators.structure_lookback,
                config.plan.swing_lookback,
            )
            .with_change_window(config.scoring.volume.obv_window),
            scorer: SignalScorer::new(config.scoring.clone()),
            planner: TradePlanGenerator::new(config.plan.clone()),
            config,
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn registry(&self) -> &IndicatorRegistry {
        self.snapshots.registry()
    }

    pub fn snapshot(&self, series: &PriceSeries) -> Result<IndicatorSnapshot> {
        self.snapshots.build(series)
    }

    /// Score one ticker. Refuses series shorter than `scan.min_history` and,
    /// when a liquidity floor is set, series trading below it.
    pub fn evaluate(&self, ticker: &str, series: &PriceSeries) -> Result<Signal> {
        let required = self.config.scan.min_history;
        if series.len() < required {
            return Err(EngineError::insufficient(
                format!("{} history", ticker),
                required,
                series.len(),
            ));
        }

        if let Some(minimum) = self.config.scan.min_average_volume {
            let average = series
                .average_volume(self.config.indicators.volume_ratio)
                .unwrap_or(0.0);
            if average < minimum {
                return Err(EngineError::Illiquid { average, minimum });
            }
        }

        let snapshot = self.snapshot(series)?;
        self.evaluate_snapshot(ticker, &snapshot)
    }

    /// Score an already built snapshot.
    pub fn evaluate_snapshot(&self, ticker: &str, snapshot: &IndicatorSnapshot) -> Result<Signal> {
        let category_scores = self.scorer.score(snapshot);
        let composite_score = Aggregator::composite(self.scorer.rules(), &category_scores);
        let label = Aggregator::label(self.scorer.rules(), composite_score);

        let plan = self
            .planner
            .generate(label, &snapshot.price, snapshot.scalar(names::ATR))?;

        debug!(
            ticker = %ticker,
            score = composite_score,
            label = %label,
            unavailable = snapshot.unavailable().len(),
            "Ticker scored"
        );

        Ok(Signal {
            ticker: ticker.to_string(),
            composite_score,
            label,
            category_scores,
            plan,
            as_of: snapshot.price.as_of,
            price: snapshot.price.close,
            levels: KeyLevels {
                support: snapshot.price.support,
                resistance: snapshot.price.resistance,
            },
        })
    }
}
