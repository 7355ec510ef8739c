//! Cron-based scheduler that triggers scans at fixed times

use chrono::{DateTime, Utc};
use cron::Schedule;
use std::future::Future;
use std::str::FromStr;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;

use crate::error::{EngineError, Result};

/// Market open and close, weekdays (UTC).
pub const DEFAULT_SCHEDULES: &str = "0 5 9 * * Mon-Fri;0 55 15 * * Mon-Fri";

/// Runs a job on every tick of any of its cron schedules
pub struct ScanScheduler {
    expressions: Vec<String>,
    schedules: Vec<Schedule>,
    handle: Arc<RwLock<Option<tokio::task::JoinHandle<()>>>>,
}

impl ScanScheduler {
    /// `raw` holds one or more 6-field cron expressions separated by `;`
    pub fn new(raw: &str) -> Result<Self> {
        let expressions: Vec<String> = raw
            .split(';')
            .map(str::trim)
            .filter(|e| !e.is_empty())
            .map(str::to_string)
            .collect();
        if expressions.is_empty() {
            return Err(EngineError::Configuration(
                "at least one scan schedule is required".to_string(),
            ));
        }

        let schedules = expressions
            .iter()
            .map(|expr| {
                Schedule::from_str(expr).map_err(|e| {
                    EngineError::Configuration(format!("invalid cron expression '{}': {}", expr, e))
                })
            })
            .collect::<Result<Vec<_>>>()?;

        info!(schedules = ?expressions, "ScanScheduler: created");

        Ok(Self {
            expressions,
            schedules,
            handle: Arc::new(RwLock::new(None)),
        })
    }

    pub fn expressions(&self) -> &[String] {
        &self.expressions
    }

    /// Earliest tick of any schedule strictly after `after`
    pub fn next_tick(&self, after: DateTime<Utc>) -> Option<DateTime<Utc>> {
        next_tick(&self.schedules, after)
    }

    /// Spawn the scheduling loop. `job` runs once per tick, ticks are never
    /// overlapped.
    pub async fn start<F, Fut>(&self, job: F)
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let schedules = self.schedules.clone();
        let handle = tokio::spawn(async move {
            info!("ScanScheduler: started, waiting for next tick...");
            loop {
                let now = Utc::now();
                let Some(next) = next_tick(&schedules, now) else {
                    tokio::time::sleep(tokio::time::Duration::from_secs(60)).await;
                    continue;
                };
                let wait = (next - now).to_std().unwrap_or_default();
                info!(next = %next, "ScanScheduler: next scan scheduled");
                tokio::time::sleep(wait).await;
                job().await;
            }
        });

        *self.handle.write().await = Some(handle);
    }

    pub async fn stop(&self) {
        if let Some(h) = self.handle.write().await.take() {
            h.abort();
            info!("ScanScheduler: stopped");
        }
    }

    pub async fn is_running(&self) -> bool {
        self.handle.read().await.is_some()
    }
}

fn next_tick(schedules: &[Schedule], after: DateTime<Utc>) -> Option<DateTime<Utc>> {
    schedules.iter().filter_map(|s| s.after(&after).next()).min()
}
