//! Scheduled watchlist scan: load, score, announce what is new

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use tracing::{debug, info};

use crate::core::scanner::{ScanRequest, Scanner};
use crate::error::Result;
use crate::models::{ScanReport, Signal, SignalLabel};
use crate::services::PriceSeriesSource;

/// Comma-separated tickers, trimmed, upper-cased, duplicates dropped
/// (first occurrence wins).
pub fn parse_watchlist(raw: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    raw.split(',')
        .map(|t| t.trim().to_uppercase())
        .filter(|t| !t.is_empty())
        .filter(|t| seen.insert(t.clone()))
        .collect()
}

/// Label and entry of the last signal announced for a ticker.
#[derive(Debug, Clone, PartialEq, Eq)]
struct AnnouncementKey {
    label: SignalLabel,
    entry_bits: Option<u64>,
}

impl AnnouncementKey {
    fn of(signal: &Signal) -> Self {
        Self {
            label: signal.label,
            entry_bits: signal.plan.levels().map(|l| l.entry_price.to_bits()),
        }
    }
}

/// Last announcement per ticker, so it holds at most one entry per
/// watchlist ticker.
#[derive(Debug, Default)]
struct Announcements {
    last: HashMap<String, AnnouncementKey>,
}

impl Announcements {
    /// True when the signal differs from the ticker's last announcement.
    /// HOLD is never announced and clears the ticker, so a later repeat of
    /// the earlier signal is announced again.
    fn observe(&mut self, signal: &Signal) -> bool {
        if signal.label == SignalLabel::Hold {
            self.last.remove(&signal.ticker);
            return false;
        }
        let key = AnnouncementKey::of(signal);
        if self.last.get(&signal.ticker) == Some(&key) {
            return false;
        }
        self.last.insert(signal.ticker.clone(), key);
        true
    }

    fn len(&self) -> usize {
        self.last.len()
    }
}

#[derive(Debug, Clone)]
pub struct ScanOutcome {
    pub report: ScanReport,
    /// Directional signals not announced by an earlier run of this job.
    pub fresh: Vec<Signal>,
}

pub struct ScanJob {
    watchlist: Vec<String>,
    source: Arc<dyn PriceSeriesSource>,
    scanner: Arc<Scanner>,
    announced: Mutex<Announcements>,
}

impl ScanJob {
    pub fn new(watchlist: Vec<String>, source: Arc<dyn PriceSeriesSource>, scanner: Arc<Scanner>) -> Self {
        Self {
            watchlist,
            source,
            scanner,
            announced: Mutex::new(Announcements::default()),
        }
    }

    pub fn watchlist(&self) -> &[String] {
        &self.watchlist
    }

    /// Tickers whose last directional signal has been announced.
    pub fn announced_count(&self) -> usize {
        self.announced.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    /// One full pass over the watchlist. Load failures are skips.
    pub fn run(&self) -> Result<ScanOutcome> {
        let requests: Vec<ScanRequest> = self
            .watchlist
            .iter()
            .map(|ticker| match self.source.load(ticker) {
                Ok(series) => ScanRequest::new(ticker.clone(), series),
                Err(e) => {
                    debug!(ticker = %ticker, error = %e, "Price series unavailable");
                    ScanRequest::unavailable(ticker.clone(), e.to_string())
                }
            })
            .collect();

        let report = self.scanner.scan(&requests)?;

        let mut announced = self.announced.lock().unwrap_or_else(|e| e.into_inner());
        let fresh: Vec<Signal> = report
            .signals
            .iter()
            .filter(|s| announced.observe(s))
            .cloned()
            .collect();

        info!(
            tickers = self.watchlist.len(),
            fresh = fresh.len(),
            "Scan job finished"
        );
        Ok(ScanOutcome { report, fresh })
    }
}
