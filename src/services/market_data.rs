//! Price series sources. The engine never fetches data itself; hosts pick a
//! source and hand the loaded series to the scanner.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::error::EngineError;
use crate::models::{Bar, PriceSeries};

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("no data for {ticker} at {path}")]
    NotFound { ticker: String, path: PathBuf },

    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Series(#[from] EngineError),
}

pub trait PriceSeriesSource: Send + Sync {
    /// Historical bars for a ticker, oldest first
    fn load(&self, ticker: &str) -> Result<PriceSeries, SourceError>;
}

/// Reads `<dir>/<TICKER>.json`, each file a JSON array of bars.
pub struct JsonDirectorySource {
    dir: PathBuf,
}

impl JsonDirectorySource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, ticker: &str) -> PathBuf {
        self.dir.join(format!("{}.json", ticker))
    }
}

impl PriceSeriesSource for JsonDirectorySource {
    fn load(&self, ticker: &str) -> Result<PriceSeries, SourceError> {
        let path = self.path_for(ticker);
        let raw = std::fs::read_to_string(&path).map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                SourceError::NotFound {
                    ticker: ticker.to_string(),
                    path: path.clone(),
                }
            } else {
                SourceError::Io {
                    path: path.clone(),
                    source,
                }
            }
        })?;
        let bars: Vec<Bar> = serde_json::from_str(&raw).map_err(|source| SourceError::Parse {
            path: path.clone(),
            source,
        })?;
        Ok(PriceSeries::new(bars)?)
    }
}
