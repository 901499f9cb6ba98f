use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::metrics::MetricsCalculator;
use crate::topics::TopicConfig;
use crate::{CoreError, Ticker};

/// Settings for a full analysis run. Every field has a default, so a config
/// file only needs the keys it changes:
///
/// ```json
/// { "ticker": "AAPL", "metrics": { "risk_free_rate": 0.02 } }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PipelineConfig {
    /// Restrict headlines to this stock; `None` keeps every headline.
    pub ticker: Option<Ticker>,
    pub metrics: MetricsCalculator,
    pub topics: TopicConfig,
}

impl PipelineConfig {
    pub fn from_json_str(input: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(input)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, CoreError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|err| CoreError::io(path, err))?;
        Self::from_json_str(&contents).map_err(|source| CoreError::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn with_ticker(mut self, ticker: Option<Ticker>) -> Self {
        if ticker.is_some() {
            self.ticker = ticker;
        }
        self
    }
}
