use serde::{Deserialize, Serialize};

use crate::{NewsTimestamp, Ticker, TradingDate, ValidationError};

/// News row exactly as read from the source, before validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawNewsRecord {
    #[serde(default, alias = "Date")]
    pub date: Option<String>,
    #[serde(default, alias = "Headline", alias = "title")]
    pub headline: Option<String>,
    #[serde(default, alias = "URL")]
    pub url: Option<String>,
    #[serde(default, alias = "Publisher")]
    pub publisher: Option<String>,
    #[serde(default, alias = "ticker", alias = "Stock")]
    pub stock: Option<String>,
}

/// A validated headline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsItem {
    pub timestamp: NewsTimestamp,
    pub headline: String,
    pub publisher: String,
    pub stock: Option<Ticker>,
    pub url: String,
}

impl NewsItem {
    pub fn new(
        timestamp: NewsTimestamp,
        headline: impl Into<String>,
        publisher: impl Into<String>,
        stock: Option<Ticker>,
        url: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let headline = headline.into();
        if headline.trim().is_empty() {
            return Err(ValidationError::MissingField { field: "headline" });
        }

        Ok(Self {
            timestamp,
            headline,
            publisher: publisher.into(),
            stock,
            url: url.into(),
        })
    }

    pub fn date(&self) -> TradingDate {
        self.timestamp.date()
    }
}
