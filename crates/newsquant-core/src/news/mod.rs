//! # News Feature Engine
//!
//! Turns raw headline rows into scored, per-day sentiment.
//!
//! | Step | Function |
//! |------|----------|
//! | Validate raw rows | [`ingest`] |
//! | Restrict to one ticker | [`filter_by_ticker`] |
//! | Headline features and sentiment | [`NewsFeatureEngine::enrich`] |
//! | Per-day mean polarity | [`daily_sentiment`] |
//! | Publisher activity | [`publisher_counts`], [`publisher_domain_counts`] |
//!
//! Headlines are grouped by the wall-clock date of their timestamp.

mod aggregate;
mod ingest;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::sentiment::{SentimentScore, SentimentScorer};
use crate::{NewsItem, TradingDate};

pub use aggregate::{
    daily_sentiment, publisher_counts, publisher_domain, publisher_domain_counts, DailySentiment,
    PublisherCount,
};
pub use ingest::{filter_by_ticker, ingest, NewsBatch};
pub(crate) use ingest::ingest_rows;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeadlineLength {
    /// Unicode scalar values.
    pub chars: usize,
    /// Whitespace-separated words.
    pub words: usize,
}

impl HeadlineLength {
    pub fn of(headline: &str) -> Self {
        Self {
            chars: headline.chars().count(),
            words: headline.split_whitespace().count(),
        }
    }
}

/// A headline with its derived features.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedNewsItem {
    #[serde(flatten)]
    pub item: NewsItem,
    pub headline_length: HeadlineLength,
    pub sentiment: SentimentScore,
    pub date: TradingDate,
    pub weekday: String,
    pub hour: u8,
    pub publisher_domain: Option<String>,
}

/// Scores headlines with an injected [`SentimentScorer`].
pub struct NewsFeatureEngine<'a> {
    scorer: &'a dyn SentimentScorer,
}

impl<'a> NewsFeatureEngine<'a> {
    pub fn new(scorer: &'a dyn SentimentScorer) -> Self {
        Self { scorer }
    }

    pub fn enrich_one(&self, item: &NewsItem) -> EnrichedNewsItem {
        let date = item.date();
        EnrichedNewsItem {
            headline_length: HeadlineLength::of(&item.headline),
            sentiment: self.scorer.score(&item.headline),
            date,
            weekday: date.weekday().to_string(),
            hour: item.timestamp.hour(),
            publisher_domain: publisher_domain(&item.publisher).map(str::to_owned),
            item: item.clone(),
        }
    }

    /// Features for every item, in input order.
    pub fn enrich(&self, items: &[NewsItem]) -> Vec<EnrichedNewsItem> {
        let enriched: Vec<EnrichedNewsItem> =
            items.iter().map(|item| self.enrich_one(item)).collect();
        debug!(items = enriched.len(), "enriched headlines");
        enriched
    }

    /// Enrich then aggregate by date.
    pub fn daily_sentiment(&self, items: &[NewsItem]) -> Vec<DailySentiment> {
        daily_sentiment(&self.enrich(items))
    }
}
