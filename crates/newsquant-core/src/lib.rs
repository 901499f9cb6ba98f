//! Core analytics for newsquant.
//!
//! This crate contains:
//! - Price, headline and ticker domain models with validated construction
//! - Technical indicators over daily OHLCV bars
//! - Headline features, lexicon sentiment and per-day aggregation
//! - Sentiment/return correlation and return metrics
//! - Headline topic modeling (count vectorizer + LDA)
//! - CSV loading, pipeline configuration and the output envelope

pub mod config;
pub mod correlation;
pub mod domain;
pub mod envelope;
pub mod error;
pub mod indicators;
pub mod loader;
pub mod metrics;
pub mod news;
pub mod pipeline;
pub mod report;
pub mod sentiment;
mod stats;
pub mod topics;

pub use config::PipelineConfig;
pub use correlation::{align, correlate, pearson, AlignedObservation, CorrelationResult};
pub use domain::{
    parse_volume, validate_series, NewsItem, NewsTimestamp, PriceBar, RawNewsRecord, Ticker,
    TradingDate,
};
pub use envelope::{Envelope, EnvelopeMeta, SCHEMA_VERSION};
pub use error::{CoreError, CorrelationError, InsufficientDataError, TopicError, ValidationError};
pub use indicators::{DerivedPriceRow, IndicatorEngine};
pub use loader::{load_news, load_prices, read_news, read_prices, PriceLoad};
pub use metrics::{BasicMetrics, MetricsCalculator, ReturnMetrics};
pub use news::{
    DailySentiment, EnrichedNewsItem, HeadlineLength, NewsBatch, NewsFeatureEngine,
    PublisherCount,
};
pub use pipeline::{AnalysisPipeline, AnalysisReport};
pub use report::{IngestReport, RowRejection};
pub use sentiment::{LexiconScorer, SentimentScore, SentimentScorer};
pub use topics::{
    topic_model_from_texts, LdaModel, Topic, TopicConfig, TopicModel, TopicReport, TopicTerm,
};
