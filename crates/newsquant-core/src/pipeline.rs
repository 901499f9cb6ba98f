//! # Analysis Pipeline
//!
//! The fixed single-ticker composition: headlines are validated, filtered to
//! the configured ticker, scored and averaged per day; prices get their
//! indicators and return metrics; the two are correlated on date.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::config::PipelineConfig;
use crate::correlation::{align, correlate, AlignedObservation, CorrelationResult};
use crate::indicators::{DerivedPriceRow, IndicatorEngine};
use crate::loader::{load_news, load_prices};
use crate::metrics::{BasicMetrics, MetricsCalculator, ReturnMetrics};
use crate::news::{filter_by_ticker, ingest, DailySentiment, NewsBatch, NewsFeatureEngine};
use crate::sentiment::{LexiconScorer, SentimentScorer};
use crate::{CoreError, IngestReport, PriceBar, RawNewsRecord, Ticker};

/// Every intermediate output of one run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub ticker: Option<Ticker>,
    pub price_report: IngestReport,
    pub news_report: IngestReport,
    /// Headlines left after the ticker filter.
    pub articles: usize,
    pub price_rows: Vec<DerivedPriceRow>,
    pub metrics: ReturnMetrics,
    pub basic_metrics: BasicMetrics,
    pub daily_sentiment: Vec<DailySentiment>,
    pub aligned: Vec<AlignedObservation>,
    /// Absent when the join has too few rows or a constant series.
    pub correlation: Option<CorrelationResult>,
    pub warnings: Vec<String>,
}

pub struct AnalysisPipeline {
    config: PipelineConfig,
    scorer: Box<dyn SentimentScorer>,
}

impl Default for AnalysisPipeline {
    fn default() -> Self {
        Self::new(PipelineConfig::default())
    }
}

impl AnalysisPipeline {
    /// Pipeline scoring headlines with [`LexiconScorer`].
    pub fn new(config: PipelineConfig) -> Self {
        Self::with_scorer(config, Box::new(LexiconScorer::new()))
    }

    pub fn with_scorer(config: PipelineConfig, scorer: Box<dyn SentimentScorer>) -> Self {
        Self { config, scorer }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn run_records(
        &self,
        bars: &[PriceBar],
        records: Vec<RawNewsRecord>,
    ) -> Result<AnalysisReport, CoreError> {
        self.run(bars, ingest(records))
    }

    /// Load both CSVs and run.
    pub fn run_files(
        &self,
        prices: impl AsRef<Path>,
        news: impl AsRef<Path>,
    ) -> Result<AnalysisReport, CoreError> {
        let price_load = load_prices(prices)?;
        let news = load_news(news)?;

        let mut report = self.run(&price_load.bars, news)?;
        let mut warnings = price_load.report.warnings("prices");
        warnings.append(&mut report.warnings);
        report.warnings = warnings;
        report.price_report = price_load.report;
        Ok(report)
    }

    /// Fails only on an invalid price series; correlation problems become
    /// warnings.
    pub fn run(&self, bars: &[PriceBar], news: NewsBatch) -> Result<AnalysisReport, CoreError> {
        let mut warnings = news.report.warnings("news");

        let items = match &self.config.ticker {
            Some(ticker) => filter_by_ticker(&news.items, ticker),
            None => news.items,
        };
        if items.is_empty() {
            warnings.push("news: no headlines left after filtering".to_owned());
        }

        let engine = NewsFeatureEngine::new(&*self.scorer);
        let daily_sentiment = engine.daily_sentiment(&items);

        let price_rows = IndicatorEngine::new().compute(bars)?;
        let calculator: MetricsCalculator = self.config.metrics;
        let metrics = calculator.from_bars(bars);
        let closes: Vec<f64> = bars.iter().map(|bar| bar.close).collect();
        let basic_metrics = calculator.basic(&MetricsCalculator::returns_from_closes(&closes));

        let (correlation, aligned) = match correlate(&price_rows, &daily_sentiment) {
            Ok((result, aligned)) => (Some(result), aligned),
            Err(err) => {
                warn!(error = %err, "correlation not computed");
                warnings.push(format!("correlation: {err}"));
                (None, align(&price_rows, &daily_sentiment))
            }
        };

        info!(
            ticker = self.config.ticker.as_ref().map(Ticker::as_str).unwrap_or("*"),
            bars = bars.len(),
            articles = items.len(),
            sentiment_days = daily_sentiment.len(),
            aligned = aligned.len(),
            coefficient = correlation.as_ref().map(|c| c.coefficient),
            "analysis complete"
        );

        Ok(AnalysisReport {
            ticker: self.config.ticker.clone(),
            price_report: IngestReport::default(),
            news_report: news.report,
            articles: items.len(),
            price_rows,
            metrics,
            basic_metrics,
            daily_sentiment,
            aligned,
            correlation,
            warnings,
        })
    }
}
