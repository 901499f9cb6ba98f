use newsquant_core::news::{daily_sentiment, filter_by_ticker, publisher_counts, publisher_domain_counts};
use newsquant_core::{
    load_news, DailySentiment, EnrichedNewsItem, IngestReport, LexiconScorer, NewsFeatureEngine,
    PipelineConfig, PublisherCount, Ticker,
};
use serde::Serialize;

use crate::cli::NewsArgs;
use crate::error::CliError;

use super::{resolve_config, CommandResult};

#[derive(Debug, Serialize)]
struct HeadlineSummary {
    mean_chars: Option<f64>,
    mean_words: Option<f64>,
    mean_polarity: Option<f64>,
}

#[derive(Debug, Serialize)]
struct NewsResponseData {
    ticker: Option<Ticker>,
    report: IngestReport,
    articles: usize,
    headlines: HeadlineSummary,
    daily_sentiment: Vec<DailySentiment>,
    publishers: Vec<PublisherCount>,
    publisher_domains: Vec<PublisherCount>,
    #[serde(skip_serializing_if = "Option::is_none")]
    items: Option<Vec<EnrichedNewsItem>>,
}

pub fn run(args: &NewsArgs, config: PipelineConfig) -> Result<CommandResult, CliError> {
    let config = resolve_config(config, args.ticker.as_deref())?;
    let batch = load_news(&args.news)?;
    let items = match &config.ticker {
        Some(ticker) => filter_by_ticker(&batch.items, ticker),
        None => batch.items,
    };

    let scorer = LexiconScorer::new();
    let enriched = NewsFeatureEngine::new(&scorer).enrich(&items);

    let mut publishers = publisher_counts(&items);
    publishers.truncate(args.top_publishers);
    let mut publisher_domains = publisher_domain_counts(&items);
    publisher_domains.truncate(args.top_publishers);

    let warnings = batch.report.warnings("news");
    let data = serde_json::to_value(NewsResponseData {
        ticker: config.ticker,
        report: batch.report,
        articles: enriched.len(),
        headlines: summarize(&enriched),
        daily_sentiment: daily_sentiment(&enriched),
        publishers,
        publisher_domains,
        items: args.items.then_some(enriched),
    })?;
    Ok(CommandResult::ok(data).with_warnings(warnings))
}

fn summarize(items: &[EnrichedNewsItem]) -> HeadlineSummary {
    let mean = |f: &dyn Fn(&EnrichedNewsItem) -> f64| {
        (!items.is_empty()).then(|| items.iter().map(f).sum::<f64>() / items.len() as f64)
    };
    HeadlineSummary {
        mean_chars: mean(&|item| item.headline_length.chars as f64),
        mean_words: mean(&|item| item.headline_length.words as f64),
        mean_polarity: mean(&|item| item.sentiment.polarity),
    }
}
