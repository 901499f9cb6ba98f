use newsquant_core::news::filter_by_ticker;
use newsquant_core::{
    correlate, load_news, load_prices, IndicatorEngine, LexiconScorer, NewsFeatureEngine,
    PipelineConfig,
};
use serde_json::json;

use crate::cli::CorrelateArgs;
use crate::error::CliError;

use super::{resolve_config, CommandResult};

/// Unlike `analyze`, a join that is too small or constant is an error here.
pub fn run(args: &CorrelateArgs, config: PipelineConfig) -> Result<CommandResult, CliError> {
    let config = resolve_config(config, args.ticker.as_deref())?;

    let prices = load_prices(&args.prices)?;
    let rows = IndicatorEngine::new().compute(&prices.bars)?;

    let news = load_news(&args.news)?;
    let items = match &config.ticker {
        Some(ticker) => filter_by_ticker(&news.items, ticker),
        None => news.items,
    };
    let scorer = LexiconScorer::new();
    let daily = NewsFeatureEngine::new(&scorer).daily_sentiment(&items);

    let (correlation, aligned) = correlate(&rows, &daily)?;

    let mut warnings = prices.report.warnings("prices");
    warnings.extend(news.report.warnings("news"));
    let data = json!({
        "ticker": config.ticker,
        "correlation": correlation,
        "aligned": aligned,
    });
    Ok(CommandResult::ok(data).with_warnings(warnings))
}
