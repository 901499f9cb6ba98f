use newsquant_core::news::filter_by_ticker;
use newsquant_core::{load_news, topic_model_from_texts, PipelineConfig, TopicConfig};
use serde_json::json;

use crate::cli::TopicsArgs;
use crate::error::CliError;

use super::{resolve_config, CommandResult};

pub fn run(args: &TopicsArgs, config: PipelineConfig) -> Result<CommandResult, CliError> {
    let config = resolve_config(config, args.ticker.as_deref())?;
    let topic_config = apply_flags(config.topics, args);

    let batch = load_news(&args.news)?;
    let items = match &config.ticker {
        Some(ticker) => filter_by_ticker(&batch.items, ticker),
        None => batch.items,
    };
    let headlines: Vec<&str> = items.iter().map(|item| item.headline.as_str()).collect();

    let report = topic_model_from_texts(&headlines, &topic_config)?;
    let data = json!({
        "config": topic_config,
        "topics": report,
    });
    Ok(CommandResult::ok(data).with_warnings(batch.report.warnings("news")))
}

fn apply_flags(mut config: TopicConfig, args: &TopicsArgs) -> TopicConfig {
    if let Some(n_topics) = args.n_topics {
        config.n_topics = n_topics;
    }
    if let Some(top_words) = args.top_words {
        config.top_words = top_words;
    }
    if let Some(min_df) = args.min_df {
        config.min_df = min_df;
    }
    if let Some(max_df) = args.max_df {
        config.max_df = max_df;
    }
    if let Some(iterations) = args.iterations {
        config.iterations = iterations;
    }
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    config
}
