use newsquant_core::{load_prices, MetricsCalculator, PipelineConfig};
use serde_json::json;

use crate::cli::MetricsArgs;
use crate::error::CliError;

use super::CommandResult;

pub fn run(args: &MetricsArgs, config: PipelineConfig) -> Result<CommandResult, CliError> {
    let mut calculator = config.metrics;
    if let Some(rate) = args.risk_free_rate {
        calculator.risk_free_rate = rate;
    }
    if let Some(days) = args.trading_days {
        calculator.trading_days = days;
    }

    let load = load_prices(&args.prices)?;
    let closes: Vec<f64> = load.bars.iter().map(|bar| bar.close).collect();
    let returns = MetricsCalculator::returns_from_closes(&closes);

    let data = json!({
        "parameters": calculator,
        "bars": load.bars.len(),
        "first_date": load.bars.first().map(|bar| bar.date),
        "last_date": load.bars.last().map(|bar| bar.date),
        "metrics": calculator.compute(&returns),
        "basic": calculator.basic(&returns),
    });
    Ok(CommandResult::ok(data).with_warnings(load.report.warnings("prices")))
}
