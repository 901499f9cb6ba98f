use newsquant_core::{load_prices, DerivedPriceRow, IndicatorEngine, IngestReport};
use serde::Serialize;

use crate::cli::IndicatorsArgs;
use crate::error::CliError;

use super::CommandResult;

#[derive(Debug, Serialize)]
struct IndicatorsResponseData {
    rows: Vec<DerivedPriceRow>,
    report: IngestReport,
}

pub fn run(args: &IndicatorsArgs) -> Result<CommandResult, CliError> {
    let load = load_prices(&args.prices)?;
    let mut rows = IndicatorEngine::new().compute(&load.bars)?;
    if let Some(tail) = args.tail {
        rows.drain(..rows.len().saturating_sub(tail));
    }

    let warnings = load.report.warnings("prices");
    let data = serde_json::to_value(IndicatorsResponseData {
        rows,
        report: load.report,
    })?;
    Ok(CommandResult::ok(data).with_warnings(warnings))
}
