use newsquant_core::{AnalysisPipeline, PipelineConfig};

use crate::cli::CorrelateArgs;
use crate::error::CliError;

use super::{resolve_config, CommandResult};

pub fn run(args: &CorrelateArgs, config: PipelineConfig) -> Result<CommandResult, CliError> {
    let config = resolve_config(config, args.ticker.as_deref())?;
    let mut report = AnalysisPipeline::new(config).run_files(&args.prices, &args.news)?;

    let warnings = std::mem::take(&mut report.warnings);
    let data = serde_json::to_value(report)?;
    Ok(CommandResult::ok(data).with_warnings(warnings))
}
