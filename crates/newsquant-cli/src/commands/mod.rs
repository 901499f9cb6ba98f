mod analyze;
mod correlate;
mod indicators;
mod metrics;
mod news;
mod topics;

use std::time::Instant;

use newsquant_core::{Envelope, EnvelopeMeta, PipelineConfig, Ticker};
use serde_json::Value;

use crate::cli::{Cli, Command};
use crate::error::CliError;

pub struct CommandResult {
    pub data: Value,
    pub warnings: Vec<String>,
}

impl CommandResult {
    pub fn ok(data: Value) -> Self {
        Self {
            data,
            warnings: Vec::new(),
        }
    }

    pub fn with_warnings(mut self, warnings: Vec<String>) -> Self {
        self.warnings.extend(warnings);
        self
    }
}

pub fn run(cli: &Cli) -> Result<Envelope<Value>, CliError> {
    let started = Instant::now();
    let config = match &cli.config {
        Some(path) => PipelineConfig::from_json_file(path)?,
        None => PipelineConfig::default(),
    };

    let CommandResult { data, warnings } = match &cli.command {
        Command::Indicators(args) => indicators::run(args)?,
        Command::News(args) => news::run(args, config)?,
        Command::Topics(args) => topics::run(args, config)?,
        Command::Metrics(args) => metrics::run(args, config)?,
        Command::Correlate(args) => correlate::run(args, config)?,
        Command::Analyze(args) => analyze::run(args, config)?,
    };

    let elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
    let mut meta = EnvelopeMeta::new(cli.command.name(), elapsed_ms)?;
    for warning in warnings {
        meta.push_warning(warning);
    }

    Ok(Envelope::success(meta, data))
}

/// Apply a `--ticker` flag on top of the configured ticker.
fn resolve_config(config: PipelineConfig, ticker: Option<&str>) -> Result<PipelineConfig, CliError> {
    let ticker = ticker.map(Ticker::parse).transpose()?;
    Ok(config.with_ticker(ticker))
}
