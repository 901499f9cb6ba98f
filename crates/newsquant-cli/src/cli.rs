//! CLI argument definitions for newsquant.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `indicators` | SMA, RSI, MACD, returns and volatility for a price CSV |
//! | `news` | Headline features, sentiment and publisher activity |
//! | `topics` | LDA topics over headlines |
//! | `metrics` | Return and risk summary for a price CSV |
//! | `correlate` | Daily sentiment vs daily return correlation |
//! | `analyze` | Full single-ticker run |
//!
//! # Global Options
//!
//! | Option | Default | Description |
//! |--------|---------|-------------|
//! | `--format` | `json` | Output format (json, table) |
//! | `--pretty` | `false` | Pretty-print JSON output |
//! | `--strict` | `false` | Treat warnings as failures (exit 5) |
//! | `--config` | none | JSON pipeline config file |
//! | `-v` | warn | Log verbosity on stderr (`-v` info, `-vv` debug) |
//!
//! # Examples
//!
//! ```bash
//! newsquant indicators --prices data/AAPL.csv --pretty
//! newsquant correlate --prices data/AAPL.csv --news data/raw_analyst_ratings.csv --ticker AAPL
//! newsquant topics --news data/raw_analyst_ratings.csv --topics 8 --strict
//! ```

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Debug, Parser)]
#[command(
    name = "newsquant",
    author,
    version,
    about = "News sentiment and technical indicator analytics over CSV data"
)]
pub struct Cli {
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    /// Pretty-print JSON output with indentation.
    #[arg(long, global = true, default_value_t = false)]
    pub pretty: bool,

    /// Treat warnings such as skipped rows as failures (exit code 5).
    #[arg(long, global = true, default_value_t = false)]
    pub strict: bool,

    /// Pipeline config file (JSON). Flags override its fields.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Increase log verbosity; logs go to stderr. `RUST_LOG` applies otherwise.
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Single JSON object.
    Json,
    /// Plain-text table for terminals.
    Table,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Compute technical indicators for a price CSV.
    ///
    ///   newsquant indicators --prices AAPL.csv
    Indicators(IndicatorsArgs),

    /// Score headlines and aggregate sentiment per day.
    ///
    ///   newsquant news --news ratings.csv --ticker AAPL
    News(NewsArgs),

    /// Fit an LDA topic model over headlines.
    ///
    ///   newsquant topics --news ratings.csv --topics 5 --top-words 10
    Topics(TopicsArgs),

    /// Summarize returns, volatility, Sharpe ratio and drawdown.
    ///
    ///   newsquant metrics --prices AAPL.csv
    Metrics(MetricsArgs),

    /// Correlate daily sentiment with daily returns.
    ///
    ///   newsquant correlate --prices AAPL.csv --news ratings.csv --ticker AAPL
    Correlate(CorrelateArgs),

    /// Run indicators, sentiment, metrics and correlation in one pass.
    ///
    ///   newsquant analyze --prices AAPL.csv --news ratings.csv --ticker AAPL
    Analyze(CorrelateArgs),
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Indicators(_) => "indicators",
            Self::News(_) => "news",
            Self::Topics(_) => "topics",
            Self::Metrics(_) => "metrics",
            Self::Correlate(_) => "correlate",
            Self::Analyze(_) => "analyze",
        }
    }
}

#[derive(Debug, Clone, Args)]
pub struct IndicatorsArgs {
    /// OHLCV CSV with Date, Open, High, Low, Close, Volume columns.
    #[arg(long)]
    pub prices: PathBuf,

    /// Only emit the last N rows.
    #[arg(long)]
    pub tail: Option<usize>,
}

#[derive(Debug, Clone, Args)]
pub struct NewsArgs {
    /// Headline CSV with date, headline, url, publisher, stock columns.
    #[arg(long)]
    pub news: PathBuf,

    /// Keep only headlines for this ticker.
    #[arg(long)]
    pub ticker: Option<String>,

    /// Include every enriched headline in the output.
    #[arg(long, default_value_t = false)]
    pub items: bool,

    /// Number of publishers to list.
    #[arg(long, default_value_t = 10)]
    pub top_publishers: usize,
}

#[derive(Debug, Clone, Args)]
pub struct TopicsArgs {
    #[arg(long)]
    pub news: PathBuf,

    #[arg(long)]
    pub ticker: Option<String>,

    /// Number of topics.
    #[arg(long = "topics")]
    pub n_topics: Option<usize>,

    /// Terms listed per topic.
    #[arg(long)]
    pub top_words: Option<usize>,

    /// Minimum number of headlines a term must appear in.
    #[arg(long)]
    pub min_df: Option<usize>,

    /// Maximum fraction of headlines a term may appear in.
    #[arg(long)]
    pub max_df: Option<f64>,

    /// Gibbs sampling sweeps.
    #[arg(long)]
    pub iterations: Option<usize>,

    #[arg(long)]
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, Args)]
pub struct MetricsArgs {
    #[arg(long)]
    pub prices: PathBuf,

    /// Annual risk-free rate, e.g. 0.02.
    #[arg(long)]
    pub risk_free_rate: Option<f64>,

    /// Trading days per year used for annualization.
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub trading_days: Option<u32>,
}

#[derive(Debug, Clone, Args)]
pub struct CorrelateArgs {
    #[arg(long)]
    pub prices: PathBuf,

    #[arg(long)]
    pub news: PathBuf,

    #[arg(long)]
    pub ticker: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "newsquant",
            "topics",
            "--news",
            "n.csv",
            "--topics",
            "3",
            "--strict",
            "-vv",
            "--format",
            "table",
        ])
        .expect("valid args");

        assert!(cli.strict);
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.format, OutputFormat::Table);
        match cli.command {
            Command::Topics(args) => assert_eq!(args.n_topics, Some(3)),
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn zero_trading_days_is_rejected() {
        let parse = |days: &str| {
            Cli::try_parse_from([
                "newsquant",
                "metrics",
                "--prices",
                "p.csv",
                "--trading-days",
                days,
            ])
        };
        assert!(parse("0").is_err());
        match parse("365").expect("valid args").command {
            Command::Metrics(args) => assert_eq!(args.trading_days, Some(365)),
            other => panic!("unexpected command {other:?}"),
        }
    }
}
