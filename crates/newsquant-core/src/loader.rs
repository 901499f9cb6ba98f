//! # Loading
//!
//! CSV readers for the price and headline files. Bad rows are skipped and
//! counted in an [`IngestReport`]; only an unreadable file or header fails
//! the load. Row numbers count data rows from 1, excluding the header.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::news::{ingest_rows, NewsBatch};
use crate::{parse_volume, CoreError, IngestReport, PriceBar, RawNewsRecord, TradingDate};

#[derive(Debug, Deserialize)]
struct RawPriceRecord {
    #[serde(default, alias = "Date", alias = "DATE")]
    date: Option<String>,
    #[serde(default, alias = "Open", alias = "OPEN")]
    open: Option<f64>,
    #[serde(default, alias = "High", alias = "HIGH")]
    high: Option<f64>,
    #[serde(default, alias = "Low", alias = "LOW")]
    low: Option<f64>,
    #[serde(default, alias = "Close", alias = "CLOSE")]
    close: Option<f64>,
    #[serde(default, alias = "Volume", alias = "VOLUME")]
    volume: Option<f64>,
}

impl RawPriceRecord {
    fn into_bar(self) -> Result<PriceBar, crate::ValidationError> {
        use crate::ValidationError::MissingField;

        let date = self.date.ok_or(MissingField { field: "date" })?;
        PriceBar::new(
            TradingDate::parse(&date)?,
            self.open.ok_or(MissingField { field: "open" })?,
            self.high.ok_or(MissingField { field: "high" })?,
            self.low.ok_or(MissingField { field: "low" })?,
            self.close.ok_or(MissingField { field: "close" })?,
            parse_volume(self.volume.ok_or(MissingField { field: "volume" })?)?,
        )
    }
}

/// Bars sorted by date, one per date.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PriceLoad {
    pub bars: Vec<PriceBar>,
    pub report: IngestReport,
}

fn csv_reader<R: Read>(reader: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader)
}

/// Parse an OHLCV CSV. Later rows repeating a date are rejected.
pub fn read_prices<R: Read>(reader: R) -> Result<PriceLoad, csv::Error> {
    let mut reader = csv_reader(reader);
    reader.headers()?;

    let mut report = IngestReport::default();
    let mut by_date: BTreeMap<TradingDate, PriceBar> = BTreeMap::new();

    for (index, result) in reader.deserialize::<RawPriceRecord>().enumerate() {
        let row = index + 1;
        report.total_rows += 1;

        let bar = match result {
            Ok(raw) => raw.into_bar().map_err(|err| err.to_string()),
            Err(err) => Err(err.to_string()),
        };
        match bar {
            Ok(bar) if by_date.contains_key(&bar.date) => {
                warn!(row, date = %bar.date, "rejecting duplicate price date");
                report.reject(row, format!("duplicate date {}", bar.date));
            }
            Ok(bar) => {
                report.accepted += 1;
                by_date.insert(bar.date, bar);
            }
            Err(reason) => {
                warn!(row, %reason, "rejecting price row");
                report.reject(row, reason);
            }
        }
    }

    Ok(PriceLoad {
        bars: by_date.into_values().collect(),
        report,
    })
}

/// Parse a headline CSV; unknown columns such as a pandas index are ignored.
pub fn read_news<R: Read>(reader: R) -> Result<NewsBatch, csv::Error> {
    let mut reader = csv_reader(reader);
    reader.headers()?;

    let mut decoded = Vec::new();
    let mut undecodable = Vec::new();
    for (index, result) in reader.deserialize::<RawNewsRecord>().enumerate() {
        match result {
            Ok(record) => decoded.push((index + 1, record)),
            Err(err) => {
                debug!(row = index + 1, error = %err, "undecodable news row");
                undecodable.push((index + 1, err.to_string()));
            }
        }
    }

    let mut batch = ingest_rows(decoded);
    batch.report.total_rows += undecodable.len();
    for (row, reason) in undecodable {
        warn!(row, %reason, "rejecting news row");
        batch.report.reject(row, reason);
    }
    batch.report.rejected.sort_by_key(|rejection| rejection.row);
    Ok(batch)
}

pub fn load_prices(path: impl AsRef<Path>) -> Result<PriceLoad, CoreError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|err| CoreError::io(path, err))?;
    let load = read_prices(BufReader::new(file)).map_err(|err| CoreError::csv(path, err))?;
    info!(
        path = %path.display(),
        bars = load.bars.len(),
        skipped = load.report.skipped(),
        "loaded prices"
    );
    Ok(load)
}

pub fn load_news(path: impl AsRef<Path>) -> Result<NewsBatch, CoreError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|err| CoreError::io(path, err))?;
    let batch = read_news(BufReader::new(file)).map_err(|err| CoreError::csv(path, err))?;
    info!(
        path = %path.display(),
        items = batch.items.len(),
        skipped = batch.report.skipped(),
        "loaded news"
    );
    Ok(batch)
}
