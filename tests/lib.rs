// Shared fixtures for the behavior tests
use std::fs;
use std::path::{Path, PathBuf};

pub use newsquant_core::{PriceBar, TradingDate};

use time::{Date, Duration, Month};

/// Consecutive calendar dates starting 2024-01-01.
pub fn dates(count: usize) -> Vec<Date> {
    let start = Date::from_calendar_date(2024, Month::January, 1).expect("valid start date");
    (0..count)
        .map(|i| start + Duration::days(i as i64))
        .collect()
}

/// Flat bars (open = high = low = close) on consecutive dates.
pub fn bars(closes: &[f64]) -> Vec<PriceBar> {
    dates(closes.len())
        .into_iter()
        .zip(closes)
        .map(|(date, close)| PriceBar::from_close(TradingDate::from(date), *close).expect("bar"))
        .collect()
}

/// A wavy, upward-drifting close series that is always positive.
pub fn wavy_closes(count: usize) -> Vec<f64> {
    (0..count)
        .map(|i| {
            let t = i as f64;
            100.0 + 0.2 * t + 5.0 * (t * 0.7).sin()
        })
        .collect()
}

/// Price CSV in the Yahoo export layout.
pub fn price_csv(closes: &[f64]) -> String {
    let mut csv = String::from("Date,Open,High,Low,Close,Adj Close,Volume\n");
    for (date, close) in dates(closes.len()).into_iter().zip(closes) {
        csv.push_str(&format!(
            "{date},{open:.4},{high:.4},{low:.4},{close:.4},{close:.4},{volume}\n",
            open = close,
            high = close + 1.0,
            low = close - 1.0,
            volume = 1_000_000
        ));
    }
    csv
}

pub fn write_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).expect("fixture should be writable");
    path
}
