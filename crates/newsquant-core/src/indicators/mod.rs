//! # Indicator Engine
//!
//! Appends technical indicators to a validated daily price series.
//!
//! | Column | Definition | First defined row |
//! |--------|------------|-------------------|
//! | `sma_20` / `sma_50` | trailing mean of close | 19 / 49 |
//! | `rsi_14` | Wilder RSI over 14 changes | 14 |
//! | `macd` | EMA(12) − EMA(26) | 25 |
//! | `macd_signal` | EMA(9) of `macd` | 33 |
//! | `macd_hist` | `macd` − `macd_signal` | 33 |
//! | `daily_return` | simple close-to-close return | 1 |
//! | `volatility_20` | sample std of 20 daily returns | 20 |
//!
//! EMAs are seeded with the simple mean of their first window.

mod macd;
mod moving_average;
mod returns;
mod rsi;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{validate_series, PriceBar, ValidationError};

pub use macd::{macd, MacdSeries};
pub use moving_average::{ema, sma};
pub use returns::{daily_returns, rolling_std};
pub use rsi::rsi;

/// A price bar with its derived indicator columns.
///
/// `None` marks rows without enough history for that column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DerivedPriceRow {
    #[serde(flatten)]
    pub bar: PriceBar,
    pub sma_20: Option<f64>,
    pub sma_50: Option<f64>,
    pub rsi_14: Option<f64>,
    pub macd: Option<f64>,
    pub macd_signal: Option<f64>,
    pub macd_hist: Option<f64>,
    pub daily_return: Option<f64>,
    pub volatility_20: Option<f64>,
}

/// Stateless calculator for the fixed indicator set.
#[derive(Debug, Clone, Copy, Default)]
pub struct IndicatorEngine;

impl IndicatorEngine {
    pub const SMA_SHORT: usize = 20;
    pub const SMA_LONG: usize = 50;
    pub const RSI_WINDOW: usize = 14;
    pub const MACD_FAST: usize = 12;
    pub const MACD_SLOW: usize = 26;
    pub const MACD_SIGNAL: usize = 9;
    pub const VOLATILITY_WINDOW: usize = 20;

    pub fn new() -> Self {
        Self
    }

    /// Compute every indicator column.
    ///
    /// Fails when the batch is empty, holds a non-positive price, or its
    /// dates are not strictly ascending.
    pub fn compute(&self, bars: &[PriceBar]) -> Result<Vec<DerivedPriceRow>, ValidationError> {
        validate_series(bars)?;

        let closes: Vec<f64> = bars.iter().map(|bar| bar.close).collect();
        let sma_short = sma(&closes, Self::SMA_SHORT);
        let sma_long = sma(&closes, Self::SMA_LONG);
        let rsi = rsi(&closes, Self::RSI_WINDOW);
        let macd = macd(
            &closes,
            Self::MACD_FAST,
            Self::MACD_SLOW,
            Self::MACD_SIGNAL,
        );
        let returns = daily_returns(&closes);
        let volatility = rolling_std(&returns, Self::VOLATILITY_WINDOW);

        debug!(
            rows = bars.len(),
            first = %bars[0].date,
            last = %bars[bars.len() - 1].date,
            "computed indicators"
        );

        Ok(bars
            .iter()
            .enumerate()
            .map(|(i, bar)| DerivedPriceRow {
                bar: bar.clone(),
                sma_20: sma_short[i],
                sma_50: sma_long[i],
                rsi_14: rsi[i],
                macd: macd.macd[i],
                macd_signal: macd.signal[i],
                macd_hist: macd.histogram[i],
                daily_return: returns[i],
                volatility_20: volatility[i],
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TradingDate;

    fn series(closes: &[f64]) -> Vec<PriceBar> {
        closes
            .iter()
            .enumerate()
            .map(|(i, close)| {
                let date = TradingDate::from(
                    time::Date::from_calendar_date(2023, time::Month::January, 1)
                        .expect("base date")
                        + time::Duration::days(i as i64),
                );
                PriceBar::from_close(date, *close).expect("valid bar")
            })
            .collect()
    }

    #[test]
    fn rows_mirror_input_bars() {
        let bars = series(&[10.0, 20.0, 30.0, 40.0]);
        let rows = IndicatorEngine::new().compute(&bars).expect("valid series");
        assert_eq!(rows.len(), 4);
        for (row, bar) in rows.iter().zip(&bars) {
            assert_eq!(&row.bar, bar);
        }
        assert_eq!(rows[1].daily_return, Some(1.0));
    }

    #[test]
    fn short_series_leaves_windowed_columns_undefined() {
        let bars = series(&[10.0, 11.0, 12.0]);
        let rows = IndicatorEngine::new().compute(&bars).expect("valid series");
        assert!(rows.iter().all(|r| r.sma_20.is_none()
            && r.sma_50.is_none()
            && r.rsi_14.is_none()
            && r.macd.is_none()
            && r.volatility_20.is_none()));
    }

    #[test]
    fn first_sma_20_equals_mean_of_first_twenty_closes() {
        let pattern = [100.0, 101.0, 102.0, 101.0, 103.0, 104.0, 103.0, 105.0, 106.0, 107.0];
        let closes: Vec<f64> = pattern.iter().cycle().take(100).copied().collect();
        let rows = IndicatorEngine::new()
            .compute(&series(&closes))
            .expect("valid series");

        let expected = closes[..20].iter().sum::<f64>() / 20.0;
        assert_eq!(rows[19].sma_20, Some(expected));
        assert!(rows[18].sma_20.is_none());
        assert!(rows[48].sma_50.is_none());
        assert!(rows[49].sma_50.is_some());
        assert!(rows
            .iter()
            .filter_map(|r| r.rsi_14)
            .all(|v| (0.0..=100.0).contains(&v)));
    }

    #[test]
    fn empty_input_is_a_validation_error() {
        assert_eq!(
            IndicatorEngine::new().compute(&[]),
            Err(ValidationError::EmptySeries)
        );
    }

    #[test]
    fn serializes_bar_fields_inline() {
        let rows = IndicatorEngine::new()
            .compute(&series(&[100.0]))
            .expect("valid series");
        let value = serde_json::to_value(&rows[0]).expect("serialize");
        assert_eq!(value["close"], 100.0);
        assert_eq!(value["date"], "2023-01-01");
        assert!(value["sma_20"].is_null());
    }
}
