//! # Correlation Step
//!
//! Inner-joins daily returns with daily sentiment and measures their Pearson
//! correlation. Days missing from either side, and the first price row
//! (which has no return), drop out of the join.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use statrs::distribution::{ContinuousCDF, StudentsT};
use tracing::debug;

use crate::indicators::DerivedPriceRow;
use crate::news::DailySentiment;
use crate::stats::{is_constant, sample_covariance, sample_std};
use crate::{CorrelationError, InsufficientDataError, TradingDate};

/// One date present in both series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlignedObservation {
    pub date: TradingDate,
    pub mean_sentiment: f64,
    pub article_count: usize,
    pub daily_return: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelationResult {
    pub coefficient: f64,
    pub sample_size: usize,
    /// Two-sided Student-t p-value; absent with only two observations.
    pub p_value: Option<f64>,
    pub first_date: TradingDate,
    pub last_date: TradingDate,
}

/// Join on date, ordered like `prices`.
pub fn align(prices: &[DerivedPriceRow], sentiment: &[DailySentiment]) -> Vec<AlignedObservation> {
    let by_date: HashMap<TradingDate, &DailySentiment> =
        sentiment.iter().map(|day| (day.date, day)).collect();

    prices
        .iter()
        .filter_map(|row| {
            let daily_return = row.daily_return?;
            let day = by_date.get(&row.bar.date)?;
            Some(AlignedObservation {
                date: row.bar.date,
                mean_sentiment: day.mean_sentiment,
                article_count: day.article_count,
                daily_return,
            })
        })
        .collect()
}

/// Pearson correlation of `daily_return` against `mean_sentiment`.
pub fn correlate(
    prices: &[DerivedPriceRow],
    sentiment: &[DailySentiment],
) -> Result<(CorrelationResult, Vec<AlignedObservation>), CorrelationError> {
    let aligned = align(prices, sentiment);
    debug!(
        price_rows = prices.len(),
        sentiment_days = sentiment.len(),
        aligned = aligned.len(),
        "aligned returns with sentiment"
    );
    let result = correlate_aligned(&aligned)?;
    Ok((result, aligned))
}

pub fn correlate_aligned(
    aligned: &[AlignedObservation],
) -> Result<CorrelationResult, CorrelationError> {
    let (first, last) = match aligned {
        [first, .., last] => (first, last),
        _ => {
            return Err(
                InsufficientDataError::new("sentiment/return correlation", 2, aligned.len()).into(),
            )
        }
    };

    let returns: Vec<f64> = aligned.iter().map(|o| o.daily_return).collect();
    let sentiment: Vec<f64> = aligned.iter().map(|o| o.mean_sentiment).collect();
    let coefficient = pearson(&returns, &sentiment)?;

    Ok(CorrelationResult {
        coefficient,
        sample_size: aligned.len(),
        p_value: p_value(coefficient, aligned.len()),
        first_date: first.date,
        last_date: last.date,
    })
}

/// Pearson product-moment correlation of two equal-length series.
pub fn pearson(x: &[f64], y: &[f64]) -> Result<f64, CorrelationError> {
    if x.len() != y.len() {
        return Err(CorrelationError::LengthMismatch {
            left: x.len(),
            right: y.len(),
        });
    }
    let n = x.len();
    if n < 2 {
        return Err(InsufficientDataError::new("pearson correlation", 2, n).into());
    }

    if is_constant(x) {
        return Err(CorrelationError::ConstantSeries {
            series: "daily_return",
            sample_size: n,
        });
    }
    if is_constant(y) {
        return Err(CorrelationError::ConstantSeries {
            series: "mean_sentiment",
            sample_size: n,
        });
    }

    let undefined = || InsufficientDataError::new("pearson correlation", 2, n);
    let cov = sample_covariance(x, y).ok_or_else(undefined)?;
    let std_x = sample_std(x).ok_or_else(undefined)?;
    let std_y = sample_std(y).ok_or_else(undefined)?;

    Ok((cov / (std_x * std_y)).clamp(-1.0, 1.0))
}

/// Two-sided p-value of `H0: rho = 0` with `n - 2` degrees of freedom.
fn p_value(r: f64, n: usize) -> Option<f64> {
    if n <= 2 {
        return None;
    }
    let df = (n - 2) as f64;
    let denom = 1.0 - r * r;
    if denom <= 0.0 {
        return Some(0.0);
    }
    let t = r * (df / denom).sqrt();
    let dist = StudentsT::new(0.0, 1.0, df).ok()?;
    Some((2.0 * (1.0 - dist.cdf(t.abs()))).clamp(0.0, 1.0))
}
