//! # Return Metrics
//!
//! Return and risk summaries over a close series.
//!
//! | Metric | Definition |
//! |--------|------------|
//! | cumulative | Π(1 + r) − 1 |
//! | annualized | mean(1 + r)^trading_days − 1 |
//! | annualized volatility | sample std(r) × √trading_days |
//! | Sharpe | √trading_days × mean(r − rf / trading_days) / std(r) |
//! | max drawdown | most negative (W − peak(W)) / peak(W) over wealth W |

use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize};

use crate::stats::{mean, sample_std};
use crate::PriceBar;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReturnMetrics {
    pub cumulative_return: f64,
    pub annualized_return: f64,
    pub annualized_volatility: f64,
    pub sharpe_ratio: Option<f64>,
    /// Non-positive fraction, e.g. `-0.25` for a 25% peak-to-trough fall.
    pub max_drawdown: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BasicMetrics {
    pub mean_return: Option<f64>,
    pub volatility: Option<f64>,
    pub cumulative_return: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetricsCalculator {
    /// Annual risk-free rate.
    pub risk_free_rate: f64,
    /// Annualization factor; a config file cannot set it to zero.
    #[serde(deserialize_with = "non_zero_days")]
    pub trading_days: u32,
}

fn non_zero_days<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    match u32::deserialize(deserializer)? {
        0 => Err(D::Error::custom("trading_days must be at least 1")),
        days => Ok(days),
    }
}

impl Default for MetricsCalculator {
    fn default() -> Self {
        Self {
            risk_free_rate: 0.0,
            trading_days: 252,
        }
    }
}

impl MetricsCalculator {
    pub fn new(risk_free_rate: f64, trading_days: u32) -> Self {
        Self {
            risk_free_rate,
            trading_days,
        }
    }

    /// Close-to-close returns; one fewer than the closes.
    pub fn returns_from_closes(closes: &[f64]) -> Vec<f64> {
        closes
            .windows(2)
            .map(|pair| pair[1] / pair[0] - 1.0)
            .collect()
    }

    pub fn from_bars(&self, bars: &[PriceBar]) -> ReturnMetrics {
        let closes: Vec<f64> = bars.iter().map(|bar| bar.close).collect();
        self.compute(&Self::returns_from_closes(&closes))
    }

    pub fn compute(&self, returns: &[f64]) -> ReturnMetrics {
        if returns.is_empty() {
            return ReturnMetrics {
                cumulative_return: 0.0,
                annualized_return: 0.0,
                annualized_volatility: 0.0,
                sharpe_ratio: None,
                max_drawdown: None,
            };
        }

        let days = f64::from(self.trading_days);
        let std = sample_std(returns);
        let mean_gross = returns.iter().map(|r| 1.0 + r).sum::<f64>() / returns.len() as f64;

        ReturnMetrics {
            cumulative_return: cumulative_return(returns),
            annualized_return: mean_gross.powf(days) - 1.0,
            annualized_volatility: std.map_or(0.0, |s| s * days.sqrt()),
            sharpe_ratio: self.sharpe_ratio(returns),
            max_drawdown: max_drawdown(returns),
        }
    }

    /// Absent when volatility is zero, there are fewer than two returns, or
    /// `trading_days` is zero.
    pub fn sharpe_ratio(&self, returns: &[f64]) -> Option<f64> {
        if self.trading_days == 0 {
            return None;
        }
        let days = f64::from(self.trading_days);
        let std = sample_std(returns).filter(|s| *s > 0.0)?;
        let daily_rf = self.risk_free_rate / days;
        let excess: Vec<f64> = returns.iter().map(|r| r - daily_rf).collect();
        Some(days.sqrt() * mean(&excess)? / std)
    }

    pub fn basic(&self, returns: &[f64]) -> BasicMetrics {
        BasicMetrics {
            mean_return: mean(returns),
            volatility: sample_std(returns),
            cumulative_return: (!returns.is_empty()).then(|| cumulative_return(returns)),
        }
    }
}

pub fn cumulative_return(returns: &[f64]) -> f64 {
    returns.iter().fold(1.0, |wealth, r| wealth * (1.0 + r)) - 1.0
}

/// Deepest relative decline of cumulative wealth from its running peak.
///
/// The peak starts at wealth after the first return, so a loss on day one
/// is not a drawdown.
pub fn max_drawdown(returns: &[f64]) -> Option<f64> {
    let (first, rest) = returns.split_first()?;

    let mut wealth = 1.0 + first;
    let mut peak = wealth;
    let mut worst = 0.0_f64;
    for r in rest {
        wealth *= 1.0 + r;
        peak = peak.max(wealth);
        worst = worst.min((wealth - peak) / peak);
    }
    Some(worst)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close_to(actual: f64, expected: f64) -> bool {
        (actual - expected).abs() < 1e-12
    }

    #[test]
    fn drawdown_from_peak() {
        let returns = MetricsCalculator::returns_from_closes(&[100.0, 120.0, 90.0]);
        let dd = max_drawdown(&returns).expect("defined");
        assert!(close_to(dd, -0.25));
    }

    #[test]
    fn first_day_loss_is_not_a_drawdown() {
        assert_eq!(max_drawdown(&[-0.10, 0.0]), Some(0.0));
        let dd = max_drawdown(&[-0.10, 0.05, -0.20]).expect("defined");
        assert!(close_to(dd, -0.20));
    }

    #[test]
    fn constant_prices_have_zero_volatility_and_no_sharpe() {
        let returns = MetricsCalculator::returns_from_closes(&[50.0; 10]);
        let metrics = MetricsCalculator::default().compute(&returns);

        assert_eq!(metrics.cumulative_return, 0.0);
        assert_eq!(metrics.annualized_volatility, 0.0);
        assert_eq!(metrics.sharpe_ratio, None);
        assert_eq!(metrics.max_drawdown, Some(0.0));
    }

    #[test]
    fn cumulative_compounds_returns() {
        let metrics = MetricsCalculator::default().compute(&[0.10, -0.10]);
        assert!(close_to(metrics.cumulative_return, -0.01));
    }

    #[test]
    fn annualized_uses_mean_gross_return() {
        let metrics = MetricsCalculator::new(0.0, 2).compute(&[0.10, 0.30]);
        assert!(close_to(metrics.annualized_return, 1.2_f64.powi(2) - 1.0));
    }

    #[test]
    fn sharpe_subtracts_daily_risk_free_rate() {
        let returns = [0.01, 0.02, 0.03];
        let plain = MetricsCalculator::default()
            .sharpe_ratio(&returns)
            .expect("defined");
        let with_rf = MetricsCalculator::new(0.252, 252)
            .sharpe_ratio(&returns)
            .expect("defined");

        let std = sample_std(&returns).expect("std");
        assert!(close_to(plain, 252_f64.sqrt() * 0.02 / std));
        assert!(close_to(with_rf, 252_f64.sqrt() * 0.019 / std));
    }

    #[test]
    fn zero_trading_days_never_yield_a_sharpe_ratio() {
        let metrics = MetricsCalculator::new(0.02, 0).compute(&[0.01, 0.02, 0.03]);
        assert_eq!(metrics.sharpe_ratio, None);
    }

    #[test]
    fn empty_returns_give_zeros() {
        let metrics = MetricsCalculator::default().compute(&[]);
        assert_eq!(metrics.cumulative_return, 0.0);
        assert_eq!(metrics.annualized_return, 0.0);
        assert_eq!(metrics.max_drawdown, None);
        assert_eq!(
            MetricsCalculator::default().basic(&[]),
            BasicMetrics {
                mean_return: None,
                volatility: None,
                cumulative_return: None
            }
        );
    }

    #[test]
    fn single_return_has_no_volatility() {
        let basic = MetricsCalculator::default().basic(&[0.05]);
        assert_eq!(basic.mean_return, Some(0.05));
        assert_eq!(basic.volatility, None);
        assert!(basic.cumulative_return.is_some_and(|c| close_to(c, 0.05)));
    }
}
