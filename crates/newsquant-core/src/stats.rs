//! Small descriptive statistics shared by the metric, indicator and
//! correlation stages, wrapping `statrs` so degenerate inputs become `None`
//! instead of NaN.

use statrs::statistics::Statistics;

pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().mean())
}

/// Sample standard deviation (`n - 1` denominator); needs two values.
pub fn sample_std(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    Some(values.iter().std_dev())
}

/// Sample covariance of two equal-length series; needs two pairs.
pub fn sample_covariance(x: &[f64], y: &[f64]) -> Option<f64> {
    if x.len() != y.len() || x.len() < 2 {
        return None;
    }
    Some(x.iter().covariance(y.iter()))
}

/// Every value equal to the first; empty series count as constant.
pub fn is_constant(values: &[f64]) -> bool {
    values.iter().all(|v| values.first() == Some(v))
}
