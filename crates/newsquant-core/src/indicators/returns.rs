//! Simple returns and rolling volatility.

use crate::stats::sample_std;

/// `(close_t - close_{t-1}) / close_{t-1}`; the first row is `None`.
pub fn daily_returns(closes: &[f64]) -> Vec<Option<f64>> {
    let mut out = Vec::with_capacity(closes.len());
    if closes.is_empty() {
        return out;
    }
    out.push(None);
    out.extend(
        closes
            .windows(2)
            .map(|pair| Some((pair[1] - pair[0]) / pair[0])),
    );
    out
}

/// Trailing sample standard deviation over `window` defined values.
///
/// A row is defined once `window` consecutive defined inputs end at it.
pub fn rolling_std(values: &[Option<f64>], window: usize) -> Vec<Option<f64>> {
    let mut out = vec![None; values.len()];
    if window < 2 || values.len() < window {
        return out;
    }

    for (offset, slice) in values.windows(window).enumerate() {
        let defined: Option<Vec<f64>> = slice.iter().copied().collect();
        out[offset + window - 1] = defined.as_deref().and_then(sample_std);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_bar_return_is_exact() {
        assert_eq!(daily_returns(&[100.0, 110.0]), vec![None, Some(0.10)]);
    }

    #[test]
    fn empty_closes_have_no_returns() {
        assert!(daily_returns(&[]).is_empty());
    }

    #[test]
    fn rolling_std_waits_for_a_full_defined_window() {
        let returns = daily_returns(&[100.0, 101.0, 100.0, 101.0, 100.0]);
        let out = rolling_std(&returns, 3);
        assert_eq!(out[..3], [None, None, None]);
        assert!(out[3].is_some());
        assert!(out[4].is_some());
    }

    #[test]
    fn constant_returns_have_zero_volatility() {
        let returns = vec![None, Some(0.01), Some(0.01), Some(0.01)];
        assert_eq!(rolling_std(&returns, 3)[3], Some(0.0));
    }
}
