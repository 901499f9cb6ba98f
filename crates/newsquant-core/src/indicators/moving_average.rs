//! Simple and exponential moving averages.

/// Trailing arithmetic mean over `window` values.
///
/// The first `window - 1` outputs are `None`; a zero window yields all `None`.
pub fn sma(values: &[f64], window: usize) -> Vec<Option<f64>> {
    let mut out = vec![None; values.len()];
    if window == 0 || values.len() < window {
        return out;
    }

    for (offset, slice) in values.windows(window).enumerate() {
        out[offset + window - 1] = Some(slice.iter().sum::<f64>() / window as f64);
    }
    out
}

/// Exponential moving average with smoothing `k = 2 / (window + 1)`.
///
/// Seeded with the simple mean of the first `window` values, so the first
/// defined output is at index `window - 1`.
pub fn ema(values: &[f64], window: usize) -> Vec<Option<f64>> {
    let mut out = vec![None; values.len()];
    if window == 0 || values.len() < window {
        return out;
    }

    let k = 2.0 / (window as f64 + 1.0);
    let mut current = values[..window].iter().sum::<f64>() / window as f64;
    out[window - 1] = Some(current);

    for (index, value) in values.iter().enumerate().skip(window) {
        current = value * k + current * (1.0 - k);
        out[index] = Some(current);
    }
    out
}

/// EMA over a series whose leading entries may be undefined.
///
/// The EMA starts at the first defined value; the defined tail is expected to
/// be contiguous, as every indicator output in this crate is.
pub(crate) fn ema_of_defined(values: &[Option<f64>], window: usize) -> Vec<Option<f64>> {
    let start = values
        .iter()
        .position(Option::is_some)
        .unwrap_or(values.len());
    let tail: Vec<f64> = values[start..].iter().map_while(|value| *value).collect();

    let mut out = vec![None; start];
    out.extend(ema(&tail, window));
    out.resize(values.len(), None);
    out
}
