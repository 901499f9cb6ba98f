//! Relative Strength Index with Wilder smoothing.

/// RSI over `window` price changes.
///
/// Average gain and loss are seeded with the simple mean of the first
/// `window` changes and then smoothed as `(prev * (n - 1) + x) / n`. The first
/// defined value is at index `window`. A zero average loss yields 100.
pub fn rsi(closes: &[f64], window: usize) -> Vec<Option<f64>> {
    let mut out = vec![None; closes.len()];
    if window == 0 || closes.len() <= window {
        return out;
    }

    let (gains, losses): (Vec<f64>, Vec<f64>) = closes
        .windows(2)
        .map(|pair| {
            let change = pair[1] - pair[0];
            (change.max(0.0), (-change).max(0.0))
        })
        .unzip();

    let n = window as f64;
    let mut avg_gain = gains[..window].iter().sum::<f64>() / n;
    let mut avg_loss = losses[..window].iter().sum::<f64>() / n;
    out[window] = Some(strength_index(avg_gain, avg_loss));

    for change in window..gains.len() {
        avg_gain = (avg_gain * (n - 1.0) + gains[change]) / n;
        avg_loss = (avg_loss * (n - 1.0) + losses[change]) / n;
        out[change + 1] = Some(strength_index(avg_gain, avg_loss));
    }
    out
}

fn strength_index(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_loss == 0.0 {
        return 100.0;
    }
    let rs = avg_gain / avg_loss;
    (100.0 - 100.0 / (1.0 + rs)).clamp(0.0, 100.0)
}
