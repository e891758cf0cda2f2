//! Relative Strength Index (RSI), normalized to [0, 1].
//!
//! delta = diff(x); gain = mean(max(delta, 0)) and loss = mean(max(-delta, 0))
//! over a simple rolling window of `period` deltas.
//! RSI = (100 - 100 / (1 + gain / (loss + eps))) / 100
//! Lookback: period (one diff plus period - 1 further deltas).
//! Edge cases: no movement at all gives rs = 0 and RSI = 0.

use super::{diff, rolling_mean};

/// Guard added to the average loss so a window of pure gains stays finite.
pub const RSI_EPSILON: f64 = 1e-10;

pub fn rsi_of_series(values: &[f64], period: usize) -> Vec<f64> {
    let delta = diff(values);
    let gains: Vec<f64> = delta
        .iter()
        .map(|&d| if d.is_nan() { d } else { d.max(0.0) })
        .collect();
    let losses: Vec<f64> = delta
        .iter()
        .map(|&d| if d.is_nan() { d } else { (-d).max(0.0) })
        .collect();

    let avg_gain = rolling_mean(&gains, period);
    let avg_loss = rolling_mean(&losses, period);

    avg_gain
        .iter()
        .zip(&avg_loss)
        .map(|(&g, &l)| {
            let rs = g / (l + RSI_EPSILON);
            (100.0 - 100.0 / (1.0 + rs)) / 100.0
        })
        .collect()
}
