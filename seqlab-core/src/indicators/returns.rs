//! Differences and percentage changes.
//!
//! pct_change[t] = x[t] / x[t-period] - 1
//! Lookback: period.

use super::finite_or_nan;

/// Simple return over `period` steps. The first `period` values are NaN.
pub fn pct_change(values: &[f64], period: usize) -> Vec<f64> {
    let n = values.len();
    let mut result = vec![f64::NAN; n];

    for i in period..n {
        result[i] = finite_or_nan(values[i] / values[i - period] - 1.0);
    }

    result
}

/// First difference. The first value is NaN.
pub fn diff(values: &[f64]) -> Vec<f64> {
    let mut result = vec![f64::NAN; values.len()];
    for i in 1..values.len() {
        result[i] = values[i] - values[i - 1];
    }
    result
}
