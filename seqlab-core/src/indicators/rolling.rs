//! Fixed-window rolling statistics.
//!
//! Each window is summed directly rather than through a running total, so
//! results do not drift and a NaN only poisons the windows that contain it.
//! Lookback: window - 1 (first valid value at index window-1).

fn window_values(values: &[f64], end: usize, window: usize) -> Option<&[f64]> {
    let slice = &values[end + 1 - window..=end];
    if slice.iter().any(|v| v.is_nan()) {
        None
    } else {
        Some(slice)
    }
}

/// Rolling arithmetic mean.
pub fn rolling_mean(values: &[f64], window: usize) -> Vec<f64> {
    let n = values.len();
    let mut result = vec![f64::NAN; n];

    if window == 0 || n < window {
        return result;
    }

    for i in (window - 1)..n {
        if let Some(slice) = window_values(values, i, window) {
            result[i] = slice.iter().sum::<f64>() / window as f64;
        }
    }

    result
}

/// Rolling sample standard deviation (denominator `window - 1`).
///
/// A window of 1 has no sample deviation and yields NaN throughout.
pub fn rolling_std(values: &[f64], window: usize) -> Vec<f64> {
    let n = values.len();
    let mut result = vec![f64::NAN; n];

    if window < 2 || n < window {
        return result;
    }

    for i in (window - 1)..n {
        if let Some(slice) = window_values(values, i, window) {
            let mean = slice.iter().sum::<f64>() / window as f64;
            let ss: f64 = slice.iter().map(|v| (v - mean) * (v - mean)).sum();
            result[i] = (ss / (window - 1) as f64).sqrt();
        }
    }

    result
}
