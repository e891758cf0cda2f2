//! Series helpers shared by the feature families.
//!
//! Every function takes a full series and returns a series of the same
//! length. Leading positions without enough history are `f64::NAN`, and any
//! arithmetic that is not finite (division by zero) is written as NaN so the
//! pipeline's single warm-up trim removes it. No value at index t depends on
//! an input after t.

pub mod ema;
pub mod returns;
pub mod rolling;
pub mod rsi;

pub use ema::ema_of_series;
pub use returns::{diff, pct_change};
pub use rolling::{rolling_mean, rolling_std};
pub use rsi::{rsi_of_series, RSI_EPSILON};

/// Map infinities produced by `x / 0` to NaN.
pub(crate) fn finite_or_nan(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        f64::NAN
    }
}

/// Element-wise `numerator / denominator` with non-finite results as NaN.
pub(crate) fn ratio(numerator: &[f64], denominator: &[f64]) -> Vec<f64> {
    debug_assert_eq!(numerator.len(), denominator.len());
    numerator
        .iter()
        .zip(denominator)
        .map(|(&n, &d)| finite_or_nan(n / d))
        .collect()
}

/// Create synthetic bars from close prices for testing.
///
/// Generates plausible OHLV: open = prev_close (or close for first bar),
/// high = max(open,close) + 1.0, low = min(open,close) - 1.0, volume = 1000.
#[cfg(test)]
pub fn make_bars(closes: &[f64]) -> Vec<crate::domain::Bar> {
    use crate::domain::Bar;
    use chrono::TimeZone;
    let base = chrono::Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap();
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| {
            let open = if i == 0 { close } else { closes[i - 1] };
            Bar {
                timestamp: base + chrono::Duration::days(i as i64),
                open,
                high: open.max(close) + 1.0,
                low: open.min(close) - 1.0,
                close,
                volume: 1000.0,
            }
        })
        .collect()
}

/// Assert two f64 values are approximately equal (within epsilon).
#[cfg(test)]
pub fn assert_approx(actual: f64, expected: f64, epsilon: f64) {
    assert!(
        (actual - expected).abs() < epsilon,
        "assert_approx failed: actual={actual}, expected={expected}, diff={}, epsilon={epsilon}",
        (actual - expected).abs()
    );
}

/// Default epsilon for indicator tests.
#[cfg(test)]
pub const DEFAULT_EPSILON: f64 = 1e-10;
