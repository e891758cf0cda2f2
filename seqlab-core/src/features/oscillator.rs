//! RSI and the MACD family.
//!
//! rsi         = RSI(close, period) scaled to [0, 1]
//! macd        = (EMA(close, fast) - EMA(close, slow)) / close
//! macd_signal = EMA(macd, signal)
//! macd_hist   = macd - macd_signal

use super::{FeatureColumns, FeatureStage};
use crate::error::InputError;
use crate::indicators::{ema_of_series, finite_or_nan, rsi_of_series};
use crate::table::Table;

#[derive(Debug, Clone)]
pub struct OscillatorFeatures {
    rsi_period: usize,
    macd_fast: usize,
    macd_slow: usize,
    macd_signal: usize,
}

impl OscillatorFeatures {
    pub fn new(rsi_period: usize, macd_fast: usize, macd_slow: usize, macd_signal: usize) -> Self {
        Self {
            rsi_period,
            macd_fast,
            macd_slow,
            macd_signal,
        }
    }
}

impl Default for OscillatorFeatures {
    fn default() -> Self {
        Self::new(14, 12, 26, 9)
    }
}

impl FeatureStage for OscillatorFeatures {
    fn name(&self) -> &str {
        "oscillator"
    }

    fn columns(&self) -> Vec<String> {
        ["rsi", "macd", "macd_signal", "macd_hist"]
            .into_iter()
            .map(String::from)
            .collect()
    }

    fn warmup(&self) -> usize {
        self.rsi_period
    }

    fn compute(&self, table: &Table) -> Result<FeatureColumns, InputError> {
        let close = table.require("close")?;

        let rsi = rsi_of_series(close, self.rsi_period);

        let fast = ema_of_series(close, self.macd_fast);
        let slow = ema_of_series(close, self.macd_slow);
        let macd: Vec<f64> = fast
            .iter()
            .zip(&slow)
            .zip(close)
            .map(|((f, s), c)| finite_or_nan((f - s) / c))
            .collect();
        let signal = ema_of_series(&macd, self.macd_signal);
        let hist: Vec<f64> = macd.iter().zip(&signal).map(|(m, s)| m - s).collect();

        Ok(self.columns().into_iter().zip([rsi, macd, signal, hist]).collect())
    }
}
