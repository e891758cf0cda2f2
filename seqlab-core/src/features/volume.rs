//! Volume ratio, volume return and close-to-close volatility.
//!
//! volume_ratio  = volume / rolling_mean(volume, volume_window)
//! volume_return = volume[t] / volume[t-1] - 1
//! volatility    = rolling_std(close[t] / close[t-1] - 1, volatility_window)

use super::{FeatureColumns, FeatureStage};
use crate::error::InputError;
use crate::indicators::{pct_change, ratio, rolling_mean, rolling_std};
use crate::table::Table;

#[derive(Debug, Clone)]
pub struct VolumeFeatures {
    volume_window: usize,
    volatility_window: usize,
}

impl VolumeFeatures {
    pub fn new(volume_window: usize, volatility_window: usize) -> Self {
        Self {
            volume_window,
            volatility_window,
        }
    }
}

impl Default for VolumeFeatures {
    fn default() -> Self {
        Self::new(20, 14)
    }
}

impl FeatureStage for VolumeFeatures {
    fn name(&self) -> &str {
        "volume"
    }

    fn columns(&self) -> Vec<String> {
        ["volume_ratio", "volume_return", "volatility"]
            .into_iter()
            .map(String::from)
            .collect()
    }

    /// The ratio needs `volume_window - 1` prior rows, the return one, and
    /// the volatility one return plus `volatility_window - 1` more.
    fn warmup(&self) -> usize {
        (self.volume_window.saturating_sub(1))
            .max(self.volatility_window)
            .max(1)
    }

    fn compute(&self, table: &Table) -> Result<FeatureColumns, InputError> {
        let volume = table.require("volume")?;
        let close = table.require("close")?;

        let volume_ratio = ratio(volume, &rolling_mean(volume, self.volume_window));
        let volume_return = pct_change(volume, 1);
        let volatility = rolling_std(&pct_change(close, 1), self.volatility_window);

        Ok(self
            .columns()
            .into_iter()
            .zip([volume_ratio, volume_return, volatility])
            .collect())
    }
}
