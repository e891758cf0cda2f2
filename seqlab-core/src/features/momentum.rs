//! Multi-horizon simple returns: return_{N}d = close[t] / close[t-N] - 1.

use super::{FeatureColumns, FeatureStage};
use crate::error::InputError;
use crate::indicators::pct_change;
use crate::table::Table;

#[derive(Debug, Clone)]
pub struct MomentumFeatures {
    horizons: Vec<usize>,
}

impl MomentumFeatures {
    pub fn new(horizons: Vec<usize>) -> Self {
        Self { horizons }
    }
}

impl FeatureStage for MomentumFeatures {
    fn name(&self) -> &str {
        "momentum"
    }

    fn columns(&self) -> Vec<String> {
        self.horizons.iter().map(|n| format!("return_{n}d")).collect()
    }

    fn warmup(&self) -> usize {
        self.horizons.iter().copied().max().unwrap_or(0)
    }

    fn compute(&self, table: &Table) -> Result<FeatureColumns, InputError> {
        let close = table.require("close")?;
        Ok(self
            .columns()
            .into_iter()
            .zip(self.horizons.iter().map(|&n| pct_change(close, n)))
            .collect())
    }
}
