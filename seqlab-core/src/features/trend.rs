//! EMA ratios: ema{S}_ratio = EMA(close, S)[t] / close[t].

use super::{FeatureColumns, FeatureStage};
use crate::error::InputError;
use crate::indicators::{ema_of_series, ratio};
use crate::table::Table;

#[derive(Debug, Clone)]
pub struct TrendFeatures {
    spans: Vec<usize>,
}

impl TrendFeatures {
    pub fn new(spans: Vec<usize>) -> Self {
        Self { spans }
    }
}

impl FeatureStage for TrendFeatures {
    fn name(&self) -> &str {
        "trend"
    }

    fn columns(&self) -> Vec<String> {
        self.spans.iter().map(|s| format!("ema{s}_ratio")).collect()
    }

    /// The EMA is seeded on the first close, so every row is defined.
    fn warmup(&self) -> usize {
        0
    }

    fn compute(&self, table: &Table) -> Result<FeatureColumns, InputError> {
        let close = table.require("close")?;
        Ok(self
            .columns()
            .into_iter()
            .zip(
                self.spans
                    .iter()
                    .map(|&span| ratio(&ema_of_series(close, span), close)),
            )
            .collect())
    }
}
