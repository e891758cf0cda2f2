//! Candle shape descriptors, relative to the open.
//!
//! body       = (close - open) / open
//! upper_wick = (high - max(open, close)) / open
//! lower_wick = (min(open, close) - low) / open
//! range      = (high - low) / open
//!
//! Row-wise, no warm-up. A zero open yields NaN and the row is trimmed.

use super::{FeatureColumns, FeatureStage};
use crate::error::InputError;
use crate::indicators::finite_or_nan;
use crate::table::Table;

#[derive(Debug, Clone, Default)]
pub struct CandleFeatures;

impl FeatureStage for CandleFeatures {
    fn name(&self) -> &str {
        "candle"
    }

    fn columns(&self) -> Vec<String> {
        ["body", "upper_wick", "lower_wick", "range"]
            .into_iter()
            .map(String::from)
            .collect()
    }

    fn warmup(&self) -> usize {
        0
    }

    fn compute(&self, table: &Table) -> Result<FeatureColumns, InputError> {
        let open = table.require("open")?;
        let high = table.require("high")?;
        let low = table.require("low")?;
        let close = table.require("close")?;

        let n = table.len();
        let mut body = Vec::with_capacity(n);
        let mut upper = Vec::with_capacity(n);
        let mut lower = Vec::with_capacity(n);
        let mut range = Vec::with_capacity(n);

        for i in 0..n {
            let (o, h, l, c) = (open[i], high[i], low[i], close[i]);
            body.push(finite_or_nan((c - o) / o));
            upper.push(finite_or_nan((h - o.max(c)) / o));
            lower.push(finite_or_nan((o.min(c) - l) / o));
            range.push(finite_or_nan((h - l) / o));
        }

        Ok(self.columns().into_iter().zip([body, upper, lower, range]).collect())
    }
}
