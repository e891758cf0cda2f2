//! Forward-return labeling.
//!
//! ```text
//! future_return[t] = close[t + horizon] / close[t] - 1
//! label[t] = Up      if future_return[t] >  threshold
//!            Down    if future_return[t] < -threshold
//!            Neutral otherwise
//! ```
//!
//! Runs on the already-trimmed feature table so `t + horizon` counts feature
//! rows, not raw bars. The last `horizon` rows have no future and are dropped.

use serde::{Deserialize, Serialize};

use crate::domain::Label;
use crate::error::InputError;
use crate::table::{LabeledTable, Table};

#[derive(Debug, Clone)]
pub struct Labeler {
    threshold: f64,
    horizon: usize,
}

impl Labeler {
    pub fn new(threshold: f64, horizon: usize) -> Self {
        Self { threshold, horizon }
    }

    /// Forward returns for every row that has a future bar `horizon` ahead.
    pub fn future_returns(&self, close: &[f64]) -> Vec<f64> {
        close
            .iter()
            .zip(close.iter().skip(self.horizon))
            .map(|(now, future)| future / now - 1.0)
            .collect()
    }

    pub fn label(&self, table: &Table) -> Result<LabeledTable, InputError> {
        if self.horizon == 0 {
            return Err(InputError::InvalidConfig(
                "prediction_horizon must be positive".into(),
            ));
        }
        let close = table.require("close")?;
        let labels: Vec<Label> = self
            .future_returns(close)
            .into_iter()
            .map(|r| Label::classify(r, self.threshold))
            .collect();

        Ok(LabeledTable {
            table: table.slice(0..labels.len()),
            labels,
        })
    }
}

/// Count of each class in a label vector.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelDistribution {
    pub up: usize,
    pub neutral: usize,
    pub down: usize,
}

impl LabelDistribution {
    pub fn from_labels(labels: &[Label]) -> Self {
        labels.iter().fold(Self::default(), |mut acc, label| {
            match label {
                Label::Up => acc.up += 1,
                Label::Neutral => acc.neutral += 1,
                Label::Down => acc.down += 1,
            }
            acc
        })
    }

    pub fn total(&self) -> usize {
        self.up + self.neutral + self.down
    }
}

impl std::fmt::Display for LabelDistribution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "+1={} | 0={} | -1={}", self.up, self.neutral, self.down)
    }
}
