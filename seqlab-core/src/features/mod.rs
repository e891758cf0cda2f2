//! Feature families and the pipeline that concatenates them.
//!
//! Each family is a pure stage: table in, new columns out. A stage declares
//! how many leading rows it leaves undefined; the pipeline trims once, after
//! every family has run, so timestamps stay aligned across families.
//!
//! | Family     | Columns                                          | Warm-up            |
//! |------------|--------------------------------------------------|--------------------|
//! | candle     | body, upper_wick, lower_wick, range              | 0                  |
//! | momentum   | return_{N}d for each horizon                     | max horizon        |
//! | trend      | ema{S}_ratio for each span                       | 0                  |
//! | oscillator | rsi, macd, macd_signal, macd_hist                | rsi period         |
//! | volume     | volume_ratio, volume_return, volatility          | max(window-1, vol) |

pub mod candle;
pub mod momentum;
pub mod oscillator;
pub mod pipeline;
pub mod trend;
pub mod volume;

pub use candle::CandleFeatures;
pub use momentum::MomentumFeatures;
pub use oscillator::OscillatorFeatures;
pub use pipeline::{FeaturePipeline, FEATURE_COLUMNS};
pub use trend::TrendFeatures;
pub use volume::VolumeFeatures;

use crate::error::InputError;
use crate::table::Table;

/// Named output columns of a stage, in order.
pub type FeatureColumns = Vec<(String, Vec<f64>)>;

/// One feature family.
///
/// # Look-ahead contamination guard
/// No output value at row t may depend on input rows after t.
/// Every stage must pass the truncated-vs-full series test.
pub trait FeatureStage: Send + Sync {
    /// Family name for logging (e.g. "momentum").
    fn name(&self) -> &str;

    /// Output column names, in tensor order.
    fn columns(&self) -> Vec<String>;

    /// Number of leading rows for which some output column is undefined.
    fn warmup(&self) -> usize;

    /// Compute this family's columns. Each column has `table.len()` values,
    /// with NaN wherever the value is undefined.
    fn compute(&self, table: &Table) -> Result<FeatureColumns, InputError>;

    /// The input table extended with this family's columns.
    fn apply(&self, table: &Table) -> Result<Table, InputError> {
        let columns = self.compute(table)?;
        table.clone().with_columns(columns)
    }
}
