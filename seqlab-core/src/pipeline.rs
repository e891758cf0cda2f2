//! Pipeline entry point: raw OHLCV table to windowed dataset.
//!
//! ```text
//! validate config -> validate input -> features + trim -> labels -> windows
//! ```
//!
//! Every stage returns a new table; nothing is shared or mutated across
//! calls, so independent symbols can be built on separate threads.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::DatasetConfig;
use crate::dataset::WindowDataset;
use crate::domain::Bar;
use crate::error::InputError;
use crate::features::FeaturePipeline;
use crate::labeling::{LabelDistribution, Labeler};
use crate::table::Table;
use crate::validation::validate_ohlcv;
use crate::windowing::WindowBuilder;

/// Row counts at each stage of one build.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildReport {
    pub raw_rows: usize,
    pub effective_warmup: usize,
    pub feature_rows: usize,
    pub labeled_rows: usize,
    pub samples: usize,
    pub distribution: LabelDistribution,
}

#[derive(Debug, Clone)]
pub struct BuildOutput {
    pub dataset: WindowDataset,
    pub report: BuildReport,
}

/// Build the labeled window dataset for one OHLCV table.
///
/// Too little data is not an error: the result is an empty dataset.
pub fn build_dataset(input: &Table, config: &DatasetConfig) -> Result<BuildOutput, InputError> {
    config.validate()?;
    validate_ohlcv(input)?;

    let features = FeaturePipeline::from_config(&config.features);
    let feature_columns = features.feature_columns();

    let feature_table = features.run(input)?;
    let labeled = Labeler::new(config.label_threshold, config.prediction_horizon)
        .label(&feature_table)?;
    debug!(
        labeled_rows = labeled.len(),
        horizon = config.prediction_horizon,
        "labels assigned"
    );
    let dataset = WindowBuilder::new(config.window_size).build(&labeled, &feature_columns)?;

    let report = BuildReport {
        raw_rows: input.len(),
        effective_warmup: features.effective_warmup(),
        feature_rows: feature_table.len(),
        labeled_rows: labeled.len(),
        samples: dataset.len(),
        distribution: dataset.label_distribution(),
    };

    if dataset.is_empty() {
        warn!(
            raw_rows = report.raw_rows,
            warmup = report.effective_warmup,
            horizon = config.prediction_horizon,
            window = config.window_size,
            "insufficient data: no samples after trimming"
        );
    } else {
        info!(
            samples = report.samples,
            window = config.window_size,
            features = dataset.feature_count(),
            distribution = %report.distribution,
            "dataset built"
        );
    }

    Ok(BuildOutput { dataset, report })
}

/// `build_dataset` over row-oriented bars.
pub fn build_dataset_from_bars(
    bars: &[Bar],
    config: &DatasetConfig,
) -> Result<BuildOutput, InputError> {
    build_dataset(&Table::from_bars(bars), config)
}
