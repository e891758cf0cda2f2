//! seqlab core: OHLCV series to labeled, fixed-length windows.
//!
//! This crate contains the deterministic batch transform:
//! - Domain types (bars, labels) and an immutable columnar table
//! - Five causal feature families (candle, momentum, trend, oscillator, volume)
//! - One warm-up trim after all families are concatenated
//! - Forward-return labeling with strict thresholds
//! - Window construction that never leaks the label row into its inputs
//!
//! Fetching, caching, persistence and orchestration live in `seqlab-cli`.

pub mod config;
pub mod dataset;
pub mod domain;
pub mod error;
pub mod features;
pub mod indicators;
pub mod labeling;
pub mod pipeline;
pub mod table;
pub mod validation;
pub mod windowing;

pub use config::{ConfigError, DatasetConfig, FeatureConfig};
pub use dataset::WindowDataset;
pub use domain::{Bar, Label};
pub use error::InputError;
pub use features::{FeaturePipeline, FeatureStage, FEATURE_COLUMNS};
pub use labeling::{LabelDistribution, Labeler};
pub use pipeline::{build_dataset, build_dataset_from_bars, BuildOutput, BuildReport};
pub use table::{LabeledTable, Table};
pub use windowing::WindowBuilder;
