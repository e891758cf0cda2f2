//! Feature pipeline: the five families in fixed order, then one trim.
//!
//! Families are applied in order (candle, momentum, trend, oscillator,
//! volume), each extending the table produced by the previous one. Only
//! after all columns exist is any row dropped: a row is kept iff every
//! feature column is finite there. Trimming per family would shift rows
//! against their timestamps.

use tracing::debug;

use super::{
    CandleFeatures, FeatureStage, MomentumFeatures, OscillatorFeatures, TrendFeatures,
    VolumeFeatures,
};
use crate::config::FeatureConfig;
use crate::error::InputError;
use crate::table::Table;

/// Feature column order of the default configuration.
pub const FEATURE_COLUMNS: [&str; 20] = [
    "body",
    "upper_wick",
    "lower_wick",
    "range",
    "return_1d",
    "return_3d",
    "return_7d",
    "return_14d",
    "return_21d",
    "ema9_ratio",
    "ema21_ratio",
    "ema50_ratio",
    "ema100_ratio",
    "rsi",
    "macd",
    "macd_signal",
    "macd_hist",
    "volume_ratio",
    "volume_return",
    "volatility",
];

pub struct FeaturePipeline {
    stages: Vec<Box<dyn FeatureStage>>,
}

impl FeaturePipeline {
    /// Pipeline over an explicit ordered list of stages.
    pub fn new(stages: Vec<Box<dyn FeatureStage>>) -> Self {
        Self { stages }
    }

    /// The five standard families with the configured periods.
    pub fn from_config(config: &FeatureConfig) -> Self {
        Self::new(vec![
            Box::new(CandleFeatures),
            Box::new(MomentumFeatures::new(config.momentum_horizons.clone())),
            Box::new(TrendFeatures::new(config.ema_spans.clone())),
            Box::new(OscillatorFeatures::new(
                config.rsi_period,
                config.macd_fast,
                config.macd_slow,
                config.macd_signal,
            )),
            Box::new(VolumeFeatures::new(
                config.volume_window,
                config.volatility_window,
            )),
        ])
    }

    /// All feature column names, in tensor order.
    pub fn feature_columns(&self) -> Vec<String> {
        self.stages.iter().flat_map(|s| s.columns()).collect()
    }

    /// Maximum warm-up across all stages.
    ///
    /// On clean input this is exactly the number of leading rows the trim
    /// removes.
    pub fn effective_warmup(&self) -> usize {
        self.stages.iter().map(|s| s.warmup()).max().unwrap_or(0)
    }

    /// Compute every family, then drop rows with any undefined feature.
    pub fn run(&self, input: &Table) -> Result<Table, InputError> {
        let mut table = input.clone();
        for stage in &self.stages {
            table = stage.apply(&table)?;
            debug!(stage = stage.name(), warmup = stage.warmup(), "feature family computed");
        }

        let columns = self.feature_columns();
        let mut keep = vec![true; table.len()];
        for name in &columns {
            let values = table.require(name)?;
            for (k, v) in keep.iter_mut().zip(values) {
                *k &= v.is_finite();
            }
        }

        let trimmed = table.filter_rows(&keep);
        debug!(
            rows_in = input.len(),
            rows_out = trimmed.len(),
            effective_warmup = self.effective_warmup(),
            "feature rows trimmed"
        );
        Ok(trimmed)
    }
}

impl Default for FeaturePipeline {
    fn default() -> Self {
        Self::from_config(&FeatureConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::make_bars;

    fn walk(n: usize) -> Vec<f64> {
        (0..n)
            .map(|i| 100.0 + (i as f64 * 0.3).sin() * 4.0 + i as f64 * 0.1)
            .collect()
    }

    #[test]
    fn default_columns_match_fixed_order() {
        let pipeline = FeaturePipeline::default();
        assert_eq!(pipeline.feature_columns(), FEATURE_COLUMNS);
    }

    #[test]
    fn default_effective_warmup_is_longest_momentum() {
        assert_eq!(FeaturePipeline::default().effective_warmup(), 21);
    }

    #[test]
    fn warmup_follows_configured_periods() {
        let config = FeatureConfig {
            volume_window: 40,
            ..FeatureConfig::default()
        };
        assert_eq!(FeaturePipeline::from_config(&config).effective_warmup(), 39);
    }

    #[test]
    fn trim_removes_exactly_the_warmup_prefix() {
        let table = Table::from_bars(&make_bars(&walk(60)));
        let pipeline = FeaturePipeline::default();
        let out = pipeline.run(&table).unwrap();

        assert_eq!(out.len(), 60 - pipeline.effective_warmup());
        assert_eq!(out.timestamps(), &table.timestamps()[21..]);
        for name in FEATURE_COLUMNS {
            assert!(out.column(name).unwrap().iter().all(|v| v.is_finite()));
        }
    }

    #[test]
    fn trimmed_rows_keep_their_own_features() {
        // A value computed on the full table must stay attached to its timestamp.
        let table = Table::from_bars(&make_bars(&walk(60)));
        let out = FeaturePipeline::default().run(&table).unwrap();
        let full = MomentumFeatures::new(vec![1]).compute(&table).unwrap();
        let r1 = out.column("return_1d").unwrap();
        for (j, &v) in r1.iter().enumerate() {
            assert_eq!(v, full[0].1[j + 21]);
        }
    }

    #[test]
    fn interior_undefined_row_is_dropped() {
        let mut bars = make_bars(&walk(60));
        bars[40].open = 0.0;
        let table = Table::from_bars(&bars);
        let out = FeaturePipeline::default().run(&table).unwrap();
        assert_eq!(out.len(), 60 - 21 - 1);
        assert!(!out.timestamps().contains(&table.timestamps()[40]));
    }

    #[test]
    fn short_input_trims_to_empty() {
        let table = Table::from_bars(&make_bars(&walk(15)));
        let out = FeaturePipeline::default().run(&table).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn missing_volume_is_fatal() {
        let bars = make_bars(&walk(30));
        let full = Table::from_bars(&bars);
        let mut table = Table::new(full.timestamps().to_vec());
        for name in ["open", "high", "low", "close"] {
            table = table
                .with_column(name, full.column(name).unwrap().to_vec())
                .unwrap();
        }
        let err = FeaturePipeline::default().run(&table).unwrap_err();
        assert_eq!(err, InputError::MissingColumn("volume".into()));
    }
}
