//! Dataset configuration.
//!
//! One immutable value carries every knob of a pipeline run. It is loaded
//! from TOML by the caller and passed into each entry point; nothing is
//! read from process-wide state.
//!
//! ```toml
//! label_threshold = 0.02
//! prediction_horizon = 3
//! window_size = 30
//!
//! [features]
//! ema_spans = [9, 21, 50, 100]
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::InputError;

/// Periods of the five feature families.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureConfig {
    pub momentum_horizons: Vec<usize>,
    pub ema_spans: Vec<usize>,
    pub rsi_period: usize,
    pub macd_fast: usize,
    pub macd_slow: usize,
    pub macd_signal: usize,
    pub volume_window: usize,
    pub volatility_window: usize,
}

impl Default for FeatureConfig {
    fn default() -> Self {
        Self {
            momentum_horizons: vec![1, 3, 7, 14, 21],
            ema_spans: vec![9, 21, 50, 100],
            rsi_period: 14,
            macd_fast: 12,
            macd_slow: 26,
            macd_signal: 9,
            volume_window: 20,
            volatility_window: 14,
        }
    }
}

impl FeatureConfig {
    pub fn validate(&self) -> Result<(), InputError> {
        let invalid = |msg: String| Err(InputError::InvalidConfig(msg));

        if self.momentum_horizons.is_empty() {
            return invalid("momentum_horizons must not be empty".into());
        }
        if self.ema_spans.is_empty() {
            return invalid("ema_spans must not be empty".into());
        }
        if let Some(dup) = first_duplicate(&self.momentum_horizons) {
            return invalid(format!("momentum horizon {dup} listed twice"));
        }
        if let Some(dup) = first_duplicate(&self.ema_spans) {
            return invalid(format!("ema span {dup} listed twice"));
        }
        let periods = [
            ("momentum_horizons", self.momentum_horizons.iter().min().copied()),
            ("ema_spans", self.ema_spans.iter().min().copied()),
            ("rsi_period", Some(self.rsi_period)),
            ("macd_fast", Some(self.macd_fast)),
            ("macd_slow", Some(self.macd_slow)),
            ("macd_signal", Some(self.macd_signal)),
            ("volume_window", Some(self.volume_window)),
        ];
        for (name, value) in periods {
            if value == Some(0) {
                return invalid(format!("{name} must be positive"));
            }
        }
        if self.volatility_window < 2 {
            return invalid(format!(
                "volatility_window must be at least 2, got {}",
                self.volatility_window
            ));
        }
        if self.macd_fast >= self.macd_slow {
            return invalid(format!(
                "macd_fast ({}) must be shorter than macd_slow ({})",
                self.macd_fast, self.macd_slow
            ));
        }
        Ok(())
    }
}

fn first_duplicate(values: &[usize]) -> Option<usize> {
    values
        .iter()
        .enumerate()
        .find(|(i, v)| values[..*i].contains(v))
        .map(|(_, &v)| v)
}

/// Complete configuration of one dataset build.
///
/// `window_size` has no default: it must be chosen by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetConfig {
    #[serde(default = "default_label_threshold")]
    pub label_threshold: f64,
    #[serde(default = "default_prediction_horizon")]
    pub prediction_horizon: usize,
    pub window_size: usize,
    #[serde(default)]
    pub features: FeatureConfig,
}

fn default_label_threshold() -> f64 {
    0.02
}

fn default_prediction_horizon() -> usize {
    3
}

impl DatasetConfig {
    /// Default threshold, horizon and feature periods with the given window size.
    pub fn with_window_size(window_size: usize) -> Self {
        Self {
            label_threshold: default_label_threshold(),
            prediction_horizon: default_prediction_horizon(),
            window_size,
            features: FeatureConfig::default(),
        }
    }

    /// Load a configuration from a TOML file and validate it.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Parse a configuration from a TOML string and validate it.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), InputError> {
        if self.window_size == 0 {
            return Err(InputError::InvalidConfig(
                "window_size must be positive".into(),
            ));
        }
        if self.prediction_horizon == 0 {
            return Err(InputError::InvalidConfig(
                "prediction_horizon must be positive".into(),
            ));
        }
        if !self.label_threshold.is_finite() || self.label_threshold < 0.0 {
            return Err(InputError::InvalidConfig(format!(
                "label_threshold must be a non-negative finite number, got {}",
                self.label_threshold
            )));
        }
        self.features.validate()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error(transparent)]
    Invalid(#[from] InputError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_toml_uses_defaults() {
        let config = DatasetConfig::from_toml("window_size = 30").unwrap();
        assert_eq!(config.window_size, 30);
        assert_eq!(config.label_threshold, 0.02);
        assert_eq!(config.prediction_horizon, 3);
        assert_eq!(config.features, FeatureConfig::default());
    }

    #[test]
    fn window_size_is_required() {
        let err = DatasetConfig::from_toml("label_threshold = 0.01").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn partial_feature_table_keeps_other_defaults() {
        let config = DatasetConfig::from_toml(
            r#"
window_size = 10
prediction_horizon = 5

[features]
ema_spans = [5, 10]
"#,
        )
        .unwrap();
        assert_eq!(config.prediction_horizon, 5);
        assert_eq!(config.features.ema_spans, vec![5, 10]);
        assert_eq!(config.features.rsi_period, 14);
    }

    #[test]
    fn zero_window_rejected() {
        let err = DatasetConfig::from_toml("window_size = 0").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid(InputError::InvalidConfig(_))
        ));
    }

    #[test]
    fn zero_horizon_rejected() {
        let config = DatasetConfig {
            prediction_horizon: 0,
            ..DatasetConfig::with_window_size(10)
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn negative_threshold_rejected() {
        let config = DatasetConfig {
            label_threshold: -0.01,
            ..DatasetConfig::with_window_size(10)
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn macd_fast_must_be_shorter() {
        let mut config = DatasetConfig::with_window_size(10);
        config.features.macd_fast = 26;
        assert!(config.validate().is_err());
    }

    #[test]
    fn duplicate_spans_rejected() {
        let mut config = DatasetConfig::with_window_size(10);
        config.features.ema_spans = vec![9, 21, 9];
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("ema span 9"));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = DatasetConfig::from_file(Path::new("/nonexistent/seqlab.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
