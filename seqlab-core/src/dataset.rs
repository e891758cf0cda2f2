//! The windowed dataset: three parallel, equal-length sequences.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::Label;
use crate::error::InputError;
use crate::labeling::LabelDistribution;

/// Feature tensor (samples x window_size x features, flattened row-major),
/// one label per sample and one timestamp per sample (the label row's).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowDataset {
    pub window_size: usize,
    pub feature_names: Vec<String>,
    pub features: Vec<f64>,
    pub labels: Vec<Label>,
    pub timestamps: Vec<DateTime<Utc>>,
}

impl WindowDataset {
    /// An explicitly empty dataset for the given layout.
    pub fn empty(window_size: usize, feature_names: Vec<String>) -> Self {
        Self {
            window_size,
            feature_names,
            features: Vec::new(),
            labels: Vec::new(),
            timestamps: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn feature_count(&self) -> usize {
        self.feature_names.len()
    }

    /// (samples, window_size, features)
    pub fn shape(&self) -> (usize, usize, usize) {
        (self.len(), self.window_size, self.feature_count())
    }

    /// Flattened `window_size x features` block of sample `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.len()`.
    pub fn sample(&self, index: usize) -> &[f64] {
        let stride = self.window_size * self.feature_count();
        &self.features[index * stride..(index + 1) * stride]
    }

    pub fn label_distribution(&self) -> LabelDistribution {
        LabelDistribution::from_labels(&self.labels)
    }

    /// Deterministic BLAKE3 digest over layout, features, labels and timestamps.
    ///
    /// Two runs on identical input and configuration produce the same digest.
    pub fn fingerprint(&self) -> String {
        let mut hasher = blake3::Hasher::new();
        hasher.update(&(self.window_size as u64).to_le_bytes());
        for name in &self.feature_names {
            hasher.update(name.as_bytes());
            hasher.update(&[0]);
        }
        for v in &self.features {
            hasher.update(&v.to_le_bytes());
        }
        for label in &self.labels {
            hasher.update(&label.as_i8().to_le_bytes());
        }
        for ts in &self.timestamps {
            hasher.update(&ts.timestamp_millis().to_le_bytes());
        }
        hasher.finalize().to_hex().to_string()
    }

    /// Concatenate datasets sharing window size and feature order, in order.
    pub fn concat(datasets: &[WindowDataset]) -> Result<Self, InputError> {
        let Some(first) = datasets.first() else {
            return Err(InputError::InvalidConfig(
                "cannot concatenate zero datasets".into(),
            ));
        };
        let mut out = Self::empty(first.window_size, first.feature_names.clone());
        for ds in datasets {
            if ds.window_size != out.window_size || ds.feature_names != out.feature_names {
                return Err(InputError::InvalidConfig(format!(
                    "dataset layout mismatch: window {} / {} features vs window {} / {} features",
                    ds.window_size,
                    ds.feature_count(),
                    out.window_size,
                    out.feature_count()
                )));
            }
            out.features.extend_from_slice(&ds.features);
            out.labels.extend_from_slice(&ds.labels);
            out.timestamps.extend_from_slice(&ds.timestamps);
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn tiny(label: Label, offset: f64) -> WindowDataset {
        WindowDataset {
            window_size: 2,
            feature_names: vec!["a".into(), "b".into()],
            features: vec![offset, offset + 1.0, offset + 2.0, offset + 3.0],
            labels: vec![label],
            timestamps: vec![Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()],
        }
    }

    #[test]
    fn shape_and_sample() {
        let ds = tiny(Label::Up, 0.0);
        assert_eq!(ds.shape(), (1, 2, 2));
        assert_eq!(ds.sample(0), &[0.0, 1.0, 2.0, 3.0]);
    }

    #[test]
    #[should_panic]
    fn sample_out_of_range_panics() {
        let ds = tiny(Label::Up, 0.0);
        let _ = ds.sample(ds.len());
    }

    #[test]
    fn fingerprint_is_stable_and_content_sensitive() {
        let a = tiny(Label::Up, 0.0);
        assert_eq!(a.fingerprint(), tiny(Label::Up, 0.0).fingerprint());
        assert_ne!(a.fingerprint(), tiny(Label::Down, 0.0).fingerprint());
        assert_ne!(a.fingerprint(), tiny(Label::Up, 1.0).fingerprint());
    }

    #[test]
    fn concat_appends_in_order() {
        let all = WindowDataset::concat(&[tiny(Label::Up, 0.0), tiny(Label::Down, 10.0)]).unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all.sample(1), &[10.0, 11.0, 12.0, 13.0]);
        assert_eq!(all.labels, vec![Label::Up, Label::Down]);
        assert_eq!(
            all.label_distribution(),
            LabelDistribution { up: 1, neutral: 0, down: 1 }
        );
    }

    #[test]
    fn concat_rejects_layout_mismatch() {
        let mut other = tiny(Label::Up, 0.0);
        other.window_size = 3;
        assert!(WindowDataset::concat(&[tiny(Label::Up, 0.0), other]).is_err());
        assert!(WindowDataset::concat(&[]).is_err());
    }

    #[test]
    fn json_roundtrip() {
        let ds = tiny(Label::Neutral, 0.5);
        let json = serde_json::to_string(&ds).unwrap();
        assert!(json.contains("\"labels\":[0]"));
        let back: WindowDataset = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ds);
    }
}
