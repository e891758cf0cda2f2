//! Fixed-length window construction.
//!
//! For every row i in `window_size..len`, one sample pairs the feature rows
//! `[i - window_size, i)` with `label[i]` and `timestamp[i]`. Row i itself is
//! never part of its own feature slice.

use crate::dataset::WindowDataset;
use crate::error::InputError;
use crate::table::LabeledTable;

#[derive(Debug, Clone)]
pub struct WindowBuilder {
    window_size: usize,
}

impl WindowBuilder {
    pub fn new(window_size: usize) -> Self {
        Self { window_size }
    }

    /// Slice `labeled` into windows over `feature_columns`, in that column order.
    ///
    /// A table with `window_size` rows or fewer yields an empty dataset.
    pub fn build(
        &self,
        labeled: &LabeledTable,
        feature_columns: &[String],
    ) -> Result<WindowDataset, InputError> {
        let w = self.window_size;
        if w == 0 {
            return Err(InputError::InvalidConfig(
                "window_size must be positive".into(),
            ));
        }

        let columns = feature_columns
            .iter()
            .map(|name| labeled.table.require(name))
            .collect::<Result<Vec<_>, _>>()?;

        let rows = labeled.len();
        let samples = rows.saturating_sub(w);
        let f = columns.len();

        let mut features = Vec::with_capacity(samples * w * f);
        let mut labels = Vec::with_capacity(samples);
        let mut timestamps = Vec::with_capacity(samples);

        let timestamps_in = labeled.table.timestamps();
        for i in w..rows {
            for row in (i - w)..i {
                features.extend(columns.iter().map(|col| col[row]));
            }
            labels.push(labeled.labels[i]);
            timestamps.push(timestamps_in[i]);
        }

        Ok(WindowDataset {
            window_size: w,
            feature_names: feature_columns.to_vec(),
            features,
            labels,
            timestamps,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Label;
    use crate::indicators::make_bars;
    use crate::table::Table;

    /// Table whose single feature column "idx" holds the row index.
    fn indexed(n: usize) -> LabeledTable {
        let closes: Vec<f64> = (0..n).map(|i| 100.0 + i as f64).collect();
        let table = Table::from_bars(&make_bars(&closes))
            .with_column("idx", (0..n).map(|i| i as f64).collect())
            .unwrap();
        let labels = (0..n)
            .map(|i| match i % 3 {
                0 => Label::Down,
                1 => Label::Neutral,
                _ => Label::Up,
            })
            .collect();
        LabeledTable { table, labels }
    }

    #[test]
    fn sample_count_and_shape() {
        let ds = WindowBuilder::new(4)
            .build(&indexed(10), &["idx".to_string(), "close".to_string()])
            .unwrap();
        assert_eq!(ds.len(), 6);
        assert_eq!(ds.shape(), (6, 4, 2));
        assert_eq!(ds.features.len(), 6 * 4 * 2);
    }

    #[test]
    fn window_excludes_label_row() {
        let labeled = indexed(10);
        let ds = WindowBuilder::new(3)
            .build(&labeled, &["idx".to_string()])
            .unwrap();
        for s in 0..ds.len() {
            let label_row = s + 3;
            assert_eq!(ds.sample(s), &[(s) as f64, (s + 1) as f64, (s + 2) as f64]);
            assert!(!ds.sample(s).contains(&(label_row as f64)));
            assert_eq!(ds.labels[s], labeled.labels[label_row]);
            assert_eq!(ds.timestamps[s], labeled.table.timestamps()[label_row]);
        }
    }

    #[test]
    fn features_are_row_major() {
        let ds = WindowBuilder::new(2)
            .build(&indexed(3), &["idx".to_string(), "close".to_string()])
            .unwrap();
        assert_eq!(ds.sample(0), &[0.0, 100.0, 1.0, 101.0]);
    }

    #[test]
    fn table_not_longer_than_window_is_empty() {
        let ds = WindowBuilder::new(5)
            .build(&indexed(5), &["idx".to_string()])
            .unwrap();
        assert!(ds.is_empty());
        assert_eq!(ds.shape(), (0, 5, 1));

        let ds = WindowBuilder::new(5)
            .build(&indexed(2), &["idx".to_string()])
            .unwrap();
        assert!(ds.is_empty());
    }

    #[test]
    fn unknown_feature_column_is_fatal() {
        let err = WindowBuilder::new(2)
            .build(&indexed(5), &["nope".to_string()])
            .unwrap_err();
        assert_eq!(err, InputError::MissingColumn("nope".into()));
    }
}
