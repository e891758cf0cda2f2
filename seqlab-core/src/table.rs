//! Immutable columnar tables passed between pipeline stages.
//!
//! A `Table` is a timestamp index plus an ordered list of named `f64`
//! columns of equal length. Stages never mutate their input: adding columns
//! consumes a table and returns a new one, so a stage that wants to extend
//! its input clones it first.

use std::ops::Range;

use chrono::{DateTime, Utc};

use crate::domain::{Bar, Label};
use crate::error::InputError;

/// Required OHLCV column names, in canonical order.
pub const OHLCV_COLUMNS: [&str; 5] = ["open", "high", "low", "close", "volume"];

#[derive(Debug, Clone, PartialEq)]
struct Column {
    name: String,
    values: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table {
    timestamps: Vec<DateTime<Utc>>,
    columns: Vec<Column>,
}

impl Table {
    /// Create a table with a timestamp index and no columns.
    pub fn new(timestamps: Vec<DateTime<Utc>>) -> Self {
        Self {
            timestamps,
            columns: Vec::new(),
        }
    }

    /// Build an OHLCV table from row-oriented bars.
    pub fn from_bars(bars: &[Bar]) -> Self {
        let timestamps = bars.iter().map(|b| b.timestamp).collect();
        let mut table = Self::new(timestamps);
        let extractors: [fn(&Bar) -> f64; 5] = [
            |b: &Bar| b.open,
            |b: &Bar| b.high,
            |b: &Bar| b.low,
            |b: &Bar| b.close,
            |b: &Bar| b.volume,
        ];
        for (name, get) in OHLCV_COLUMNS.iter().zip(extractors) {
            table.columns.push(Column {
                name: (*name).to_string(),
                values: bars.iter().map(get).collect(),
            });
        }
        table
    }

    /// Append a column, replacing any existing column of the same name in place.
    pub fn with_column(
        mut self,
        name: impl Into<String>,
        values: Vec<f64>,
    ) -> Result<Self, InputError> {
        let name = name.into();
        if values.len() != self.len() {
            return Err(InputError::LengthMismatch {
                column: name,
                expected: self.len(),
                actual: values.len(),
            });
        }
        match self.columns.iter_mut().find(|c| c.name == name) {
            Some(existing) => existing.values = values,
            None => self.columns.push(Column { name, values }),
        }
        Ok(self)
    }

    /// Append several columns in order.
    pub fn with_columns(
        self,
        columns: impl IntoIterator<Item = (String, Vec<f64>)>,
    ) -> Result<Self, InputError> {
        columns
            .into_iter()
            .try_fold(self, |table, (name, values)| table.with_column(name, values))
    }

    pub fn column(&self, name: &str) -> Option<&[f64]> {
        self.columns
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.values.as_slice())
    }

    /// Get a column or fail with `MissingColumn`.
    pub fn require(&self, name: &str) -> Result<&[f64], InputError> {
        self.column(name)
            .ok_or_else(|| InputError::MissingColumn(name.to_string()))
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }

    pub fn timestamps(&self) -> &[DateTime<Utc>] {
        &self.timestamps
    }

    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    /// Keep the rows whose mask entry is true, preserving order.
    pub fn filter_rows(&self, keep: &[bool]) -> Self {
        debug_assert_eq!(keep.len(), self.len());
        let pick = |values: &[f64]| -> Vec<f64> {
            values
                .iter()
                .zip(keep)
                .filter_map(|(&v, &k)| k.then_some(v))
                .collect()
        };
        Self {
            timestamps: self
                .timestamps
                .iter()
                .zip(keep)
                .filter_map(|(&t, &k)| k.then_some(t))
                .collect(),
            columns: self
                .columns
                .iter()
                .map(|c| Column {
                    name: c.name.clone(),
                    values: pick(&c.values),
                })
                .collect(),
        }
    }

    /// Contiguous row range `[start, end)`.
    pub fn slice(&self, rows: Range<usize>) -> Self {
        Self {
            timestamps: self.timestamps[rows.clone()].to_vec(),
            columns: self
                .columns
                .iter()
                .map(|c| Column {
                    name: c.name.clone(),
                    values: c.values[rows.clone()].to_vec(),
                })
                .collect(),
        }
    }
}

/// Feature table paired with one label per row.
#[derive(Debug, Clone, PartialEq)]
pub struct LabeledTable {
    pub table: Table,
    pub labels: Vec<Label>,
}

impl LabeledTable {
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::make_bars;

    #[test]
    fn from_bars_has_ohlcv_columns() {
        let table = Table::from_bars(&make_bars(&[10.0, 11.0, 12.0]));
        assert_eq!(table.len(), 3);
        let names: Vec<&str> = table.column_names().collect();
        assert_eq!(names, OHLCV_COLUMNS);
        assert_eq!(table.column("close"), Some(&[10.0, 11.0, 12.0][..]));
    }

    #[test]
    fn with_column_rejects_wrong_length() {
        let table = Table::from_bars(&make_bars(&[10.0, 11.0]));
        let err = table.with_column("x", vec![1.0]).unwrap_err();
        assert_eq!(
            err,
            InputError::LengthMismatch {
                column: "x".into(),
                expected: 2,
                actual: 1
            }
        );
    }

    #[test]
    fn with_column_replaces_same_name() {
        let table = Table::from_bars(&make_bars(&[10.0, 11.0]))
            .with_column("x", vec![1.0, 2.0])
            .unwrap()
            .with_column("x", vec![3.0, 4.0])
            .unwrap();
        assert_eq!(table.column("x"), Some(&[3.0, 4.0][..]));
        assert_eq!(table.column_names().filter(|n| *n == "x").count(), 1);
    }

    #[test]
    fn require_reports_missing_column() {
        let table = Table::new(vec![]);
        assert_eq!(
            table.require("close").unwrap_err(),
            InputError::MissingColumn("close".into())
        );
    }

    #[test]
    fn filter_rows_preserves_order() {
        let table = Table::from_bars(&make_bars(&[10.0, 11.0, 12.0, 13.0]));
        let filtered = table.filter_rows(&[false, true, false, true]);
        assert_eq!(filtered.len(), 2);
        assert_eq!(filtered.column("close"), Some(&[11.0, 13.0][..]));
        assert_eq!(filtered.timestamps()[0], table.timestamps()[1]);
        assert_eq!(filtered.timestamps()[1], table.timestamps()[3]);
    }

    #[test]
    fn slice_takes_contiguous_rows() {
        let table = Table::from_bars(&make_bars(&[10.0, 11.0, 12.0, 13.0]));
        let head = table.slice(0..2);
        assert_eq!(head.column("close"), Some(&[10.0, 11.0][..]));
        assert_eq!(head.timestamps(), &table.timestamps()[..2]);
    }
}
