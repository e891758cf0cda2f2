//! CSV ingestion into an OHLCV table.
//!
//! The header decides which columns exist. Extra columns are ignored; a
//! missing price column is left out so core validation reports it by name.
//! Timestamps may be epoch milliseconds, RFC 3339, `%Y-%m-%d %H:%M:%S` or
//! `%Y-%m-%d` (midnight UTC).

use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use seqlab_core::table::OHLCV_COLUMNS;
use seqlab_core::{InputError, Table};

/// Read an OHLCV CSV file.
pub fn read_ohlcv_csv(path: &Path) -> Result<Table> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("failed to open {}", path.display()))?;
    parse_ohlcv_csv(file).with_context(|| format!("failed to read {}", path.display()))
}

/// Parse OHLCV CSV content from any reader.
pub fn parse_ohlcv_csv<R: Read>(reader: R) -> Result<Table> {
    let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let headers: Vec<String> = rdr
        .headers()
        .context("failed to read CSV header")?
        .iter()
        .map(|h| h.to_ascii_lowercase())
        .collect();
    let position = |name: &str| headers.iter().position(|h| h == name);

    let ts_idx = position("timestamp")
        .ok_or_else(|| InputError::MissingColumn("timestamp".to_string()))?;
    let value_idx: Vec<(&str, usize)> = OHLCV_COLUMNS
        .iter()
        .filter_map(|&name| position(name).map(|i| (name, i)))
        .collect();

    let mut timestamps = Vec::new();
    let mut columns: Vec<Vec<f64>> = vec![Vec::new(); value_idx.len()];

    for (row, record) in rdr.records().enumerate() {
        let record = record.with_context(|| format!("malformed CSV record at row {row}"))?;
        let raw_ts = record.get(ts_idx).unwrap_or_default();
        timestamps.push(
            parse_timestamp(raw_ts)
                .with_context(|| format!("invalid timestamp '{raw_ts}' at row {row}"))?,
        );
        for (values, &(name, idx)) in columns.iter_mut().zip(&value_idx) {
            let raw = record.get(idx).unwrap_or_default();
            values.push(parse_value(raw).with_context(|| {
                format!("invalid {name} value '{raw}' at row {row}")
            })?);
        }
    }

    let table = Table::new(timestamps).with_columns(
        value_idx
            .iter()
            .map(|(name, _)| name.to_string())
            .zip(columns),
    )?;
    Ok(table)
}

/// Empty fields become NaN so validation reports them with their position.
fn parse_value(raw: &str) -> Result<f64> {
    if raw.is_empty() {
        return Ok(f64::NAN);
    }
    Ok(raw.parse::<f64>()?)
}

pub fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>> {
    if let Ok(millis) = raw.parse::<i64>() {
        return Utc
            .timestamp_millis_opt(millis)
            .single()
            .with_context(|| format!("epoch milliseconds out of range: {millis}"));
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        return Ok(naive.and_utc());
    }
    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d")?;
    Ok(date
        .and_hms_opt(0, 0, 0)
        .context("invalid midnight")?
        .and_utc())
}
