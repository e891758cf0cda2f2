//! OHLCV input validation.
//!
//! Checked before any feature is computed: every required column present,
//! timestamps strictly increasing (duplicates reported separately), every
//! required value finite. Failures are fatal and never repaired.

use crate::error::InputError;
use crate::table::{Table, OHLCV_COLUMNS};

pub fn validate_ohlcv(table: &Table) -> Result<(), InputError> {
    for name in OHLCV_COLUMNS {
        table.require(name)?;
    }

    let timestamps = table.timestamps();
    for (index, pair) in timestamps.windows(2).enumerate() {
        let (prev, curr) = (pair[0], pair[1]);
        if curr == prev {
            return Err(InputError::DuplicateTimestamp {
                index: index + 1,
                timestamp: curr,
            });
        }
        if curr < prev {
            return Err(InputError::NonMonotonicTimestamp {
                index: index + 1,
                timestamp: curr,
            });
        }
    }

    for name in OHLCV_COLUMNS {
        let values = table.require(name)?;
        if let Some((index, &value)) = values.iter().enumerate().find(|(_, v)| !v.is_finite()) {
            return Err(InputError::NonFinite {
                column: name.to_string(),
                index,
                value,
            });
        }
    }

    Ok(())
}
