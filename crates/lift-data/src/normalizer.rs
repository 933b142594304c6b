//! Vendor-row normalization into canonical lifting sets.
//!
//! Maps the positional columns of a detected dialect onto
//! [`LiftingSet`] records. Timestamp problems abort the whole file;
//! numeric problems degrade to zero so one sloppy row cannot sink an
//! otherwise good export.

use chrono::{NaiveDateTime, TimeZone, Utc};
use csv::StringRecord;
use lift_core::error::{LiftError, Result};
use lift_core::models::{Dialect, LiftingSet};
use tracing::warn;

/// Timestamp format shared by both vendor exports.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

// ── Public API ────────────────────────────────────────────────────────────────

/// Map raw rows onto [`LiftingSet`]s using the column layout of `dialect`.
///
/// The first row is the header and is discarded. Row indices in errors and
/// log lines count from the first data row.
///
/// Failure handling per row:
/// * timestamp unparsable or column missing → the whole file fails, no
///   partial result;
/// * exercise column missing → same, the row is unusable without its
///   grouping key;
/// * weight / reps unparsable or missing → substitute zero, log, continue.
pub fn normalize(records: &[StringRecord], dialect: Dialect) -> Result<Vec<LiftingSet>> {
    let layout = dialect.layout();
    let rows = records.get(1..).unwrap_or_default();

    let mut sets = Vec::with_capacity(rows.len());

    for (row, record) in rows.iter().enumerate() {
        let raw_timestamp =
            record
                .get(layout.timestamp)
                .ok_or(LiftError::MissingColumn {
                    row,
                    column: layout.timestamp,
                })?;
        let naive = NaiveDateTime::parse_from_str(raw_timestamp, TIMESTAMP_FORMAT).map_err(
            |_| {
                warn!("Parsing timestamp failed at row {}", row);
                LiftError::TimestampParse {
                    row,
                    value: raw_timestamp.to_string(),
                }
            },
        )?;
        let timestamp = Utc.from_utc_datetime(&naive);

        let exercise = record
            .get(layout.exercise)
            .ok_or(LiftError::MissingColumn {
                row,
                column: layout.exercise,
            })?
            .to_string();

        let weight: f64 = parse_or_zero(record.get(layout.weight), row, "weight");
        let reps: u32 = parse_or_zero(record.get(layout.reps), row, "reps");

        sets.push(LiftingSet::new(timestamp, exercise, weight, reps));
    }

    Ok(sets)
}

// ── Internal helpers ──────────────────────────────────────────────────────────

/// Parse a numeric field, substituting the type's zero value on a missing
/// column or a parse failure. The anomaly is logged with its row index.
fn parse_or_zero<T>(field: Option<&str>, row: usize, name: &str) -> T
where
    T: std::str::FromStr + Default,
{
    match field.map(str::parse::<T>) {
        Some(Ok(value)) => value,
        _ => {
            warn!("Parsing {} failed at row {}", name, row);
            T::default()
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
