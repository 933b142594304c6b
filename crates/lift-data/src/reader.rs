//! CSV dialect detection and raw record loading.
//!
//! The two supported Strong exports are mutually exclusive on delimiter,
//! so a single trial-and-fallback pass is enough to tell them apart
//! without any format metadata.

use std::path::Path;

use csv::{ReaderBuilder, StringRecord};
use lift_core::error::{LiftError, Result};
use lift_core::models::Dialect;
use tracing::{debug, warn};

// ── Public API ────────────────────────────────────────────────────────────────

/// Read a workout export, reporting which vendor dialect parsed it.
///
/// The whole file is read into memory first, so an unreadable source fails
/// here and is never retried. The comma dialect is then attempted; a
/// *structural* parse failure (unequal field counts, bad quoting) rewinds
/// to the start of the buffer and retries once under the semicolon
/// dialect. A structural failure under the semicolon dialect is fatal.
///
/// The header row is preserved in the output; the normalizer discards it.
pub fn read_lifting_csv(path: &Path) -> Result<(Vec<StringRecord>, Dialect)> {
    let contents = std::fs::read_to_string(path).map_err(|source| LiftError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;

    match parse_records(&contents, Dialect::Comma) {
        Ok(records) => {
            debug!(
                "{}: {} rows under the comma dialect",
                path.display(),
                records.len()
            );
            Ok((records, Dialect::Comma))
        }
        Err(primary) => {
            warn!(
                "{}: {}; retrying with the semicolon dialect",
                path.display(),
                primary
            );
            let records = parse_records(&contents, Dialect::Semicolon)?;
            debug!(
                "{}: {} rows under the semicolon dialect",
                path.display(),
                records.len()
            );
            Ok((records, Dialect::Semicolon))
        }
    }
}

// ── Internal helpers ──────────────────────────────────────────────────────────

/// Parse the full buffer under one dialect.
///
/// The bytes are already in memory, so any error surfaced here is
/// structural rather than I/O.
fn parse_records(contents: &str, dialect: Dialect) -> Result<Vec<StringRecord>> {
    let mut csv_reader = ReaderBuilder::new()
        .has_headers(false)
        .delimiter(dialect.delimiter())
        .from_reader(contents.as_bytes());

    let mut records = Vec::new();
    for record in csv_reader.records() {
        records.push(record.map_err(|source| LiftError::CsvParse { dialect, source })?);
    }
    Ok(records)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
