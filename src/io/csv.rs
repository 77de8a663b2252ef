//! CSV loading of source and system transaction ledgers
//!
//! Both loaders produce one record per non-header row, in row order. A
//! malformed row aborts the whole load; reconciliation never runs over a
//! partially parsed ledger.

use std::fs::File;
use std::path::Path;

use serde::de::DeserializeOwned;

use crate::types::{
    ReconciliationError, ReconciliationResult, SourceTransaction, SystemTransaction,
};

/// Read and parse the provider export
pub fn read_source_transactions(path: &Path) -> ReconciliationResult<Vec<SourceTransaction>> {
    read_records(path)
}

/// Read and parse the internal system ledger
pub fn read_system_transactions(path: &Path) -> ReconciliationResult<Vec<SystemTransaction>> {
    read_records(path)
}

fn read_records<T: DeserializeOwned>(path: &Path) -> ReconciliationResult<Vec<T>> {
    let file = File::open(path).map_err(|source| ReconciliationError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let mut reader = csv::Reader::from_reader(file);

    if reader.headers().map_err(parse_error)?.is_empty() {
        return Err(ReconciliationError::EmptyFile {
            path: path.to_path_buf(),
        });
    }

    let mut records = Vec::new();
    for row in reader.deserialize() {
        records.push(row.map_err(parse_error)?);
    }
    Ok(records)
}

/// Translate a csv-level failure into a parse error carrying the 1-based
/// input line number (header included) of the offending record.
fn parse_error(err: csv::Error) -> ReconciliationError {
    let line = err.position().map_or(0, csv::Position::line);
    let message = match err.kind() {
        csv::ErrorKind::Deserialize { err, .. } => err.to_string(),
        csv::ErrorKind::UnequalLengths { expected_len, len, .. } => {
            format!("expected {expected_len} fields, got {len}")
        }
        _ => err.to_string(),
    };
    ReconciliationError::Parse { line, message }
}
