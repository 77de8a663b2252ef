//! End-to-end orchestration: load, index, reconcile

use std::path::Path;

use tracing::info;

use crate::io::csv::{read_source_transactions, read_system_transactions};
use crate::reconciler::{index_source, index_system, Reconciler};
use crate::types::{ReconciliationReport, ReconciliationResult};

/// Runs a full reconciliation over two CSV ledger files
pub struct ReconciliationService {
    reconciler: Reconciler,
}

impl Default for ReconciliationService {
    fn default() -> Self {
        Self::new()
    }
}

impl ReconciliationService {
    /// Create a service with the default comparison rules
    pub fn new() -> Self {
        Self {
            reconciler: Reconciler::new(),
        }
    }

    /// Create a service around a custom-configured reconciler
    pub fn with_reconciler(reconciler: Reconciler) -> Self {
        Self { reconciler }
    }

    /// Load both ledgers and reconcile them.
    ///
    /// Loader failures are fatal: the reconciliation never proceeds over a
    /// partially parsed ledger.
    pub fn run(
        &self,
        source_path: &Path,
        system_path: &Path,
    ) -> ReconciliationResult<ReconciliationReport> {
        info!(path = %source_path.display(), "reading source transactions");
        let source_transactions = read_source_transactions(source_path)?;
        info!(count = source_transactions.len(), "source transactions loaded");

        info!(path = %system_path.display(), "reading system transactions");
        let system_transactions = read_system_transactions(system_path)?;
        info!(count = system_transactions.len(), "system transactions loaded");

        let source_index = index_source(source_transactions);
        let system_index = index_system(system_transactions);

        info!("starting reconciliation");
        let report = self.reconciler.reconcile(&source_index, &system_index);
        info!(
            matched = report.summary.successfully_matched_count,
            mismatched = report.summary.mismatched_transactions_count,
            missing_in_internal = report.summary.missing_in_internal_count,
            missing_in_source = report.summary.missing_in_source_count,
            "reconciliation completed"
        );

        Ok(report)
    }
}
