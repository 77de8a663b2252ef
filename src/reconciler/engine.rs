//! Three-way classification of indexed ledgers and summary computation

use crate::reconciler::compare::CompareRules;
use crate::reconciler::index::{index_source, index_system, SourceIndex, SystemIndex};
use crate::types::{
    MismatchedTransaction, ReconciliationReport, ReconciliationSummary, SourceTransaction,
    SystemTransaction,
};

/// Classifies every transaction key into exactly one of: matched, mismatched,
/// missing in the internal system, or missing in the source.
pub struct Reconciler {
    rules: CompareRules,
}

impl Default for Reconciler {
    fn default() -> Self {
        Self::new()
    }
}

impl Reconciler {
    /// Create a reconciler with the default tolerances
    pub fn new() -> Self {
        Self {
            rules: CompareRules::default(),
        }
    }

    /// Create a reconciler with custom comparison rules
    pub fn with_rules(rules: CompareRules) -> Self {
        Self { rules }
    }

    /// Index both ledgers and reconcile them
    pub fn reconcile_transactions(
        &self,
        source_transactions: Vec<SourceTransaction>,
        system_transactions: Vec<SystemTransaction>,
    ) -> ReconciliationReport {
        let source_index = index_source(source_transactions);
        let system_index = index_system(system_transactions);
        self.reconcile(&source_index, &system_index)
    }

    /// Compute the full classification and summary from the two indexes.
    ///
    /// Always succeeds; work is bounded by the combined index sizes.
    pub fn reconcile(
        &self,
        source_index: &SourceIndex,
        system_index: &SystemIndex,
    ) -> ReconciliationReport {
        let mut missing_in_internal = Vec::new();
        let mut mismatched_transactions = Vec::new();

        for (id, source_txn) in source_index {
            match system_index.get(id) {
                Some(system_txn) => {
                    let discrepancies = self.rules.discrepancies(source_txn, system_txn);
                    if !discrepancies.is_empty() {
                        mismatched_transactions.push(MismatchedTransaction {
                            transaction_id: id.clone(),
                            discrepancies,
                        });
                    }
                }
                None => missing_in_internal.push(source_txn.clone()),
            }
        }

        let mut missing_in_source: Vec<SystemTransaction> = system_index
            .iter()
            .filter(|(id, _)| !source_index.contains_key(*id))
            .map(|(_, txn)| txn.clone())
            .collect();

        // Hash-map iteration order would otherwise leak into the output;
        // sort by key so identical inputs produce identical reports.
        missing_in_internal
            .sort_by(|a, b| a.provider_transaction_id.cmp(&b.provider_transaction_id));
        missing_in_source.sort_by(|a, b| a.transaction_id.cmp(&b.transaction_id));
        mismatched_transactions.sort_by(|a, b| a.transaction_id.cmp(&b.transaction_id));

        let summary = ReconciliationSummary {
            total_source_transactions: source_index.len(),
            total_system_transactions: system_index.len(),
            missing_in_internal_count: missing_in_internal.len(),
            missing_in_source_count: missing_in_source.len(),
            mismatched_transactions_count: mismatched_transactions.len(),
            // Every source key that is neither missing nor mismatched was
            // matched.
            successfully_matched_count: source_index.len()
                - missing_in_internal.len()
                - mismatched_transactions.len(),
        };

        ReconciliationReport {
            missing_in_internal,
            missing_in_source,
            mismatched_transactions,
            summary,
        }
    }
}
