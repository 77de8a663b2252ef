//! Report emission: JSON document and human-readable summary
//!
//! The logical report shape belongs to [`crate::types`]; this module owns the
//! serialized forms and file persistence. The console output is the primary
//! artifact: failing to persist an auxiliary file never fails the run.

use std::fs;
use std::path::Path;

use bigdecimal::BigDecimal;
use serde::Serialize;
use tracing::{info, warn};

use crate::types::{
    MismatchedTransaction, ReconciliationReport, ReconciliationResult, ReconciliationSummary,
    SourceTransaction, SystemTransaction,
};

/// Document shape consumed by downstream tooling. The two missing lists are
/// slimmed to the identifying columns of each record.
#[derive(Serialize)]
struct JsonDocument<'a> {
    missing_in_internal: Vec<SourceRow<'a>>,
    missing_in_source: Vec<SystemRow<'a>>,
    mismatched_transactions: &'a [MismatchedTransaction],
    summary: &'a ReconciliationSummary,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SourceRow<'a> {
    provider_transaction_id: &'a str,
    amount: &'a BigDecimal,
    currency: &'a str,
    status: &'a str,
}

impl<'a> From<&'a SourceTransaction> for SourceRow<'a> {
    fn from(txn: &'a SourceTransaction) -> Self {
        Self {
            provider_transaction_id: &txn.provider_transaction_id,
            amount: &txn.amount,
            currency: &txn.currency,
            status: &txn.status,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SystemRow<'a> {
    transaction_id: &'a str,
    amount: &'a BigDecimal,
    currency: &'a str,
    status: &'a str,
}

impl<'a> From<&'a SystemTransaction> for SystemRow<'a> {
    fn from(txn: &'a SystemTransaction) -> Self {
        Self {
            transaction_id: &txn.transaction_id,
            amount: &txn.amount,
            currency: &txn.currency,
            status: &txn.status,
        }
    }
}

/// Render the report as a pretty-printed JSON document
pub fn to_json(report: &ReconciliationReport) -> ReconciliationResult<String> {
    let document = JsonDocument {
        missing_in_internal: report.missing_in_internal.iter().map(Into::into).collect(),
        missing_in_source: report.missing_in_source.iter().map(Into::into).collect(),
        mismatched_transactions: &report.mismatched_transactions,
        summary: &report.summary,
    };
    Ok(serde_json::to_string_pretty(&document)?)
}

/// Render the banner-formatted text summary
pub fn summary_text(report: &ReconciliationReport) -> String {
    let summary = &report.summary;
    let separator = "=".repeat(60);

    let mut out = String::new();
    out.push_str(&format!("{separator}\n"));
    out.push_str("TRANSACTION RECONCILIATION SUMMARY\n");
    out.push_str(&format!("{separator}\n"));
    out.push_str(&format!(
        "Total Source Transactions:      {}\n",
        summary.total_source_transactions
    ));
    out.push_str(&format!(
        "Total System Transactions:      {}\n",
        summary.total_system_transactions
    ));
    out.push_str(&format!(
        "Successfully Matched:           {}\n",
        summary.successfully_matched_count
    ));
    out.push_str(&format!(
        "Missing in Internal System:     {}\n",
        summary.missing_in_internal_count
    ));
    out.push_str(&format!(
        "Missing in Source:              {}\n",
        summary.missing_in_source_count
    ));
    out.push_str(&format!(
        "Mismatched Transactions:        {}\n",
        summary.mismatched_transactions_count
    ));
    out.push_str(&format!("{separator}\n"));
    if let Some(rate) = summary.reconciliation_rate() {
        out.push_str(&format!("Reconciliation Rate:            {rate:.2}%\n"));
    }
    out.push_str(&format!("{separator}\n"));
    out
}

/// Print the JSON document to stdout and best-effort persist the report and
/// summary files. Persistence failures downgrade to warnings.
pub fn emit(
    report: &ReconciliationReport,
    report_path: &Path,
    summary_path: &Path,
) -> ReconciliationResult<()> {
    let json = to_json(report)?;
    println!("{json}");

    match fs::write(report_path, &json) {
        Ok(()) => info!(path = %report_path.display(), "reconciliation report saved"),
        Err(err) => {
            warn!(path = %report_path.display(), %err, "could not persist reconciliation report")
        }
    }

    let summary = summary_text(report);
    match fs::write(summary_path, &summary) {
        Ok(()) => info!(path = %summary_path.display(), "summary report saved"),
        Err(err) => warn!(path = %summary_path.display(), %err, "could not persist summary"),
    }

    Ok(())
}
