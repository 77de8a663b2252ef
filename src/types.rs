//! Core types and data structures for ledger reconciliation

use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// A transaction row from the external provider export (Stripe, Adyen, etc.),
/// parsed from `source_transactions.csv`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceTransaction {
    /// The provider's transaction id, used as the natural key
    pub provider_transaction_id: String,
    pub email: String,
    pub user_id: String,
    /// Name of the payment provider that produced the export
    pub provider: String,
    /// Transaction amount in currency major units
    #[serde(deserialize_with = "amount_from_str")]
    pub amount: BigDecimal,
    /// ISO currency code
    pub currency: String,
    /// Free-text status as recorded by the provider
    pub status: String,
    pub transaction_type: String,
    pub payment_method: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Reference compared against the system ledger's `reference_id`
    pub provider_reference: String,
    pub fraud_risk: String,
    #[serde(rename = "details_invoiceId")]
    pub details_invoice_id: String,
    #[serde(rename = "details_customerName")]
    pub details_customer_name: String,
    #[serde(rename = "details_description")]
    pub details_description: String,
}

/// A transaction row from the internal system ledger, parsed from
/// `system_transactions.csv`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemTransaction {
    /// The internal transaction id, used as the natural key
    pub transaction_id: String,
    pub user_id: String,
    /// Transaction amount in currency major units
    #[serde(deserialize_with = "amount_from_str")]
    pub amount: BigDecimal,
    /// ISO currency code
    pub currency: String,
    /// Free-text status as recorded by the internal system
    pub status: String,
    pub payment_method: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Reference compared against the source ledger's `provider_reference`
    pub reference_id: String,
    #[serde(rename = "metadata_orderId")]
    pub metadata_order_id: String,
    #[serde(rename = "metadata_description")]
    pub metadata_description: String,
}

/// Amounts are parsed from their decimal string form, never through `f64`
fn amount_from_str<'de, D>(deserializer: D) -> Result<BigDecimal, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    raw.trim()
        .parse::<BigDecimal>()
        .map_err(serde::de::Error::custom)
}

/// The fields compared between a matched pair of records
///
/// Serializes to the camelCase names downstream tooling expects as
/// discrepancy map keys (`userId`, `amount`, `createdAt`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ComparedField {
    UserId,
    Amount,
    Currency,
    Status,
    PaymentMethod,
    CreatedAt,
    UpdatedAt,
    ReferenceId,
}

impl ComparedField {
    /// The camelCase name used in serialized reports
    pub fn as_str(&self) -> &'static str {
        match self {
            ComparedField::UserId => "userId",
            ComparedField::Amount => "amount",
            ComparedField::Currency => "currency",
            ComparedField::Status => "status",
            ComparedField::PaymentMethod => "paymentMethod",
            ComparedField::CreatedAt => "createdAt",
            ComparedField::UpdatedAt => "updatedAt",
            ComparedField::ReferenceId => "referenceId",
        }
    }
}

/// A value recorded on one side of a discrepancy
///
/// Serialized untagged, so reports show the raw value rather than a variant
/// wrapper.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// A monetary amount
    Amount(BigDecimal),
    /// An instant, serialized as RFC 3339
    Timestamp(DateTime<Utc>),
    /// Any plain string field
    Text(String),
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_owned())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<BigDecimal> for FieldValue {
    fn from(value: BigDecimal) -> Self {
        FieldValue::Amount(value)
    }
}

impl From<DateTime<Utc>> for FieldValue {
    fn from(value: DateTime<Utc>) -> Self {
        FieldValue::Timestamp(value)
    }
}

/// A single field mismatch between corresponding records
///
/// Both sides hold the original values as each ledger recorded them, not the
/// normalized forms used for comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Discrepancy {
    pub source: FieldValue,
    pub system: FieldValue,
}

impl Discrepancy {
    /// Create a discrepancy from the two recorded values
    pub fn new(source: impl Into<FieldValue>, system: impl Into<FieldValue>) -> Self {
        Self {
            source: source.into(),
            system: system.into(),
        }
    }
}

/// A transaction present in both ledgers whose fields disagree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MismatchedTransaction {
    /// The natural key shared by the two records
    pub transaction_id: String,
    /// Per-field differences; never empty
    pub discrepancies: BTreeMap<ComparedField, Discrepancy>,
}

/// Statistics about one reconciliation run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconciliationSummary {
    pub total_source_transactions: usize,
    pub total_system_transactions: usize,
    pub missing_in_internal_count: usize,
    pub missing_in_source_count: usize,
    pub mismatched_transactions_count: usize,
    pub successfully_matched_count: usize,
}

impl ReconciliationSummary {
    /// Matched count over the smaller ledger size, as a percentage
    ///
    /// Returns `None` when either ledger is empty and no match was possible.
    pub fn reconciliation_rate(&self) -> Option<f64> {
        let possible = self
            .total_source_transactions
            .min(self.total_system_transactions);
        if possible == 0 {
            return None;
        }
        Some(self.successfully_matched_count as f64 / possible as f64 * 100.0)
    }
}

/// The complete result of reconciling the two ledgers
///
/// The four serialized field names are relied upon by downstream tooling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReconciliationReport {
    /// Source records with no counterpart in the system ledger
    pub missing_in_internal: Vec<SourceTransaction>,
    /// System records with no counterpart in the source ledger
    pub missing_in_source: Vec<SystemTransaction>,
    /// Records present in both ledgers with at least one field difference
    pub mismatched_transactions: Vec<MismatchedTransaction>,
    pub summary: ReconciliationSummary,
}

/// Errors that can occur while loading ledgers or emitting reports
///
/// The comparison engine itself has no failure modes; everything fallible
/// lives at the file boundary.
#[derive(Debug, thiserror::Error)]
pub enum ReconciliationError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{path} contains no data")]
    EmptyFile { path: PathBuf },
    #[error("invalid record at line {line}: {message}")]
    Parse { line: u64, message: String },
    #[error("input file not found: {0}")]
    MissingInput(PathBuf),
    #[error("failed to serialize report: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Result type for reconciliation operations
pub type ReconciliationResult<T> = Result<T, ReconciliationError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn compared_field_serializes_to_camel_case() {
        for (field, name) in [
            (ComparedField::UserId, "\"userId\""),
            (ComparedField::PaymentMethod, "\"paymentMethod\""),
            (ComparedField::ReferenceId, "\"referenceId\""),
        ] {
            assert_eq!(serde_json::to_string(&field).unwrap(), name);
            assert_eq!(field.as_str(), name.trim_matches('"'));
        }
    }

    #[test]
    fn field_value_serializes_untagged() {
        let amount = FieldValue::from(BigDecimal::from_str("100.05").unwrap());
        assert_eq!(serde_json::to_string(&amount).unwrap(), "\"100.05\"");

        let text = FieldValue::from("refunded");
        assert_eq!(serde_json::to_string(&text).unwrap(), "\"refunded\"");
    }

    #[test]
    fn reconciliation_rate_uses_smaller_ledger() {
        let summary = ReconciliationSummary {
            total_source_transactions: 10,
            total_system_transactions: 4,
            missing_in_internal_count: 7,
            missing_in_source_count: 1,
            mismatched_transactions_count: 0,
            successfully_matched_count: 3,
        };
        assert_eq!(summary.reconciliation_rate(), Some(75.0));
    }

    #[test]
    fn reconciliation_rate_is_none_for_empty_ledgers() {
        let summary = ReconciliationSummary {
            total_source_transactions: 0,
            total_system_transactions: 5,
            missing_in_internal_count: 0,
            missing_in_source_count: 5,
            mismatched_transactions_count: 0,
            successfully_matched_count: 0,
        };
        assert_eq!(summary.reconciliation_rate(), None);
    }
}
