//! Field-level comparison between matched record pairs
//!
//! Each compared field has its own equality rule. Amounts and timestamps
//! allow a small tolerance, and status values are normalized before
//! comparison, so ordinary rounding noise and processing delay do not show
//! up as discrepancies.

use bigdecimal::num_bigint::BigInt;
use bigdecimal::BigDecimal;
use chrono::{DateTime, Duration, Utc};
use std::collections::BTreeMap;

use crate::types::{ComparedField, Discrepancy, SourceTransaction, SystemTransaction};

/// Tolerances applied when comparing a matched pair of records
#[derive(Debug, Clone)]
pub struct CompareRules {
    /// Amounts whose absolute difference is below this are equal
    pub amount_tolerance: BigDecimal,
    /// Timestamps no further apart than this are equal
    pub timestamp_tolerance: Duration,
}

impl Default for CompareRules {
    fn default() -> Self {
        Self {
            // one currency minor unit
            amount_tolerance: BigDecimal::new(BigInt::from(1), 2),
            timestamp_tolerance: Duration::seconds(5),
        }
    }
}

impl CompareRules {
    /// Compare every field of a matched pair and collect the differences.
    ///
    /// All fields are checked; a difference in one never short-circuits the
    /// rest. Each discrepancy holds the original recorded values, not the
    /// normalized comparison forms.
    pub fn discrepancies(
        &self,
        source: &SourceTransaction,
        system: &SystemTransaction,
    ) -> BTreeMap<ComparedField, Discrepancy> {
        let mut discrepancies = BTreeMap::new();

        if source.user_id != system.user_id {
            discrepancies.insert(
                ComparedField::UserId,
                Discrepancy::new(source.user_id.as_str(), system.user_id.as_str()),
            );
        }

        if !self.amounts_equal(&source.amount, &system.amount) {
            discrepancies.insert(
                ComparedField::Amount,
                Discrepancy::new(source.amount.clone(), system.amount.clone()),
            );
        }

        if source.currency != system.currency {
            discrepancies.insert(
                ComparedField::Currency,
                Discrepancy::new(source.currency.as_str(), system.currency.as_str()),
            );
        }

        if normalize_status(&source.status) != normalize_status(&system.status) {
            discrepancies.insert(
                ComparedField::Status,
                Discrepancy::new(source.status.as_str(), system.status.as_str()),
            );
        }

        if source.payment_method != system.payment_method {
            discrepancies.insert(
                ComparedField::PaymentMethod,
                Discrepancy::new(source.payment_method.as_str(), system.payment_method.as_str()),
            );
        }

        if !self.timestamps_equal(source.created_at, system.created_at) {
            discrepancies.insert(
                ComparedField::CreatedAt,
                Discrepancy::new(source.created_at, system.created_at),
            );
        }

        if !self.timestamps_equal(source.updated_at, system.updated_at) {
            discrepancies.insert(
                ComparedField::UpdatedAt,
                Discrepancy::new(source.updated_at, system.updated_at),
            );
        }

        if source.provider_reference != system.reference_id {
            discrepancies.insert(
                ComparedField::ReferenceId,
                Discrepancy::new(
                    source.provider_reference.as_str(),
                    system.reference_id.as_str(),
                ),
            );
        }

        discrepancies
    }

    /// Amount equality under the configured tolerance (strictly below)
    pub fn amounts_equal(&self, source: &BigDecimal, system: &BigDecimal) -> bool {
        (source - system).abs() < self.amount_tolerance
    }

    /// Timestamp equality under the configured tolerance (inclusive)
    pub fn timestamps_equal(&self, source: DateTime<Utc>, system: DateTime<Utc>) -> bool {
        (source - system).abs() <= self.timestamp_tolerance
    }
}

/// Standardize a status value so vocabularies from the two ledgers compare.
///
/// Comparison is case- and whitespace-insensitive; SUCCEEDED and COMPLETED
/// are the same state under two names and collapse to COMPLETED.
pub fn normalize_status(status: &str) -> String {
    let normalized = status.trim().to_uppercase();
    if normalized == "SUCCEEDED" || normalized == "COMPLETED" {
        return "COMPLETED".to_owned();
    }
    normalized
}
