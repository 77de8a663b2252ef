//! Unique-key lookup structures built over each loaded ledger

use std::collections::HashMap;

use crate::types::{SourceTransaction, SystemTransaction};

/// Source ledger lookup keyed by provider transaction id
pub type SourceIndex = HashMap<String, SourceTransaction>;

/// System ledger lookup keyed by internal transaction id
pub type SystemIndex = HashMap<String, SystemTransaction>;

/// Build a natural-key lookup over an ordered sequence of records.
///
/// Duplicate keys are not reported: the later record in sequence order
/// silently replaces the earlier one.
pub fn index_records<T>(
    records: impl IntoIterator<Item = T>,
    key: impl Fn(&T) -> &str,
) -> HashMap<String, T> {
    let mut index = HashMap::new();
    for record in records {
        index.insert(key(&record).to_owned(), record);
    }
    index
}

/// Index source transactions by provider transaction id
pub fn index_source(records: Vec<SourceTransaction>) -> SourceIndex {
    index_records(records, |txn| txn.provider_transaction_id.as_str())
}

/// Index system transactions by transaction id
pub fn index_system(records: Vec<SystemTransaction>) -> SystemIndex {
    index_records(records, |txn| txn.transaction_id.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indexes_by_extracted_key() {
        let index = index_records(vec![("a", 1), ("b", 2)], |pair| pair.0);
        assert_eq!(index.len(), 2);
        assert_eq!(index["a"], ("a", 1));
        assert_eq!(index["b"], ("b", 2));
    }

    #[test]
    fn later_record_wins_on_duplicate_key() {
        let index = index_records(vec![("a", 1), ("a", 2), ("a", 3)], |pair| pair.0);
        assert_eq!(index.len(), 1);
        assert_eq!(index["a"], ("a", 3));
    }

    #[test]
    fn empty_input_yields_empty_index() {
        let index = index_records(Vec::<(&str, i32)>::new(), |pair| pair.0);
        assert!(index.is_empty());
    }
}
