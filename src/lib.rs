//! # Reconciliation Core
//!
//! A transaction reconciliation library that compares an external payment
//! provider export against the internal system ledger, reporting records
//! missing from either side and matched records whose fields disagree.
//!
//! ## Features
//!
//! - **CSV loading**: both ledger formats parse into typed records; any
//!   malformed row aborts the load with its line number
//! - **Unique-key indexing**: last-write-wins handling of duplicate keys
//! - **Tolerance-aware comparison**: amount tolerance of one currency minor
//!   unit, five-second timestamp tolerance, status-vocabulary normalization
//! - **Reporting**: a JSON document for downstream tooling plus a
//!   human-readable text summary
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::path::Path;
//! use reconciliation_core::ReconciliationService;
//!
//! let service = ReconciliationService::new();
//! let report = service.run(
//!     Path::new("source_transactions.csv"),
//!     Path::new("system_transactions.csv"),
//! )?;
//! println!("{} matched", report.summary.successfully_matched_count);
//! # Ok::<(), reconciliation_core::ReconciliationError>(())
//! ```

pub mod io;
pub mod reconciler;
pub mod report;
pub mod service;
pub mod types;

// Re-export commonly used types
pub use reconciler::*;
pub use service::*;
pub use types::*;
