//! Reconciliation engine: indexing, field comparison, and classification

pub mod compare;
pub mod engine;
pub mod index;

pub use compare::*;
pub use engine::*;
pub use index::*;
