//! File input for the two ledger formats

pub mod csv;

pub use self::csv::*;
