//! Ledger import text (QIF dialect) for categorized payments.

pub mod config;
pub mod qif;

pub use config::LedgerHeader;
pub use qif::{export_payments, LedgerError, QifBuilder};
