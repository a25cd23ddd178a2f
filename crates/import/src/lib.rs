//! Bank statement import: row parsing, free-text field recovery and category
//! lookup.

pub mod fields;
pub mod search;
pub mod statement;
pub mod transaction;
pub mod transaction_type;

pub use fields::{Accessor, ExtractError};
pub use search::{CaseSensitivity, CategorySearchEngine};
pub use statement::{parse, parse_statement, StatementError, StatementParser};
pub use transaction::BankTransaction;
pub use transaction_type::BankTransactionType;
