use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use super::category::CategorySplit;
use super::money::Money;

/// Transaction kinds understood by the ledger application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentKind {
    Withdrawal,
    Deposit,
    Transfer,
}

impl fmt::Display for PaymentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaymentKind::Withdrawal => write!(f, "Withdrawal"),
            PaymentKind::Deposit => write!(f, "Deposit"),
            PaymentKind::Transfer => write!(f, "Transfer"),
        }
    }
}

impl std::str::FromStr for PaymentKind {
    type Err = PaymentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "withdrawal" | "expense" => Ok(PaymentKind::Withdrawal),
            "deposit" | "income" => Ok(PaymentKind::Deposit),
            "transfer" => Ok(PaymentKind::Transfer),
            _ => Err(PaymentError::InvalidKind(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PaymentError {
    #[error("Sum of all categories '{sum}' must be equal to total amount '{total}'")]
    SplitSumMismatch { sum: Money, total: Money },
    #[error("Unknown payment kind: '{0}'")]
    InvalidKind(String),
    #[error("Invalid category path: '{0}'")]
    InvalidCategoryPath(String),
}

/// A categorized transaction ready for ledger export.
///
/// The only way to obtain one is [`Payment::new`], which rejects split sets
/// that do not add up to the total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Payment {
    date: NaiveDate,
    kind: PaymentKind,
    total_amount: Money,
    payee: String,
    splits: Vec<CategorySplit>,
    notes: String,
}

impl Payment {
    pub fn new(
        date: NaiveDate,
        kind: PaymentKind,
        total_amount: Money,
        payee: &str,
        splits: Vec<CategorySplit>,
        notes: &str,
    ) -> Result<Payment, PaymentError> {
        let sum: Money = splits.iter().map(|s| s.amount).sum();
        if sum != total_amount {
            return Err(PaymentError::SplitSumMismatch {
                sum,
                total: total_amount,
            });
        }

        Ok(Payment {
            date,
            kind,
            total_amount,
            payee: payee.to_string(),
            splits,
            notes: notes.to_string(),
        })
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn kind(&self) -> PaymentKind {
        self.kind
    }

    pub fn total_amount(&self) -> Money {
        self.total_amount
    }

    pub fn payee(&self) -> &str {
        &self.payee
    }

    pub fn splits(&self) -> &[CategorySplit] {
        &self.splits
    }

    pub fn notes(&self) -> &str {
        &self.notes
    }
}
