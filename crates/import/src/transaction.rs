use chrono::NaiveDate;
use fastpay_core::{Money, PaymentKind};
use serde::{Deserialize, Serialize};

use crate::transaction_type::BankTransactionType;

/// One row of the bank statement.
///
/// `description` and `field1`..`field3` are opaque: what they hold depends on
/// `transaction_type`. Use the accessors in [`crate::fields`] to read them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BankTransaction {
    pub operation_date: NaiveDate,
    pub currency_date: NaiveDate,
    pub transaction_type: BankTransactionType,
    pub amount: Money,
    pub currency: String,
    pub balance_after_transaction: Money,
    pub description: String,
    pub field1: String,
    pub field2: String,
    pub field3: String,
}

impl BankTransaction {
    /// Outflows are withdrawals; everything else (including zero) is a deposit.
    pub fn payment_kind(&self) -> PaymentKind {
        if self.amount.is_negative() {
            PaymentKind::Withdrawal
        } else {
            PaymentKind::Deposit
        }
    }
}
