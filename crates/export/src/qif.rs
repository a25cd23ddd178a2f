use chrono::NaiveDate;
use fastpay_core::{Money, Payment, PaymentKind};
use thiserror::Error;

use crate::config::LedgerHeader;

#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("'{0}' is not supported transaction type")]
    UnsupportedKind(PaymentKind),
    #[error("Invalid ledger configuration: {0}")]
    Config(#[from] toml::de::Error),
}

/// Append-only builder for the QIF-like ledger import text.
///
/// Every line method appends exactly one line and returns the builder so calls
/// can be chained. Signs are written by the method, never taken from the
/// amount: `total_cost(x)` always renders `T-|x|`.
#[derive(Debug, Clone, Default)]
pub struct QifBuilder {
    header: LedgerHeader,
    buffer: String,
}

impl QifBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_header(header: LedgerHeader) -> Self {
        Self {
            header,
            buffer: String::new(),
        }
    }

    /// Header followed by everything appended so far, trailing whitespace
    /// removed from the appended part.
    pub fn build(&self) -> String {
        let mut out = self.header.render();
        out.push_str(self.buffer.trim_end());
        out
    }

    fn line(&mut self, code: &str, value: &str) -> &mut Self {
        self.buffer.push_str(code);
        self.buffer.push_str(value);
        self.buffer.push('\n');
        self
    }

    pub fn date(&mut self, date: NaiveDate) -> &mut Self {
        self.line("D", &date.format("%Y-%m-%d").to_string())
    }

    pub fn total_cost(&mut self, value: Money) -> &mut Self {
        self.line("T-", &value.abs().to_fixed2())
    }

    pub fn total_deposit(&mut self, value: Money) -> &mut Self {
        self.line("T", &value.abs().to_fixed2())
    }

    pub fn payee(&mut self, value: &str) -> &mut Self {
        self.line("P", value)
    }

    pub fn split(&mut self, category_path: &str) -> &mut Self {
        self.line("S", category_path)
    }

    pub fn split_amount_cost(&mut self, value: Money) -> &mut Self {
        self.line("$-", &value.abs().to_fixed2())
    }

    pub fn split_amount_deposit(&mut self, value: Money) -> &mut Self {
        self.line("$", &value.abs().to_fixed2())
    }

    pub fn start_transaction(&mut self) -> &mut Self {
        self.line("^", "")
    }

    pub fn end_transaction(&mut self) -> &mut Self {
        self.line("^", "")
    }

    /// Writes one complete transaction block. Nothing is written when the
    /// payment kind cannot be exported.
    pub fn add_transaction(&mut self, payment: Payment) -> Result<&mut Self, LedgerError> {
        let withdrawal = match payment.kind() {
            PaymentKind::Withdrawal => true,
            PaymentKind::Deposit => false,
            other => return Err(LedgerError::UnsupportedKind(other)),
        };

        tracing::debug!(
            payee = payment.payee(),
            splits = payment.splits().len(),
            "Adding ledger transaction"
        );

        self.start_transaction().date(payment.date());
        if withdrawal {
            self.total_cost(payment.total_amount());
        } else {
            self.total_deposit(payment.total_amount());
        }
        self.payee(payment.payee());

        for split in payment.splits() {
            self.split(&split.path());
            if withdrawal {
                self.split_amount_cost(split.amount);
            } else {
                self.split_amount_deposit(split.amount);
            }
        }

        Ok(self.end_transaction())
    }
}

/// Renders `payments` under `header`, failing on the first unsupported one.
pub fn export_payments<I>(header: LedgerHeader, payments: I) -> Result<String, LedgerError>
where
    I: IntoIterator<Item = Payment>,
{
    let mut builder = QifBuilder::with_header(header);
    for payment in payments {
        builder.add_transaction(payment)?;
    }
    Ok(builder.build())
}
