//! Recovers semantic values from the free-text statement columns.
//!
//! The bank does not label its columns; it embeds `Label: value` fragments in
//! them instead, and which column carries which fragment depends on the
//! transaction type. [`rule`] is the single source of that layout. Accessors
//! return `Ok(None)` when the marker is missing from the text and
//! [`ExtractError::NotApplicable`] when the type has no such value at all.

use chrono::{NaiveDate, NaiveDateTime};
use std::fmt;
use thiserror::Error;

use crate::transaction::BankTransaction;
use crate::transaction_type::BankTransactionType;

pub const TITLE: &str = "Tytuł: ";
pub const ADDRESS: &str = "Adres: ";
pub const CITY: &str = "Miasto: ";
pub const COUNTRY: &str = "Kraj: ";
pub const EXECUTED_AT: &str = "Data wykonania operacji: ";
pub const RECEIVER_ACCOUNT: &str = "Rachunek odbiorcy: ";
pub const RECEIVER_NAME: &str = "Nazwa odbiorcy: ";
pub const SENDER_ACCOUNT: &str = "Rachunek nadawcy: ";
pub const SENDER_NAME: &str = "Nazwa nadawcy: ";
pub const SENDER_ADDRESS: &str = "Adres nadawcy: ";

// End markers carry the leading space so the preceding value comes out unpadded.
const CITY_END: &str = " Miasto:";
const COUNTRY_END: &str = " Kraj:";
const ADDRESS_END: &str = " Adres:";

const TIMESTAMP_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%d.%m.%Y %H:%M:%S",
    "%d.%m.%Y %H:%M",
];

/// Free-text column of a [`BankTransaction`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Description,
    Field1,
    Field2,
    Field3,
}

/// How a value is cut out of its column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Locator {
    After(&'static str),
    Between(&'static str, &'static str),
    Whole,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldRule {
    pub column: Column,
    pub locator: Locator,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Accessor {
    Title,
    Address,
    City,
    Country,
    ExecutionTimestamp,
    ReceiverAccount,
    ReceiverName,
    SenderAccount,
    SenderName,
    SenderAddress,
}

impl Accessor {
    pub const ALL: [Accessor; 10] = [
        Accessor::Title,
        Accessor::Address,
        Accessor::City,
        Accessor::Country,
        Accessor::ExecutionTimestamp,
        Accessor::ReceiverAccount,
        Accessor::ReceiverName,
        Accessor::SenderAccount,
        Accessor::SenderName,
        Accessor::SenderAddress,
    ];
}

impl fmt::Display for Accessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Accessor::Title => "title",
            Accessor::Address => "address",
            Accessor::City => "city",
            Accessor::Country => "country",
            Accessor::ExecutionTimestamp => "execution timestamp",
            Accessor::ReceiverAccount => "receiver account",
            Accessor::ReceiverName => "receiver name",
            Accessor::SenderAccount => "sender account",
            Accessor::SenderName => "sender name",
            Accessor::SenderAddress => "sender address",
        };
        f.write_str(name)
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractError {
    #[error("{accessor} is not available for {kind} transactions")]
    NotApplicable {
        accessor: Accessor,
        kind: BankTransactionType,
    },
    #[error("Invalid execution timestamp: '{0}'")]
    InvalidTimestamp(String),
}

/// Where `accessor` lives for transactions of `kind`, if anywhere.
pub fn rule(kind: BankTransactionType, accessor: Accessor) -> Option<FieldRule> {
    use Accessor as A;
    use BankTransactionType as T;
    use Column::*;

    let at = |column, locator| Some(FieldRule { column, locator });

    match (accessor, kind) {
        (A::Title, T::CardPayment | T::AtmWithdrawal | T::MobileWebPayment | T::AtmWithdrawalMobileCode) => {
            at(Description, Locator::After(TITLE))
        }
        (A::Title, T::StandingOrder | T::IncomingPhoneTransfer | T::ForeignCurrencyTransfer) => {
            at(Field2, Locator::After(TITLE))
        }
        (A::Title, T::AccountTransfer | T::OutgoingAccountTransfer | T::VariableOrder) => {
            at(Field3, Locator::After(TITLE))
        }
        (A::Title, T::Commission) => at(Description, Locator::Whole),

        (A::Address, T::CardPayment | T::AtmWithdrawal) => {
            at(Field1, Locator::Between(ADDRESS, CITY_END))
        }
        (A::Address, T::AtmWithdrawalMobileCode) => at(Field2, Locator::Between(ADDRESS, CITY_END)),
        (A::Address, T::MobileWebPayment | T::VariableOrder) => at(Field1, Locator::After(ADDRESS)),

        (A::City, T::CardPayment | T::AtmWithdrawal) => at(Field1, Locator::Between(CITY, COUNTRY_END)),
        (A::City, T::AtmWithdrawalMobileCode) => at(Field2, Locator::Between(CITY, COUNTRY_END)),

        (A::Country, T::CardPayment | T::AtmWithdrawal) => at(Field1, Locator::After(COUNTRY)),
        (A::Country, T::AtmWithdrawalMobileCode) => at(Field2, Locator::After(COUNTRY)),

        (A::ExecutionTimestamp, T::CardPayment | T::AtmWithdrawal | T::MobileWebPayment) => {
            at(Field2, Locator::After(EXECUTED_AT))
        }

        (A::ReceiverAccount, T::StandingOrder | T::OutgoingAccountTransfer | T::VariableOrder) => {
            at(Description, Locator::After(RECEIVER_ACCOUNT))
        }
        (A::ReceiverName, T::StandingOrder | T::OutgoingAccountTransfer) => {
            at(Field1, Locator::After(RECEIVER_NAME))
        }
        // field1 carries the receiver's address right after the name.
        (A::ReceiverName, T::VariableOrder) => at(Field1, Locator::Between(RECEIVER_NAME, ADDRESS_END)),

        (A::SenderAccount, T::AccountTransfer | T::IncomingPhoneTransfer | T::ForeignCurrencyTransfer) => {
            at(Description, Locator::After(SENDER_ACCOUNT))
        }
        (A::SenderName, T::AccountTransfer | T::IncomingPhoneTransfer | T::ForeignCurrencyTransfer) => {
            at(Field1, Locator::After(SENDER_NAME))
        }
        (A::SenderAddress, T::AccountTransfer) => at(Field2, Locator::After(SENDER_ADDRESS)),

        _ => None,
    }
}

/// Trimmed text following the first `marker`, or `None` if there is none.
pub fn text_after<'a>(haystack: &'a str, marker: &str) -> Option<&'a str> {
    haystack
        .find(marker)
        .map(|idx| haystack[idx + marker.len()..].trim())
}

/// Text strictly between the first `start` and the first `end`.
///
/// Both markers are located independently from the start of `haystack`. If
/// the first `end` does not follow the first `start` the result is `None`,
/// logged at debug level since it is indistinguishable from a missing marker.
pub fn text_between<'a>(haystack: &'a str, start: &str, end: &str) -> Option<&'a str> {
    let from = haystack.find(start)? + start.len();
    let to = haystack.find(end)?;
    if to < from {
        tracing::debug!(start, end, "End marker precedes start marker");
        return None;
    }
    haystack.get(from..to)
}

impl BankTransaction {
    fn column(&self, column: Column) -> &str {
        match column {
            Column::Description => &self.description,
            Column::Field1 => &self.field1,
            Column::Field2 => &self.field2,
            Column::Field3 => &self.field3,
        }
    }

    /// Generic accessor behind all the named ones.
    pub fn extract(&self, accessor: Accessor) -> Result<Option<&str>, ExtractError> {
        let FieldRule { column, locator } =
            rule(self.transaction_type, accessor).ok_or(ExtractError::NotApplicable {
                accessor,
                kind: self.transaction_type,
            })?;

        let text = self.column(column);
        Ok(match locator {
            Locator::After(marker) => text_after(text, marker),
            Locator::Between(start, end) => text_between(text, start, end),
            Locator::Whole => Some(text),
        })
    }

    pub fn title(&self) -> Result<Option<&str>, ExtractError> {
        self.extract(Accessor::Title)
    }

    pub fn address(&self) -> Result<Option<&str>, ExtractError> {
        self.extract(Accessor::Address)
    }

    pub fn city(&self) -> Result<Option<&str>, ExtractError> {
        self.extract(Accessor::City)
    }

    pub fn country(&self) -> Result<Option<&str>, ExtractError> {
        self.extract(Accessor::Country)
    }

    pub fn receiver_account(&self) -> Result<Option<&str>, ExtractError> {
        self.extract(Accessor::ReceiverAccount)
    }

    pub fn receiver_name(&self) -> Result<Option<&str>, ExtractError> {
        self.extract(Accessor::ReceiverName)
    }

    pub fn sender_account(&self) -> Result<Option<&str>, ExtractError> {
        self.extract(Accessor::SenderAccount)
    }

    pub fn sender_name(&self) -> Result<Option<&str>, ExtractError> {
        self.extract(Accessor::SenderName)
    }

    pub fn sender_address(&self) -> Result<Option<&str>, ExtractError> {
        self.extract(Accessor::SenderAddress)
    }

    /// When the operation was actually executed, as opposed to booked.
    pub fn execution_timestamp(&self) -> Result<Option<NaiveDateTime>, ExtractError> {
        match self.extract(Accessor::ExecutionTimestamp)? {
            Some(raw) => parse_timestamp(raw).map(Some),
            None => Ok(None),
        }
    }

    /// Best counterparty label for a payee: receiver, then sender, then title.
    pub fn payee(&self) -> Option<&str> {
        [Accessor::ReceiverName, Accessor::SenderName, Accessor::Title]
            .into_iter()
            .filter_map(|accessor| self.extract(accessor).ok().flatten())
            .find(|value| !value.is_empty())
    }
}

fn parse_timestamp(raw: &str) -> Result<NaiveDateTime, ExtractError> {
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .or_else(|| {
            ["%Y-%m-%d", "%d.%m.%Y"]
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
        .ok_or_else(|| ExtractError::InvalidTimestamp(raw.to_string()))
}
