use serde::{Deserialize, Serialize};
use std::fmt;

/// Transaction kinds that appear in the bank's statement export.
///
/// Each kind lays out its free-text columns differently; see
/// [`crate::fields`] for the per-kind layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BankTransactionType {
    AtmWithdrawal,
    StandingOrder,
    CardPayment,
    AccountTransfer,
    IncomingPhoneTransfer,
    MobileWebPayment,
    Commission,
    VariableOrder,
    OutgoingAccountTransfer,
    ForeignCurrencyTransfer,
    AtmWithdrawalMobileCode,
}

/// Literal labels as exported by the bank, paired with their kind.
pub const TRANSACTION_TYPE_LABELS: &[(&str, BankTransactionType)] = &[
    ("Wypłata z bankomatu", BankTransactionType::AtmWithdrawal),
    ("Zlecenie stałe", BankTransactionType::StandingOrder),
    ("Płatność kartą", BankTransactionType::CardPayment),
    ("Przelew na konto", BankTransactionType::AccountTransfer),
    (
        "Przelew na telefon przychodz. zew.",
        BankTransactionType::IncomingPhoneTransfer,
    ),
    (
        "Płatność web - kod mobilny",
        BankTransactionType::MobileWebPayment,
    ),
    ("Prowizja", BankTransactionType::Commission),
    ("Zlecenie zmienne", BankTransactionType::VariableOrder),
    ("Przelew z rachunku", BankTransactionType::OutgoingAccountTransfer),
    (
        "Przelew zagraniczny i walutowy",
        BankTransactionType::ForeignCurrencyTransfer,
    ),
    (
        "Wypłata w bankomacie - kod mobilny",
        BankTransactionType::AtmWithdrawalMobileCode,
    ),
];

impl BankTransactionType {
    pub const ALL: [BankTransactionType; 11] = [
        BankTransactionType::AtmWithdrawal,
        BankTransactionType::StandingOrder,
        BankTransactionType::CardPayment,
        BankTransactionType::AccountTransfer,
        BankTransactionType::IncomingPhoneTransfer,
        BankTransactionType::MobileWebPayment,
        BankTransactionType::Commission,
        BankTransactionType::VariableOrder,
        BankTransactionType::OutgoingAccountTransfer,
        BankTransactionType::ForeignCurrencyTransfer,
        BankTransactionType::AtmWithdrawalMobileCode,
    ];

    /// Label exactly as the bank writes it.
    pub fn label(self) -> &'static str {
        TRANSACTION_TYPE_LABELS
            .iter()
            .find(|(_, kind)| *kind == self)
            .map(|(label, _)| *label)
            .unwrap_or_default()
    }

    /// Exact lookup; no case folding or whitespace normalisation beyond trim.
    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim();
        TRANSACTION_TYPE_LABELS
            .iter()
            .find(|(l, _)| *l == label)
            .map(|(_, kind)| *kind)
    }
}

impl fmt::Display for BankTransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BankTransactionType::AtmWithdrawal => "AtmWithdrawal",
            BankTransactionType::StandingOrder => "StandingOrder",
            BankTransactionType::CardPayment => "CardPayment",
            BankTransactionType::AccountTransfer => "AccountTransfer",
            BankTransactionType::IncomingPhoneTransfer => "IncomingPhoneTransfer",
            BankTransactionType::MobileWebPayment => "MobileWebPayment",
            BankTransactionType::Commission => "Commission",
            BankTransactionType::VariableOrder => "VariableOrder",
            BankTransactionType::OutgoingAccountTransfer => "OutgoingAccountTransfer",
            BankTransactionType::ForeignCurrencyTransfer => "ForeignCurrencyTransfer",
            BankTransactionType::AtmWithdrawalMobileCode => "AtmWithdrawalMobileCode",
        };
        f.write_str(name)
    }
}

impl std::str::FromStr for BankTransactionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_label(s).ok_or_else(|| format!("Unknown transaction type: '{s}'"))
    }
}
