use serde::{Deserialize, Serialize};

use crate::qif::LedgerError;

/// The `!Account` block written at the top of every export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LedgerHeader {
    pub account_name: String,
    pub account_type: String,
    pub currency: String,
}

impl Default for LedgerHeader {
    fn default() -> Self {
        Self {
            account_name: "Wspólne".to_string(),
            account_type: "Invoice".to_string(),
            currency: "PLN".to_string(),
        }
    }
}

impl LedgerHeader {
    /// Missing keys fall back to the defaults.
    pub fn from_toml(toml_content: &str) -> Result<Self, LedgerError> {
        Ok(toml::from_str(toml_content)?)
    }

    pub fn render(&self) -> String {
        format!(
            "!Account\nN{}\nT{}\nD[{}]\n",
            self.account_name, self.account_type, self.currency
        )
    }
}
