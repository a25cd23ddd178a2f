use serde::{Deserialize, Serialize};
use std::fmt;

use super::money::Money;
use super::payment::PaymentError;

/// Separator between a category and its subcategory, e.g. `Jedzenie:Sok`.
pub const CATEGORY_SEPARATOR: char = ':';

/// One category's portion of a payment total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorySplit {
    pub name: String,
    pub subcategory: String,
    pub amount: Money,
}

impl CategorySplit {
    pub fn new(name: &str, subcategory: &str, amount: Money) -> Self {
        CategorySplit {
            name: name.to_string(),
            subcategory: subcategory.to_string(),
            amount,
        }
    }

    /// Builds a split from a `Category[: Subcategory]` path, the shape the
    /// category search returns. Both halves are trimmed.
    pub fn from_path(path: &str, amount: Money) -> Result<Self, PaymentError> {
        let mut parts = path.split(CATEGORY_SEPARATOR);
        let name = parts.next().unwrap_or_default().trim();
        let subcategory = parts.next().unwrap_or_default().trim();

        if name.is_empty() || parts.next().is_some() {
            return Err(PaymentError::InvalidCategoryPath(path.to_string()));
        }

        Ok(CategorySplit::new(name, subcategory, amount))
    }

    /// `Category:Subcategory`, without padding around the separator.
    pub fn path(&self) -> String {
        format!("{}{}{}", self.name, CATEGORY_SEPARATOR, self.subcategory)
    }
}

impl fmt::Display for CategorySplit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.path(), self.amount)
    }
}
