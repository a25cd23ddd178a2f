pub mod category;
pub mod money;
pub mod payment;

pub use category::{CategorySplit, CATEGORY_SEPARATOR};
pub use money::Money;
pub use payment::{Payment, PaymentError, PaymentKind};
