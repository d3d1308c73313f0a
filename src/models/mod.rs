mod category;
mod draft;
mod theme;
mod transaction;

pub(crate) use category::Category;
pub(crate) use draft::{TransactionDraft, ValidationError, MAX_AMOUNT};
pub(crate) use theme::ThemePreference;
pub(crate) use transaction::{Transaction, TransactionType};
