use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

use super::{Category, Transaction, TransactionType};

/// Largest amount a single transaction may carry (one quadrillion).
pub(crate) const MAX_AMOUNT: Decimal =
    Decimal::from_parts(0xA4C6_8000, 0x0003_8D7E, 0, false, 0);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub(crate) enum ValidationError {
    #[error("please fill all the fields: amount is missing")]
    MissingAmount,

    #[error("'{0}' is not a valid amount")]
    InvalidAmount(String),

    #[error("the amount must be greater than zero")]
    NonPositiveAmount,

    #[error("the amount must not exceed {}", MAX_AMOUNT)]
    AmountTooLarge,

    #[error("please fill all the fields: category is missing")]
    MissingCategory,

    #[error("please fill all the fields: date is missing")]
    MissingDate,

    #[error("'{0}' is not a valid date, use YYYY-MM-DD")]
    InvalidDate(String),
}

/// Raw, unchecked form input. Turned into a [`Transaction`] only through
/// [`TransactionDraft::into_transaction`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct TransactionDraft {
    pub kind: TransactionType,
    pub amount: String,
    pub category: Option<Category>,
    pub description: String,
    pub date: String,
}

impl Default for TransactionDraft {
    fn default() -> Self {
        Self {
            kind: TransactionType::Expense,
            amount: String::new(),
            category: None,
            description: String::new(),
            date: String::new(),
        }
    }
}

impl TransactionDraft {
    pub(crate) fn from_transaction(txn: &Transaction) -> Self {
        Self {
            kind: txn.kind,
            amount: txn.amount.normalize().to_string(),
            category: Some(txn.category),
            description: txn.description.clone(),
            date: txn.date_string(),
        }
    }

    pub(crate) fn parse_amount(&self) -> Result<Decimal, ValidationError> {
        let raw = self.amount.trim();
        if raw.is_empty() {
            return Err(ValidationError::MissingAmount);
        }
        let amount = Decimal::from_str(raw)
            .or_else(|_| Decimal::from_scientific(raw))
            .map_err(|_| ValidationError::InvalidAmount(raw.to_string()))?;
        if amount <= Decimal::ZERO {
            return Err(ValidationError::NonPositiveAmount);
        }
        if amount > MAX_AMOUNT {
            return Err(ValidationError::AmountTooLarge);
        }
        Ok(amount)
    }

    pub(crate) fn parse_date(&self) -> Result<NaiveDate, ValidationError> {
        let raw = self.date.trim();
        if raw.is_empty() {
            return Err(ValidationError::MissingDate);
        }
        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .map_err(|_| ValidationError::InvalidDate(raw.to_string()))
    }

    /// Validate every field and build the record under `id`.
    ///
    /// Amount is checked first, then category, then date, so the alert names
    /// the first missing field in form order.
    pub(crate) fn into_transaction(self, id: Uuid) -> Result<Transaction, ValidationError> {
        let amount = self.parse_amount()?;
        let category = self.category.ok_or(ValidationError::MissingCategory)?;
        let date = self.parse_date()?;
        Ok(Transaction {
            id,
            kind: self.kind,
            amount,
            category,
            description: self.description.trim().to_string(),
            date,
        })
    }
}
