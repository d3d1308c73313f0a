//! Derived views over a transaction sequence: totals by type, the per-category
//! expense breakdown, the month filter and the "recent" list.

use rust_decimal::Decimal;

use crate::models::{Category, Transaction};

/// Axis maximum used when there is nothing to scale against.
pub(crate) const DEFAULT_AXIS_MAX: Decimal = Decimal::TEN;

/// Sum of expense amounts per fixed category, in [`Category::ALL`] order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) struct CategoryBreakdown([Decimal; 6]);

impl CategoryBreakdown {
    pub(crate) fn get(&self, category: Category) -> Decimal {
        self.0[category.index()]
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = (Category, Decimal)> + '_ {
        Category::ALL.iter().map(|c| (*c, self.get(*c)))
    }

    /// Categories with a nonzero total, in fixed order.
    pub(crate) fn nonzero(&self) -> impl Iterator<Item = (Category, Decimal)> + '_ {
        self.iter().filter(|(_, amount)| !amount.is_zero())
    }

    pub(crate) fn total(&self) -> Decimal {
        self.0
            .iter()
            .fold(Decimal::ZERO, |acc, amount| acc.saturating_add(*amount))
    }

    pub(crate) fn max(&self) -> Decimal {
        self.0.iter().copied().max().unwrap_or(Decimal::ZERO)
    }

    /// True when every category is zero; charts show an empty state instead.
    pub(crate) fn is_empty(&self) -> bool {
        self.0.iter().all(Decimal::is_zero)
    }

    fn add(&mut self, category: Category, amount: Decimal) {
        let slot = &mut self.0[category.index()];
        *slot = slot.saturating_add(amount);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) struct Summary {
    pub total_income: Decimal,
    pub total_expense: Decimal,
    pub by_category: CategoryBreakdown,
}

impl Summary {
    /// Totals saturate at [`Decimal::MAX`] instead of overflowing.
    pub(crate) fn of<'a>(txns: impl IntoIterator<Item = &'a Transaction>) -> Self {
        let mut summary = Self::default();
        for txn in txns {
            if txn.is_income() {
                summary.total_income = summary.total_income.saturating_add(txn.amount);
            } else {
                summary.total_expense = summary.total_expense.saturating_add(txn.amount);
                summary.by_category.add(txn.category, txn.amount);
            }
        }
        summary
    }

    pub(crate) fn balance(&self) -> Decimal {
        self.total_income.saturating_sub(self.total_expense)
    }

    pub(crate) fn max_category_expense(&self) -> Decimal {
        self.by_category.max()
    }

    /// Upper bound for the category chart axis: 20% headroom over the largest
    /// category, never below [`DEFAULT_AXIS_MAX`].
    pub(crate) fn suggested_max(&self) -> Decimal {
        let max = self.max_category_expense();
        if max.is_zero() {
            DEFAULT_AXIS_MAX
        } else {
            max.checked_mul(Decimal::new(12, 1))
                .unwrap_or(Decimal::MAX)
                .max(DEFAULT_AXIS_MAX)
        }
    }

    /// Nothing to chart for income vs expense.
    pub(crate) fn is_empty(&self) -> bool {
        self.total_income.is_zero() && self.total_expense.is_zero()
    }
}

/// Transactions whose ISO date starts with `month`, in stored order.
pub(crate) fn filter_month<'a>(txns: &'a [Transaction], month: &str) -> Vec<&'a Transaction> {
    txns.iter().filter(|t| t.in_month(month)).collect()
}

/// The last `n` transactions, newest first.
pub(crate) fn recent(txns: &[Transaction], n: usize) -> impl Iterator<Item = &Transaction> {
    txns.iter().rev().take(n)
}

/// Largest single expense amount, if any expense exists.
pub(crate) fn largest_expense<'a>(
    txns: impl IntoIterator<Item = &'a Transaction>,
) -> Option<Decimal> {
    txns.into_iter()
        .filter(|t| t.is_expense())
        .map(|t| t.amount)
        .max()
}

#[cfg(test)]
mod tests;
