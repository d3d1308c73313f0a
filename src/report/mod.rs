mod csv_export;
mod pdf;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::models::{Category, Transaction, TransactionType};
use crate::summary::{self, Summary};

pub(crate) use csv_export::export_csv;
pub(crate) use pdf::{export_pdf, render_pdf};

/// Placeholder written for transactions without a description.
pub(crate) const NO_DESCRIPTION: &str = "No Description";

/// One line of the exported table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ReportRow {
    /// 1-based position within the month.
    pub number: usize,
    /// `DD-MM-YYYY`.
    pub date: String,
    pub category: Category,
    pub description: String,
    pub kind: TransactionType,
    pub amount: Decimal,
    /// Set on every expense row matching the month's largest expense.
    pub highlighted: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct MonthlyReport {
    /// `YYYY-MM`.
    pub month: String,
    pub summary: Summary,
    pub rows: Vec<ReportRow>,
}

impl MonthlyReport {
    pub(crate) fn build(txns: &[Transaction], month: &str) -> Self {
        let filtered = summary::filter_month(txns, month);
        let summary = Summary::of(filtered.iter().copied());
        let largest = summary::largest_expense(filtered.iter().copied());

        let rows = filtered
            .iter()
            .enumerate()
            .map(|(i, txn)| ReportRow {
                number: i + 1,
                date: format_report_date(txn.date),
                category: txn.category,
                description: if txn.description.trim().is_empty() {
                    NO_DESCRIPTION.to_string()
                } else {
                    txn.description.clone()
                },
                kind: txn.kind,
                amount: txn.amount,
                highlighted: txn.is_expense() && Some(txn.amount) == largest,
            })
            .collect();

        Self {
            month: month.to_string(),
            summary,
            rows,
        }
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// `Expense_Report_<YYYY-MM>.<extension>`
    pub(crate) fn file_name(&self, extension: &str) -> String {
        format!("Expense_Report_{}.{extension}", self.month)
    }
}

/// `YYYY-MM-DD` → `DD-MM-YYYY`.
pub(crate) fn format_report_date(date: NaiveDate) -> String {
    date.format("%d-%m-%Y").to_string()
}
