#![allow(clippy::unwrap_used)]

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use uuid::Uuid;

use super::*;
use crate::models::{TransactionType, MAX_AMOUNT};

fn make_txn(kind: TransactionType, amount: Decimal, category: Category, date: &str) -> Transaction {
    Transaction {
        id: Uuid::new_v4(),
        kind,
        amount,
        category,
        description: String::new(),
        date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
    }
}

fn sample() -> Vec<Transaction> {
    vec![
        make_txn(TransactionType::Income, dec!(5000), Category::Salary, "2024-03-01"),
        make_txn(TransactionType::Expense, dec!(1200), Category::Groceries, "2024-03-05"),
        make_txn(TransactionType::Expense, dec!(300), Category::Groceries, "2024-03-20"),
    ]
}

// ── Totals ────────────────────────────────────────────────────

#[test]
fn test_reference_example() {
    let summary = Summary::of(&sample());
    assert_eq!(summary.total_income, dec!(5000));
    assert_eq!(summary.total_expense, dec!(1500));
    assert_eq!(summary.balance(), dec!(3500));
    assert_eq!(summary.by_category.get(Category::Groceries), dec!(1500));
    for c in Category::ALL {
        if c != Category::Groceries {
            assert_eq!(summary.by_category.get(c), Decimal::ZERO, "{c}");
        }
    }
}

#[test]
fn test_empty_sequence_is_all_zero() {
    let summary = Summary::of(&Vec::<Transaction>::new());
    assert_eq!(summary, Summary::default());
    assert_eq!(summary.balance(), Decimal::ZERO);
    assert!(summary.by_category.is_empty());
    assert!(summary.is_empty());
}

#[test]
fn test_income_never_contributes_to_breakdown() {
    let txns = vec![
        make_txn(TransactionType::Income, dec!(100), Category::Dining, "2024-03-01"),
        make_txn(TransactionType::Income, dec!(50), Category::Salary, "2024-03-02"),
    ];
    let summary = Summary::of(&txns);
    assert_eq!(summary.total_income, dec!(150));
    assert!(summary.by_category.is_empty());
    assert!(!summary.is_empty());
}

#[test]
fn test_breakdown_sums_to_total_expense() {
    let txns = vec![
        make_txn(TransactionType::Expense, dec!(10.25), Category::Dining, "2024-03-01"),
        make_txn(TransactionType::Expense, dec!(4.75), Category::Transport, "2024-03-02"),
        make_txn(TransactionType::Income, dec!(99), Category::Salary, "2024-03-03"),
        make_txn(TransactionType::Expense, dec!(60), Category::Entertainment, "2024-03-04"),
        make_txn(TransactionType::Expense, dec!(0.01), Category::Others, "2024-03-05"),
    ];
    let summary = Summary::of(&txns);
    assert_eq!(summary.by_category.total(), summary.total_expense);
    assert_eq!(summary.balance(), summary.total_income - summary.total_expense);
}

#[test]
fn test_nonzero_keeps_fixed_order() {
    let txns = vec![
        make_txn(TransactionType::Expense, dec!(5), Category::Others, "2024-03-01"),
        make_txn(TransactionType::Expense, dec!(5), Category::Groceries, "2024-03-02"),
    ];
    let summary = Summary::of(&txns);
    let cats: Vec<Category> = summary.by_category.nonzero().map(|(c, _)| c).collect();
    assert_eq!(cats, vec![Category::Groceries, Category::Others]);
}

// ── Axis scaling ──────────────────────────────────────────────

#[test]
fn test_suggested_max_default_when_no_expenses() {
    assert_eq!(Summary::of(&Vec::<Transaction>::new()).suggested_max(), DEFAULT_AXIS_MAX);
}

#[test]
fn test_suggested_max_adds_headroom() {
    let summary = Summary::of(&sample());
    assert_eq!(summary.max_category_expense(), dec!(1500));
    assert_eq!(summary.suggested_max(), dec!(1800));
}

#[test]
fn test_suggested_max_never_below_default() {
    let txns = vec![make_txn(
        TransactionType::Expense,
        dec!(3),
        Category::Dining,
        "2024-03-01",
    )];
    assert_eq!(Summary::of(&txns).suggested_max(), dec!(10));
}

// ── Month filter ──────────────────────────────────────────────

#[test]
fn test_month_filter_is_prefix_match() {
    let txns = vec![make_txn(
        TransactionType::Expense,
        dec!(1),
        Category::Dining,
        "2024-03-15",
    )];
    assert_eq!(filter_month(&txns, "2024-03").len(), 1);
    assert!(filter_month(&txns, "2024-04").is_empty());
}

#[test]
fn test_month_filter_keeps_order_and_aggregates() {
    let mut txns = sample();
    txns.push(make_txn(
        TransactionType::Expense,
        dec!(75),
        Category::Dining,
        "2024-04-02",
    ));
    let march = filter_month(&txns, "2024-03");
    assert_eq!(march.len(), 3);
    assert_eq!(march[0].id, txns[0].id);

    let april = Summary::of(filter_month(&txns, "2024-04"));
    assert_eq!(april.total_expense, dec!(75));
    assert_eq!(april.total_income, Decimal::ZERO);
}

// ── Recent & largest ──────────────────────────────────────────

#[test]
fn test_recent_is_newest_first_and_bounded() {
    let txns: Vec<Transaction> = (1..=12i64)
        .map(|i| {
            make_txn(
                TransactionType::Expense,
                Decimal::from(i),
                Category::Others,
                "2024-03-01",
            )
        })
        .collect();
    let amounts: Vec<Decimal> = recent(&txns, 10).map(|t| t.amount).collect();
    assert_eq!(amounts.len(), 10);
    assert_eq!(amounts[0], dec!(12));
    assert_eq!(amounts[9], dec!(3));
}

#[test]
fn test_recent_on_short_list() {
    let txns = sample();
    assert_eq!(recent(&txns, 10).count(), 3);
}

#[test]
fn test_largest_expense_ignores_income() {
    assert_eq!(largest_expense(&sample()), Some(dec!(1200)));
    let income_only = vec![make_txn(
        TransactionType::Income,
        dec!(10),
        Category::Salary,
        "2024-03-01",
    )];
    assert_eq!(largest_expense(&income_only), None);
}

// ── Large amounts ─────────────────────────────────────────────

#[test]
fn test_max_amounts_aggregate_exactly() {
    let txns: Vec<Transaction> = (0..50)
        .map(|_| make_txn(TransactionType::Expense, MAX_AMOUNT, Category::Others, "2024-03-01"))
        .collect();
    let summary = Summary::of(&txns);
    assert_eq!(summary.total_expense, MAX_AMOUNT * Decimal::from(50));
    assert_eq!(summary.by_category.get(Category::Others), summary.total_expense);
    assert_eq!(summary.suggested_max(), summary.total_expense * dec!(1.2));
    assert_eq!(summary.balance(), -summary.total_expense);
}

#[test]
fn test_totals_saturate_instead_of_overflowing() {
    let huge = Decimal::MAX - dec!(1);
    let txns = vec![
        make_txn(TransactionType::Expense, huge, Category::Dining, "2024-03-01"),
        make_txn(TransactionType::Expense, huge, Category::Dining, "2024-03-02"),
        make_txn(TransactionType::Expense, huge, Category::Others, "2024-03-03"),
        make_txn(TransactionType::Income, huge, Category::Salary, "2024-03-04"),
        make_txn(TransactionType::Income, huge, Category::Salary, "2024-03-05"),
    ];
    let summary = Summary::of(&txns);
    assert_eq!(summary.total_income, Decimal::MAX);
    assert_eq!(summary.total_expense, Decimal::MAX);
    assert_eq!(summary.by_category.get(Category::Dining), Decimal::MAX);
    assert_eq!(summary.by_category.total(), Decimal::MAX);
    assert_eq!(summary.suggested_max(), Decimal::MAX);
    assert_eq!(summary.balance(), Decimal::ZERO);
}
