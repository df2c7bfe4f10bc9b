//! Windowed income/expense summaries for display and charts.
//!
//! Filters transactions into a relative date window, partitions them by
//! type, and totals each category's share of its partition.

use std::collections::HashMap;

use time::OffsetDateTime;

use crate::{
    format::format_amount,
    transaction::{Transaction, TransactionType},
    window::{FilterWindow, is_in_range},
};

/// Which partition a category row belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryKind {
    /// Part of the income partition.
    Income,
    /// Part of the expense partition.
    Expense,
}

/// One category's share of its partition.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryTotal {
    /// The category name.
    pub category: String,
    /// The summed amount for this category within the window.
    pub total: f64,
    /// Share of the partition total, rounded to one decimal place.
    pub percent: f64,
    /// Which partition the row belongs to.
    pub kind: CategoryKind,
    /// Compact display form of `total`, e.g. `"1.5 triệu"`.
    pub display_total: String,
}

/// Totals for one window of transactions.
#[derive(Debug, Clone, PartialEq)]
pub struct WindowSummary {
    /// Sum of income amounts within the window.
    pub total_income: f64,
    /// Sum of expense amounts within the window.
    pub total_expense: f64,
    /// `total_income - total_expense`.
    pub balance: f64,
    /// Category rows: income partition first, largest totals first.
    pub categories: Vec<CategoryTotal>,
}

/// Filter `transactions` to `window` relative to `now` and aggregate them
/// into income/expense totals and per-category shares.
///
/// Pure function of its inputs, safe to recompute at any time. A partition
/// with a zero total contributes no category rows, so percentages never
/// divide by zero.
pub fn aggregate(
    transactions: &[Transaction],
    window: FilterWindow,
    now: OffsetDateTime,
) -> WindowSummary {
    let mut total_income = 0.0;
    let mut total_expense = 0.0;
    let mut income_totals: HashMap<&str, f64> = HashMap::new();
    let mut expense_totals: HashMap<&str, f64> = HashMap::new();

    for transaction in transactions {
        if !is_in_range(transaction.date, window, now) {
            continue;
        }

        match transaction.transaction_type {
            TransactionType::Income => {
                total_income += transaction.amount;
                *income_totals
                    .entry(transaction.category.as_str())
                    .or_insert(0.0) += transaction.amount;
            }
            TransactionType::Expense => {
                total_expense += transaction.amount;
                *expense_totals
                    .entry(transaction.category.as_str())
                    .or_insert(0.0) += transaction.amount;
            }
        }
    }

    let mut categories = partition_rows(income_totals, total_income, CategoryKind::Income);
    categories.extend(partition_rows(
        expense_totals,
        total_expense,
        CategoryKind::Expense,
    ));

    WindowSummary {
        total_income,
        total_expense,
        balance: total_income - total_expense,
        categories,
    }
}

fn partition_rows(
    totals: HashMap<&str, f64>,
    partition_total: f64,
    kind: CategoryKind,
) -> Vec<CategoryTotal> {
    if partition_total == 0.0 {
        return Vec::new();
    }

    let mut rows: Vec<CategoryTotal> = totals
        .into_iter()
        .map(|(category, total)| CategoryTotal {
            category: category.to_owned(),
            total,
            percent: percent_of(total, partition_total),
            kind,
            display_total: format_amount(total),
        })
        .collect();

    rows.sort_by(|a, b| {
        b.total
            .partial_cmp(&a.total)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    rows
}

/// Share of `total`, as a percentage rounded to one decimal place.
fn percent_of(value: f64, total: f64) -> f64 {
    ((value / total) * 1000.0).round() / 10.0
}
