//! Defines the core wire models for transactions.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Remote-store identifier for a transaction.
pub type TransactionId = String;

/// Whether money came in or went out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    /// Money earned.
    Income,
    /// Money spent.
    Expense,
}

impl TransactionType {
    /// Resolve a raw form value.
    ///
    /// The form gate has exactly two branches, so any non-`income` value is
    /// treated as an expense.
    pub fn from_form_value(value: &str) -> Self {
        if value == "income" {
            Self::Income
        } else {
            Self::Expense
        }
    }

    /// The wire value for this type.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }
}

/// A single product entry within an itemized expense.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    /// What was bought. At most 50 graphemes, checked at validation time.
    pub product_name: String,
    /// How many were bought. Always positive.
    pub quantity: u32,
    /// Unit price. Always positive.
    pub price: f64,
}

impl LineItem {
    /// Quantity × unit price for this entry.
    pub fn subtotal(&self) -> f64 {
        f64::from(self.quantity) * self.price
    }
}

/// An income or expense record, optionally itemized.
///
/// Read-only to this crate: transactions are produced by the remote store and
/// consumed by the aggregation functions. When `items` is present and
/// non-empty, `amount` equals the sum of item subtotals; storage does not
/// enforce this, the submission flow recomputes the amount before anything
/// reaches the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// The ID of the transaction.
    pub id: TransactionId,
    /// Whether this is income or an expense.
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    /// The category the transaction belongs to, e.g. "Ăn uống".
    pub category: String,
    /// The amount of money spent or earned in this transaction.
    pub amount: f64,
    /// When the transaction happened.
    #[serde(with = "time::serde::rfc3339")]
    pub date: OffsetDateTime,
    /// Product entries for itemized expenses.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<LineItem>>,
}
