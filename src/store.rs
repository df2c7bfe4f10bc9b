//! Trait interfaces and payloads for the remote transaction/budget store.
//!
//! The actual transport (HTTP client, auth headers, retries) lives outside
//! this crate; these traits are the narrow seam the core talks through.

use async_trait::async_trait;
use serde::Serialize;
use time::OffsetDateTime;

use crate::{
    Error,
    budget::{Budget, BudgetPeriod},
    transaction::{LineItem, Transaction, TransactionId, TransactionType},
};

/// The number of transactions requested per page when walking the full list.
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// The payload sent when creating or replacing a transaction.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionPayload {
    /// The owner of the transaction.
    pub user_id: String,
    /// Whether this is income or an expense.
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    /// The selected category name.
    pub category: String,
    /// The transaction amount. For itemized expenses this is the recomputed
    /// sum of item subtotals, never the raw form input.
    pub amount: f64,
    /// When the transaction happened.
    #[serde(with = "time::serde::rfc3339")]
    pub date: OffsetDateTime,
    /// Product entries for itemized expenses.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<LineItem>>,
}

/// The full-replace payload for the three period budgets.
///
/// Every save sends all three fields. Untouched periods carry the value from
/// the current form state and cleared periods are sent as null, never
/// omitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetPayload {
    /// The weekly spending ceiling, if set.
    pub weekly_budget: Option<u64>,
    /// The monthly spending ceiling, if set.
    pub monthly_budget: Option<u64>,
    /// The yearly spending ceiling, if set.
    pub yearly_budget: Option<u64>,
}

impl BudgetPayload {
    /// The value carried for one period.
    pub fn period_value(&self, period: BudgetPeriod) -> Option<u64> {
        match period {
            BudgetPeriod::Weekly => self.weekly_budget,
            BudgetPeriod::Monthly => self.monthly_budget,
            BudgetPeriod::Yearly => self.yearly_budget,
        }
    }

    /// Whether no period carries a value.
    pub fn is_empty(&self) -> bool {
        self.weekly_budget.is_none() && self.monthly_budget.is_none() && self.yearly_budget.is_none()
    }
}

/// Remote CRUD operations for transactions.
#[async_trait]
pub trait TransactionStore: Send + Sync {
    /// Fetch one page of the user's transactions, newest first.
    async fn list_transactions(
        &self,
        user_id: &str,
        page: u32,
        limit: u32,
    ) -> Result<Vec<Transaction>, Error>;

    /// Create a transaction and return the stored record.
    async fn create_transaction(
        &self,
        payload: &TransactionPayload,
    ) -> Result<Transaction, Error>;

    /// Replace the transaction `id` and return the stored record.
    async fn update_transaction(
        &self,
        id: &TransactionId,
        payload: &TransactionPayload,
    ) -> Result<Transaction, Error>;

    /// Delete the transaction `id`.
    async fn delete_transaction(&self, id: &TransactionId) -> Result<(), Error>;
}

/// Remote read/replace operations for the period budgets.
#[async_trait]
pub trait BudgetStore: Send + Sync {
    /// Fetch the user's stored budget figures.
    async fn get_budget(&self, user_id: &str) -> Result<Budget, Error>;

    /// Replace the user's budget figures with `payload`.
    async fn save_budget(&self, user_id: &str, payload: &BudgetPayload) -> Result<(), Error>;
}

/// Walk every page of the user's transactions and concatenate them in order.
///
/// Stops at the first page shorter than [DEFAULT_PAGE_SIZE].
///
/// # Errors
/// Propagates the first [Error] returned by the store.
pub async fn fetch_all_transactions(
    store: &dyn TransactionStore,
    user_id: &str,
) -> Result<Vec<Transaction>, Error> {
    let mut transactions = Vec::new();
    let mut page = 1;

    loop {
        let batch = store
            .list_transactions(user_id, page, DEFAULT_PAGE_SIZE)
            .await?;
        let batch_len = batch.len() as u32;
        transactions.extend(batch);

        if batch_len < DEFAULT_PAGE_SIZE {
            return Ok(transactions);
        }

        page += 1;
    }
}
