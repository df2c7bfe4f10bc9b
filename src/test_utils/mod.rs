//! Shared test doubles for the async flows.

use std::sync::Mutex;

use async_trait::async_trait;
use time::OffsetDateTime;

use crate::{
    Error,
    budget::Budget,
    identity::IdentityProvider,
    notify::NotificationSink,
    store::{BudgetPayload, BudgetStore, TransactionPayload, TransactionStore},
    transaction::{Transaction, TransactionId, TransactionType},
};

/// An identity provider with a fixed answer.
pub struct TestIdentity(pub Option<&'static str>);

impl IdentityProvider for TestIdentity {
    fn user_id(&self) -> Option<String> {
        self.0.map(str::to_owned)
    }
}

/// Records every alert and answers confirmations with a preset choice.
#[derive(Default)]
pub struct RecordingSink {
    pub alerts: Mutex<Vec<(String, String)>>,
    pub confirm_answer: bool,
}

impl RecordingSink {
    /// A sink that confirms every destructive prompt.
    pub fn confirming() -> Self {
        Self {
            alerts: Mutex::new(Vec::new()),
            confirm_answer: true,
        }
    }

    pub fn alert_titles(&self) -> Vec<String> {
        self.alerts
            .lock()
            .unwrap()
            .iter()
            .map(|(title, _)| title.clone())
            .collect()
    }

    /// The message of the first alert with `title`, if any.
    pub fn find_alert(&self, title: &str) -> Option<String> {
        self.alerts
            .lock()
            .unwrap()
            .iter()
            .find(|(alert_title, _)| alert_title == title)
            .map(|(_, message)| message.clone())
    }
}

impl NotificationSink for RecordingSink {
    fn alert(&self, title: &str, message: &str) {
        self.alerts
            .lock()
            .unwrap()
            .push((title.to_owned(), message.to_owned()));
    }

    fn confirm(&self, _message: &str) -> bool {
        self.confirm_answer
    }
}

/// A vec-backed store standing in for the remote service.
#[derive(Default)]
pub struct MemoryStore {
    pub transactions: Mutex<Vec<Transaction>>,
    pub budget: Mutex<Budget>,
    pub saved_budgets: Mutex<Vec<BudgetPayload>>,
    pub fail_writes: bool,
}

impl MemoryStore {
    pub fn with_transactions(transactions: Vec<Transaction>) -> Self {
        Self {
            transactions: Mutex::new(transactions),
            ..Self::default()
        }
    }

    /// A store whose writes fail with a simulated outage.
    pub fn failing() -> Self {
        Self {
            fail_writes: true,
            ..Self::default()
        }
    }

    fn write_guard(&self) -> Result<(), Error> {
        if self.fail_writes {
            Err(Error::Remote("simulated outage".to_owned()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl TransactionStore for MemoryStore {
    async fn list_transactions(
        &self,
        _user_id: &str,
        page: u32,
        limit: u32,
    ) -> Result<Vec<Transaction>, Error> {
        let transactions = self.transactions.lock().unwrap();
        let start = ((page - 1) * limit) as usize;

        Ok(transactions
            .iter()
            .skip(start)
            .take(limit as usize)
            .cloned()
            .collect())
    }

    async fn create_transaction(
        &self,
        payload: &TransactionPayload,
    ) -> Result<Transaction, Error> {
        self.write_guard()?;

        let mut transactions = self.transactions.lock().unwrap();
        let transaction = Transaction {
            id: format!("txn-{}", transactions.len() + 1),
            transaction_type: payload.transaction_type,
            category: payload.category.clone(),
            amount: payload.amount,
            date: payload.date,
            items: payload.items.clone(),
        };
        transactions.push(transaction.clone());

        Ok(transaction)
    }

    async fn update_transaction(
        &self,
        id: &TransactionId,
        payload: &TransactionPayload,
    ) -> Result<Transaction, Error> {
        self.write_guard()?;

        let mut transactions = self.transactions.lock().unwrap();
        let transaction = transactions
            .iter_mut()
            .find(|transaction| &transaction.id == id)
            .ok_or(Error::NotFound)?;
        transaction.transaction_type = payload.transaction_type;
        transaction.category = payload.category.clone();
        transaction.amount = payload.amount;
        transaction.date = payload.date;
        transaction.items = payload.items.clone();

        Ok(transaction.clone())
    }

    async fn delete_transaction(&self, id: &TransactionId) -> Result<(), Error> {
        self.write_guard()?;

        let mut transactions = self.transactions.lock().unwrap();
        let before = transactions.len();
        transactions.retain(|transaction| &transaction.id != id);

        if transactions.len() == before {
            return Err(Error::NotFound);
        }

        Ok(())
    }
}

#[async_trait]
impl BudgetStore for MemoryStore {
    async fn get_budget(&self, _user_id: &str) -> Result<Budget, Error> {
        Ok(*self.budget.lock().unwrap())
    }

    async fn save_budget(&self, _user_id: &str, payload: &BudgetPayload) -> Result<(), Error> {
        self.write_guard()?;

        self.saved_budgets.lock().unwrap().push(*payload);
        *self.budget.lock().unwrap() = Budget {
            weekly: payload.weekly_budget,
            monthly: payload.monthly_budget,
            yearly: payload.yearly_budget,
        };

        Ok(())
    }
}

/// Build a transaction fixture with no items.
pub fn transaction(
    id: &str,
    transaction_type: TransactionType,
    category: &str,
    amount: f64,
    date: OffsetDateTime,
) -> Transaction {
    Transaction {
        id: id.to_owned(),
        transaction_type,
        category: category.to_owned(),
        amount,
        date,
        items: None,
    }
}
