//! Budget models and the save/delete evaluator.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::{
    aggregation::aggregate,
    format::group_thousands,
    identity::IdentityProvider,
    notify::NotificationSink,
    sanitize::sanitize_amount,
    store::{BudgetPayload, BudgetStore, TransactionStore, fetch_all_transactions},
    window::FilterWindow,
};

/// The periods a budget can be set for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BudgetPeriod {
    /// The Sunday-anchored current week.
    Weekly,
    /// The current calendar month.
    Monthly,
    /// The current calendar year.
    Yearly,
}

impl BudgetPeriod {
    /// The window spending is aggregated over when checking this budget.
    pub fn window(self) -> FilterWindow {
        match self {
            Self::Weekly => FilterWindow::Week,
            Self::Monthly => FilterWindow::Month,
            Self::Yearly => FilterWindow::Year,
        }
    }

    /// A lowercase label for alert text.
    pub fn label(self) -> &'static str {
        match self {
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::Yearly => "yearly",
        }
    }
}

/// The stored budget figures, one optional value per period.
///
/// No history is kept; the latest saved value wins.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Budget {
    /// The weekly spending ceiling, if set.
    #[serde(rename = "weeklyBudget")]
    pub weekly: Option<u64>,
    /// The monthly spending ceiling, if set.
    #[serde(rename = "monthlyBudget")]
    pub monthly: Option<u64>,
    /// The yearly spending ceiling, if set.
    #[serde(rename = "yearlyBudget")]
    pub yearly: Option<u64>,
}

impl Budget {
    /// The stored value for one period.
    pub fn for_period(self, period: BudgetPeriod) -> Option<u64> {
        match period {
            BudgetPeriod::Weekly => self.weekly,
            BudgetPeriod::Monthly => self.monthly,
            BudgetPeriod::Yearly => self.yearly,
        }
    }
}

/// The raw state of the three budget input fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BudgetFormState {
    /// The weekly budget input.
    pub weekly: String,
    /// The monthly budget input.
    pub monthly: String,
    /// The yearly budget input.
    pub yearly: String,
}

impl BudgetFormState {
    /// Fill the input fields from stored budget figures.
    pub fn from_budget(budget: Budget) -> Self {
        let render = |value: Option<u64>| value.map(|value| value.to_string()).unwrap_or_default();

        Self {
            weekly: render(budget.weekly),
            monthly: render(budget.monthly),
            yearly: render(budget.yearly),
        }
    }

    /// Mutable access to one period's input field.
    pub fn field_mut(&mut self, period: BudgetPeriod) -> &mut String {
        match period {
            BudgetPeriod::Weekly => &mut self.weekly,
            BudgetPeriod::Monthly => &mut self.monthly,
            BudgetPeriod::Yearly => &mut self.yearly,
        }
    }

    /// Convert the inputs to the full-replace payload.
    ///
    /// A period is set only when its sanitized value is positive; blank or
    /// zero inputs become null on the wire.
    pub fn to_payload(&self) -> BudgetPayload {
        let sanitize = |raw: &str| match sanitize_amount(raw) {
            0 => None,
            value => Some(value),
        };

        BudgetPayload {
            weekly_budget: sanitize(&self.weekly),
            monthly_budget: sanitize(&self.monthly),
            yearly_budget: sanitize(&self.yearly),
        }
    }
}

const ALL_PERIODS: [BudgetPeriod; 3] = [
    BudgetPeriod::Weekly,
    BudgetPeriod::Monthly,
    BudgetPeriod::Yearly,
];

/// Persist the budget figures and evaluate threshold warnings.
///
/// At least one period must carry a positive value. After a successful save,
/// every period set in this save is checked against freshly aggregated
/// spending and a warning alert quoting both figures is raised when spending
/// has reached the budget. A success notification always follows
/// persistence; a failed save surfaces one fixed message and logs the cause.
pub async fn save_budget(
    form: &BudgetFormState,
    identity: &dyn IdentityProvider,
    transactions: &dyn TransactionStore,
    budgets: &dyn BudgetStore,
    sink: &dyn NotificationSink,
    now: OffsetDateTime,
) {
    let Some(user_id) = identity.user_id() else {
        sink.alert("Sign in required", "Please sign in to manage budgets");
        return;
    };

    let payload = form.to_payload();

    if payload.is_empty() {
        sink.alert(
            "Invalid budget",
            "Enter a positive amount for at least one period",
        );
        return;
    }

    if let Err(error) = budgets.save_budget(&user_id, &payload).await {
        tracing::error!("could not save budget for user {user_id}: {error}");
        sink.alert(
            "Cannot save budget",
            "The budget could not be saved. Please try again.",
        );
        return;
    }

    check_thresholds(&payload, &user_id, transactions, sink, now).await;

    sink.alert("Success", "Budget saved");
}

async fn check_thresholds(
    payload: &BudgetPayload,
    user_id: &str,
    transactions: &dyn TransactionStore,
    sink: &dyn NotificationSink,
    now: OffsetDateTime,
) {
    let all_transactions = match fetch_all_transactions(transactions, user_id).await {
        Ok(transactions) => transactions,
        Err(error) => {
            // The budget itself is already saved; only the warning is lost.
            tracing::warn!("skipping budget threshold check for user {user_id}: {error}");
            return;
        }
    };

    for period in ALL_PERIODS {
        let Some(budget) = payload.period_value(period) else {
            continue;
        };

        let spent = aggregate(&all_transactions, period.window(), now).total_expense;

        if spent >= budget as f64 {
            sink.alert(
                "Budget exceeded",
                &format!(
                    "You have spent {} of your {} budget of {}",
                    group_thousands(spent),
                    period.label(),
                    group_thousands(budget as f64),
                ),
            );
        }
    }
}

/// Clear one period's budget and persist the remaining figures.
///
/// The local input field is reset before any error is surfaced, so the form
/// reflects the intended deletion even when the remote write fails; the next
/// budget fetch re-syncs either way.
pub async fn delete_budget(
    period: BudgetPeriod,
    form: &mut BudgetFormState,
    identity: &dyn IdentityProvider,
    budgets: &dyn BudgetStore,
    sink: &dyn NotificationSink,
) {
    let Some(user_id) = identity.user_id() else {
        sink.alert("Sign in required", "Please sign in to manage budgets");
        return;
    };

    if !sink.confirm("Delete this budget? This cannot be undone.") {
        return;
    }

    form.field_mut(period).clear();
    let payload = form.to_payload();

    match budgets.save_budget(&user_id, &payload).await {
        Ok(()) => sink.alert("Success", "Budget deleted"),
        Err(error) => {
            tracing::error!(
                "could not delete {} budget for user {user_id}: {error}",
                period.label()
            );
            sink.alert(
                "Cannot delete budget",
                "The budget could not be deleted. Please try again.",
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use time::macros::datetime;

    use crate::{
        store::BudgetPayload,
        test_utils::{MemoryStore, RecordingSink, TestIdentity, transaction},
        transaction::TransactionType,
    };

    use super::{Budget, BudgetFormState, BudgetPeriod, delete_budget, save_budget};

    const NOW: time::OffsetDateTime = datetime!(2024-01-10 12:00 UTC);

    fn weekly_form(weekly: &str) -> BudgetFormState {
        BudgetFormState {
            weekly: weekly.to_owned(),
            monthly: String::new(),
            yearly: String::new(),
        }
    }

    #[tokio::test]
    async fn save_warns_when_spending_has_reached_the_budget() {
        // 600.000 spent this week against a 500.000 weekly budget.
        let store = MemoryStore::with_transactions(vec![transaction(
            "txn-1",
            TransactionType::Expense,
            "Ăn uống",
            600000.0,
            NOW,
        )]);
        let sink = RecordingSink::default();

        save_budget(
            &weekly_form("500000"),
            &TestIdentity(Some("user-1")),
            &store,
            &store,
            &sink,
            NOW,
        )
        .await;

        let warning = sink.find_alert("Budget exceeded").unwrap();
        assert!(warning.contains("600.000"), "warning was {warning:?}");
        assert!(warning.contains("500.000"), "warning was {warning:?}");
        assert_eq!(sink.find_alert("Success").as_deref(), Some("Budget saved"));
    }

    #[tokio::test]
    async fn save_warns_on_exact_equality() {
        let store = MemoryStore::with_transactions(vec![transaction(
            "txn-1",
            TransactionType::Expense,
            "Ăn uống",
            500000.0,
            NOW,
        )]);
        let sink = RecordingSink::default();

        save_budget(
            &weekly_form("500000"),
            &TestIdentity(Some("user-1")),
            &store,
            &store,
            &sink,
            NOW,
        )
        .await;

        assert!(sink.find_alert("Budget exceeded").is_some());
    }

    #[tokio::test]
    async fn save_under_budget_notifies_success_without_a_warning() {
        let store = MemoryStore::with_transactions(vec![transaction(
            "txn-1",
            TransactionType::Expense,
            "Ăn uống",
            100000.0,
            NOW,
        )]);
        let sink = RecordingSink::default();

        save_budget(
            &weekly_form("500000"),
            &TestIdentity(Some("user-1")),
            &store,
            &store,
            &sink,
            NOW,
        )
        .await;

        assert!(sink.find_alert("Budget exceeded").is_none());
        assert_eq!(sink.find_alert("Success").as_deref(), Some("Budget saved"));
        assert_eq!(
            store.saved_budgets.lock().unwrap().as_slice(),
            [BudgetPayload {
                weekly_budget: Some(500000),
                monthly_budget: None,
                yearly_budget: None,
            }]
        );
    }

    #[tokio::test]
    async fn income_does_not_count_towards_the_threshold() {
        let store = MemoryStore::with_transactions(vec![transaction(
            "txn-1",
            TransactionType::Income,
            "Lương",
            900000.0,
            NOW,
        )]);
        let sink = RecordingSink::default();

        save_budget(
            &weekly_form("500000"),
            &TestIdentity(Some("user-1")),
            &store,
            &store,
            &sink,
            NOW,
        )
        .await;

        assert!(sink.find_alert("Budget exceeded").is_none());
    }

    #[tokio::test]
    async fn save_rejects_a_form_with_no_positive_period() {
        let store = MemoryStore::default();
        let sink = RecordingSink::default();

        save_budget(
            &weekly_form("0abc"),
            &TestIdentity(Some("user-1")),
            &store,
            &store,
            &sink,
            NOW,
        )
        .await;

        assert!(sink.find_alert("Invalid budget").is_some());
        assert!(store.saved_budgets.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn save_without_a_signed_in_user_only_alerts() {
        let store = MemoryStore::default();
        let sink = RecordingSink::default();

        save_budget(
            &weekly_form("500000"),
            &TestIdentity(None),
            &store,
            &store,
            &sink,
            NOW,
        )
        .await;

        assert_eq!(sink.alert_titles(), ["Sign in required"]);
        assert!(store.saved_budgets.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn failed_save_surfaces_one_fixed_message() {
        let store = MemoryStore::failing();
        let sink = RecordingSink::default();

        save_budget(
            &weekly_form("500000"),
            &TestIdentity(Some("user-1")),
            &store,
            &store,
            &sink,
            NOW,
        )
        .await;

        assert_eq!(sink.alert_titles(), ["Cannot save budget"]);
    }

    #[tokio::test]
    async fn delete_nulls_the_period_and_resets_the_field() {
        let store = MemoryStore::default();
        let sink = RecordingSink::confirming();
        let mut form = BudgetFormState::from_budget(Budget {
            weekly: Some(1000000),
            monthly: None,
            yearly: None,
        });

        delete_budget(
            BudgetPeriod::Weekly,
            &mut form,
            &TestIdentity(Some("user-1")),
            &store,
            &sink,
        )
        .await;

        assert_eq!(form.weekly, "");
        assert_eq!(
            store.saved_budgets.lock().unwrap().as_slice(),
            [BudgetPayload {
                weekly_budget: None,
                monthly_budget: None,
                yearly_budget: None,
            }]
        );
        assert_eq!(
            sink.find_alert("Success").as_deref(),
            Some("Budget deleted")
        );
    }

    #[tokio::test]
    async fn delete_keeps_the_other_periods() {
        let store = MemoryStore::default();
        let sink = RecordingSink::confirming();
        let mut form = BudgetFormState::from_budget(Budget {
            weekly: Some(500000),
            monthly: Some(2000000),
            yearly: None,
        });

        delete_budget(
            BudgetPeriod::Weekly,
            &mut form,
            &TestIdentity(Some("user-1")),
            &store,
            &sink,
        )
        .await;

        assert_eq!(
            store.saved_budgets.lock().unwrap().as_slice(),
            [BudgetPayload {
                weekly_budget: None,
                monthly_budget: Some(2000000),
                yearly_budget: None,
            }]
        );
    }

    #[tokio::test]
    async fn delete_is_cancelled_by_the_confirmation_gate() {
        let store = MemoryStore::default();
        let sink = RecordingSink::default();
        let mut form = weekly_form("500000");

        delete_budget(
            BudgetPeriod::Weekly,
            &mut form,
            &TestIdentity(Some("user-1")),
            &store,
            &sink,
        )
        .await;

        assert_eq!(form.weekly, "500000", "a cancelled delete changes nothing");
        assert!(store.saved_budgets.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn failed_delete_still_resets_the_local_field() {
        let store = MemoryStore::failing();
        let sink = RecordingSink::confirming();
        let mut form = weekly_form("1000000");

        delete_budget(
            BudgetPeriod::Weekly,
            &mut form,
            &TestIdentity(Some("user-1")),
            &store,
            &sink,
        )
        .await;

        assert_eq!(form.weekly, "", "the local reset happens before the error");
        assert!(sink.find_alert("Cannot delete budget").is_some());
    }

    #[tokio::test]
    async fn the_stored_budget_reflects_the_latest_save() {
        use crate::store::BudgetStore;

        let store = MemoryStore::default();
        let sink = RecordingSink::default();

        save_budget(
            &weekly_form("500000"),
            &TestIdentity(Some("user-1")),
            &store,
            &store,
            &sink,
            NOW,
        )
        .await;

        let budget = store.get_budget("user-1").await.unwrap();
        assert_eq!(budget.for_period(BudgetPeriod::Weekly), Some(500000));
        assert_eq!(budget.for_period(BudgetPeriod::Monthly), None);
    }

    #[test]
    fn budget_deserializes_the_remote_wire_shape() {
        let json = r#"{ "weeklyBudget": 500000, "monthlyBudget": null, "yearlyBudget": 60000000 }"#;

        let budget: Budget = serde_json::from_str(json).unwrap();

        assert_eq!(budget.weekly, Some(500000));
        assert_eq!(budget.monthly, None);
        assert_eq!(budget.yearly, Some(60000000));
    }

    #[test]
    fn form_state_renders_stored_figures() {
        let form = BudgetFormState::from_budget(Budget {
            weekly: Some(500000),
            monthly: None,
            yearly: Some(60000000),
        });

        assert_eq!(form.weekly, "500000");
        assert_eq!(form.monthly, "");
        assert_eq!(form.yearly, "60000000");
    }

    #[test]
    fn payload_drops_blank_and_zero_inputs() {
        let form = BudgetFormState {
            weekly: "500,000".to_owned(),
            monthly: "0".to_owned(),
            yearly: "  ".to_owned(),
        };

        let payload = form.to_payload();

        assert_eq!(payload.weekly_budget, Some(500000));
        assert_eq!(payload.monthly_budget, None);
        assert_eq!(payload.yearly_budget, None);
    }
}
