//! Asynchronous submission flows for transactions.
//!
//! Each flow gates on identity and validation before anything is sent, so a
//! validation failure can never reach the remote store. Remote failures are
//! logged and converted to one fixed user-facing message per operation.

use time::OffsetDateTime;

use crate::{
    identity::IdentityProvider,
    notify::NotificationSink,
    sanitize::sanitize_amount,
    store::{TransactionPayload, TransactionStore},
    transaction::{LineItem, TransactionId, TransactionType},
};

use super::{
    line_item::{LineItemDraft, compute_total},
    validation::{TransactionDraft, ValidationErrors, validate},
};

/// Validate `draft` and create it at the remote store.
///
/// Returns `true` when the transaction was persisted. Field-level validation
/// messages are left in `errors` for the form to display; blocking
/// conditions (missing type or category, signed-out user) surface through
/// the sink instead.
pub async fn submit_transaction(
    draft: &TransactionDraft,
    date: OffsetDateTime,
    errors: &mut ValidationErrors,
    identity: &dyn IdentityProvider,
    store: &dyn TransactionStore,
    sink: &dyn NotificationSink,
) -> bool {
    let Some(payload) = prepare_payload(draft, date, errors, identity, sink) else {
        return false;
    };

    match store.create_transaction(&payload).await {
        Ok(_) => {
            sink.alert("Success", "Transaction saved");
            true
        }
        Err(error) => {
            tracing::error!("could not save transaction: {error}");
            sink.alert(
                "Cannot save",
                "The transaction could not be saved. Please try again.",
            );
            false
        }
    }
}

/// Validate `draft` and replace the transaction `id` at the remote store.
pub async fn update_transaction(
    id: &TransactionId,
    draft: &TransactionDraft,
    date: OffsetDateTime,
    errors: &mut ValidationErrors,
    identity: &dyn IdentityProvider,
    store: &dyn TransactionStore,
    sink: &dyn NotificationSink,
) -> bool {
    let Some(payload) = prepare_payload(draft, date, errors, identity, sink) else {
        return false;
    };

    match store.update_transaction(id, &payload).await {
        Ok(_) => {
            sink.alert("Success", "Transaction saved");
            true
        }
        Err(error) => {
            tracing::error!("could not update transaction {id}: {error}");
            sink.alert(
                "Cannot save",
                "The transaction could not be saved. Please try again.",
            );
            false
        }
    }
}

/// Delete the transaction `id` after a destructive confirmation.
pub async fn delete_transaction(
    id: &TransactionId,
    identity: &dyn IdentityProvider,
    store: &dyn TransactionStore,
    sink: &dyn NotificationSink,
) -> bool {
    if identity.user_id().is_none() {
        sink.alert("Sign in required", "Please sign in to manage transactions");
        return false;
    }

    if !sink.confirm("Delete this transaction? This cannot be undone.") {
        return false;
    }

    match store.delete_transaction(id).await {
        Ok(()) => {
            sink.alert("Success", "Transaction deleted");
            true
        }
        Err(error) => {
            tracing::error!("could not delete transaction {id}: {error}");
            sink.alert(
                "Cannot delete",
                "The transaction could not be deleted. Please try again.",
            );
            false
        }
    }
}

fn prepare_payload(
    draft: &TransactionDraft,
    date: OffsetDateTime,
    errors: &mut ValidationErrors,
    identity: &dyn IdentityProvider,
    sink: &dyn NotificationSink,
) -> Option<TransactionPayload> {
    let Some(user_id) = identity.user_id() else {
        sink.alert("Sign in required", "Please sign in to manage transactions");
        return None;
    };

    if !validate(draft, errors) {
        if let Some(message) = &errors.general {
            sink.alert("Missing information", message);
        }
        return None;
    }

    let transaction_type = TransactionType::from_form_value(&draft.transaction_type);

    // The stored amount of an itemized expense is always the recomputed item
    // total, keeping the amount/items invariant before anything is sent.
    let (amount, items) = match transaction_type {
        TransactionType::Income => (sanitize_amount(&draft.amount) as f64, None),
        TransactionType::Expense => (
            compute_total(&draft.items) as f64,
            Some(draft.items.iter().map(validated_item).collect()),
        ),
    };

    Some(TransactionPayload {
        user_id,
        transaction_type,
        category: draft.category.clone(),
        amount,
        date,
        items,
    })
}

/// Convert a validated draft row to its wire form.
///
/// Only called after [validate] has passed, so quantity and price both
/// sanitize to positive values.
fn validated_item(item: &LineItemDraft) -> LineItem {
    LineItem {
        product_name: item.product_name.trim().to_owned(),
        quantity: u32::try_from(sanitize_amount(&item.quantity)).unwrap_or(u32::MAX),
        price: sanitize_amount(&item.price) as f64,
    }
}
