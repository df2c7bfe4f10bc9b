//! Transaction drafting, validation, and submission.
//!
//! This module contains everything related to transactions:
//! - The wire models (`Transaction`, `LineItem`)
//! - Pure helpers for editing itemized line entries
//! - The form validator shared by every submission path
//! - The async submission flows that talk to the remote store

mod core;
mod line_item;
mod submit;
mod validation;

pub use core::{LineItem, Transaction, TransactionId, TransactionType};
pub use line_item::{
    ItemField, LineItemDraft, add_item, compute_total, item_subtotal, update_item,
};
pub use submit::{delete_transaction, submit_transaction, update_transaction};
pub use validation::{Field, TransactionDraft, ValidationErrors, validate};
