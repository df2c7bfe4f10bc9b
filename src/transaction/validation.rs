//! Validates a transaction draft before submission.
//!
//! There is exactly one validator: the pre-submit form check and the
//! submit-time gate both call [validate], so field precedence and message
//! wording cannot drift between call sites.

use std::collections::BTreeMap;

use unicode_segmentation::UnicodeSegmentation;

use crate::sanitize::sanitize_amount;

use super::line_item::LineItemDraft;

/// The max number of graphemes allowed in a product name.
const MAX_PRODUCT_NAME_GRAPHEMES: usize = 50;

/// The form fields that can carry a validation message.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum Field {
    /// The income/expense selector.
    Type,
    /// The category selector.
    Category,
    /// The amount input of an income draft.
    Amount,
    /// The item list of an expense draft as a whole.
    Items,
    /// The joined per-item messages of an expense draft.
    ItemDetails,
    /// An extension point for caller-defined fields.
    Custom(String),
}

/// Field-keyed validation messages for the transaction form.
///
/// The absence of a key means that field is valid. Blocking conditions
/// (missing type or category) are reported through `general` instead and
/// leave the field map untouched, matching how the form surfaces them as an
/// alert rather than inline text.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationErrors {
    /// A single blocking message, surfaced as an alert rather than inline.
    pub general: Option<String>,
    /// Inline messages keyed by form field.
    pub fields: BTreeMap<Field, String>,
}

impl ValidationErrors {
    /// Remove every recorded message.
    pub fn clear(&mut self) {
        self.general = None;
        self.fields.clear();
    }

    /// Whether no message is recorded at all.
    pub fn is_empty(&self) -> bool {
        self.general.is_none() && self.fields.is_empty()
    }
}

/// The raw state of the transaction form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionDraft {
    /// `"income"` or `"expense"` straight from the type selector.
    pub transaction_type: String,
    /// The selected category name.
    pub category: String,
    /// The amount input, used for income drafts.
    pub amount: String,
    /// The item rows, used for expense drafts.
    pub items: Vec<LineItemDraft>,
}

/// Validate a draft, recording messages in `errors`.
///
/// Checks gate in order: a missing type or category aborts immediately with a
/// general message; income drafts then need a positive amount; expense drafts
/// need at least one item, and every item row is checked with all messages
/// collected and joined before returning. A passing draft clears `errors` and
/// returns `true`.
pub fn validate(draft: &TransactionDraft, errors: &mut ValidationErrors) -> bool {
    if draft.transaction_type.trim().is_empty() {
        errors.general = Some("Please choose a transaction type".to_owned());
        return false;
    }

    if draft.category.trim().is_empty() {
        errors.general = Some("Please choose a category".to_owned());
        return false;
    }

    if draft.transaction_type == "income" {
        validate_income_amount(&draft.amount, errors)
    } else {
        validate_items(&draft.items, errors)
    }
}

fn validate_income_amount(amount: &str, errors: &mut ValidationErrors) -> bool {
    errors.clear();

    if amount.trim().is_empty() {
        errors
            .fields
            .insert(Field::Amount, "Please enter an amount".to_owned());
    } else if sanitize_amount(amount) == 0 {
        errors.fields.insert(
            Field::Amount,
            "Amount must be greater than zero".to_owned(),
        );
    }

    errors.fields.is_empty()
}

fn validate_items(items: &[LineItemDraft], errors: &mut ValidationErrors) -> bool {
    errors.clear();

    if items.is_empty() {
        errors
            .fields
            .insert(Field::Items, "Add at least one item".to_owned());
        return false;
    }

    // Every row is checked and every message kept; the validator only stops
    // early for a missing type or category, never inside the item list.
    let mut messages = Vec::new();

    for (index, item) in items.iter().enumerate() {
        let row = index + 1;

        if item.product_name.trim().is_empty() {
            messages.push(format!("Item {row}: product name is required"));
        } else if item.product_name.graphemes(true).count() > MAX_PRODUCT_NAME_GRAPHEMES {
            messages.push(format!(
                "Item {row}: product name must be at most {MAX_PRODUCT_NAME_GRAPHEMES} characters"
            ));
        }

        if item.quantity.trim().is_empty() {
            messages.push(format!("Item {row}: quantity is required"));
        } else if !is_positive_whole_number(&item.quantity) {
            messages.push(format!(
                "Item {row}: quantity must be a positive whole number"
            ));
        }

        if item.price.trim().is_empty() {
            messages.push(format!("Item {row}: price is required"));
        } else if sanitize_amount(&item.price) == 0 {
            messages.push(format!("Item {row}: price must be greater than zero"));
        }
    }

    if messages.is_empty() {
        return true;
    }

    errors.fields.insert(Field::ItemDetails, messages.join("\n"));
    false
}

/// A raw quantity is valid when it parses as a number with no fractional part
/// and a positive value. Digit-stripping alone would accept `"1.5"` as 15, so
/// this check runs on the raw input.
fn is_positive_whole_number(raw: &str) -> bool {
    raw.trim()
        .parse::<f64>()
        .map(|value| value > 0.0 && value.fract() == 0.0)
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use crate::transaction::line_item::LineItemDraft;

    use super::{Field, TransactionDraft, ValidationErrors, validate};

    fn item(product_name: &str, quantity: &str, price: &str) -> LineItemDraft {
        LineItemDraft {
            product_name: product_name.to_owned(),
            quantity: quantity.to_owned(),
            price: price.to_owned(),
        }
    }

    fn income_draft(category: &str, amount: &str) -> TransactionDraft {
        TransactionDraft {
            transaction_type: "income".to_owned(),
            category: category.to_owned(),
            amount: amount.to_owned(),
            items: Vec::new(),
        }
    }

    fn expense_draft(category: &str, items: Vec<LineItemDraft>) -> TransactionDraft {
        TransactionDraft {
            transaction_type: "expense".to_owned(),
            category: category.to_owned(),
            amount: String::new(),
            items,
        }
    }

    #[test]
    fn missing_type_aborts_with_a_general_message() {
        let draft = TransactionDraft::default();
        let mut errors = ValidationErrors::default();

        assert!(!validate(&draft, &mut errors));
        assert_eq!(
            errors.general.as_deref(),
            Some("Please choose a transaction type")
        );
        assert!(errors.fields.is_empty());
    }

    #[test]
    fn missing_type_leaves_existing_field_messages_untouched() {
        let draft = TransactionDraft::default();
        let mut errors = ValidationErrors::default();
        errors
            .fields
            .insert(Field::Amount, "stale message".to_owned());

        assert!(!validate(&draft, &mut errors));

        assert_eq!(errors.fields.len(), 1, "the field map is not populated or cleared");
    }

    #[test]
    fn missing_category_aborts_with_a_general_message() {
        let draft = income_draft("", "50000");
        let mut errors = ValidationErrors::default();

        assert!(!validate(&draft, &mut errors));
        assert_eq!(errors.general.as_deref(), Some("Please choose a category"));
    }

    #[test]
    fn income_with_blank_amount_reports_the_amount_field() {
        let draft = income_draft("Lương", "   ");
        let mut errors = ValidationErrors::default();

        assert!(!validate(&draft, &mut errors));
        assert_eq!(
            errors.fields.get(&Field::Amount).map(String::as_str),
            Some("Please enter an amount")
        );
    }

    #[test]
    fn income_with_zero_amount_reports_the_amount_field() {
        let draft = income_draft("Lương", "0abc");
        let mut errors = ValidationErrors::default();

        assert!(!validate(&draft, &mut errors));
        assert_eq!(
            errors.fields.get(&Field::Amount).map(String::as_str),
            Some("Amount must be greater than zero")
        );
    }

    #[test]
    fn negative_looking_income_amount_passes_after_sanitization() {
        // The sanitizer strips the sign and letters, leaving 1000.
        let draft = income_draft("Lương", "-1000abc!@#");
        let mut errors = ValidationErrors::default();
        errors.general = Some("stale".to_owned());
        errors.fields.insert(Field::Amount, "stale".to_owned());

        assert!(validate(&draft, &mut errors));
        assert!(errors.is_empty(), "a passing draft clears all messages");
    }

    #[test]
    fn expense_with_no_items_reports_the_items_field() {
        let draft = expense_draft("Ăn uống", Vec::new());
        let mut errors = ValidationErrors::default();

        assert!(!validate(&draft, &mut errors));
        assert_eq!(
            errors.fields.get(&Field::Items).map(String::as_str),
            Some("Add at least one item")
        );
    }

    #[test]
    fn item_messages_are_collected_across_all_items() {
        let draft = expense_draft(
            "Ăn uống",
            vec![
                item("", "2", "5000"),
                item("Bánh mì", "", "15000"),
                item("Cà phê", "1", "0"),
            ],
        );
        let mut errors = ValidationErrors::default();

        assert!(!validate(&draft, &mut errors));

        let details = errors.fields.get(&Field::ItemDetails).unwrap();
        let lines: Vec<&str> = details.lines().collect();
        assert_eq!(
            lines,
            vec![
                "Item 1: product name is required",
                "Item 2: quantity is required",
                "Item 3: price must be greater than zero",
            ]
        );
    }

    #[test]
    fn fractional_quantities_are_rejected() {
        let draft = expense_draft("Ăn uống", vec![item("Cà phê", "1.5", "25000")]);
        let mut errors = ValidationErrors::default();

        assert!(!validate(&draft, &mut errors));
        assert!(
            errors
                .fields
                .get(&Field::ItemDetails)
                .unwrap()
                .contains("positive whole number")
        );
    }

    #[test]
    fn product_names_are_bounded_at_fifty_graphemes() {
        let at_limit = expense_draft("Mua sắm", vec![item(&"a".repeat(50), "1", "1000")]);
        let over_limit = expense_draft("Mua sắm", vec![item(&"a".repeat(51), "1", "1000")]);
        let mut errors = ValidationErrors::default();

        assert!(validate(&at_limit, &mut errors));
        assert!(!validate(&over_limit, &mut errors));
        assert!(
            errors
                .fields
                .get(&Field::ItemDetails)
                .unwrap()
                .contains("at most 50 characters")
        );
    }

    #[test]
    fn valid_expense_draft_passes_and_clears_errors() {
        let draft = expense_draft(
            "Ăn uống",
            vec![item("Cà phê", "2", "25000"), item("Bánh mì", "1", "15000")],
        );
        let mut errors = ValidationErrors::default();
        errors.fields.insert(Field::Items, "stale".to_owned());

        assert!(validate(&draft, &mut errors));
        assert!(errors.is_empty());
    }

    #[test]
    fn unknown_types_take_the_expense_path() {
        // The gate has two branches; anything that is not income validates
        // like an expense.
        let draft = TransactionDraft {
            transaction_type: "transfer".to_owned(),
            category: "Khác".to_owned(),
            amount: "50000".to_owned(),
            items: Vec::new(),
        };
        let mut errors = ValidationErrors::default();

        assert!(!validate(&draft, &mut errors));
        assert!(errors.fields.contains_key(&Field::Items));
    }
}
