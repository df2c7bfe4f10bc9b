//! Pure helpers for editing and totalling itemized line entries.

use crate::{Error, sanitize::sanitize_amount};

/// One editable row of an itemized expense, as raw input strings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineItemDraft {
    /// The product name, stored exactly as typed.
    pub product_name: String,
    /// The quantity input. [update_item] keeps only its digits.
    pub quantity: String,
    /// The unit price input. [update_item] keeps only its digits.
    pub price: String,
}

/// The editable fields of a line item row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemField {
    /// The free-text product name.
    ProductName,
    /// The numeric quantity.
    Quantity,
    /// The numeric unit price.
    Price,
}

/// Append a blank item row.
pub fn add_item(items: &mut Vec<LineItemDraft>) {
    items.push(LineItemDraft::default());
}

/// Replace one field of one item row.
///
/// Quantity and price values keep only their digits; product names are stored
/// as-is and only length-checked at validation time.
///
/// # Errors
/// Returns [Error::ItemIndexOutOfRange] if `index` does not refer to an item.
pub fn update_item(
    items: &mut [LineItemDraft],
    index: usize,
    field: ItemField,
    value: &str,
) -> Result<(), Error> {
    let len = items.len();
    let item = items
        .get_mut(index)
        .ok_or(Error::ItemIndexOutOfRange { index, len })?;

    match field {
        ItemField::ProductName => item.product_name = value.to_owned(),
        ItemField::Quantity => item.quantity = keep_digits(value),
        ItemField::Price => item.price = keep_digits(value),
    }

    Ok(())
}

/// Sanitized quantity × sanitized price for one row.
pub fn item_subtotal(item: &LineItemDraft) -> u64 {
    sanitize_amount(&item.quantity).saturating_mul(sanitize_amount(&item.price))
}

/// Total across all rows.
///
/// Zero for an empty list. The sum is commutative, so the total is invariant
/// under reordering, and recomputing it never changes the result.
pub fn compute_total(items: &[LineItemDraft]) -> u64 {
    items.iter().map(item_subtotal).fold(0, u64::saturating_add)
}

fn keep_digits(value: &str) -> String {
    value
        .chars()
        .filter(|character| character.is_ascii_digit())
        .collect()
}
