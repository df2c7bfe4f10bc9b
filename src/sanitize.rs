//! Numeric sanitization for user-entered amounts.

/// Strip every character that is not a decimal digit from `raw` and fold the
/// remaining digits, in their original order, into a non-negative integer.
///
/// Returns `0` when `raw` is empty or contains no digits. Sign characters are
/// among the stripped characters, not interpreted: `"-1000abc!@#"` sanitizes
/// to `1000`. The minus sign is not a rejection signal here; callers that
/// must reject negative-looking input have to inspect the raw string before
/// sanitizing. Saturates at [u64::MAX] for absurdly long digit runs.
pub fn sanitize_amount(raw: &str) -> u64 {
    raw.chars()
        .filter_map(|character| character.to_digit(10))
        .fold(0u64, |total, digit| {
            total.saturating_mul(10).saturating_add(u64::from(digit))
        })
}
