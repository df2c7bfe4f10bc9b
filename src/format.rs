//! Display formatting for monetary amounts.

use std::sync::OnceLock;

use numfmt::{Formatter, Precision};

/// Format an amount for compact display.
///
/// The thresholds and labels are a fixed display contract:
/// - below one thousand, the plain integer (`"500"`),
/// - below one million, thousands floored with a `k` suffix (`"65k"`),
/// - below one billion, millions to one decimal place (`"5.0 triệu"`),
/// - otherwise billions to one decimal place (`"1.5 tỷ"`).
pub fn format_amount(amount: f64) -> String {
    if amount < 1_000.0 {
        format!("{}", amount.trunc() as i64)
    } else if amount < 1_000_000.0 {
        format!("{}k", (amount / 1_000.0).floor() as i64)
    } else if amount < 1_000_000_000.0 {
        format!("{:.1} triệu", amount / 1_000_000.0)
    } else {
        format!("{:.1} tỷ", amount / 1_000_000_000.0)
    }
}

/// Format an amount with dot-grouped thousands, e.g. `500.000`.
///
/// Used by budget alerts, which quote exact figures rather than the compact
/// form from [format_amount].
pub fn group_thousands(amount: f64) -> String {
    static GROUPED_FMT: OnceLock<Formatter> = OnceLock::new();

    let grouped_fmt = GROUPED_FMT.get_or_init(|| {
        Formatter::new()
            .separator('.')
            .unwrap()
            .precision(Precision::Decimals(0))
    });

    grouped_fmt.fmt_string(amount)
}
