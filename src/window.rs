//! Relative date windows used to bucket transactions.

use serde::Deserialize;
use time::{Date, Duration, OffsetDateTime};

/// A named time range relative to an evaluation instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterWindow {
    /// The current calendar day.
    Day,
    /// From the start of the current Sunday-anchored week onwards.
    Week,
    /// The current calendar month.
    Month,
    /// The current calendar year.
    Year,
}

impl FilterWindow {
    /// Parse a window name as used by the UI and query strings.
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "day" => Some(Self::Day),
            "week" => Some(Self::Week),
            "month" => Some(Self::Month),
            "year" => Some(Self::Year),
            _ => None,
        }
    }

    /// The wire/query value for this window.
    pub fn as_query_value(self) -> &'static str {
        match self {
            Self::Day => "day",
            Self::Week => "week",
            Self::Month => "month",
            Self::Year => "year",
        }
    }

    /// A short display label for this window.
    pub fn label(self) -> &'static str {
        match self {
            Self::Day => "Day",
            Self::Week => "Week",
            Self::Month => "Month",
            Self::Year => "Year",
        }
    }
}

/// Decide whether `timestamp` falls within `window` relative to `now`.
///
/// Calendar fields are compared in `now`'s UTC offset, so the caller decides
/// what "local" means by the instant it injects. The week window is a
/// Sunday-anchored rolling range with only a lower bound, not an ISO week: a
/// timestamp later in the same week is included, one before the week's Sunday
/// is excluded.
pub fn is_in_range(timestamp: OffsetDateTime, window: FilterWindow, now: OffsetDateTime) -> bool {
    let local = timestamp.to_offset(now.offset());

    match window {
        FilterWindow::Day => local.date() == now.date(),
        FilterWindow::Week => local.date() >= start_of_week(now.date()),
        FilterWindow::Month => local.month() == now.month() && local.year() == now.year(),
        FilterWindow::Year => local.year() == now.year(),
    }
}

/// Fail-closed variant of [is_in_range] for window names straight from the
/// UI: unknown or malformed names match nothing.
pub fn is_in_named_range(timestamp: OffsetDateTime, window: &str, now: OffsetDateTime) -> bool {
    match FilterWindow::parse(window) {
        Some(window) => is_in_range(timestamp, window, now),
        None => false,
    }
}

fn start_of_week(today: Date) -> Date {
    let days_since_sunday = i64::from(today.weekday().number_days_from_sunday());
    today - Duration::days(days_since_sunday)
}
