//! User notification collaborator.

/// A sink for user-facing alerts and confirmations.
///
/// The UI layer supplies the implementation; the core only decides when to
/// speak and what to say.
pub trait NotificationSink: Send + Sync {
    /// Show a `(title, message)` alert.
    fn alert(&self, title: &str, message: &str);

    /// Ask for confirmation before a destructive action.
    ///
    /// Returns `true` when the user confirms.
    fn confirm(&self, message: &str) -> bool;
}
