//! Defines the app level error type shared across the crate.

/// The errors that may occur in the spending tracker core.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum Error {
    /// A line item edit referred to an index past the end of the item list.
    ///
    /// Passing an index that does not refer to an existing item is a caller
    /// contract violation, so it is reported explicitly instead of being
    /// ignored.
    #[error("item index {index} is out of range for a list of {len} items")]
    ItemIndexOutOfRange {
        /// The offending index.
        index: usize,
        /// The number of items in the list at the time of the edit.
        len: usize,
    },

    /// An empty string was used to create a category.
    #[error("category name cannot be empty")]
    EmptyCategoryName,

    /// The category already exists in the caller's list.
    #[error("the category \"{0}\" already exists")]
    DuplicateCategory(String),

    /// The remote store rejected or failed a request.
    ///
    /// The error string should only be logged for debugging. User-facing
    /// messages are fixed per operation and never include the raw error.
    #[error("the remote store request failed: {0}")]
    Remote(String),

    /// The requested resource was not found at the remote store.
    #[error("the requested resource could not be found")]
    NotFound,
}
