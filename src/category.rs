//! Caller-owned category lists.

use crate::Error;

/// A list of category names owned by the caller.
///
/// The core never persists categories; it only validates membership and
/// appends custom entries on the owner's behalf. Whoever holds the list
/// decides where (or whether) it is stored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryList {
    categories: Vec<String>,
}

impl CategoryList {
    /// Wrap an existing list of category names.
    pub fn new(categories: Vec<String>) -> Self {
        Self { categories }
    }

    /// The built-in income categories.
    pub fn income_defaults() -> Self {
        Self::new(
            ["Lương", "Thưởng", "Đầu tư", "Khác"]
                .map(String::from)
                .to_vec(),
        )
    }

    /// The built-in expense categories.
    pub fn expense_defaults() -> Self {
        Self::new(
            ["Ăn uống", "Di chuyển", "Hóa đơn", "Mua sắm", "Giải trí", "Khác"]
                .map(String::from)
                .to_vec(),
        )
    }

    /// Whether `name` is a known category.
    pub fn contains(&self, name: &str) -> bool {
        self.categories.iter().any(|category| category == name)
    }

    /// Append a custom category.
    ///
    /// The name is trimmed before it is checked and stored.
    ///
    /// # Errors
    /// Returns [Error::EmptyCategoryName] for blank names and
    /// [Error::DuplicateCategory] when the trimmed name already exists.
    pub fn add_custom(&mut self, name: &str) -> Result<(), Error> {
        let name = name.trim();

        if name.is_empty() {
            return Err(Error::EmptyCategoryName);
        }

        if self.contains(name) {
            return Err(Error::DuplicateCategory(name.to_owned()));
        }

        self.categories.push(name.to_owned());
        Ok(())
    }

    /// The category names, in insertion order.
    pub fn names(&self) -> &[String] {
        &self.categories
    }
}
