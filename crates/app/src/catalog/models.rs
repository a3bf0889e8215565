//! Catalog query models.

/// Optional constraints on a product listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductFilter {
    /// Restrict to a category label.
    pub category: Option<String>,

    /// Free-text search over product names.
    pub search: Option<String>,
}

impl ProductFilter {
    /// Filter to a single category.
    #[must_use]
    pub fn category(category: impl Into<String>) -> Self {
        Self {
            category: Some(category.into()),
            search: None,
        }
    }
}
