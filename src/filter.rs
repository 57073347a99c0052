//! Category filtering and price sorting of the catalog
//!
//! Produces the list of products the grid shows without ever reordering the
//! catalog itself, so returning to "all" always starts from catalog order.

use std::cmp::Ordering;

use crate::data::Product;

/// Which category the grid is restricted to
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    /// No restriction
    #[default]
    All,
    /// Only products whose category equals this label exactly
    Category(String),
}

impl CategoryFilter {
    /// Sentinel accepted on the command line for "no restriction"
    pub const ALL: &'static str = "all";

    /// Parses a selector value; `all` (any case) means no restriction
    pub fn from_arg(value: &str) -> Self {
        if value.eq_ignore_ascii_case(Self::ALL) {
            CategoryFilter::All
        } else {
            CategoryFilter::Category(value.to_string())
        }
    }

    /// Label shown in the category selector
    pub fn label(&self) -> &str {
        match self {
            CategoryFilter::All => "All",
            CategoryFilter::Category(name) => name,
        }
    }

    pub fn matches(&self, product: &Product) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Category(name) => product.category == *name,
        }
    }
}

/// Price sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

impl SortOrder {
    /// Label shown in the sort selector
    pub fn label(&self) -> &'static str {
        match self {
            SortOrder::Ascending => "Price: low to high",
            SortOrder::Descending => "Price: high to low",
        }
    }

    /// The opposite direction
    pub fn toggled(self) -> Self {
        match self {
            SortOrder::Ascending => SortOrder::Descending,
            SortOrder::Descending => SortOrder::Ascending,
        }
    }

    fn compare(self, a: &Product, b: &Product) -> Ordering {
        match self {
            SortOrder::Ascending => a.price.cmp(&b.price),
            SortOrder::Descending => b.price.cmp(&a.price),
        }
    }
}

/// The current category selection and sort direction
///
/// `sort` is `None` until a direction is chosen; the grid then shows catalog order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductQuery {
    pub category: CategoryFilter,
    pub sort: Option<SortOrder>,
}

impl ProductQuery {
    pub fn new(category: CategoryFilter, sort: Option<SortOrder>) -> Self {
        Self { category, sort }
    }

    /// Filters then sorts `products` into a fresh list.
    ///
    /// Sorting is stable: equal prices keep their catalog order.
    pub fn apply<'a>(&self, products: &'a [Product]) -> Vec<&'a Product> {
        let mut visible: Vec<&Product> = products
            .iter()
            .filter(|product| self.category.matches(product))
            .collect();

        if let Some(order) = self.sort {
            visible.sort_by(|a, b| order.compare(a, b));
        }

        visible
    }
}
