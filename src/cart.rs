//! Shopping cart model and mutation rules
//!
//! A cart is an ordered list of line items with at most one item per product.
//! Every mutator keeps `total_price == price * quantity` on each line item and
//! reports whether it changed anything, so callers can skip writing a cart
//! that a no-op left untouched.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::data::Product;

/// One product in the cart with its running quantity and total
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLineItem {
    /// Product identifier
    pub id: u64,
    /// Product title at the time it was added
    pub name: String,
    /// Unit price at the time it was added
    pub price: Decimal,
    /// Number of units, never below 1
    pub quantity: u32,
    /// `price * quantity`
    pub total_price: Decimal,
}

impl CartLineItem {
    /// Creates a line item holding one unit of `product`
    pub fn from_product(product: &Product) -> Self {
        Self {
            id: product.id,
            name: product.title.clone(),
            price: product.price,
            quantity: 1,
            total_price: product.price,
        }
    }

    /// Adds `unit_price` for one more unit; `false` if the quantity is at its maximum
    fn increment_by(&mut self, unit_price: Decimal) -> bool {
        let Some(quantity) = self.quantity.checked_add(1) else {
            return false;
        };
        self.quantity = quantity;
        self.total_price += unit_price;
        true
    }

    fn decrement(&mut self) {
        self.quantity -= 1;
        self.total_price -= self.price;
    }
}

/// The persisted list of line items
///
/// Serializes as a bare JSON array of line items.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    items: Vec<CartLineItem>,
}

impl Cart {
    /// Creates an empty cart
    pub fn new() -> Self {
        Self::default()
    }

    /// Line items in insertion order
    pub fn items(&self) -> &[CartLineItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of distinct line items
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Looks up the line item for a product id
    pub fn get(&self, id: u64) -> Option<&CartLineItem> {
        self.items.iter().find(|item| item.id == id)
    }

    fn get_mut(&mut self, id: u64) -> Option<&mut CartLineItem> {
        self.items.iter_mut().find(|item| item.id == id)
    }

    /// Adds one unit of `product`, merging into an existing line item.
    ///
    /// The existing line keeps its original name and unit price; the total
    /// grows by the price of the product being added. Returns `false` if the
    /// line is already at the maximum quantity.
    pub fn add(&mut self, product: &Product) -> bool {
        match self.get_mut(product.id) {
            Some(item) => item.increment_by(product.price),
            None => {
                self.items.push(CartLineItem::from_product(product));
                true
            }
        }
    }

    /// Adds one unit to the line item `id`. Returns `false` if absent or at the
    /// maximum quantity.
    pub fn increase(&mut self, id: u64) -> bool {
        match self.get_mut(id) {
            Some(item) => {
                let price = item.price;
                item.increment_by(price)
            }
            None => false,
        }
    }

    /// Removes one unit from the line item `id`, dropping the item at quantity 1.
    /// Returns `false` if absent.
    pub fn decrease(&mut self, id: u64) -> bool {
        let Some(item) = self.get_mut(id) else {
            return false;
        };

        if item.quantity > 1 {
            item.decrement();
        } else {
            self.items.retain(|item| item.id != id);
        }
        true
    }

    /// Removes the line item `id`. Returns `false` if absent.
    pub fn remove(&mut self, id: u64) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.id != id);
        self.items.len() != before
    }

    /// Sum of all line totals
    pub fn total(&self) -> Decimal {
        self.items.iter().map(|item| item.total_price).sum()
    }

    /// Sum of all quantities (the cart badge value)
    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.quantity)).sum()
    }
}
