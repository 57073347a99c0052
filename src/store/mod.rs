//! Local persistence for the shopping cart
//!
//! This module provides a small key-value store backed by JSON files in an
//! XDG-compliant data directory, and a transactional wrapper that runs one
//! read-modify-write cycle on the persisted cart.

mod manager;
mod transaction;

pub use manager::{LocalStore, StoreError};
pub use transaction::{clear_cart, load_cart, CartTransaction, CART_KEY};
