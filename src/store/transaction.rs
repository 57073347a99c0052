//! Read-modify-write cycles on the persisted cart
//!
//! Every cart mutation starts from the stored cart, never from a copy kept in
//! memory, and writes back only when the mutation changed something. A
//! transaction that fails to read or is dropped without committing leaves the
//! stored value untouched.

use tracing::debug;

use super::{LocalStore, StoreError};
use crate::cart::Cart;

/// Key of the single slot holding the cart
pub const CART_KEY: &str = "cart";

/// Reads the stored cart; an absent key is an empty cart
pub fn load_cart(store: &LocalStore) -> Result<Cart, StoreError> {
    Ok(store.read::<Cart>(CART_KEY)?.unwrap_or_default())
}

/// Deletes the stored cart entirely
pub fn clear_cart(store: &LocalStore) -> Result<(), StoreError> {
    store.remove(CART_KEY)
}

/// A cart read from the store, pending write-back
#[derive(Debug)]
pub struct CartTransaction<'a> {
    store: &'a LocalStore,
    cart: Cart,
}

impl<'a> CartTransaction<'a> {
    /// Reads the current cart from `store`
    pub fn begin(store: &'a LocalStore) -> Result<Self, StoreError> {
        let cart = load_cart(store)?;
        Ok(Self { store, cart })
    }

    /// The working copy
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Mutable access to the working copy
    pub fn cart_mut(&mut self) -> &mut Cart {
        &mut self.cart
    }

    /// Writes the working copy back and returns it
    pub fn commit(self) -> Result<Cart, StoreError> {
        self.store.write(CART_KEY, &self.cart)?;
        Ok(self.cart)
    }

    /// Runs one mutation against the stored cart.
    ///
    /// `mutate` returns whether it changed the cart; the cart is written back
    /// only in that case. Returns the resulting cart either way.
    pub fn run<F>(store: &'a LocalStore, mutate: F) -> Result<Cart, StoreError>
    where
        F: FnOnce(&mut Cart) -> bool,
    {
        let mut tx = Self::begin(store)?;
        if mutate(tx.cart_mut()) {
            tx.commit()
        } else {
            debug!("cart unchanged, skipping write");
            Ok(tx.cart)
        }
    }
}
