//! # Cart State
//!
//! Holds the shopper's bag.
//!
//! ## Thread Safety
//! The cart is wrapped in `Arc<Mutex<T>>` because:
//! 1. Multiple commands may access/modify the cart
//! 2. Only one command should modify the cart at a time
//! 3. Commands can run concurrently on the runtime
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart State Operations                                │
//! │                                                                         │
//! │  UI Action               Command                 Cart State Change      │
//! │  ─────────               ───────                 ─────────────────      │
//! │                                                                         │
//! │  Add to Bag ─────────────► add_to_cart() ───────► merge or push line   │
//! │                                                                         │
//! │  +/- Quantity ───────────► update_cart_item() ──► set qty (≤0 drops)   │
//! │                                                                         │
//! │  Remove ─────────────────► remove_from_cart() ──► drop line            │
//! │                                                                         │
//! │  Pay (success) ──────────► checkout() ──────────► clear                │
//! │                                                                         │
//! │  Open Bag ───────────────► get_cart() ──────────► (read only)          │
//! │                                                                         │
//! │  NOTE: The lock is never held across an .await.                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::{Arc, Mutex, PoisonError};

use flickd_core::Cart;

/// Shared cart state.
///
/// Clones share the same cart.
#[derive(Debug, Clone, Default)]
pub struct CartState {
    cart: Arc<Mutex<Cart>>,
}

impl CartState {
    /// Creates a new empty cart state.
    pub fn new() -> Self {
        CartState::default()
    }

    /// Executes a function with read access to the cart.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let totals = cart_state.with_cart(|cart| cart.totals());
    /// ```
    pub fn with_cart<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Cart) -> R,
    {
        let cart = self.cart.lock().unwrap_or_else(PoisonError::into_inner);
        f(&cart)
    }

    /// Executes a function with write access to the cart.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// cart_state.with_cart_mut(|cart| cart.add_line(&product, "M", "Pink", 1));
    /// ```
    pub fn with_cart_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut Cart) -> R,
    {
        let mut cart = self.cart.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut cart)
    }
}
