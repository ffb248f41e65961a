//! # Wishlist State
//!
//! Products the shopper has hearted. Same locking scheme as the cart.

use std::sync::{Arc, Mutex, PoisonError};

use flickd_core::Wishlist;

/// Shared wishlist state.
#[derive(Debug, Clone, Default)]
pub struct WishlistState {
    wishlist: Arc<Mutex<Wishlist>>,
}

impl WishlistState {
    pub fn new() -> Self {
        WishlistState::default()
    }

    pub fn with_wishlist<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Wishlist) -> R,
    {
        let wishlist = self.wishlist.lock().unwrap_or_else(PoisonError::into_inner);
        f(&wishlist)
    }

    pub fn with_wishlist_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut Wishlist) -> R,
    {
        let mut wishlist = self.wishlist.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut wishlist)
    }
}
