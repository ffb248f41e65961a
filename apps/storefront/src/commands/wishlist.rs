//! # Wishlist Commands
//!
//! Hearting products and moving them to the bag.
//!
//! ```text
//! ♡ on product card ──► toggle_wishlist(id) ──► saved / removed
//!
//! Wishlist modal:
//!   "Add to Bag" ─────► add_wishlist_item_to_cart(id)
//!                       first size + color, entry stays saved
//!   "Remove" ─────────► remove_from_wishlist(id)
//! ```

use flickd_catalog::Catalog;
use flickd_core::{ProductId, WishlistEntry};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::commands::cart::{default_variant, ensure_purchasable, CartResponse};
use crate::error::{ApiError, ApiResult};
use crate::state::{CartState, WishlistState};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WishlistResponse {
    pub items: Vec<WishlistEntry>,
    pub count: usize,
}

impl WishlistResponse {
    fn from_state(wishlist: &WishlistState) -> Self {
        wishlist.with_wishlist(|w| WishlistResponse {
            items: w.entries().to_vec(),
            count: w.len(),
        })
    }
}

pub fn get_wishlist(wishlist: &WishlistState) -> WishlistResponse {
    debug!("get_wishlist command");
    WishlistResponse::from_state(wishlist)
}

/// Saves a product. Saving it twice keeps one entry.
pub fn add_to_wishlist(
    catalog: &Catalog,
    wishlist: &WishlistState,
    product_id: ProductId,
) -> ApiResult<WishlistResponse> {
    debug!(product_id, "add_to_wishlist command");

    let product = catalog.products().require(product_id)?;
    wishlist.with_wishlist_mut(|w| w.add(product));
    Ok(WishlistResponse::from_state(wishlist))
}

/// Removes a product. Removing one that is not saved is a no-op.
pub fn remove_from_wishlist(wishlist: &WishlistState, product_id: ProductId) -> WishlistResponse {
    debug!(product_id, "remove_from_wishlist command");

    wishlist.with_wishlist_mut(|w| w.remove(product_id));
    WishlistResponse::from_state(wishlist)
}

/// Heart button: saves if absent, removes if present.
///
/// Returns whether the product is saved afterwards.
pub fn toggle_wishlist(
    catalog: &Catalog,
    wishlist: &WishlistState,
    product_id: ProductId,
) -> ApiResult<bool> {
    debug!(product_id, "toggle_wishlist command");

    let product = catalog.products().require(product_id)?;
    Ok(wishlist.with_wishlist_mut(|w| {
        if w.remove(product_id) {
            false
        } else {
            w.add(product)
        }
    }))
}

pub fn is_in_wishlist(wishlist: &WishlistState, product_id: ProductId) -> bool {
    wishlist.with_wishlist(|w| w.contains(product_id))
}

pub fn clear_wishlist(wishlist: &WishlistState) -> WishlistResponse {
    debug!("clear_wishlist command");

    wishlist.with_wishlist_mut(|w| w.clear());
    WishlistResponse::from_state(wishlist)
}

/// Adds one unit of a saved product to the bag in its first size and color.
///
/// The wishlist entry is kept. Uses the snapshot saved in the wishlist.
pub fn add_wishlist_item_to_cart(
    wishlist: &WishlistState,
    cart: &CartState,
    product_id: ProductId,
) -> ApiResult<CartResponse> {
    debug!(product_id, "add_wishlist_item_to_cart command");

    let product = wishlist
        .with_wishlist(|w| {
            w.entries()
                .iter()
                .find(|e| e.product.id == product_id)
                .map(|e| e.product.clone())
        })
        .ok_or_else(|| ApiError::not_found("Wishlist item", &product_id.to_string()))?;

    ensure_purchasable(&product)?;
    let (size, color) = default_variant(&product)?;

    Ok(cart.with_cart_mut(|c| {
        c.add_line(&product, size, color, 1);
        CartResponse::from(&*c)
    }))
}
