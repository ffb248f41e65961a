//! # Cart Commands
//!
//! Commands for bag manipulation.
//!
//! ## Cart Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Lifecycle                                       │
//! │                                                                         │
//! │  ┌──────────┐     ┌──────────┐     ┌──────────┐     ┌──────────┐       │
//! │  │  Empty   │────►│  In Bag  │────►│ Checkout │────►│  Order   │       │
//! │  │   Bag    │     │          │     │   Form   │     │  placed  │       │
//! │  └──────────┘     └──────────┘     └──────────┘     └──────────┘       │
//! │                        │                 │                              │
//! │                   add_to_cart        checkout                          │
//! │                   update_cart_item   (checkout.rs)                     │
//! │                   remove_from_cart                                      │
//! │                        │                                                │
//! │                        ▼                                                │
//! │                   clear_cart ──────────────────────►                   │
//! │                                                      (back to empty)   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Lines are identified by product id + size + color. Adding the same
//! variant again merges into the existing line.

use flickd_catalog::Catalog;
use flickd_core::validation::validate_variant;
use flickd_core::{Cart, CartLine, CartTotals, Product, ProductId, MAX_LINE_QUANTITY};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ApiError, ApiResult};
use crate::state::{CartState, StoreConfig};

/// Cart response including lines and totals.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartResponse {
    pub items: Vec<CartLine>,
    pub totals: CartTotals,
}

impl From<&Cart> for CartResponse {
    fn from(cart: &Cart) -> Self {
        CartResponse {
            items: cart.lines().to_vec(),
            totals: cart.totals(),
        }
    }
}

/// Gets the current bag contents.
///
/// ## Returns
/// Current bag with lines and totals
pub fn get_cart(cart: &CartState) -> CartResponse {
    debug!("get_cart command");
    cart.with_cart(|c| CartResponse::from(c))
}

/// Adds a product variant to the bag.
///
/// ## Behavior
/// - Variant already in the bag: quantity increases
/// - Variant not in the bag: appended as a new line
/// - Product is snapshotted at add time, so later price changes don't
///   affect the line
///
/// ## User Workflow
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  Shopper picks size M, color Pink, taps "Add to Bag"                   │
/// │                    │                                                    │
/// │                    ▼                                                    │
/// │  add_to_cart(product_id: 1, size: "M", color: "Pink", quantity: None)  │
/// │                    │                                                    │
/// │                    ▼                                                    │
/// │  ┌────────────────────────────────────────────────────────────────┐    │
/// │  │  1. Look up product in the catalog                             │    │
/// │  │  2. Reject if out of stock                                     │    │
/// │  │  3. (strict_variants) reject sizes/colors not offered          │    │
/// │  │  4. Merge into existing line or append                         │    │
/// │  │  5. Return updated bag                                         │    │
/// │  └────────────────────────────────────────────────────────────────┘    │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
///
/// ## Arguments
/// * `product_id` - Catalog product id
/// * `size`, `color` - Selected variant
/// * `quantity` - Quantity to add (default: 1). The line is capped at
///   [`MAX_LINE_QUANTITY`].
pub fn add_to_cart(
    catalog: &Catalog,
    config: &StoreConfig,
    cart: &CartState,
    product_id: ProductId,
    size: String,
    color: String,
    quantity: Option<i64>,
) -> ApiResult<CartResponse> {
    let quantity = quantity.unwrap_or(1);
    debug!(product_id, size = %size, color = %color, quantity, "add_to_cart command");

    let product = catalog.products().require(product_id)?;
    ensure_purchasable(product)?;

    if config.strict_variants {
        validate_variant(product, &size, &color)?;
    }

    Ok(cart.with_cart_mut(|c| {
        c.add_line(product, &size, &color, quantity);
        CartResponse::from(&*c)
    }))
}

/// Adds one unit in the product's first listed size and color.
///
/// Used by the "quick add" button on product cards.
pub fn quick_add_to_cart(
    catalog: &Catalog,
    cart: &CartState,
    product_id: ProductId,
) -> ApiResult<CartResponse> {
    debug!(product_id, "quick_add_to_cart command");

    let product = catalog.products().require(product_id)?;
    ensure_purchasable(product)?;

    let (size, color) = default_variant(product)?;

    Ok(cart.with_cart_mut(|c| {
        c.add_line(product, size, color, 1);
        CartResponse::from(&*c)
    }))
}

/// Sets the quantity of a line.
///
/// ## Behavior
/// - Quantity 0 or below: removes the line
/// - Above [`MAX_LINE_QUANTITY`]: clamped
/// - Variant not in the bag: no change
pub fn update_cart_item(
    cart: &CartState,
    product_id: ProductId,
    size: String,
    color: String,
    quantity: i64,
) -> CartResponse {
    debug!(product_id, size = %size, color = %color, quantity, "update_cart_item command");

    cart.with_cart_mut(|c| {
        c.set_quantity(product_id, &size, &color, quantity);
        CartResponse::from(&*c)
    })
}

/// Removes a line from the bag. Removing an absent variant is a no-op.
pub fn remove_from_cart(
    cart: &CartState,
    product_id: ProductId,
    size: String,
    color: String,
) -> CartResponse {
    debug!(product_id, size = %size, color = %color, "remove_from_cart command");

    cart.with_cart_mut(|c| {
        c.remove_line(product_id, &size, &color);
        CartResponse::from(&*c)
    })
}

/// Empties the bag.
pub fn clear_cart(cart: &CartState) -> CartResponse {
    debug!("clear_cart command");

    cart.with_cart_mut(|c| {
        c.clear();
        CartResponse::from(&*c)
    })
}

pub(crate) fn ensure_purchasable(product: &Product) -> ApiResult<()> {
    if !product.in_stock {
        return Err(ApiError::validation(format!(
            "{} is out of stock",
            product.name
        )));
    }
    Ok(())
}

/// First listed size and color of a product.
pub(crate) fn default_variant(product: &Product) -> ApiResult<(&str, &str)> {
    let size = product.sizes.first().ok_or_else(|| {
        ApiError::validation(format!("{} has no sizes listed", product.name))
    })?;
    let color = product.colors.first().ok_or_else(|| {
        ApiError::validation(format!("{} has no colors listed", product.name))
    })?;
    Ok((size.as_str(), color.as_str()))
}
