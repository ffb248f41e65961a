//! # Cart
//!
//! The cart store: an ordered list of line items deduplicated on
//! `(product_id, size, color)`.
//!
//! ## Cart Operations
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Operations                                      │
//! │                                                                         │
//! │  Operation                      Effect on lines                         │
//! │  ─────────                      ───────────────                         │
//! │                                                                         │
//! │  add_line(p, "M", "Pink", 2) ─► key exists?  qty += 2                   │
//! │                                 otherwise    push new line              │
//! │                                                                         │
//! │  set_quantity(key, n) ────────► n <= 0 ? remove : qty = min(n, 99)      │
//! │                                                                         │
//! │  remove_line(key) ────────────► retain(others), no-op if absent         │
//! │                                                                         │
//! │  remove_ordered(lines) ───────► qty -= ordered qty, drop at 0           │
//! │                                                                         │
//! │  clear() ─────────────────────► lines.clear()                           │
//! │                                                                         │
//! │  INVARIANT: one line per key, 1 <= quantity <= MAX_LINE_QUANTITY        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! None of these operations can fail. Whether the chosen size and color are
//! actually offered is checked by the caller (see
//! [`crate::validation::validate_variant`]).

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::types::{Product, ProductId};

/// Largest quantity a single line can hold. Larger adds and updates are
/// clamped to it.
pub const MAX_LINE_QUANTITY: i64 = 99;

// =============================================================================
// Line Key
// =============================================================================

/// Identity of a cart line.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct LineKey {
    pub product_id: ProductId,
    pub size: String,
    pub color: String,
}

impl LineKey {
    pub fn new(product_id: ProductId, size: impl Into<String>, color: impl Into<String>) -> Self {
        LineKey {
            product_id,
            size: size.into(),
            color: color.into(),
        }
    }
}

// =============================================================================
// Cart Line
// =============================================================================

/// A line in the cart.
///
/// ## Snapshot
/// The product is copied when the line is first created, so the cart keeps
/// showing the price the shopper saw even if the catalog changes later.
/// Serialized flat: product fields plus `quantity`, `selectedSize`,
/// `selectedColor`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartLine {
    #[serde(flatten)]
    pub product: Product,
    pub quantity: i64,
    pub selected_size: String,
    pub selected_color: String,
}

impl CartLine {
    /// Creates a line for `product` in the given variant.
    pub fn new(product: &Product, size: &str, color: &str, quantity: i64) -> Self {
        CartLine {
            product: product.clone(),
            quantity,
            selected_size: size.to_string(),
            selected_color: color.to_string(),
        }
    }

    /// The line's identity key.
    pub fn key(&self) -> LineKey {
        LineKey::new(
            self.product.id,
            self.selected_size.clone(),
            self.selected_color.clone(),
        )
    }

    /// Whether this line has the given identity, without allocating a key.
    #[inline]
    pub fn matches(&self, product_id: ProductId, size: &str, color: &str) -> bool {
        self.product.id == product_id && self.selected_size == size && self.selected_color == color
    }

    /// Unit price frozen at add time.
    #[inline]
    pub fn unit_price(&self) -> Money {
        self.product.price
    }

    /// Unit price × quantity.
    #[inline]
    pub fn line_total(&self) -> Money {
        self.unit_price().multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Cart
// =============================================================================

/// The shopping cart.
///
/// Lines keep insertion order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart { lines: Vec::new() }
    }

    /// Adds `quantity` of a product variant.
    ///
    /// ## Behavior
    /// - Key already in cart: quantity is incremented by `quantity`
    /// - Key not in cart: a new line is appended
    /// - A merge that leaves the line at 0 or below removes it, and a
    ///   non-positive quantity never creates a line
    /// - The resulting quantity is capped at [`MAX_LINE_QUANTITY`]
    pub fn add_line(&mut self, product: &Product, size: &str, color: &str, quantity: i64) {
        if let Some(pos) = self.position(product.id, size, color) {
            let merged = self.lines[pos].quantity.saturating_add(quantity);
            if merged <= 0 {
                self.lines.remove(pos);
            } else {
                self.lines[pos].quantity = merged.min(MAX_LINE_QUANTITY);
            }
            return;
        }

        if quantity > 0 {
            self.lines.push(CartLine::new(
                product,
                size,
                color,
                quantity.min(MAX_LINE_QUANTITY),
            ));
        }
    }

    /// Removes the line with this key.
    ///
    /// Returns whether a line was removed; an absent key is a no-op.
    pub fn remove_line(&mut self, product_id: ProductId, size: &str, color: &str) -> bool {
        let before = self.lines.len();
        self.lines.retain(|l| !l.matches(product_id, size, color));
        self.lines.len() != before
    }

    /// Overwrites the quantity of a line.
    ///
    /// ## Behavior
    /// - `quantity <= 0`: same as [`Cart::remove_line`]
    /// - Above [`MAX_LINE_QUANTITY`]: clamped
    /// - Key not in cart: no-op
    ///
    /// Returns whether a line with this key existed.
    pub fn set_quantity(
        &mut self,
        product_id: ProductId,
        size: &str,
        color: &str,
        quantity: i64,
    ) -> bool {
        if quantity <= 0 {
            return self.remove_line(product_id, size, color);
        }

        match self.lines.iter_mut().find(|l| l.matches(product_id, size, color)) {
            Some(line) => {
                line.quantity = quantity.min(MAX_LINE_QUANTITY);
                true
            }
            None => false,
        }
    }

    /// Σ unit price × quantity.
    pub fn total_price(&self) -> Money {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    /// Σ quantity.
    pub fn total_items(&self) -> i64 {
        self.lines
            .iter()
            .fold(0i64, |acc, l| acc.saturating_add(l.quantity))
    }

    /// Takes `ordered` back out of the cart after checkout.
    ///
    /// Each ordered line's quantity is subtracted from the matching line;
    /// lines that reach 0 are removed. Lines added or grown since the
    /// snapshot was taken keep the difference.
    pub fn remove_ordered(&mut self, ordered: &[CartLine]) {
        for line in ordered {
            if let Some(pos) =
                self.position(line.product.id, &line.selected_size, &line.selected_color)
            {
                let remaining = self.lines[pos].quantity.saturating_sub(line.quantity);
                if remaining <= 0 {
                    self.lines.remove(pos);
                } else {
                    self.lines[pos].quantity = remaining;
                }
            }
        }
    }

    /// Empties the cart.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Lines in insertion order.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Looks up a line by key.
    pub fn line(&self, key: &LineKey) -> Option<&CartLine> {
        self.lines
            .iter()
            .find(|l| l.matches(key.product_id, &key.size, &key.color))
    }

    /// Number of distinct lines.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Summary of the derived totals.
    pub fn totals(&self) -> CartTotals {
        CartTotals::from(self)
    }

    fn position(&self, product_id: ProductId, size: &str, color: &str) -> Option<usize> {
        self.lines.iter().position(|l| l.matches(product_id, size, color))
    }
}

/// Cart totals summary for responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartTotals {
    pub line_count: usize,
    pub total_items: i64,
    pub total_price: Money,
}

impl From<&Cart> for CartTotals {
    fn from(cart: &Cart) -> Self {
        CartTotals {
            line_count: cart.line_count(),
            total_items: cart.total_items(),
            total_price: cart.total_price(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
