//! # Wishlist
//!
//! Saved products, one entry per product id.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::types::{Product, ProductId};

/// A product saved for later.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct WishlistEntry {
    /// `wishlist-<product id>-<millis>`
    pub id: String,
    pub product: Product,
    #[ts(as = "String")]
    pub added_at: DateTime<Utc>,
}

/// The wishlist. Entries keep the order they were added in.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Wishlist {
    entries: Vec<WishlistEntry>,
}

impl Wishlist {
    pub fn new() -> Self {
        Wishlist::default()
    }

    /// Saves a product. Returns `false` if it was already saved, in which
    /// case nothing changes.
    pub fn add(&mut self, product: &Product) -> bool {
        self.add_at(product, Utc::now())
    }

    /// [`Wishlist::add`] with an explicit timestamp.
    pub fn add_at(&mut self, product: &Product, at: DateTime<Utc>) -> bool {
        if self.contains(product.id) {
            return false;
        }
        self.entries.push(WishlistEntry {
            id: format!("wishlist-{}-{}", product.id, at.timestamp_millis()),
            product: product.clone(),
            added_at: at,
        });
        true
    }

    /// Removes a product. Returns whether it was saved.
    pub fn remove(&mut self, product_id: ProductId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.product.id != product_id);
        self.entries.len() != before
    }

    pub fn contains(&self, product_id: ProductId) -> bool {
        self.entries.iter().any(|e| e.product.id == product_id)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn entries(&self) -> &[WishlistEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
