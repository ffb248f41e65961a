//! # flickd-core: Pure Business Logic for the Flickd Storefront
//!
//! Cart, checkout pricing, wishlist, reviews and catalog filtering as plain
//! data and functions. No I/O, no async, no global state.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Flickd Storefront Architecture                     │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                         Storefront UI                           │   │
//! │  │   Shop grid ──► Product detail ──► Bag ──► Checkout ──► Done    │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ command calls                          │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    storefront (app crate)                       │   │
//! │  │   add_to_cart, checkout, toggle_wishlist, login, etc.           │   │
//! │  └───────────────┬─────────────────────────────┬───────────────────┘   │
//! │                  │                             │                        │
//! │  ┌───────────────▼─────────────────┐  ┌────────▼──────────────────┐   │
//! │  │   ★ flickd-core (THIS CRATE) ★   │  │     flickd-catalog        │   │
//! │  │                                 │◄─┤  embedded products and    │   │
//! │  │  cart   order   wishlist        │  │  reviews, repositories    │   │
//! │  │  account  reviews  catalog      │  └───────────────────────────┘   │
//! │  │  money  types  validation       │                                  │
//! │  │                                 │                                  │
//! │  │  NO I/O • NO ASYNC • PURE DATA  │                                  │
//! │  └─────────────────────────────────┘                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`money`] - Money type with integer arithmetic
//! - [`types`] - Products, payment methods, addresses, users, reviews
//! - [`cart`] - The bag: lines merged on (product, size, color)
//! - [`order`] - Pricing policy, orders, the order processor
//! - [`account`] - Saved payment methods and shipping addresses
//! - [`wishlist`] - Saved-for-later products
//! - [`reviews`] - Rating summaries and review drafts
//! - [`catalog`] - Shop grid filters and sorts
//! - [`validation`] - Form and variant validation
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use flickd_core::{AccountBook, Cart, Money, OrderProcessor, Product};
//!
//! # fn product(id: u32, cents: i64) -> Product {
//! #     serde_json::from_value(serde_json::json!({
//! #         "id": id, "name": "Tee", "price": cents, "image": "", "category": "tops",
//! #         "subcategory": "basics", "description": "", "inStock": true, "rating": 4.5,
//! #         "reviews": 1, "brand": "Flickd", "material": "Cotton",
//! #         "sizes": ["M"], "colors": ["White"], "vibe": "clean-girl"
//! #     })).unwrap()
//! # }
//! let mut cart = Cart::new();
//! cart.add_line(&product(1, 2000), "M", "White", 2);
//! cart.add_line(&product(2, 1500), "M", "White", 1);
//! assert_eq!(cart.total_price(), Money::from_cents(5500));
//!
//! let order = OrderProcessor::default()
//!     .checkout(cart.lines(), &AccountBook::seeded(), "1", "1")
//!     .unwrap();
//! assert_eq!(order.tax(), Money::from_cents(440));
//! assert_eq!(order.shipping(), Money::from_cents(999));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod account;
pub mod cart;
pub mod catalog;
pub mod error;
pub mod money;
pub mod order;
pub mod reviews;
pub mod types;
pub mod validation;
pub mod wishlist;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use account::AccountBook;
pub use cart::{Cart, CartLine, CartTotals, LineKey, MAX_LINE_QUANTITY};
pub use catalog::{CatalogQuery, PriceBand, SortOrder};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use order::{Order, OrderProcessor, OrderStatus, OrderTotals, PricingPolicy};
pub use reviews::{RatingDistribution, ReviewDraft, ReviewSummary};
pub use types::*;
pub use wishlist::{Wishlist, WishlistEntry};
