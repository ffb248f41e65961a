//! # Storefront Commands
//!
//! Everything the UI can invoke.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs       ◄─── You are here (exports)
//! ├── catalog.rs   ◄─── Product listing, detail, reviews
//! ├── cart.rs      ◄─── Bag manipulation
//! ├── wishlist.rs  ◄─── Hearted products
//! ├── checkout.rs  ◄─── Quote, place order, order history
//! ├── account.rs   ◄─── Saved cards and addresses
//! └── auth.rs      ◄─── Login, register, logout
//! ```
//!
//! ## State Injection
//! Each command takes only the state it needs:
//! ```rust,ignore
//! // Only needs the cart
//! fn get_cart(cart: &CartState) -> CartResponse
//!
//! // Needs the catalog to snapshot the product
//! fn add_to_cart(catalog: &Catalog, config: &StoreConfig, cart: &CartState, ...)
//!
//! // Awaits the simulated payment round trip
//! async fn checkout(config: &StoreConfig, cart: &CartState, payments: &PaymentState, ...)
//! ```
//!
//! Every command returns a serializable response or an [`ApiError`].
//!
//! [`ApiError`]: crate::error::ApiError

pub mod account;
pub mod auth;
pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod wishlist;
