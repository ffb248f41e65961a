//! # State Module
//!
//! Shopper-session state for the storefront.
//!
//! Each concern has its own state type, so a command takes only the state
//! it touches.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌──────────────┐ ┌──────────────┐ ┌──────────────┐ ┌──────────────┐   │
//! │  │  CartState   │ │WishlistState │ │ PaymentState │ │  AuthState   │   │
//! │  │              │ │              │ │              │ │              │   │
//! │  │  Arc<Mutex<  │ │  Arc<Mutex<  │ │  AccountBook │ │  accounts    │   │
//! │  │    Cart      │ │   Wishlist   │ │  orders      │ │  session     │   │
//! │  │  >>          │ │  >>          │ │  processor   │ │  is_loading  │   │
//! │  └──────────────┘ └──────────────┘ └──────────────┘ └──────────────┘   │
//! │                                                                         │
//! │  ┌──────────────┐                                                       │
//! │  │ StoreConfig  │  read-only after startup                              │
//! │  └──────────────┘                                                       │
//! │                                                                         │
//! │  THREAD SAFETY:                                                        │
//! │  • Mutable state sits behind Arc<Mutex<T>>, clones share it            │
//! │  • Locks are scoped to a closure and never held across an .await       │
//! │  • Poisoned locks are recovered, state stays usable                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod auth;
mod cart;
mod config;
mod payment;
mod wishlist;

pub use auth::{hash_password, AuthError, AuthSnapshot, AuthState, LoadingGuard};
pub use cart::CartState;
pub use config::{ConfigError, StoreConfig};
pub use payment::PaymentState;
pub use wishlist::WishlistState;
