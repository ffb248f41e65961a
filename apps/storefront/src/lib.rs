//! # Flickd Storefront Library
//!
//! Session-level storefront: the state a shopper's session holds and the
//! commands the UI invokes against it.
//!
//! ## Module Organization
//! ```text
//! storefront/
//! ├── lib.rs          ◄─── You are here (wiring, logging, demo run)
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── cart.rs     ◄─── Bag
//! │   ├── wishlist.rs ◄─── Hearted products
//! │   ├── payment.rs  ◄─── Account book, orders, order processor
//! │   ├── auth.rs     ◄─── Accounts and session
//! │   └── config.rs   ◄─── Store configuration
//! ├── commands/       ◄─── One file per UI area
//! └── error.rs        ◄─── API error type for commands
//! ```
//!
//! ## Layering
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  L2  storefront      commands + session state (this crate)             │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  L1  flickd-catalog  embedded products + reviews                        │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  L0  flickd-core     cart, order processor, wishlist, pricing           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod commands;
pub mod error;
pub mod state;

use flickd_catalog::Catalog;
use flickd_core::{CatalogQuery, OrderProcessor, SortOrder};
use tracing::info;
use tracing_subscriber::EnvFilter;

use commands::auth::LoginRequest;
use error::ApiResult;
use state::{AuthState, CartState, PaymentState, StoreConfig, WishlistState};

/// Everything one shopper session needs, wired together.
///
/// Commands take the individual pieces; this struct only owns them.
#[derive(Debug, Clone)]
pub struct Storefront {
    config: StoreConfig,
    catalog: Catalog,
    cart: CartState,
    wishlist: WishlistState,
    payments: PaymentState,
    auth: AuthState,
}

impl Storefront {
    /// Builds a session with the demo account and its saved card/address.
    pub fn new(config: StoreConfig, catalog: Catalog) -> ApiResult<Self> {
        let processor = OrderProcessor::new(config.pricing_policy());
        let auth = AuthState::seeded(&config.demo_email, &config.demo_password)?;

        Ok(Storefront {
            payments: PaymentState::seeded(processor),
            cart: CartState::new(),
            wishlist: WishlistState::new(),
            auth,
            catalog,
            config,
        })
    }

    /// Config from `FLICKD_*` variables, catalog from the embedded seed.
    pub fn from_env() -> ApiResult<Self> {
        let config = StoreConfig::from_env()?;
        let catalog = Catalog::embedded()?;
        Storefront::new(config, catalog)
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn cart(&self) -> &CartState {
        &self.cart
    }

    pub fn wishlist(&self) -> &WishlistState {
        &self.wishlist
    }

    pub fn payments(&self) -> &PaymentState {
        &self.payments
    }

    pub fn auth(&self) -> &AuthState {
        &self.auth
    }
}

/// Runs a scripted shopping session against the embedded catalog.
///
/// ## Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  1. Load config (FLICKD_*) and the embedded catalog                     │
/// │  2. Sign in as the demo account                                         │
/// │  3. Browse coquette pieces, highest rated first                         │
/// │  4. Heart one, add two variants to the bag                              │
/// │  5. Quote, then check out with the default card and address             │
/// │  6. Print the order confirmation as JSON                                │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub async fn run() -> ApiResult<()> {
    let store = Storefront::from_env()?;
    let config = store.config();

    info!(
        store = %config.store_name,
        products = store.catalog().products().count(),
        tax_rate = config.tax_rate.percentage(),
        "Storefront ready"
    );

    commands::auth::login(
        config,
        store.auth(),
        LoginRequest {
            email: config.demo_email.clone(),
            password: config.demo_password.clone(),
        },
    )
    .await?;

    let listing = commands::catalog::search_products(
        store.catalog(),
        CatalogQuery::all()
            .with_vibe("coquette")
            .sorted_by(SortOrder::Rating),
    );
    info!(hits = listing.total, "Browsing coquette");

    if let Some(top) = listing.products.iter().find(|p| p.in_stock) {
        commands::wishlist::add_to_wishlist(store.catalog(), store.wishlist(), top.id)?;
        commands::wishlist::add_wishlist_item_to_cart(store.wishlist(), store.cart(), top.id)?;
    }

    commands::cart::add_to_cart(
        store.catalog(),
        config,
        store.cart(),
        1,
        "M".to_string(),
        "Pink".to_string(),
        Some(2),
    )?;

    let summary =
        commands::checkout::get_checkout_summary(config, store.cart(), store.payments());
    info!(
        subtotal = %summary.subtotal_display,
        tax = %summary.tax_display,
        shipping = %summary.shipping_display,
        total = %summary.total_display,
        "Checkout summary"
    );

    let order =
        commands::checkout::checkout(config, store.cart(), store.payments(), None, None).await?;

    let json = serde_json::to_string_pretty(&order)
        .map_err(|e| error::ApiError::internal(e.to_string()))?;
    println!("{}", json);

    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=flickd=trace` - Show trace for flickd crates only
/// - Default: INFO, DEBUG for flickd crates
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,flickd=debug,storefront=debug"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}
