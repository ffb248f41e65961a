//! # Flickd Storefront Entry Point
//!
//! Runs a scripted shopping session against the embedded catalog and prints
//! the order confirmation.
//!
//! ## Startup Sequence
//! 1. Initialize tracing (logging)
//! 2. Load configuration from `FLICKD_*` variables
//! 3. Load the embedded catalog
//! 4. Seed the demo account
//! 5. Run the session (see [`storefront::run`])
//!
//! ## Usage
//! ```bash
//! FLICKD_CHECKOUT_DELAY_MS=0 RUST_LOG=debug flickd-storefront
//! ```

use tracing::error;

#[tokio::main]
async fn main() {
    storefront::init_tracing();

    if let Err(e) = storefront::run().await {
        error!(code = ?e.code, "Storefront session failed: {}", e.message);
        std::process::exit(1);
    }
}
