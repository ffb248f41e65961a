//! # Store Configuration
//!
//! Configuration loaded once at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`FLICKD_*`)
//! 2. Defaults (this file)
//!
//! ## Environment Variables
//! ```text
//! FLICKD_STORE_NAME          Store name shown in the header
//! FLICKD_TAX_RATE            Sales tax percent, e.g. "8" or "8.25"
//! FLICKD_FREE_SHIPPING_OVER  Free shipping above this subtotal, e.g. "100"
//! FLICKD_FLAT_SHIPPING       Shipping charge otherwise, e.g. "9.99"
//! FLICKD_CHECKOUT_DELAY_MS   Simulated payment round trip (2000)
//! FLICKD_AUTH_DELAY_MS       Simulated login/register round trip (1000)
//! FLICKD_REVIEW_DELAY_MS     Simulated review submission round trip (1000)
//! FLICKD_STRICT_VARIANTS     Reject sizes/colors a product is not offered in
//! FLICKD_DEMO_EMAIL          Demo account email
//! FLICKD_DEMO_PASSWORD       Demo account password
//! ```
//!
//! ## Thread Safety
//! Configuration is read-only after initialization, so no mutex needed.

use std::env;
use std::time::Duration;

use flickd_core::order::{
    DEFAULT_FLAT_SHIPPING_CENTS, DEFAULT_FREE_SHIPPING_THRESHOLD_CENTS, DEFAULT_TAX_RATE_BPS,
};
use flickd_core::{Money, PricingPolicy, TaxRate};
use serde::{Deserialize, Serialize};

/// Storefront configuration.
///
/// ## Fields
/// Every field has a development default; see [`StoreConfig::default`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreConfig {
    /// Store name (displayed in the header)
    pub store_name: String,

    /// Currency symbol (for display)
    pub currency_symbol: String,

    /// Sales tax applied at checkout
    pub tax_rate: TaxRate,

    /// Orders with a subtotal strictly above this ship free
    pub free_shipping_over: Money,

    /// Shipping charge at or below the threshold
    pub flat_shipping: Money,

    pub checkout_delay_ms: u64,

    pub auth_delay_ms: u64,

    pub review_delay_ms: u64,

    /// Check size/color against the product's offered variants on add
    pub strict_variants: bool,

    /// Email of the seeded demo account
    pub demo_email: String,

    /// Password of the seeded demo account
    #[serde(skip_serializing, default)]
    pub demo_password: String,
}

impl Default for StoreConfig {
    /// Returns default configuration suitable for development.
    ///
    /// ## Default Values
    /// - Store: "Flickd"
    /// - Tax: 8%, free shipping over $100.00, else $9.99
    /// - Delays: 2s checkout, 1s auth and reviews
    /// - Variant checks: off
    fn default() -> Self {
        StoreConfig {
            store_name: "Flickd".to_string(),
            currency_symbol: "$".to_string(),
            tax_rate: TaxRate::from_bps(DEFAULT_TAX_RATE_BPS),
            free_shipping_over: Money::from_cents(DEFAULT_FREE_SHIPPING_THRESHOLD_CENTS),
            flat_shipping: Money::from_cents(DEFAULT_FLAT_SHIPPING_CENTS),
            checkout_delay_ms: 2000,
            auth_delay_ms: 1000,
            review_delay_ms: 1000,
            strict_variants: false,
            demo_email: "sarah@flickd.com".to_string(),
            demo_password: "flickd-demo".to_string(),
        }
    }
}

impl StoreConfig {
    /// Creates a StoreConfig from environment variables and defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds a config from an arbitrary key lookup.
    ///
    /// Unset keys keep their defaults; set keys must parse.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = StoreConfig::default();

        if let Some(store_name) = lookup("FLICKD_STORE_NAME") {
            config.store_name = store_name;
        }

        if let Some(raw) = lookup("FLICKD_TAX_RATE") {
            let pct: f64 = raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::invalid("FLICKD_TAX_RATE", &raw))?;
            if !(0.0..=100.0).contains(&pct) {
                return Err(ConfigError::invalid("FLICKD_TAX_RATE", &raw));
            }
            config.tax_rate = TaxRate::from_percentage(pct);
        }

        if let Some(raw) = lookup("FLICKD_FREE_SHIPPING_OVER") {
            config.free_shipping_over = parse_amount("FLICKD_FREE_SHIPPING_OVER", &raw)?;
        }

        if let Some(raw) = lookup("FLICKD_FLAT_SHIPPING") {
            config.flat_shipping = parse_amount("FLICKD_FLAT_SHIPPING", &raw)?;
        }

        if let Some(raw) = lookup("FLICKD_CHECKOUT_DELAY_MS") {
            config.checkout_delay_ms = parse_millis("FLICKD_CHECKOUT_DELAY_MS", &raw)?;
        }

        if let Some(raw) = lookup("FLICKD_AUTH_DELAY_MS") {
            config.auth_delay_ms = parse_millis("FLICKD_AUTH_DELAY_MS", &raw)?;
        }

        if let Some(raw) = lookup("FLICKD_REVIEW_DELAY_MS") {
            config.review_delay_ms = parse_millis("FLICKD_REVIEW_DELAY_MS", &raw)?;
        }

        if let Some(raw) = lookup("FLICKD_STRICT_VARIANTS") {
            config.strict_variants = parse_flag("FLICKD_STRICT_VARIANTS", &raw)?;
        }

        if let Some(email) = lookup("FLICKD_DEMO_EMAIL") {
            config.demo_email = email;
        }

        if let Some(password) = lookup("FLICKD_DEMO_PASSWORD") {
            config.demo_password = password;
        }

        Ok(config)
    }

    /// Same config with every simulated delay set to zero.
    pub fn without_delays(mut self) -> Self {
        self.checkout_delay_ms = 0;
        self.auth_delay_ms = 0;
        self.review_delay_ms = 0;
        self
    }

    /// Pricing rules for the order processor.
    pub fn pricing_policy(&self) -> PricingPolicy {
        PricingPolicy {
            tax_rate: self.tax_rate,
            free_shipping_threshold: self.free_shipping_over,
            flat_shipping: self.flat_shipping,
        }
    }

    pub fn checkout_delay(&self) -> Duration {
        Duration::from_millis(self.checkout_delay_ms)
    }

    pub fn auth_delay(&self) -> Duration {
        Duration::from_millis(self.auth_delay_ms)
    }

    pub fn review_delay(&self) -> Duration {
        Duration::from_millis(self.review_delay_ms)
    }

    /// Formats a cent amount as a currency string.
    ///
    /// ## Example
    /// ```rust
    /// use storefront::state::StoreConfig;
    ///
    /// let config = StoreConfig::default();
    /// assert_eq!(config.format_currency(1234), "$12.34");
    /// ```
    pub fn format_currency(&self, cents: i64) -> String {
        let sign = if cents < 0 { "-" } else { "" };
        let abs = cents.unsigned_abs();
        format!(
            "{}{}{}.{:02}",
            sign,
            self.currency_symbol,
            abs / 100,
            abs % 100
        )
    }
}

fn parse_amount(key: &str, raw: &str) -> Result<Money, ConfigError> {
    match Money::parse(raw) {
        Ok(amount) if amount.cents() < 0 => Err(ConfigError::invalid(key, raw)),
        Ok(amount) => Ok(amount),
        Err(_) => Err(ConfigError::invalid(key, raw)),
    }
}

fn parse_millis(key: &str, raw: &str) -> Result<u64, ConfigError> {
    raw.trim()
        .parse()
        .map_err(|_| ConfigError::invalid(key, raw))
}

fn parse_flag(key: &str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        _ => Err(ConfigError::invalid(key, raw)),
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {key}: '{value}'")]
    InvalidValue { key: String, value: String },
}

impl ConfigError {
    fn invalid(key: &str, value: &str) -> Self {
        ConfigError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
        }
    }
}
