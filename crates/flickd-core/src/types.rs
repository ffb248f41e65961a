//! # Domain Types
//!
//! Core reference and account types used throughout the storefront.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │ PaymentMethod   │   │ ShippingAddress │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (u32)       │   │  id ("1", pm-…) │   │  id ("1", addr-…│       │
//! │  │  price (Money)  │   │  kind           │   │  street, city   │       │
//! │  │  sizes, colors  │   │  last4, brand   │   │  zip, country   │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐                             │
//! │  │      User       │   │     Review      │   Cart lines: cart.rs       │
//! │  │  ─────────────  │   │  ─────────────  │   Orders:     order.rs      │
//! │  │  preferences    │   │  rating 1..=5   │   Wishlist:   wishlist.rs   │
//! │  └─────────────────┘   └─────────────────┘                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Products are immutable reference data; everything the cart needs from a
//! product is copied into the cart line when it is added.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;

/// Catalog identifier of a product.
pub type ProductId = u32;

// =============================================================================
// Tax Rate
// =============================================================================

/// Tax rate represented in basis points (bps).
///
/// 1 basis point = 0.01%, so 800 bps = 8%.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TaxRate(u32);

impl TaxRate {
    /// Creates a tax rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        TaxRate(bps)
    }

    /// Creates a tax rate from a percentage (for configuration input).
    pub fn from_percentage(pct: f64) -> Self {
        TaxRate((pct * 100.0).round() as u32)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percentage (for display only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Zero tax rate.
    #[inline]
    pub const fn zero() -> Self {
        TaxRate(0)
    }
}

impl Default for TaxRate {
    fn default() -> Self {
        TaxRate::zero()
    }
}

// =============================================================================
// Product
// =============================================================================

/// A product in the catalog.
///
/// Prices serialize as integer cents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    /// Current selling price.
    pub price: Money,
    /// Price before markdown, shown struck through on sale items.
    #[serde(default)]
    pub original_price: Option<Money>,
    pub image: String,
    pub category: String,
    pub subcategory: String,
    pub description: String,
    pub in_stock: bool,
    /// Average star rating, 0.0 to 5.0.
    pub rating: f32,
    /// Number of reviews behind `rating`.
    #[serde(rename = "reviews")]
    pub review_count: u32,
    pub brand: String,
    pub material: String,
    /// Sizes offered, e.g. `["XS", "S", "M"]`.
    pub sizes: Vec<String>,
    pub colors: Vec<String>,
    /// Style vibe tag, e.g. `clean-girl`.
    pub vibe: String,
    #[serde(default)]
    pub is_new: bool,
    #[serde(default)]
    pub is_bestseller: bool,
    #[serde(default)]
    pub is_sale: bool,
}

impl Product {
    /// Whether `size` is one of the sizes this product is offered in.
    pub fn offers_size(&self, size: &str) -> bool {
        self.sizes.iter().any(|s| s == size)
    }

    /// Whether `color` is one of the colors this product is offered in.
    pub fn offers_color(&self, color: &str) -> bool {
        self.colors.iter().any(|c| c == color)
    }

    /// Markdown percentage for sale items.
    pub fn percent_off(&self) -> Option<u32> {
        self.original_price.and_then(|orig| self.price.percent_off(orig))
    }
}

// =============================================================================
// Payment Method
// =============================================================================

/// Kind of saved payment method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethodKind {
    Card,
    Paypal,
    ApplePay,
    GooglePay,
}

/// A saved payment method.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct PaymentMethod {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: PaymentMethodKind,
    pub last4: Option<String>,
    pub brand: Option<String>,
    pub expiry_month: Option<u8>,
    pub expiry_year: Option<u16>,
    pub is_default: bool,
}

impl PaymentMethod {
    /// Short label for summaries, e.g. `visa •••• 4242` or `paypal`.
    pub fn label(&self) -> String {
        match (&self.kind, &self.brand, &self.last4) {
            (PaymentMethodKind::Card, Some(brand), Some(last4)) => {
                format!("{} •••• {}", brand, last4)
            }
            (PaymentMethodKind::Card, None, Some(last4)) => format!("card •••• {}", last4),
            (PaymentMethodKind::Card, _, None) => "card".to_string(),
            (PaymentMethodKind::Paypal, _, _) => "paypal".to_string(),
            (PaymentMethodKind::ApplePay, _, _) => "apple pay".to_string(),
            (PaymentMethodKind::GooglePay, _, _) => "google pay".to_string(),
        }
    }
}

/// A payment method before it has been assigned an id.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct PaymentMethodDraft {
    #[serde(rename = "type")]
    pub kind: PaymentMethodKind,
    pub last4: Option<String>,
    pub brand: Option<String>,
    pub expiry_month: Option<u8>,
    pub expiry_year: Option<u16>,
    pub is_default: bool,
}

impl PaymentMethodDraft {
    /// Attaches an id, producing a saved payment method.
    pub fn with_id(self, id: impl Into<String>) -> PaymentMethod {
        PaymentMethod {
            id: id.into(),
            kind: self.kind,
            last4: self.last4,
            brand: self.brand,
            expiry_month: self.expiry_month,
            expiry_year: self.expiry_year,
            is_default: self.is_default,
        }
    }
}

// =============================================================================
// Shipping Address
// =============================================================================

/// A saved shipping address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ShippingAddress {
    pub id: String,
    pub name: String,
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub country: String,
    pub is_default: bool,
}

impl ShippingAddress {
    /// Single-line rendering: `123 Fashion Ave, New York, NY 10001, US`.
    pub fn one_line(&self) -> String {
        format!(
            "{}, {}, {} {}, {}",
            self.street, self.city, self.state, self.zip_code, self.country
        )
    }
}

/// A shipping address before it has been assigned an id.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ShippingAddressDraft {
    pub name: String,
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub country: String,
    pub is_default: bool,
}

impl ShippingAddressDraft {
    /// Attaches an id, producing a saved address.
    pub fn with_id(self, id: impl Into<String>) -> ShippingAddress {
        ShippingAddress {
            id: id.into(),
            name: self.name,
            street: self.street,
            city: self.city,
            state: self.state,
            zip_code: self.zip_code,
            country: self.country,
            is_default: self.is_default,
        }
    }
}

// =============================================================================
// User
// =============================================================================

/// A signed-in customer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub avatar: Option<String>,
    pub preferences: UserPreferences,
}

/// Shopping preferences used to personalise browsing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct UserPreferences {
    /// Preferred style vibes.
    pub style: Vec<String>,
    pub sizes: Vec<String>,
    /// Inclusive `(min, max)` budget.
    pub price_range: (Money, Money),
}

impl Default for UserPreferences {
    /// New accounts: no style or size preference, $0–$500 budget.
    fn default() -> Self {
        UserPreferences {
            style: Vec::new(),
            sizes: Vec::new(),
            price_range: (Money::zero(), Money::from_cents(50_000)),
        }
    }
}

// =============================================================================
// Review
// =============================================================================

/// A customer review of a product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Review {
    pub id: String,
    pub user_id: String,
    pub product_id: ProductId,
    pub user_name: String,
    #[serde(default)]
    pub user_avatar: Option<String>,
    /// Star rating, 1 to 5.
    pub rating: u8,
    pub title: String,
    pub comment: String,
    #[serde(default)]
    pub images: Vec<String>,
    /// Reviewer bought the product.
    pub verified: bool,
    /// "Helpful" votes from other shoppers.
    pub helpful: u32,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    /// Size purchased.
    #[serde(default)]
    pub size: Option<String>,
    /// Color purchased.
    #[serde(default)]
    pub color: Option<String>,
}

// =============================================================================
// Unit Tests
// =============================================================================
