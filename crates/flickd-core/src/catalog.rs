//! # Catalog Query
//!
//! Filtering and sorting for the shop grid.
//!
//! ## Query Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  products (catalog order)                                              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  vibe == ? ── category == ? ── name contains ? ── price band ?         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  stable sort: featured | price-low | price-high | rating | newest      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Vec<&Product>                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! `featured` keeps catalog order. Every sort is stable, so products that
//! compare equal also keep catalog order.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::Product;

// =============================================================================
// Price Band
// =============================================================================

/// Price filter buckets.
///
/// The middle bands are inclusive at both ends, so a $100.00 product shows
/// up under both `50-100` and `100-200`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum PriceBand {
    #[default]
    #[serde(rename = "all")]
    All,
    /// Strictly below $50.
    #[serde(rename = "under-50")]
    Under50,
    #[serde(rename = "50-100")]
    From50To100,
    #[serde(rename = "100-200")]
    From100To200,
    /// Strictly above $200.
    #[serde(rename = "200+")]
    Over200,
}

impl PriceBand {
    pub fn contains(self, price: Money) -> bool {
        let cents = price.cents();
        match self {
            PriceBand::All => true,
            PriceBand::Under50 => cents < 5_000,
            PriceBand::From50To100 => (5_000..=10_000).contains(&cents),
            PriceBand::From100To200 => (10_000..=20_000).contains(&cents),
            PriceBand::Over200 => cents > 20_000,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PriceBand::All => "all",
            PriceBand::Under50 => "under-50",
            PriceBand::From50To100 => "50-100",
            PriceBand::From100To200 => "100-200",
            PriceBand::Over200 => "200+",
        }
    }
}

impl FromStr for PriceBand {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" | "" => Ok(PriceBand::All),
            "under-50" => Ok(PriceBand::Under50),
            "50-100" => Ok(PriceBand::From50To100),
            "100-200" => Ok(PriceBand::From100To200),
            "200+" => Ok(PriceBand::Over200),
            _ => Err(ValidationError::NotAllowed {
                field: "priceRange".to_string(),
                allowed: ["all", "under-50", "50-100", "100-200", "200+"]
                    .iter()
                    .map(|s| s.to_string())
                    .collect(),
            }),
        }
    }
}

impl fmt::Display for PriceBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Sort Order
// =============================================================================

/// Grid sort options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "kebab-case")]
#[ts(export)]
pub enum SortOrder {
    /// Catalog order.
    #[default]
    Featured,
    PriceLow,
    PriceHigh,
    /// Highest rated first.
    Rating,
    /// New arrivals first, otherwise catalog order.
    Newest,
}

impl SortOrder {
    fn compare(self, a: &Product, b: &Product) -> Ordering {
        match self {
            SortOrder::Featured => Ordering::Equal,
            SortOrder::PriceLow => a.price.cmp(&b.price),
            SortOrder::PriceHigh => b.price.cmp(&a.price),
            SortOrder::Rating => b.rating.total_cmp(&a.rating),
            SortOrder::Newest => b.is_new.cmp(&a.is_new),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SortOrder::Featured => "featured",
            SortOrder::PriceLow => "price-low",
            SortOrder::PriceHigh => "price-high",
            SortOrder::Rating => "rating",
            SortOrder::Newest => "newest",
        }
    }
}

impl FromStr for SortOrder {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "featured" | "" => Ok(SortOrder::Featured),
            "price-low" => Ok(SortOrder::PriceLow),
            "price-high" => Ok(SortOrder::PriceHigh),
            "rating" => Ok(SortOrder::Rating),
            "newest" => Ok(SortOrder::Newest),
            _ => Err(ValidationError::NotAllowed {
                field: "sortBy".to_string(),
                allowed: ["featured", "price-low", "price-high", "rating", "newest"]
                    .iter()
                    .map(|s| s.to_string())
                    .collect(),
            }),
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Catalog Query
// =============================================================================

/// Shop grid filters. `None` means "all".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CatalogQuery {
    #[serde(default)]
    pub vibe: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    /// Case-insensitive substring of the product name.
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default)]
    pub price_band: PriceBand,
    #[serde(default)]
    pub sort: SortOrder,
}

impl CatalogQuery {
    /// Everything, in catalog order.
    pub fn all() -> Self {
        CatalogQuery::default()
    }

    pub fn with_vibe(mut self, vibe: impl Into<String>) -> Self {
        self.vibe = Some(vibe.into());
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    pub fn with_price_band(mut self, band: PriceBand) -> Self {
        self.price_band = band;
        self
    }

    pub fn sorted_by(mut self, sort: SortOrder) -> Self {
        self.sort = sort;
        self
    }

    /// Whether a product passes every filter.
    pub fn matches(&self, product: &Product) -> bool {
        let vibe_ok = match self.vibe.as_deref() {
            None | Some("all") => true,
            Some(vibe) => product.vibe == vibe,
        };
        let category_ok = match self.category.as_deref() {
            None | Some("all") => true,
            Some(category) => product.category == category,
        };
        let search_ok = match self.search.as_deref().map(str::trim) {
            None | Some("") => true,
            Some(term) => product
                .name
                .to_lowercase()
                .contains(&term.to_lowercase()),
        };

        vibe_ok && category_ok && search_ok && self.price_band.contains(product.price)
    }

    /// Filters then sorts `products`.
    pub fn apply<'a>(&self, products: &'a [Product]) -> Vec<&'a Product> {
        let mut hits: Vec<&Product> = products.iter().filter(|p| self.matches(p)).collect();
        if self.sort != SortOrder::Featured {
            hits.sort_by(|a, b| self.sort.compare(a, b));
        }
        hits
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::tests::test_product;

    fn catalog() -> Vec<Product> {
        let mut dress = test_product(1, 4_999);
        dress.name = "Floral Midi Dress".to_string();
        dress.rating = 4.8;

        let mut tee = test_product(2, 5_000);
        tee.name = "Essential Tee".to_string();
        tee.category = "tops".to_string();
        tee.vibe = "streetwear".to_string();
        tee.rating = 4.9;
        tee.is_new = true;

        let mut blazer = test_product(3, 10_000);
        blazer.name = "Linen Blazer".to_string();
        blazer.category = "outerwear".to_string();
        blazer.rating = 4.8;

        let mut coat = test_product(4, 20_001);
        coat.name = "Wool Coat".to_string();
        coat.category = "outerwear".to_string();
        coat.rating = 4.5;
        coat.is_new = true;

        vec![dress, tee, blazer, coat]
    }

    fn ids(hits: &[&Product]) -> Vec<u32> {
        hits.iter().map(|p| p.id).collect()
    }

    #[test]
    fn test_all_keeps_catalog_order() {
        let products = catalog();
        assert_eq!(ids(&CatalogQuery::all().apply(&products)), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_price_band_edges() {
        assert!(PriceBand::Under50.contains(Money::from_cents(4_999)));
        assert!(!PriceBand::Under50.contains(Money::from_cents(5_000)));
        assert!(PriceBand::From50To100.contains(Money::from_cents(5_000)));
        assert!(PriceBand::From50To100.contains(Money::from_cents(10_000)));
        assert!(PriceBand::From100To200.contains(Money::from_cents(10_000)));
        assert!(PriceBand::From100To200.contains(Money::from_cents(20_000)));
        assert!(!PriceBand::Over200.contains(Money::from_cents(20_000)));
        assert!(PriceBand::Over200.contains(Money::from_cents(20_001)));
    }

    #[test]
    fn test_filters_combine() {
        let products = catalog();

        let query = CatalogQuery::all().with_category("outerwear");
        assert_eq!(ids(&query.apply(&products)), vec![3, 4]);

        let query = query.with_price_band(PriceBand::From100To200);
        assert_eq!(ids(&query.apply(&products)), vec![3]);

        let query = CatalogQuery::all().with_vibe("streetwear");
        assert_eq!(ids(&query.apply(&products)), vec![2]);

        let query = CatalogQuery::all().with_vibe("all").with_category("all");
        assert_eq!(query.apply(&products).len(), 4);
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let products = catalog();
        let query = CatalogQuery::all().with_search("  dRESS ");
        assert_eq!(ids(&query.apply(&products)), vec![1]);
    }

    #[test]
    fn test_sorts_are_stable() {
        let products = catalog();

        let by = |sort| ids(&CatalogQuery::all().sorted_by(sort).apply(&products));
        assert_eq!(by(SortOrder::PriceLow), vec![1, 2, 3, 4]);
        assert_eq!(by(SortOrder::PriceHigh), vec![4, 3, 2, 1]);
        // 1 and 3 tie on 4.8 and keep catalog order
        assert_eq!(by(SortOrder::Rating), vec![2, 1, 3, 4]);
        assert_eq!(by(SortOrder::Newest), vec![2, 4, 1, 3]);
    }

    #[test]
    fn test_parse_band_and_sort() {
        assert_eq!("200+".parse::<PriceBand>().unwrap(), PriceBand::Over200);
        assert_eq!("price-high".parse::<SortOrder>().unwrap(), SortOrder::PriceHigh);
        assert!("cheap".parse::<PriceBand>().is_err());
        assert!("random".parse::<SortOrder>().is_err());
    }

    #[test]
    fn test_query_deserializes_from_ui() {
        let query: CatalogQuery =
            serde_json::from_str(r#"{"vibe":"coquette","priceBand":"50-100","sort":"price-low"}"#)
                .unwrap();
        assert_eq!(query.vibe.as_deref(), Some("coquette"));
        assert_eq!(query.price_band, PriceBand::From50To100);
        assert_eq!(query.sort, SortOrder::PriceLow);
    }
}
