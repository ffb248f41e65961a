//! # flickd-catalog: Reference Data Layer for the Flickd Storefront
//!
//! This crate owns the product catalog and the review store. Both are seeded
//! from JSON compiled into the binary.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Flickd Data Flow                                 │
//! │                                                                         │
//! │  Storefront command (search_products, submit_review)                   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  flickd-catalog (THIS CRATE)                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │    Catalog    │    │  Repositories │    │  Seed data   │  │   │
//! │  │   │   (lib.rs)    │    │               │    │  (embedded)  │  │   │
//! │  │   │               │    │ ProductRepo   │    │ products.json│  │   │
//! │  │   │ load()        │───►│ ReviewRepo    │    │ reviews.json │  │   │
//! │  │   │ embedded()    │    │               │    │              │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`error`] - Catalog error types
//! - [`repository`] - Product and review repositories
//!
//! ## Usage
//!
//! ```rust,ignore
//! use flickd_catalog::Catalog;
//! use flickd_core::CatalogQuery;
//!
//! let catalog = Catalog::embedded()?;
//!
//! let dresses = catalog.products().search(&CatalogQuery::all().with_category("dresses"));
//! let summary = catalog.reviews().summary(1).await;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{CatalogError, CatalogResult};
pub use repository::product::ProductRepository;
pub use repository::review::ReviewRepository;

use std::collections::{BTreeMap, HashSet};

use flickd_core::{Product, ProductId, Review, ReviewSummary};
use serde::Deserialize;
use tracing::info;

/// Product catalog compiled into the binary.
pub const EMBEDDED_PRODUCTS: &str = include_str!("../data/products.json");

/// Reviews and published summaries compiled into the binary.
pub const EMBEDDED_REVIEWS: &str = include_str!("../data/reviews.json");

/// Shape of `reviews.json`.
#[derive(Debug, Deserialize)]
struct ReviewSeed {
    reviews: Vec<Review>,
    #[serde(default)]
    summaries: BTreeMap<ProductId, ReviewSummary>,
}

// =============================================================================
// Catalog
// =============================================================================

/// Entry point to the reference data.
///
/// Cloning is cheap; clones share the same review store.
#[derive(Debug, Clone)]
pub struct Catalog {
    products: ProductRepository,
    reviews: ReviewRepository,
}

impl Catalog {
    /// Loads the catalog from JSON documents.
    ///
    /// ## Errors
    /// [`CatalogError::Seed`] on malformed JSON or inconsistent data.
    pub fn load(products_json: &str, reviews_json: &str) -> CatalogResult<Self> {
        let products: Vec<Product> = serde_json::from_str(products_json)?;
        let seed: ReviewSeed = serde_json::from_str(reviews_json)?;

        let product_ids: HashSet<ProductId> = products.iter().map(|p| p.id).collect();
        let products = ProductRepository::new(products)?;
        let reviews = ReviewRepository::new(seed.reviews, seed.summaries, product_ids)?;

        info!(products = products.count(), "Catalog loaded");

        Ok(Catalog { products, reviews })
    }

    /// Loads the catalog that ships with the binary.
    pub fn embedded() -> CatalogResult<Self> {
        Catalog::load(EMBEDDED_PRODUCTS, EMBEDDED_REVIEWS)
    }

    pub fn products(&self) -> &ProductRepository {
        &self.products
    }

    pub fn reviews(&self) -> &ReviewRepository {
        &self.reviews
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_catalog_loads() {
        let catalog = Catalog::embedded().unwrap();
        assert_eq!(catalog.products().count(), 12);
        assert!(catalog.products().all().iter().all(|p| !p.sizes.is_empty()));
    }

    #[test]
    fn test_malformed_json_is_seed_error() {
        let result = Catalog::load("[{\"id\": 1}]", EMBEDDED_REVIEWS);
        assert!(matches!(result, Err(CatalogError::Seed(_))));

        let result = Catalog::load(EMBEDDED_PRODUCTS, "not json");
        assert!(matches!(result, Err(CatalogError::Seed(_))));
    }

    #[tokio::test]
    async fn test_clones_share_review_store() {
        let catalog = Catalog::embedded().unwrap();
        let clone = catalog.clone();

        clone.reviews().mark_helpful("1").await.unwrap();
        assert_eq!(catalog.reviews().get("1").await.map(|r| r.helpful), Some(13));
    }

    #[test]
    fn test_summary_for_unknown_product_is_rejected() {
        let reviews = r#"{"reviews": [], "summaries": {"77": {
            "averageRating": 5.0, "totalReviews": 1,
            "ratingDistribution": {"5": 1, "4": 0, "3": 0, "2": 0, "1": 0}
        }}}"#;
        assert!(matches!(
            Catalog::load(EMBEDDED_PRODUCTS, reviews),
            Err(CatalogError::Seed(_))
        ));
    }
}
