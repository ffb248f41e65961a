//! # Catalog Commands
//!
//! Product listing, product detail and reviews.
//!
//! ## Search Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Shop grid filters                                                      │
//! │  [vibe ▾] [category ▾] [price ▾] [sort ▾] [search...]                   │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  search_products(CatalogQuery)                                          │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  filter: vibe, category, name contains, price band                      │
//! │  sort:   featured | price-low | price-high | rating | newest            │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  { products: [...], total: 7 }                                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use flickd_catalog::Catalog;
use flickd_core::{CatalogQuery, Product, ProductId, Review, ReviewDraft, ReviewSummary};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ApiResult;
use crate::state::{AuthState, StoreConfig};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductListResponse {
    pub products: Vec<Product>,
    pub total: usize,
}

/// Reviews tab of the product detail view.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductReviewsResponse {
    pub product_id: ProductId,
    pub summary: ReviewSummary,
    /// Newest first
    pub reviews: Vec<Review>,
}

/// Filters and sorts the catalog.
pub fn search_products(catalog: &Catalog, query: CatalogQuery) -> ProductListResponse {
    debug!(query = ?query, "search_products command");

    let products: Vec<Product> = catalog
        .products()
        .search(&query)
        .into_iter()
        .cloned()
        .collect();

    ProductListResponse {
        total: products.len(),
        products,
    }
}

pub fn get_product(catalog: &Catalog, product_id: ProductId) -> ApiResult<Product> {
    debug!(product_id, "get_product command");
    Ok(catalog.products().require(product_id)?.clone())
}

/// Distinct categories for the filter dropdown.
pub fn list_categories(catalog: &Catalog) -> Vec<String> {
    catalog
        .products()
        .categories()
        .into_iter()
        .map(str::to_string)
        .collect()
}

/// Distinct vibes for the filter chips.
pub fn list_vibes(catalog: &Catalog) -> Vec<String> {
    catalog
        .products()
        .vibes()
        .into_iter()
        .map(str::to_string)
        .collect()
}

pub async fn get_product_reviews(
    catalog: &Catalog,
    product_id: ProductId,
) -> ApiResult<ProductReviewsResponse> {
    debug!(product_id, "get_product_reviews command");

    catalog.products().require(product_id)?;

    let reviews = catalog.reviews().for_product(product_id).await;
    let summary = catalog.reviews().summary(product_id).await;

    Ok(ProductReviewsResponse {
        product_id,
        summary,
        reviews,
    })
}

/// Posts a review as the signed-in customer.
///
/// ## Errors
/// - `UNAUTHORIZED` when signed out
/// - `NOT_FOUND` for an unknown product
/// - `VALIDATION_ERROR` for a bad rating, title or comment
pub async fn submit_review(
    config: &StoreConfig,
    catalog: &Catalog,
    auth: &AuthState,
    product_id: ProductId,
    draft: ReviewDraft,
) -> ApiResult<Review> {
    debug!(product_id, rating = draft.rating, "submit_review command");

    let user = auth.require_user()?;

    tokio::time::sleep(config.review_delay()).await;

    let review = catalog
        .reviews()
        .submit(product_id, &user.id, &user.name, draft)
        .await?;
    Ok(review)
}

/// Adds a "helpful" vote. Returns the new count.
pub async fn mark_review_helpful(catalog: &Catalog, review_id: String) -> ApiResult<u32> {
    debug!(review_id = %review_id, "mark_review_helpful command");
    Ok(catalog.reviews().mark_helpful(&review_id).await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use flickd_core::{PriceBand, SortOrder};

    fn catalog() -> Catalog {
        Catalog::embedded().unwrap()
    }

    fn signed_in() -> AuthState {
        let auth = AuthState::seeded("sarah@flickd.com", "flickd-demo").unwrap();
        auth.login("sarah@flickd.com", "flickd-demo").unwrap();
        auth
    }

    fn draft(rating: u8) -> ReviewDraft {
        ReviewDraft {
            rating,
            title: "Runs small".to_string(),
            comment: "Lovely fabric, size up if between sizes.".to_string(),
            size: Some("M".to_string()),
            color: Some(String::new()),
        }
    }

    #[test]
    fn test_search_all() {
        let catalog = catalog();
        let response = search_products(&catalog, CatalogQuery::all());
        assert_eq!(response.total, 12);
        assert_eq!(response.products[0].id, 1);
    }

    #[test]
    fn test_search_filters_and_sorts() {
        let catalog = catalog();
        let query = CatalogQuery::all()
            .with_category("outerwear")
            .sorted_by(SortOrder::PriceHigh);
        let response = search_products(&catalog, query);

        let ids: Vec<u32> = response.products.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![7, 4, 12]);

        let query = CatalogQuery::all().with_price_band(PriceBand::Under50);
        let response = search_products(&catalog, query);
        assert!(response.products.iter().all(|p| p.price.cents() < 5000));
        assert_eq!(response.total, 3);
    }

    #[test]
    fn test_search_by_name() {
        let response = search_products(&catalog(), CatalogQuery::all().with_search("DRESS"));
        assert_eq!(response.total, 2);
    }

    #[test]
    fn test_get_product() {
        let catalog = catalog();
        assert_eq!(get_product(&catalog, 7).unwrap().name, "Leather Trench Coat");
        assert_eq!(get_product(&catalog, 70).unwrap_err().code, ErrorCode::NotFound);
    }

    #[test]
    fn test_filter_options() {
        let catalog = catalog();
        assert_eq!(
            list_categories(&catalog),
            vec!["dresses", "tops", "outerwear", "bottoms"]
        );
        assert_eq!(list_vibes(&catalog).len(), 6);
    }

    #[tokio::test]
    async fn test_product_reviews() {
        let response = get_product_reviews(&catalog(), 1).await.unwrap();
        assert_eq!(response.reviews.len(), 2);
        assert_eq!(response.summary.total_reviews, 124);

        let err = get_product_reviews(&catalog(), 99).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn test_submit_review() {
        let catalog = catalog();
        let config = StoreConfig::default().without_delays();
        let auth = signed_in();

        let review = submit_review(&config, &catalog, &auth, 1, draft(5))
            .await
            .unwrap();
        assert_eq!(review.user_name, "Sarah Johnson");
        assert_eq!(review.size.as_deref(), Some("M"));
        assert_eq!(review.color, None);
        assert!(!review.verified);

        let response = get_product_reviews(&catalog, 1).await.unwrap();
        assert_eq!(response.summary.total_reviews, 125);
        assert_eq!(response.reviews[0].id, review.id);
    }

    #[tokio::test]
    async fn test_submit_review_requires_sign_in() {
        let catalog = catalog();
        let config = StoreConfig::default().without_delays();
        let auth = AuthState::seeded("sarah@flickd.com", "flickd-demo").unwrap();

        let err = submit_review(&config, &catalog, &auth, 1, draft(5))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::Unauthorized);
    }

    #[tokio::test]
    async fn test_submit_review_validates() {
        let catalog = catalog();
        let config = StoreConfig::default().without_delays();
        let auth = signed_in();

        let err = submit_review(&config, &catalog, &auth, 1, draft(6))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        let err = submit_review(&config, &catalog, &auth, 404, draft(4))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn test_mark_helpful() {
        let catalog = catalog();
        assert_eq!(mark_review_helpful(&catalog, "1".to_string()).await.unwrap(), 13);
        assert_eq!(
            mark_review_helpful(&catalog, "missing".to_string())
                .await
                .unwrap_err()
                .code,
            ErrorCode::NotFound
        );
    }
}
