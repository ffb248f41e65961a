//! # Review Repository
//!
//! Product reviews, rating summaries and helpful votes.
//!
//! ## Review Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  ReviewDraft { rating, title, comment }                                │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  submit() ── product exists? ── draft valid? ──► Review                │
//! │       │                              verified: false, helpful: 0        │
//! │       ▼                                                                 │
//! │  appended to the store, summary for the product updated                │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  mark_helpful(review_id) ──► helpful += 1                              │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Some products ship a published summary covering reviews that are not in
//! the store. Those summaries are returned as-is and updated incrementally on
//! submit; every other product's summary is computed from its reviews.

use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use flickd_core::{ProductId, Review, ReviewDraft, ReviewSummary};
use tokio::sync::RwLock;
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::{CatalogError, CatalogResult};

#[derive(Debug, Default)]
struct ReviewStore {
    reviews: Vec<Review>,
    summaries: BTreeMap<ProductId, ReviewSummary>,
}

/// Repository for product reviews.
///
/// ## Usage
/// ```rust,ignore
/// let reviews = catalog.reviews();
///
/// let list = reviews.for_product(1).await;
/// let summary = reviews.summary(1).await;
/// let review = reviews.submit(1, "user-1", "Sarah Johnson", draft).await?;
/// reviews.mark_helpful(&review.id).await?;
/// ```
#[derive(Debug, Clone)]
pub struct ReviewRepository {
    store: Arc<RwLock<ReviewStore>>,
    product_ids: Arc<HashSet<ProductId>>,
}

impl ReviewRepository {
    /// Creates the store.
    ///
    /// ## Errors
    /// [`CatalogError::Seed`] if a review or summary references a product
    /// not in `product_ids`, or a seeded rating is outside 1..=5.
    pub fn new(
        reviews: Vec<Review>,
        summaries: BTreeMap<ProductId, ReviewSummary>,
        product_ids: HashSet<ProductId>,
    ) -> CatalogResult<Self> {
        for review in &reviews {
            if !product_ids.contains(&review.product_id) {
                return Err(CatalogError::Seed(format!(
                    "review {} references unknown product {}",
                    review.id, review.product_id
                )));
            }
            if !(1..=5).contains(&review.rating) {
                return Err(CatalogError::Seed(format!(
                    "review {} has rating {}",
                    review.id, review.rating
                )));
            }
        }
        if let Some(id) = summaries.keys().find(|id| !product_ids.contains(*id)) {
            return Err(CatalogError::Seed(format!(
                "summary references unknown product {}",
                id
            )));
        }

        Ok(ReviewRepository {
            store: Arc::new(RwLock::new(ReviewStore { reviews, summaries })),
            product_ids: Arc::new(product_ids),
        })
    }

    /// Reviews for a product, newest first.
    pub async fn for_product(&self, product_id: ProductId) -> Vec<Review> {
        let store = self.store.read().await;
        let mut reviews: Vec<Review> = store
            .reviews
            .iter()
            .filter(|r| r.product_id == product_id)
            .cloned()
            .collect();
        reviews.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        reviews
    }

    /// Rating summary for a product.
    pub async fn summary(&self, product_id: ProductId) -> ReviewSummary {
        let store = self.store.read().await;
        if let Some(summary) = store.summaries.get(&product_id) {
            return summary.clone();
        }
        let reviews: Vec<Review> = store
            .reviews
            .iter()
            .filter(|r| r.product_id == product_id)
            .cloned()
            .collect();
        ReviewSummary::from_reviews(&reviews)
    }

    /// Looks up a single review.
    pub async fn get(&self, review_id: &str) -> Option<Review> {
        let store = self.store.read().await;
        store.reviews.iter().find(|r| r.id == review_id).cloned()
    }

    /// Validates and stores a new review with a `review-<uuid>` id.
    pub async fn submit(
        &self,
        product_id: ProductId,
        user_id: &str,
        user_name: &str,
        draft: ReviewDraft,
    ) -> CatalogResult<Review> {
        self.submit_at(
            product_id,
            user_id,
            user_name,
            draft,
            format!("review-{}", Uuid::new_v4()),
            Utc::now(),
        )
        .await
    }

    /// [`ReviewRepository::submit`] with the id and timestamp supplied.
    pub async fn submit_at(
        &self,
        product_id: ProductId,
        user_id: &str,
        user_name: &str,
        draft: ReviewDraft,
        review_id: String,
        at: DateTime<Utc>,
    ) -> CatalogResult<Review> {
        debug!(product_id, user_id, rating = draft.rating, "Submitting review");

        if !self.product_ids.contains(&product_id) {
            return Err(CatalogError::not_found("Product", product_id));
        }

        let review = draft.into_review(review_id, product_id, user_id, user_name, at)?;

        let mut store = self.store.write().await;
        if let Some(summary) = store.summaries.get_mut(&product_id) {
            summary.include(review.rating);
        }
        store.reviews.push(review.clone());

        info!(review_id = %review.id, product_id, rating = review.rating, "Review submitted");
        Ok(review)
    }

    /// Adds a helpful vote. Returns the new count.
    pub async fn mark_helpful(&self, review_id: &str) -> CatalogResult<u32> {
        let mut store = self.store.write().await;
        let review = store
            .reviews
            .iter_mut()
            .find(|r| r.id == review_id)
            .ok_or_else(|| CatalogError::not_found("Review", review_id))?;

        review.helpful += 1;
        debug!(review_id, helpful = review.helpful, "Marked review helpful");
        Ok(review.helpful)
    }

    pub async fn count(&self) -> usize {
        self.store.read().await.reviews.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Catalog;
    use chrono::TimeZone;
    use flickd_core::ValidationError;

    fn draft(rating: u8) -> ReviewDraft {
        ReviewDraft {
            rating,
            title: "Great layering piece".to_string(),
            comment: "Wore it all week.".to_string(),
            size: Some("S".to_string()),
            color: None,
        }
    }

    #[tokio::test]
    async fn test_for_product_newest_first() {
        let catalog = Catalog::embedded().unwrap();
        let reviews = catalog.reviews().for_product(1).await;

        let ids: Vec<&str> = reviews.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2"]);
        assert!(catalog.reviews().for_product(12).await.is_empty());
    }

    #[tokio::test]
    async fn test_published_summary_wins() {
        let catalog = Catalog::embedded().unwrap();
        let summary = catalog.reviews().summary(1).await;

        assert_eq!(summary.total_reviews, 124);
        assert_eq!(summary.average_rating, 4.8);
        assert_eq!(summary.rating_distribution.count(5), 89);
    }

    #[tokio::test]
    async fn test_computed_summary_without_published_one() {
        let catalog = Catalog::embedded().unwrap();
        let reviews = catalog.reviews();
        let at = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();

        reviews
            .submit_at(3, "user-9", "Maya", draft(4), "review-a".to_string(), at)
            .await
            .unwrap();
        reviews
            .submit_at(3, "user-8", "Ana", draft(5), "review-b".to_string(), at)
            .await
            .unwrap();

        let summary = reviews.summary(3).await;
        assert_eq!(summary.total_reviews, 2);
        assert_eq!(summary.average_rating, 4.5);
    }

    #[tokio::test]
    async fn test_submit_creates_unverified_review() {
        let catalog = Catalog::embedded().unwrap();
        let reviews = catalog.reviews();
        let before = reviews.count().await;

        let review = reviews.submit(2, "user-1", "Sarah Johnson", draft(5)).await.unwrap();

        assert!(review.id.starts_with("review-"));
        assert!(!review.verified);
        assert_eq!(review.helpful, 0);
        assert_eq!(reviews.count().await, before + 1);
        assert_eq!(reviews.summary(2).await.total_reviews, 90);
    }

    #[tokio::test]
    async fn test_submit_rejects_invalid_draft() {
        let catalog = Catalog::embedded().unwrap();
        let reviews = catalog.reviews();

        let result = reviews.submit(2, "user-1", "Sarah", draft(0)).await;
        assert!(matches!(
            result,
            Err(CatalogError::Validation(ValidationError::OutOfRange { .. }))
        ));

        let result = reviews.submit(999, "user-1", "Sarah", draft(5)).await;
        assert!(matches!(result, Err(CatalogError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_mark_helpful() {
        let catalog = Catalog::embedded().unwrap();
        let reviews = catalog.reviews();

        assert_eq!(reviews.mark_helpful("3").await.unwrap(), 16);
        assert_eq!(reviews.get("3").await.map(|r| r.helpful), Some(16));
        assert!(reviews.mark_helpful("nope").await.is_err());
    }

    #[tokio::test]
    async fn test_seed_rejects_orphan_review() {
        let catalog = Catalog::embedded().unwrap();
        let reviews = catalog.reviews().for_product(1).await;

        let result = ReviewRepository::new(reviews, BTreeMap::new(), HashSet::from([2]));
        assert!(matches!(result, Err(CatalogError::Seed(_))));
    }
}
