//! # Review Summaries
//!
//! Star-rating aggregates shown above a product's review list, and the draft
//! a shopper fills in to write a review.
//!
//! ```text
//!   4.8 ★★★★★   124 reviews
//!   5 ████████████████████  89
//!   4 ██████                25
//!   3 ██                     7
//!   2 ▌                      2
//!   1 ▌                      1
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreResult, ValidationError};
use crate::types::{ProductId, Review};
use crate::validation::{validate_rating, validate_review_comment, validate_review_title};

// =============================================================================
// Rating Distribution
// =============================================================================

/// Number of reviews at each star level.
///
/// Serializes with the star count as the key: `{"5": 89, "4": 25, ...}`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RatingDistribution {
    #[serde(rename = "5")]
    pub five: u32,
    #[serde(rename = "4")]
    pub four: u32,
    #[serde(rename = "3")]
    pub three: u32,
    #[serde(rename = "2")]
    pub two: u32,
    #[serde(rename = "1")]
    pub one: u32,
}

impl RatingDistribution {
    /// Count for a star level. Anything outside 1..=5 is zero.
    pub fn count(&self, stars: u8) -> u32 {
        match stars {
            5 => self.five,
            4 => self.four,
            3 => self.three,
            2 => self.two,
            1 => self.one,
            _ => 0,
        }
    }

    fn record(&mut self, stars: u8) {
        match stars {
            5 => self.five += 1,
            4 => self.four += 1,
            3 => self.three += 1,
            2 => self.two += 1,
            1 => self.one += 1,
            _ => {}
        }
    }

    pub fn total(&self) -> u32 {
        self.five + self.four + self.three + self.two + self.one
    }

    /// Share of reviews at `stars`, 0 to 100, for the bar widths.
    pub fn percent(&self, stars: u8) -> u32 {
        let total = self.total();
        if total == 0 {
            return 0;
        }
        (self.count(stars) * 100 + total / 2) / total
    }
}

// =============================================================================
// Review Summary
// =============================================================================

/// Aggregate rating for one product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ReviewSummary {
    /// Mean star rating rounded to one decimal place.
    pub average_rating: f32,
    pub total_reviews: u32,
    pub rating_distribution: RatingDistribution,
    /// Unrounded Σ stars. Not published; for a summary loaded from JSON it
    /// is seeded from `average_rating × total_reviews` on the first include.
    #[serde(skip)]
    #[ts(skip)]
    star_total: Option<f64>,
}

impl ReviewSummary {
    /// Computes a summary from individual reviews.
    ///
    /// An empty slice gives a zero summary rather than NaN.
    pub fn from_reviews(reviews: &[Review]) -> Self {
        let mut distribution = RatingDistribution::default();
        let mut stars_total: u32 = 0;
        for review in reviews {
            distribution.record(review.rating);
            stars_total += u32::from(review.rating);
        }

        let total_reviews = reviews.len() as u32;
        let star_total = f64::from(stars_total);

        ReviewSummary {
            average_rating: rounded_mean(star_total, total_reviews),
            total_reviews,
            rating_distribution: distribution,
            star_total: Some(star_total),
        }
    }

    /// Folds one more rating into the summary.
    ///
    /// The exact star total is kept between calls, so only the published
    /// `average_rating` is rounded.
    pub fn include(&mut self, rating: u8) {
        let base = self
            .star_total
            .unwrap_or_else(|| f64::from(self.average_rating) * f64::from(self.total_reviews));
        let star_total = base + f64::from(rating);

        self.total_reviews += 1;
        self.star_total = Some(star_total);
        self.average_rating = rounded_mean(star_total, self.total_reviews);
        self.rating_distribution.record(rating);
    }
}

/// Mean to one decimal place; zero reviews gives 0.0 rather than NaN.
fn rounded_mean(star_total: f64, count: u32) -> f32 {
    if count == 0 {
        return 0.0;
    }
    let mean = star_total / f64::from(count);
    ((mean * 10.0).round() / 10.0) as f32
}

// =============================================================================
// Review Draft
// =============================================================================

/// What the shopper types into the "Write a review" form.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ReviewDraft {
    pub rating: u8,
    pub title: String,
    pub comment: String,
    /// Empty strings from the form are treated as "not given".
    #[serde(default)]
    pub size: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
}

impl ReviewDraft {
    /// Checks rating, title and comment.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_rating(self.rating)?;
        validate_review_title(&self.title)?;
        validate_review_comment(&self.comment)?;
        Ok(())
    }

    /// Validates the draft and turns it into a review by `user_name`.
    ///
    /// New reviews start unverified with no helpful votes.
    pub fn into_review(
        self,
        id: String,
        product_id: ProductId,
        user_id: &str,
        user_name: &str,
        at: DateTime<Utc>,
    ) -> CoreResult<Review> {
        self.validate()?;

        Ok(Review {
            id,
            user_id: user_id.to_string(),
            product_id,
            user_name: user_name.to_string(),
            user_avatar: None,
            rating: self.rating,
            title: self.title.trim().to_string(),
            comment: self.comment.trim().to_string(),
            images: Vec::new(),
            verified: false,
            helpful: 0,
            created_at: at,
            size: self.size.filter(|s| !s.trim().is_empty()),
            color: self.color.filter(|c| !c.trim().is_empty()),
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;
    use chrono::TimeZone;

    fn review(id: &str, rating: u8) -> Review {
        Review {
            id: id.to_string(),
            user_id: "user1".to_string(),
            product_id: 1,
            user_name: "Emma S.".to_string(),
            user_avatar: None,
            rating,
            title: "Lovely".to_string(),
            comment: "Fits well".to_string(),
            images: Vec::new(),
            verified: true,
            helpful: 0,
            created_at: Utc.with_ymd_and_hms(2024, 5, 15, 0, 0, 0).unwrap(),
            size: None,
            color: None,
        }
    }

    fn draft(rating: u8) -> ReviewDraft {
        ReviewDraft {
            rating,
            title: "  Perfect summer dress!  ".to_string(),
            comment: "So soft, fits true to size.".to_string(),
            size: Some("M".to_string()),
            color: Some(String::new()),
        }
    }

    #[test]
    fn test_summary_from_reviews() {
        let reviews = vec![review("1", 5), review("2", 4), review("3", 4)];
        let summary = ReviewSummary::from_reviews(&reviews);

        assert_eq!(summary.total_reviews, 3);
        assert_eq!(summary.average_rating, 4.3);
        assert_eq!(summary.rating_distribution.count(5), 1);
        assert_eq!(summary.rating_distribution.count(4), 2);
        assert_eq!(summary.rating_distribution.count(1), 0);
    }

    #[test]
    fn test_summary_of_nothing() {
        let summary = ReviewSummary::from_reviews(&[]);
        assert_eq!(summary.total_reviews, 0);
        assert_eq!(summary.average_rating, 0.0);
        assert_eq!(summary.rating_distribution.percent(5), 0);
    }

    #[test]
    fn test_include_moves_average() {
        let mut summary = ReviewSummary::from_reviews(&[review("1", 5), review("2", 5)]);
        summary.include(2);

        assert_eq!(summary.total_reviews, 3);
        assert_eq!(summary.average_rating, 4.0);
        assert_eq!(summary.rating_distribution.count(2), 1);
    }

    #[test]
    fn test_repeated_includes_do_not_drift() {
        // Published summary: no individual reviews behind it
        let mut summary: ReviewSummary = serde_json::from_value(serde_json::json!({
            "averageRating": 4.0,
            "totalReviews": 2,
            "ratingDistribution": { "5": 0, "4": 2, "3": 0, "2": 0, "1": 0 }
        }))
        .unwrap();

        // Exact means: 13/3 = 4.33, 18/4 = 4.5, 23/5 = 4.6, ...
        for _ in 0..20 {
            summary.include(5);
        }

        // (8 + 100) / 22 = 4.909 -> 4.9
        assert_eq!(summary.total_reviews, 22);
        assert_eq!(summary.average_rating, 4.9);
        assert_eq!(summary.rating_distribution.count(5), 20);
    }

    #[test]
    fn test_include_from_published_summary() {
        let mut summary: ReviewSummary = serde_json::from_value(serde_json::json!({
            "averageRating": 4.8,
            "totalReviews": 124,
            "ratingDistribution": { "5": 89, "4": 25, "3": 7, "2": 2, "1": 1 }
        }))
        .unwrap();

        summary.include(5);
        assert_eq!(summary.total_reviews, 125);
        assert_eq!(summary.average_rating, 4.8);

        let json = serde_json::to_value(&summary).unwrap();
        assert!(json.get("starTotal").is_none());
    }

    #[test]
    fn test_distribution_percent() {
        let dist = RatingDistribution {
            five: 89,
            four: 25,
            three: 7,
            two: 2,
            one: 1,
        };
        assert_eq!(dist.total(), 124);
        assert_eq!(dist.percent(5), 72);
        assert_eq!(dist.percent(1), 1);
    }

    #[test]
    fn test_distribution_serializes_star_keys() {
        let json = serde_json::to_value(RatingDistribution {
            five: 3,
            ..Default::default()
        })
        .unwrap();
        assert_eq!(json["5"], 3);
        assert_eq!(json["1"], 0);
    }

    #[test]
    fn test_draft_into_review() {
        let at = Utc.with_ymd_and_hms(2024, 6, 1, 9, 30, 0).unwrap();
        let review = draft(5)
            .into_review("review-1".to_string(), 1, "user-9", "Sarah Johnson", at)
            .unwrap();

        assert_eq!(review.title, "Perfect summer dress!");
        assert!(!review.verified);
        assert_eq!(review.helpful, 0);
        assert_eq!(review.size.as_deref(), Some("M"));
        assert_eq!(review.color, None);
        assert_eq!(review.created_at, at);
    }

    #[test]
    fn test_draft_rejects_bad_rating() {
        let at = Utc::now();
        let result = draft(0).into_review("r".to_string(), 1, "u", "n", at);
        assert!(matches!(result, Err(CoreError::Validation(_))));

        assert!(draft(6).validate().is_err());
    }
}
