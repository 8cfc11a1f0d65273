//! Recommendation configuration constants
//!
//! Scoring weights for the personalized feed and the result sizes of the
//! other recommendation endpoints.

/// Score bonus when the viewer follows the product's artist
pub const FOLLOWED_ARTIST_BONUS: f64 = 10.0;

/// Score bonus when the product's category is among the viewer's favorites
pub const FAVORITE_CATEGORY_BONUS: f64 = 5.0;

/// Score per like
pub const LIKE_WEIGHT: f64 = 0.1;

/// Score per view
pub const VIEW_WEIGHT: f64 = 0.01;

/// Score bonus for products listed within the recency window
pub const RECENCY_BONUS: f64 = 2.0;

/// Number of days a product counts as recent
pub const RECENCY_WINDOW_DAYS: i64 = 7;

/// Feed page used when none is requested
pub const DEFAULT_FEED_PAGE: i64 = 1;

/// Feed page size used when none is requested
pub const DEFAULT_FEED_LIMIT: i64 = 10;

/// Largest feed page size accepted
pub const MAX_FEED_LIMIT: i64 = 100;

/// Number of days a product stays eligible for trending
pub const TRENDING_WINDOW_DAYS: i64 = 30;

/// Number of trending products returned
pub const TRENDING_LIMIT: usize = 12;

/// Number of popular products considered for recommendations
pub const RECOMMENDATION_POOL_SIZE: usize = 50;

/// Number of recommended products returned
pub const RECOMMENDATION_LIMIT: usize = 8;

/// Number of products described to the model when asking for suggestions
pub const SUGGESTION_PROMPT_PRODUCTS: usize = 20;

/// Number of similar products returned
pub const SIMILAR_LIMIT: usize = 4;

/// Newest candidates described to the model when asking for similar products
pub const SIMILAR_PROMPT_CANDIDATES: usize = 100;

/// Number of top artists returned
pub const TOP_ARTISTS_LIMIT: usize = 10;

/// Number of featured products returned
pub const FEATURED_LIMIT: u64 = 6;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bonuses_are_positive() {
        assert!(FOLLOWED_ARTIST_BONUS > FAVORITE_CATEGORY_BONUS);
        assert!(FAVORITE_CATEGORY_BONUS > RECENCY_BONUS);
        assert!(RECENCY_BONUS > 0.0);
    }

    #[test]
    fn likes_outweigh_views() {
        assert!(LIKE_WEIGHT > VIEW_WEIGHT);
    }

    #[test]
    fn default_limit_within_bounds() {
        assert!(DEFAULT_FEED_LIMIT >= 1);
        assert!(DEFAULT_FEED_LIMIT <= MAX_FEED_LIMIT);
    }
}
