//! Personalized feed ranking
//!
//! Scores candidate products against a viewer's affinity signals and cuts one
//! page out of the ranked list. Everything here is a pure function of its
//! arguments, including `now`, so a frozen clock gives identical output.

use std::cmp::Ordering;
use std::collections::HashSet;

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use super::recommendation_config::{
    DEFAULT_FEED_LIMIT, DEFAULT_FEED_PAGE, FAVORITE_CATEGORY_BONUS, FOLLOWED_ARTIST_BONUS,
    LIKE_WEIGHT, MAX_FEED_LIMIT, RECENCY_BONUS, RECENCY_WINDOW_DAYS, VIEW_WEIGHT,
};
use crate::domain::entities::{Category, Product, UserId};
use crate::error::DomainError;

/// A viewer's affinity signals
#[derive(Debug, Clone, Default)]
pub struct FeedPreferences {
    following: HashSet<UserId>,
    favorite_categories: Vec<Category>,
}

impl FeedPreferences {
    /// Build preferences from followed artists and favorited products.
    ///
    /// Favorite categories keep the order in which they first appear.
    pub fn new(following: impl IntoIterator<Item = UserId>, favorites: &[Product]) -> Self {
        let mut favorite_categories = Vec::new();
        for product in favorites {
            if !favorite_categories.contains(&product.category) {
                favorite_categories.push(product.category);
            }
        }

        Self {
            following: following.into_iter().collect(),
            favorite_categories,
        }
    }

    pub fn follows(&self, artist: &UserId) -> bool {
        self.following.contains(artist)
    }

    pub fn prefers(&self, category: Category) -> bool {
        self.favorite_categories.contains(&category)
    }

    pub fn following_count(&self) -> usize {
        self.following.len()
    }

    pub fn favorite_categories(&self) -> &[Category] {
        &self.favorite_categories
    }
}

/// A validated feed page request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Pagination {
    pub page: u32,
    pub limit: u32,
}

impl Pagination {
    /// Validate raw query values, filling in defaults for missing ones
    pub fn from_query(page: Option<i64>, limit: Option<i64>) -> Result<Self, DomainError> {
        let page = page.unwrap_or(DEFAULT_FEED_PAGE);
        let limit = limit.unwrap_or(DEFAULT_FEED_LIMIT);

        if page < 1 || page > i64::from(u32::MAX) {
            return Err(DomainError::Validation(format!(
                "page must be a positive integer, got {}",
                page
            )));
        }
        if !(1..=MAX_FEED_LIMIT).contains(&limit) {
            return Err(DomainError::Validation(format!(
                "limit must be between 1 and {}, got {}",
                MAX_FEED_LIMIT, limit
            )));
        }

        Ok(Self {
            page: page as u32,
            limit: limit as u32,
        })
    }

    /// Number of ranked items that precede this page
    pub fn skip(&self) -> usize {
        (self.page as usize - 1).saturating_mul(self.limit as usize)
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: DEFAULT_FEED_PAGE as u32,
            limit: DEFAULT_FEED_LIMIT as u32,
        }
    }
}

/// A product with its feed score
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredProduct {
    pub product: Product,
    pub score: f64,
}

/// Score a single product for a viewer
pub fn score_product(product: &Product, prefs: &FeedPreferences, now: DateTime<Utc>) -> f64 {
    let mut score = 0.0;

    if prefs.follows(&product.artist_id) {
        score += FOLLOWED_ARTIST_BONUS;
    }
    if prefs.prefers(product.category) {
        score += FAVORITE_CATEGORY_BONUS;
    }

    score += product.like_count as f64 * LIKE_WEIGHT;
    score += product.views as f64 * VIEW_WEIGHT;

    if product.created_at >= now - Duration::days(RECENCY_WINDOW_DAYS) {
        score += RECENCY_BONUS;
    }

    score
}

/// Highest score first, then newest first
fn feed_order(a: &ScoredProduct, b: &ScoredProduct) -> Ordering {
    b.score
        .total_cmp(&a.score)
        .then_with(|| b.product.created_at.cmp(&a.product.created_at))
}

/// Rank candidates for a viewer and return the requested page.
///
/// Candidates are expected to be pre-filtered (available, not owned by the
/// viewer). The sort is stable: items equal in score and age keep their
/// input order.
pub fn rank_feed(
    candidates: &[Product],
    prefs: &FeedPreferences,
    pagination: &Pagination,
    now: DateTime<Utc>,
) -> Vec<ScoredProduct> {
    let mut scored: Vec<ScoredProduct> = candidates
        .iter()
        .map(|product| ScoredProduct {
            score: score_product(product, prefs, now),
            product: product.clone(),
        })
        .collect();

    scored.sort_by(feed_order);

    scored
        .into_iter()
        .skip(pagination.skip())
        .take(pagination.limit as usize)
        .collect()
}

/// Order products by likes, then views, then recency (all descending)
pub fn sort_by_popularity(products: &mut [Product]) {
    products.sort_by(|a, b| {
        b.like_count
            .cmp(&a.like_count)
            .then_with(|| b.views.cmp(&a.views))
            .then_with(|| b.created_at.cmp(&a.created_at))
    });
}
