//! Recommendation service
//!
//! Personalized feed, popularity lists, similar products and market insights.
//! Storage reads go through the repository ports; ranking and aggregation are
//! delegated to the pure functions in sibling modules.
//!
//! The AI client is advisory. Its failures are logged and turned into `None`
//! or an empty list so they never fail the request.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{Duration, Utc};
use serde::Serialize;

use super::feed_ranking::{rank_feed, sort_by_popularity, FeedPreferences, Pagination};
use super::market_insights::{compute_insights, rank_top_artists, InsightsQuery, MarketInsights};
use super::prompts::{artwork_suggestions_prompt, similar_products_prompt};
use super::recommendation_config::{
    FEATURED_LIMIT, RECOMMENDATION_LIMIT, RECOMMENDATION_POOL_SIZE, SIMILAR_LIMIT,
    SIMILAR_PROMPT_CANDIDATES, SUGGESTION_PROMPT_PRODUCTS, TOP_ARTISTS_LIMIT, TRENDING_LIMIT,
    TRENDING_WINDOW_DAYS,
};
use super::similarity::{parse_product_ids, select_similar};
use crate::domain::entities::{
    ArtistStats, ArtistSummary, Category, Product, ProductId, User, UserId,
};
use crate::domain::ports::{AiClient, ProductFilter, ProductRepository, UserRepository};
use crate::error::AppError;

/// One ranked product with its artist
#[derive(Debug, Clone, Serialize)]
pub struct FeedItem {
    #[serde(flatten)]
    pub product: Product,
    pub score: f64,
    pub artist: ArtistSummary,
}

/// The preference signals a feed was ranked with
#[derive(Debug, Clone, Serialize)]
pub struct FeedPreferenceSummary {
    pub following_count: usize,
    pub favorite_categories: Vec<Category>,
}

/// Feed metadata echoed back to the client
#[derive(Debug, Clone, Serialize)]
pub struct FeedMeta {
    pub page: u32,
    pub limit: u32,
    pub user_preferences: FeedPreferenceSummary,
}

/// One page of the personalized feed
#[derive(Debug, Clone, Serialize)]
pub struct PersonalizedFeed {
    pub items: Vec<FeedItem>,
    pub meta: FeedMeta,
}

/// Preferences used for popularity recommendations
#[derive(Debug, Clone, Serialize)]
pub struct RecommendationPreferences {
    pub categories: Vec<Category>,
    pub liked_products: Vec<String>,
    pub price_range: String,
}

/// Popular products plus advisory AI suggestions
#[derive(Debug, Clone, Serialize)]
pub struct Recommendations {
    pub products: Vec<Product>,
    pub ai_suggestions: Option<String>,
    pub user_preferences: RecommendationPreferences,
}

/// Service for product recommendations
pub struct RecommendationService<PR, UR, AI>
where
    PR: ProductRepository,
    UR: UserRepository,
    AI: AiClient,
{
    products: Arc<PR>,
    users: Arc<UR>,
    ai: Arc<AI>,
}

impl<PR, UR, AI> RecommendationService<PR, UR, AI>
where
    PR: ProductRepository,
    UR: UserRepository,
    AI: AiClient,
{
    pub fn new(products: Arc<PR>, users: Arc<UR>, ai: Arc<AI>) -> Self {
        Self {
            products,
            users,
            ai,
        }
    }

    /// Rank available products for a user and return one page
    ///
    /// Artists are joined after pagination. A page holds
    /// `min(limit, remaining)` items only while every product's artist row
    /// exists, which the `products.artist_id` foreign key guarantees; items
    /// with a missing artist are dropped with a warning.
    pub async fn personalized_feed(
        &self,
        user: &User,
        pagination: Pagination,
    ) -> Result<PersonalizedFeed, AppError> {
        let following = self.users.find_following_ids(&user.id).await?;
        let favorites = self.products.find_favorited_by(&user.id).await?;
        let prefs = FeedPreferences::new(following, &favorites);

        let candidates = self
            .products
            .find_available(&ProductFilter {
                exclude_artist: Some(user.id),
                ..Default::default()
            })
            .await?;

        let ranked = rank_feed(&candidates, &prefs, &pagination, Utc::now());

        let mut artist_ids: Vec<UserId> = ranked.iter().map(|s| s.product.artist_id).collect();
        artist_ids.sort_by_key(|id| id.0);
        artist_ids.dedup();
        let artists: HashMap<UserId, ArtistSummary> = self
            .users
            .find_by_ids(&artist_ids)
            .await?
            .iter()
            .map(|u| (u.id, ArtistSummary::from(u)))
            .collect();

        let items: Vec<FeedItem> = ranked
            .into_iter()
            .filter_map(|scored| match artists.get(&scored.product.artist_id) {
                Some(artist) => Some(FeedItem {
                    artist: artist.clone(),
                    score: scored.score,
                    product: scored.product,
                }),
                None => {
                    tracing::warn!(
                        product_id = %scored.product.id,
                        artist_id = %scored.product.artist_id,
                        "Dropping feed item with unknown artist"
                    );
                    None
                }
            })
            .collect();

        tracing::debug!(
            user_id = %user.id,
            candidates = candidates.len(),
            returned = items.len(),
            page = pagination.page,
            "Ranked personalized feed"
        );

        Ok(PersonalizedFeed {
            items,
            meta: FeedMeta {
                page: pagination.page,
                limit: pagination.limit,
                user_preferences: FeedPreferenceSummary {
                    following_count: prefs.following_count(),
                    favorite_categories: prefs.favorite_categories().to_vec(),
                },
            },
        })
    }

    /// Most popular products the user does not own, with AI suggestions
    pub async fn recommendations(
        &self,
        user: &User,
        price_range: Option<&str>,
    ) -> Result<Recommendations, AppError> {
        let favorites = self.products.find_favorited_by(&user.id).await?;
        let prefs = FeedPreferences::new(std::iter::empty(), &favorites);
        let user_preferences = RecommendationPreferences {
            categories: prefs.favorite_categories().to_vec(),
            liked_products: favorites.iter().map(|p| p.id.to_string()).collect(),
            price_range: price_range.unwrap_or("all").to_string(),
        };

        let mut pool = self
            .products
            .find_available(&ProductFilter {
                exclude_artist: Some(user.id),
                ..Default::default()
            })
            .await?;
        sort_by_popularity(&mut pool);
        pool.truncate(RECOMMENDATION_POOL_SIZE);

        let ai_suggestions = if pool.is_empty() {
            None
        } else {
            let prompt = artwork_suggestions_prompt(
                &user_preferences.categories,
                &user_preferences.price_range,
                &user_preferences.liked_products,
                &pool[..pool.len().min(SUGGESTION_PROMPT_PRODUCTS)],
            );
            self.advise(&prompt, "artwork suggestions").await
        };

        pool.truncate(RECOMMENDATION_LIMIT);

        Ok(Recommendations {
            products: pool,
            ai_suggestions,
            user_preferences,
        })
    }

    /// Products similar to the given one, padded from the same category
    pub async fn similar_products(&self, id: &ProductId) -> Result<Vec<Product>, AppError> {
        let target = self
            .products
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Product {} not found", id)))?;

        let candidates = self
            .products
            .find_available(&ProductFilter {
                exclude_product: Some(target.id),
                ..Default::default()
            })
            .await?;

        let suggested = if candidates.is_empty() {
            Vec::new()
        } else {
            // Newest candidates are described to the model; all are eligible
            let shown = candidates.len().min(SIMILAR_PROMPT_CANDIDATES);
            let prompt =
                similar_products_prompt(&target, &candidates[candidates.len() - shown..]);
            self.advise(&prompt, "similar products")
                .await
                .map(|answer| parse_product_ids(&answer))
                .unwrap_or_default()
        };

        let similar = select_similar(&target, &suggested, &candidates, SIMILAR_LIMIT);

        tracing::debug!(
            product_id = %target.id,
            suggested = suggested.len(),
            returned = similar.len(),
            "Selected similar products"
        );

        Ok(similar)
    }

    /// Popular products listed in the trending window
    pub async fn trending(&self) -> Result<Vec<Product>, AppError> {
        let mut products = self
            .products
            .find_available(&ProductFilter {
                created_after: Some(Utc::now() - Duration::days(TRENDING_WINDOW_DAYS)),
                ..Default::default()
            })
            .await?;

        sort_by_popularity(&mut products);
        products.truncate(TRENDING_LIMIT);
        Ok(products)
    }

    /// Artisans with the most engagement
    pub async fn top_artists(&self) -> Result<Vec<ArtistStats>, AppError> {
        let stats = self.users.find_artist_stats().await?;
        Ok(rank_top_artists(stats, TOP_ARTISTS_LIMIT))
    }

    /// Market statistics over the products matching a query
    pub async fn insights(&self, query: &InsightsQuery) -> Result<MarketInsights, AppError> {
        let products = self
            .products
            .find_available(&query.to_filter(Utc::now()))
            .await?;
        Ok(compute_insights(&products))
    }

    /// Featured products, newest first
    pub async fn featured(&self) -> Result<Vec<Product>, AppError> {
        Ok(self.products.find_featured(FEATURED_LIMIT).await?)
    }

    /// Ask the model, degrading any failure to `None`
    async fn advise(&self, prompt: &str, purpose: &str) -> Option<String> {
        match self.ai.generate(prompt).await {
            Ok(answer) => Some(answer),
            Err(e) => {
                tracing::warn!(error = %e, purpose, "AI request failed, continuing without it");
                None
            }
        }
    }
}
