//! Repository port traits
//!
//! These traits define the interface for data persistence.
//! Implementations are provided by adapters (e.g., PostgreSQL).

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::entities::{ArtistStats, Category, Product, ProductId, User, UserId};
use crate::error::DomainError;

/// Query over available products
///
/// Every populated field narrows the result. Results come back in creation
/// order, oldest first; callers sort as they need.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductFilter {
    /// Only products in this category
    pub category: Option<Category>,
    /// Inclusive lower price bound
    pub min_price: Option<f64>,
    /// Inclusive upper price bound
    pub max_price: Option<f64>,
    /// Only products created at or after this instant
    pub created_after: Option<DateTime<Utc>>,
    /// Leave out products owned by this user
    pub exclude_artist: Option<UserId>,
    /// Leave out this product
    pub exclude_product: Option<ProductId>,
}

impl ProductFilter {
    /// Check a product against the filter (used by in-memory implementations)
    pub fn matches(&self, product: &Product) -> bool {
        product.is_available
            && self.category.map_or(true, |c| product.category == c)
            && self.min_price.map_or(true, |min| product.price >= min)
            && self.max_price.map_or(true, |max| product.price <= max)
            && self
                .created_after
                .map_or(true, |after| product.created_at >= after)
            && self.exclude_artist != Some(product.artist_id)
            && self.exclude_product != Some(product.id)
    }
}

/// Repository for Product entities
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Find a product by ID
    async fn find_by_id(&self, id: &ProductId) -> Result<Option<Product>, DomainError>;

    /// Find available products matching a filter, oldest first
    async fn find_available(&self, filter: &ProductFilter) -> Result<Vec<Product>, DomainError>;

    /// Find featured available products, newest first
    async fn find_featured(&self, limit: u64) -> Result<Vec<Product>, DomainError>;

    /// Find the products a user has favorited
    async fn find_favorited_by(&self, user_id: &UserId) -> Result<Vec<Product>, DomainError>;
}

/// Repository for User entities
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by ID
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DomainError>;

    /// Find a user by API key hash
    async fn find_by_api_key_hash(&self, hash: &str) -> Result<Option<User>, DomainError>;

    /// Find several users at once; unknown IDs are skipped
    async fn find_by_ids(&self, ids: &[UserId]) -> Result<Vec<User>, DomainError>;

    /// IDs of the users this user follows
    async fn find_following_ids(&self, id: &UserId) -> Result<Vec<UserId>, DomainError>;

    /// Totals for every artisan, unsorted
    async fn find_artist_stats(&self) -> Result<Vec<ArtistStats>, DomainError>;

    /// Update the last seen timestamp
    async fn update_last_seen(&self, id: &UserId) -> Result<(), DomainError>;
}
