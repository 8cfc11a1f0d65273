//! Mock implementations of port traits
//!
//! These are in-memory implementations that can be configured for testing.
//! They store data in memory and allow tests to verify behavior.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::domain::entities::{ArtistStats, Product, ProductId, User, UserId};
use crate::domain::ports::{AiClient, ProductFilter, ProductRepository, UserRepository};
use crate::error::{AiError, DomainError};

// ============================================================================
// In-Memory Product Repository
// ============================================================================

#[derive(Default)]
pub struct InMemoryProductRepository {
    products: Arc<RwLock<HashMap<ProductId, Product>>>,
    favorites: Arc<RwLock<HashMap<UserId, Vec<ProductId>>>>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate with a product for testing
    pub fn with_product(self, product: Product) -> Self {
        self.products.write().unwrap().insert(product.id, product);
        self
    }

    /// Record that `user_id` favorited `product_id`
    pub fn with_favorite(self, user_id: UserId, product_id: ProductId) -> Self {
        self.favorites
            .write()
            .unwrap()
            .entry(user_id)
            .or_default()
            .push(product_id);
        self
    }

    fn sorted_oldest_first(&self, mut products: Vec<Product>) -> Vec<Product> {
        products.sort_by_key(|p| (p.created_at, p.id.0));
        products
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn find_by_id(&self, id: &ProductId) -> Result<Option<Product>, DomainError> {
        let products = self.products.read().unwrap();
        Ok(products.get(id).cloned())
    }

    async fn find_available(&self, filter: &ProductFilter) -> Result<Vec<Product>, DomainError> {
        let matching: Vec<Product> = {
            let products = self.products.read().unwrap();
            products
                .values()
                .filter(|p| filter.matches(p))
                .cloned()
                .collect()
        };
        Ok(self.sorted_oldest_first(matching))
    }

    async fn find_featured(&self, limit: u64) -> Result<Vec<Product>, DomainError> {
        let products = self.products.read().unwrap();
        let mut featured: Vec<Product> = products
            .values()
            .filter(|p| p.is_featured && p.is_available)
            .cloned()
            .collect();
        featured.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        featured.truncate(limit as usize);
        Ok(featured)
    }

    async fn find_favorited_by(&self, user_id: &UserId) -> Result<Vec<Product>, DomainError> {
        let favorites = self.favorites.read().unwrap();
        let products = self.products.read().unwrap();

        Ok(favorites
            .get(user_id)
            .map(|ids| ids.iter().filter_map(|id| products.get(id).cloned()).collect())
            .unwrap_or_default())
    }
}

// ============================================================================
// In-Memory User Repository
// ============================================================================

#[derive(Default)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<HashMap<UserId, User>>>,
    by_api_key: Arc<RwLock<HashMap<String, UserId>>>,
    follows: Arc<RwLock<HashMap<UserId, Vec<UserId>>>>,
    artist_stats: Arc<RwLock<Vec<ArtistStats>>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate with a user for testing
    pub fn with_user(self, user: User) -> Self {
        {
            let mut users = self.users.write().unwrap();
            let mut by_api_key = self.by_api_key.write().unwrap();

            by_api_key.insert(user.api_key_hash.clone(), user.id);
            users.insert(user.id, user);
        }
        self
    }

    /// Record that `follower` follows `followee`
    pub fn with_follow(self, follower: UserId, followee: UserId) -> Self {
        self.follows
            .write()
            .unwrap()
            .entry(follower)
            .or_default()
            .push(followee);
        self
    }

    /// Set the totals returned by `find_artist_stats`
    pub fn with_artist_stats(self, stats: Vec<ArtistStats>) -> Self {
        *self.artist_stats.write().unwrap() = stats;
        self
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DomainError> {
        let users = self.users.read().unwrap();
        Ok(users.get(id).cloned())
    }

    async fn find_by_api_key_hash(&self, hash: &str) -> Result<Option<User>, DomainError> {
        let by_api_key = self.by_api_key.read().unwrap();
        let users = self.users.read().unwrap();

        if let Some(id) = by_api_key.get(hash) {
            Ok(users.get(id).cloned())
        } else {
            Ok(None)
        }
    }

    async fn find_by_ids(&self, ids: &[UserId]) -> Result<Vec<User>, DomainError> {
        let users = self.users.read().unwrap();
        Ok(ids.iter().filter_map(|id| users.get(id).cloned()).collect())
    }

    async fn find_following_ids(&self, id: &UserId) -> Result<Vec<UserId>, DomainError> {
        let follows = self.follows.read().unwrap();
        Ok(follows.get(id).cloned().unwrap_or_default())
    }

    async fn find_artist_stats(&self) -> Result<Vec<ArtistStats>, DomainError> {
        Ok(self.artist_stats.read().unwrap().clone())
    }

    async fn update_last_seen(&self, id: &UserId) -> Result<(), DomainError> {
        let mut users = self.users.write().unwrap();
        if let Some(user) = users.get_mut(id) {
            user.last_seen_at = Some(Utc::now());
            Ok(())
        } else {
            Err(DomainError::NotFound(format!("User {} not found", id)))
        }
    }
}

// ============================================================================
// Mock AI Client
// ============================================================================

/// A mock AI client that records prompts and returns a canned answer
#[derive(Default)]
pub struct MockAiClient {
    pub prompts: Arc<RwLock<Vec<String>>>,
    pub should_fail: Arc<RwLock<bool>>,
    answer: Arc<RwLock<String>>,
}

impl MockAiClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        let client = Self::default();
        *client.should_fail.write().unwrap() = true;
        client
    }

    /// Set the text returned for every prompt
    pub fn with_answer(self, answer: &str) -> Self {
        *self.answer.write().unwrap() = answer.to_string();
        self
    }
}

#[async_trait]
impl AiClient for MockAiClient {
    async fn generate(&self, prompt: &str) -> Result<String, AiError> {
        self.prompts.write().unwrap().push(prompt.to_string());

        if *self.should_fail.read().unwrap() {
            return Err(AiError::Api {
                status: 500,
                message: "Mock failure".to_string(),
            });
        }

        Ok(self.answer.read().unwrap().clone())
    }
}
