//! Test fixtures
//!
//! Factory functions for creating test data with sensible defaults.
//! Each fixture function creates a valid entity that can be customized.

use chrono::Utc;

use crate::domain::entities::{
    ArtistStats, Category, Product, ProductId, User, UserId, UserType,
};

/// Create a test customer with default values
pub fn test_user() -> User {
    User {
        id: UserId::new(),
        name: "test-customer".to_string(),
        user_type: UserType::Customer,
        avatar: None,
        bio: None,
        location: None,
        is_verified: false,
        api_key_hash: "abc123hash".to_string(),
        created_at: Utc::now(),
        last_seen_at: None,
    }
}

/// Create a test artisan with a specific name
pub fn test_artisan(name: &str) -> User {
    User {
        id: UserId::new(),
        name: name.to_string(),
        user_type: UserType::Artisan,
        avatar: Some(format!("/uploads/{}.png", name)),
        bio: Some(format!("{} makes things by hand", name)),
        location: None,
        is_verified: true,
        api_key_hash: format!("hash-{}", name),
        created_at: Utc::now(),
        last_seen_at: None,
    }
}

/// Create an available product owned by `artist_id`
pub fn test_product(artist_id: UserId, category: Category) -> Product {
    let id = ProductId::new();
    Product {
        id,
        title: format!("{} piece {}", category, &id.to_string()[..8]),
        description: "Handmade test product".to_string(),
        category,
        price: 50.0,
        artist_id,
        artist_name: "test-artisan".to_string(),
        like_count: 0,
        views: 0,
        is_available: true,
        is_featured: false,
        created_at: Utc::now(),
    }
}

/// Create artist totals for ranking tests
pub fn test_artist_stats(
    name: &str,
    total_likes: i64,
    total_views: i64,
    total_products: i64,
    followers_count: i64,
) -> ArtistStats {
    ArtistStats {
        id: UserId::new(),
        name: name.to_string(),
        avatar: None,
        bio: None,
        location: None,
        is_verified: false,
        total_likes,
        total_views,
        total_products,
        followers_count,
    }
}
