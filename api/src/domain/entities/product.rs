//! Product domain entity
//!
//! A piece listed for sale by an artisan. The recommendation core only reads
//! products; listing and editing happen elsewhere.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::user::UserId;

/// Unique identifier for a product
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProductId(pub Uuid);

impl ProductId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ProductId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Craft category of a product
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    Pottery,
    Textiles,
    Woodwork,
    Jewelry,
    Paintings,
    Sculptures,
    Metalwork,
    Ceramics,
}

impl Category {
    pub const ALL: [Category; 8] = [
        Category::Pottery,
        Category::Textiles,
        Category::Woodwork,
        Category::Jewelry,
        Category::Paintings,
        Category::Sculptures,
        Category::Metalwork,
        Category::Ceramics,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Pottery => "Pottery",
            Category::Textiles => "Textiles",
            Category::Woodwork => "Woodwork",
            Category::Jewelry => "Jewelry",
            Category::Paintings => "Paintings",
            Category::Sculptures => "Sculptures",
            Category::Metalwork => "Metalwork",
            Category::Ceramics => "Ceramics",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("Unknown category: {}", s))
    }
}

/// A product listing
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    pub description: String,
    pub category: Category,
    pub price: f64,
    pub artist_id: UserId,
    pub artist_name: String,
    pub like_count: i64,
    pub views: i64,
    pub is_available: bool,
    pub is_featured: bool,
    pub created_at: DateTime<Utc>,
}
