//! User domain entity
//!
//! Customers and artisans. A user's follows and favorites are the affinity
//! signals that drive the personalized feed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(pub Uuid);

impl UserId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Kind of account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserType {
    Customer,
    Artisan,
}

impl std::fmt::Display for UserType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UserType::Customer => write!(f, "customer"),
            UserType::Artisan => write!(f, "artisan"),
        }
    }
}

impl std::str::FromStr for UserType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "customer" => Ok(UserType::Customer),
            "artisan" => Ok(UserType::Artisan),
            _ => Err(format!("Unknown user type: {}", s)),
        }
    }
}

/// A marketplace user
#[derive(Debug, Clone, Serialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub user_type: UserType,
    pub avatar: Option<String>,
    pub bio: Option<String>,
    pub location: Option<String>,
    pub is_verified: bool,
    #[serde(skip_serializing)]
    pub api_key_hash: String,
    pub created_at: DateTime<Utc>,
    pub last_seen_at: Option<DateTime<Utc>>,
}

/// Owner display fields joined into feed items
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArtistSummary {
    pub id: UserId,
    pub name: String,
    pub avatar: Option<String>,
    pub user_type: UserType,
    pub is_verified: bool,
}

impl From<&User> for ArtistSummary {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            avatar: user.avatar.clone(),
            user_type: user.user_type,
            is_verified: user.is_verified,
        }
    }
}

/// Per-artisan totals across all of their products
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArtistStats {
    pub id: UserId,
    pub name: String,
    pub avatar: Option<String>,
    pub bio: Option<String>,
    pub location: Option<String>,
    pub is_verified: bool,
    pub total_likes: i64,
    pub total_views: i64,
    pub total_products: i64,
    pub followers_count: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_user(user_type: UserType) -> User {
        User {
            id: UserId::new(),
            name: "Mira".to_string(),
            user_type,
            avatar: Some("/uploads/mira.png".to_string()),
            bio: None,
            location: Some("Oaxaca".to_string()),
            is_verified: true,
            api_key_hash: "hash".to_string(),
            created_at: Utc::now(),
            last_seen_at: None,
        }
    }

    #[test]
    fn user_type_display() {
        assert_eq!(UserType::Customer.to_string(), "customer");
        assert_eq!(UserType::Artisan.to_string(), "artisan");
    }

    #[test]
    fn user_type_from_str() {
        assert_eq!("ARTISAN".parse::<UserType>().unwrap(), UserType::Artisan);
        assert_eq!("customer".parse::<UserType>().unwrap(), UserType::Customer);
        assert!("admin".parse::<UserType>().is_err());
    }

    #[test]
    fn artist_summary_copies_display_fields() {
        let user = make_user(UserType::Artisan);
        let summary = ArtistSummary::from(&user);
        assert_eq!(summary.id, user.id);
        assert_eq!(summary.name, "Mira");
        assert_eq!(summary.avatar.as_deref(), Some("/uploads/mira.png"));
        assert!(summary.is_verified);
    }

    #[test]
    fn api_key_hash_not_serialized() {
        let json = serde_json::to_value(make_user(UserType::Customer)).unwrap();
        assert!(json.get("api_key_hash").is_none());
        assert_eq!(json["user_type"], "customer");
    }
}
