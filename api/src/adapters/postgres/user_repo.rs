//! PostgreSQL adapter for UserRepository

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseBackend, DatabaseConnection, EntityTrait,
    FromQueryResult, QueryFilter, Set, Statement,
};
use uuid::Uuid;

use crate::domain::entities::{ArtistStats, User, UserId, UserType};
use crate::domain::ports::UserRepository;
use crate::entity::{follows, users};
use crate::error::DomainError;

/// Per-artisan totals; product totals include unavailable listings
const ARTIST_STATS_SQL: &str = r#"
    SELECT u.id, u.name, u.avatar, u.bio, u.location, u.is_verified,
           COALESCE(p.total_likes, 0)::BIGINT AS total_likes,
           COALESCE(p.total_views, 0)::BIGINT AS total_views,
           COALESCE(p.total_products, 0)::BIGINT AS total_products,
           COALESCE(f.followers_count, 0)::BIGINT AS followers_count
    FROM users u
    LEFT JOIN (
        SELECT artist_id,
               SUM(like_count) AS total_likes,
               SUM(views) AS total_views,
               COUNT(*) AS total_products
        FROM products
        GROUP BY artist_id
    ) p ON p.artist_id = u.id
    LEFT JOIN (
        SELECT followee_id, COUNT(*) AS followers_count
        FROM follows
        GROUP BY followee_id
    ) f ON f.followee_id = u.id
    WHERE u.user_type = $1
"#;

#[derive(Debug, FromQueryResult)]
struct ArtistStatsRow {
    id: Uuid,
    name: String,
    avatar: Option<String>,
    bio: Option<String>,
    location: Option<String>,
    is_verified: bool,
    total_likes: i64,
    total_views: i64,
    total_products: i64,
    followers_count: i64,
}

impl From<ArtistStatsRow> for ArtistStats {
    fn from(row: ArtistStatsRow) -> Self {
        ArtistStats {
            id: UserId(row.id),
            name: row.name,
            avatar: row.avatar,
            bio: row.bio,
            location: row.location,
            is_verified: row.is_verified,
            total_likes: row.total_likes,
            total_views: row.total_views,
            total_products: row.total_products,
            followers_count: row.followers_count,
        }
    }
}

/// PostgreSQL implementation of UserRepository
pub struct PostgresUserRepository {
    db: DatabaseConnection,
}

impl PostgresUserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DomainError> {
        let result = users::Entity::find_by_id(id.0)
            .one(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.map(|m| m.into()))
    }

    async fn find_by_api_key_hash(&self, hash: &str) -> Result<Option<User>, DomainError> {
        let result = users::Entity::find()
            .filter(users::Column::ApiKeyHash.eq(hash))
            .one(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.map(|m| m.into()))
    }

    async fn find_by_ids(&self, ids: &[UserId]) -> Result<Vec<User>, DomainError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let results = users::Entity::find()
            .filter(users::Column::Id.is_in(ids.iter().map(|id| id.0)))
            .all(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(results.into_iter().map(|m| m.into()).collect())
    }

    async fn find_following_ids(&self, id: &UserId) -> Result<Vec<UserId>, DomainError> {
        let results = follows::Entity::find()
            .filter(follows::Column::FollowerId.eq(id.0))
            .all(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(results.into_iter().map(|f| UserId(f.followee_id)).collect())
    }

    async fn find_artist_stats(&self) -> Result<Vec<ArtistStats>, DomainError> {
        let stmt = Statement::from_sql_and_values(
            DatabaseBackend::Postgres,
            ARTIST_STATS_SQL,
            [UserType::Artisan.to_string().into()],
        );

        let rows = ArtistStatsRow::find_by_statement(stmt)
            .all(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(rows.into_iter().map(ArtistStats::from).collect())
    }

    async fn update_last_seen(&self, id: &UserId) -> Result<(), DomainError> {
        let now = Utc::now().fixed_offset();

        users::ActiveModel {
            id: Set(id.0),
            last_seen_at: Set(Some(now)),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(())
    }
}

/// Convert SeaORM model to domain entity
impl From<users::Model> for User {
    fn from(model: users::Model) -> Self {
        User {
            id: UserId(model.id),
            name: model.name,
            user_type: model.user_type.parse().unwrap_or(UserType::Customer),
            avatar: model.avatar,
            bio: model.bio,
            location: model.location,
            is_verified: model.is_verified,
            api_key_hash: model.api_key_hash,
            created_at: model.created_at.with_timezone(&Utc),
            last_seen_at: model.last_seen_at.map(|dt| dt.with_timezone(&Utc)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn model_converts_to_user() {
        let now = Utc::now().fixed_offset();
        let model = users::Model {
            id: Uuid::new_v4(),
            name: "Mira".to_string(),
            user_type: "artisan".to_string(),
            avatar: None,
            bio: Some("Potter".to_string()),
            location: None,
            is_verified: true,
            api_key_hash: "hash".to_string(),
            created_at: now,
            last_seen_at: None,
        };

        let user: User = model.clone().into();
        assert_eq!(user.id, UserId(model.id));
        assert_eq!(user.user_type, UserType::Artisan);
        assert_eq!(user.bio.as_deref(), Some("Potter"));
        assert!(user.last_seen_at.is_none());
    }

    #[test]
    fn unknown_user_type_falls_back_to_customer() {
        let model = users::Model {
            id: Uuid::new_v4(),
            name: "x".to_string(),
            user_type: "admin".to_string(),
            avatar: None,
            bio: None,
            location: None,
            is_verified: false,
            api_key_hash: "h".to_string(),
            created_at: Utc::now().fixed_offset(),
            last_seen_at: None,
        };

        let user: User = model.into();
        assert_eq!(user.user_type, UserType::Customer);
    }
}
