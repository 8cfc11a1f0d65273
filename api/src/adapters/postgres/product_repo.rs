//! PostgreSQL adapter for ProductRepository

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, QuerySelect};

use crate::domain::entities::{Product, ProductId, UserId};
use crate::domain::ports::{ProductFilter, ProductRepository};
use crate::entity::{favorites, products};
use crate::error::DomainError;

/// PostgreSQL implementation of ProductRepository
pub struct PostgresProductRepository {
    db: DatabaseConnection,
}

impl PostgresProductRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn into_products(models: Vec<products::Model>) -> Result<Vec<Product>, DomainError> {
    models.into_iter().map(Product::try_from).collect()
}

#[async_trait]
impl ProductRepository for PostgresProductRepository {
    async fn find_by_id(&self, id: &ProductId) -> Result<Option<Product>, DomainError> {
        let result = products::Entity::find_by_id(id.0)
            .one(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        result.map(Product::try_from).transpose()
    }

    async fn find_available(&self, filter: &ProductFilter) -> Result<Vec<Product>, DomainError> {
        let mut query = products::Entity::find().filter(products::Column::IsAvailable.eq(true));

        if let Some(category) = filter.category {
            query = query.filter(products::Column::Category.eq(category.as_str()));
        }
        if let Some(min) = filter.min_price {
            query = query.filter(products::Column::Price.gte(min));
        }
        if let Some(max) = filter.max_price {
            query = query.filter(products::Column::Price.lte(max));
        }
        if let Some(after) = filter.created_after {
            query = query.filter(products::Column::CreatedAt.gte(after.fixed_offset()));
        }
        if let Some(artist) = filter.exclude_artist {
            query = query.filter(products::Column::ArtistId.ne(artist.0));
        }
        if let Some(product) = filter.exclude_product {
            query = query.filter(products::Column::Id.ne(product.0));
        }

        let results = query
            .order_by_asc(products::Column::CreatedAt)
            .order_by_asc(products::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        into_products(results)
    }

    async fn find_featured(&self, limit: u64) -> Result<Vec<Product>, DomainError> {
        let results = products::Entity::find()
            .filter(products::Column::IsFeatured.eq(true))
            .filter(products::Column::IsAvailable.eq(true))
            .order_by_desc(products::Column::CreatedAt)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        into_products(results)
    }

    async fn find_favorited_by(&self, user_id: &UserId) -> Result<Vec<Product>, DomainError> {
        let favorite_ids: Vec<uuid::Uuid> = favorites::Entity::find()
            .filter(favorites::Column::UserId.eq(user_id.0))
            .order_by_asc(favorites::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?
            .into_iter()
            .map(|f| f.product_id)
            .collect();

        if favorite_ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut by_id: HashMap<uuid::Uuid, products::Model> = products::Entity::find()
            .filter(products::Column::Id.is_in(favorite_ids.clone()))
            .all(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?
            .into_iter()
            .map(|m| (m.id, m))
            .collect();

        // Keep the order in which the user favorited them
        let ordered = favorite_ids
            .iter()
            .filter_map(|id| by_id.remove(id))
            .collect();

        into_products(ordered)
    }
}

/// Convert SeaORM model to domain entity
impl TryFrom<products::Model> for Product {
    type Error = DomainError;

    fn try_from(model: products::Model) -> Result<Self, Self::Error> {
        let category = model.category.parse().map_err(|e: String| {
            DomainError::Database(format!("product {}: {}", model.id, e))
        })?;

        Ok(Product {
            id: ProductId(model.id),
            title: model.title,
            description: model.description,
            category,
            price: model.price,
            artist_id: UserId(model.artist_id),
            artist_name: model.artist_name,
            like_count: model.like_count,
            views: model.views,
            is_available: model.is_available,
            is_featured: model.is_featured,
            created_at: model.created_at.with_timezone(&Utc),
        })
    }
}
