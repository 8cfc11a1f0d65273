//! Recommendation handlers
//!
//! Personalized feed and recommendations for the authenticated user, plus the
//! public trending, similar, top artist and insights endpoints.

use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::ApiResponse;
use crate::app::market_insights::MarketInsights;
use crate::app::{InsightsQuery, Pagination};
use crate::domain::entities::{ProductId, User};
use crate::error::AppError;
use crate::AppState;

/// Query parameters for GET /api/recommendations/feed
#[derive(Debug, Default, Deserialize)]
pub struct FeedQuery {
    pub page: Option<String>,
    pub limit: Option<String>,
}

/// Parse an optional integer query value
fn parse_int(name: &str, raw: Option<&str>) -> Result<Option<i64>, AppError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value
            .parse()
            .map(Some)
            .map_err(|_| AppError::BadRequest(format!("{} must be an integer", name))),
    }
}

/// GET /api/recommendations/feed
///
/// One page of the personalized feed for the authenticated user.
pub async fn get_feed(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Query(query): Query<FeedQuery>,
) -> Result<Response, AppError> {
    let pagination = Pagination::from_query(
        parse_int("page", query.page.as_deref())?,
        parse_int("limit", query.limit.as_deref())?,
    )?;

    let feed = state
        .recommendation_service
        .personalized_feed(&user, pagination)
        .await?;

    Ok(Json(ApiResponse::with_meta(feed.items, feed.meta)).into_response())
}

/// Query parameters for GET /api/recommendations/products
#[derive(Debug, Default, Deserialize)]
pub struct RecommendationsQuery {
    pub price_range: Option<String>,
}

/// GET /api/recommendations/products
///
/// Popular products not owned by the caller, with AI suggestions when available.
pub async fn get_recommendations(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Query(query): Query<RecommendationsQuery>,
) -> Result<Response, AppError> {
    let recommendations = state
        .recommendation_service
        .recommendations(&user, query.price_range.as_deref())
        .await?;

    Ok(Json(ApiResponse::ok(recommendations)).into_response())
}

/// GET /api/recommendations/products/:id/similar
pub async fn get_similar(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let id = Uuid::parse_str(&id)
        .map(ProductId)
        .map_err(|_| AppError::BadRequest(format!("Invalid product id: {}", id)))?;

    let similar = state.recommendation_service.similar_products(&id).await?;
    Ok(Json(ApiResponse::ok(similar)).into_response())
}

/// GET /api/recommendations/trending
pub async fn get_trending(State(state): State<AppState>) -> Result<Response, AppError> {
    let products = state.recommendation_service.trending().await?;
    Ok(Json(ApiResponse::ok(products)).into_response())
}

/// GET /api/recommendations/artists/top
pub async fn get_top_artists(State(state): State<AppState>) -> Result<Response, AppError> {
    let artists = state.recommendation_service.top_artists().await?;
    Ok(Json(ApiResponse::ok(artists)).into_response())
}

/// Query parameters for GET /api/recommendations/insights
#[derive(Debug, Default, Deserialize)]
pub struct InsightsParams {
    pub category: Option<String>,
    pub price_range: Option<String>,
    pub timeframe: Option<String>,
}

/// Filters echoed back with an insights report
#[derive(Debug, Serialize)]
pub struct InsightsFilters {
    pub category: String,
    pub price_range: String,
    pub timeframe: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct InsightsResponse {
    #[serde(flatten)]
    pub insights: MarketInsights,
    pub filters: InsightsFilters,
}

/// GET /api/recommendations/insights
pub async fn get_insights(
    State(state): State<AppState>,
    Query(params): Query<InsightsParams>,
) -> Result<Response, AppError> {
    let query = InsightsQuery::parse(
        params.category.as_deref(),
        params.price_range.as_deref(),
        params.timeframe.as_deref(),
    )?;

    let insights = state.recommendation_service.insights(&query).await?;

    let filters = InsightsFilters {
        category: params.category.unwrap_or_else(|| "all".to_string()),
        price_range: params.price_range.unwrap_or_else(|| "all".to_string()),
        timeframe: params.timeframe,
    };

    Ok(Json(ApiResponse::ok(InsightsResponse { insights, filters })).into_response())
}
