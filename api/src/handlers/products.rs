//! Product listing handlers

use axum::{
    extract::State,
    response::{IntoResponse, Response},
    Json,
};

use super::ApiResponse;
use crate::error::AppError;
use crate::AppState;

/// GET /api/products/featured
///
/// Featured products, newest first.
pub async fn get_featured(State(state): State<AppState>) -> Result<Response, AppError> {
    let products = state.recommendation_service.featured().await?;
    Ok(Json(ApiResponse::ok(products)).into_response())
}
