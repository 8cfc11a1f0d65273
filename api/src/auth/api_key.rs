//! API key authentication middleware

use axum::{body::Body, extract::State, http::Request, middleware::Next, response::Response};
use sha2::{Digest, Sha256};

use crate::domain::ports::UserRepository;
use crate::error::AppError;
use crate::AppState;

/// Hash an API key the way it is stored (hex-encoded SHA-256)
pub fn hash_api_key(api_key: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(api_key.as_bytes());
    hex::encode(hasher.finalize())
}

/// Extract the API key from the Authorization header
fn extract_api_key(request: &Request<Body>) -> Option<&str> {
    request
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|k| !k.is_empty())
}

/// Authentication middleware
///
/// Validates the API key and injects the User into request extensions.
/// Routes that require authentication should use this middleware.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let api_key = extract_api_key(&request).ok_or(AppError::Unauthorized)?;
    let key_hash = hash_api_key(api_key);

    let user = state
        .user_repo
        .find_by_api_key_hash(&key_hash)
        .await?
        .ok_or(AppError::Unauthorized)?;

    // Update last seen (fire and forget, log errors)
    let user_id = user.id;
    let user_repo = state.user_repo.clone();
    tokio::spawn(async move {
        if let Err(e) = user_repo.update_last_seen(&user_id).await {
            tracing::warn!(error = %e, user_id = %user_id, "Failed to update last_seen");
        }
    });

    request.extensions_mut().insert(user);

    Ok(next.run(request).await)
}
