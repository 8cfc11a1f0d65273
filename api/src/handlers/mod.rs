//! HTTP handlers
//!
//! Axum request handlers for the API endpoints.

pub mod products;
pub mod recommendations;

use serde::Serialize;

pub use products::get_featured;
pub use recommendations::{
    get_feed, get_insights, get_recommendations, get_similar, get_top_artists, get_trending,
};

/// Success envelope shared by every JSON endpoint
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize, M: Serialize = ()> {
    pub success: bool,
    pub data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<M>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
            meta: None,
        }
    }
}

impl<T: Serialize, M: Serialize> ApiResponse<T, M> {
    pub fn with_meta(data: T, meta: M) -> Self {
        Self {
            success: true,
            data,
            meta: Some(meta),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_omits_missing_meta() {
        let json = serde_json::to_value(ApiResponse::ok(vec![1, 2])).unwrap();
        assert_eq!(json, serde_json::json!({"success": true, "data": [1, 2]}));
    }

    #[test]
    fn envelope_includes_meta() {
        let json = serde_json::to_value(ApiResponse::with_meta("x", 3)).unwrap();
        assert_eq!(json["meta"], 3);
        assert_eq!(json["success"], true);
    }
}
