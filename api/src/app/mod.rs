//! Application layer
//!
//! Contains use cases and service orchestration.
//! The ranking and aggregation modules are pure; the service coordinates
//! them with the repository and AI ports.

pub mod feed_ranking;
pub mod market_insights;
pub mod prompts;
pub mod recommendation_config;
pub mod recommendation_service;
pub mod similarity;

pub use feed_ranking::Pagination;
pub use market_insights::InsightsQuery;
pub use recommendation_service::RecommendationService;
