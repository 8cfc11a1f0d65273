//! ArtisanHub Recommendation API
//!
//! Personalized feeds, popularity lists, similar products and market insights
//! for the ArtisanHub marketplace.
//! Uses hexagonal (ports & adapters) architecture for clean separation of concerns.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use axum::{middleware, routing::get, Json, Router};
use sea_orm::Database;
use serde::Serialize;
use tower_governor::governor::GovernorConfigBuilder;
use tower_governor::key_extractor::PeerIpKeyExtractor;
use tower_governor::GovernorLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod adapters;
mod app;
mod auth;
mod config;
mod domain;
mod entity;
mod error;
mod handlers;

#[cfg(test)]
mod test_utils;


use adapters::{GeminiClient, PostgresProductRepository, PostgresUserRepository};
use app::RecommendationService;
use config::Config;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub recommendation_service: Arc<
        RecommendationService<PostgresProductRepository, PostgresUserRepository, GeminiClient>,
    >,
    pub user_repo: Arc<PostgresUserRepository>,
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,artisanhub_api=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting ArtisanHub recommendation API...");

    let config = Config::from_env()?;

    // Connect to PostgreSQL
    tracing::info!("Connecting to database...");
    let db = Database::connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;
    tracing::info!("Database connected");

    // Create adapters
    let product_repo = Arc::new(PostgresProductRepository::new(db.clone()));
    let user_repo = Arc::new(PostgresUserRepository::new(db.clone()));

    let ai_client = Arc::new(
        GeminiClient::new(
            config.gemini_api_url.clone(),
            config.gemini_model.clone(),
            config.gemini_api_key.clone(),
            config.ai_timeout,
        )
        .context("Failed to build AI client")?,
    );
    if !ai_client.is_configured() {
        tracing::warn!("GEMINI_API_KEY not set, AI suggestions are disabled");
    }

    // Create application services
    let recommendation_service = Arc::new(RecommendationService::new(
        product_repo,
        user_repo.clone(),
        ai_client,
    ));

    let state = AppState {
        recommendation_service,
        user_repo,
    };

    // Rate limiting config: 2 req/sec sustained, burst of 5
    // Uses PeerIpKeyExtractor to get client IP from socket connection
    let governor_config = Arc::new(
        GovernorConfigBuilder::default()
            .key_extractor(PeerIpKeyExtractor)
            .per_second(2)
            .burst_size(5)
            .finish()
            .context("Failed to build governor config")?,
    );

    // Rate-limited routes (each call may reach the AI model)
    let rate_limited_routes = Router::new()
        .route(
            "/api/recommendations/products/:id/similar",
            get(handlers::get_similar),
        )
        .layer(GovernorLayer {
            config: governor_config,
        });

    // Protected routes
    let protected_routes = Router::new()
        .route("/api/recommendations/feed", get(handlers::get_feed))
        .route(
            "/api/recommendations/products",
            get(handlers::get_recommendations),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::auth_middleware,
        ));

    // Build router
    let app = Router::new()
        // Health check (no auth)
        .route("/health", get(health))
        // Public endpoints
        .route("/api/recommendations/trending", get(handlers::get_trending))
        .route(
            "/api/recommendations/artists/top",
            get(handlers::get_top_artists),
        )
        .route("/api/recommendations/insights", get(handlers::get_insights))
        .route("/api/products/featured", get(handlers::get_featured))
        .merge(rate_limited_routes)
        .merge(protected_routes)
        // Middleware
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .context("Server error")?;

    Ok(())
}
