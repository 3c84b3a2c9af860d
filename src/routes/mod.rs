pub mod plan_financials_routes;

use axum::{routing::get, Json, Router};
use serde_json::json;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::config::EnvironmentConfig;
use crate::middleware::cors::cors_layer;
use crate::state::AppState;

/// Router completo de la API
pub fn create_router(state: AppState, config: &EnvironmentConfig) -> Router {
    Router::new()
        .route("/health", get(health))
        .merge(plan_financials_routes::create_plan_financials_router())
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors_layer(&config.cors_origins, config.is_production())),
        )
        .with_state(state)
}

/// Health check simple
async fn health() -> Json<serde_json::Value> {
    Json(json!({
        "service": "deductible-cache",
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
