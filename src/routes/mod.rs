//! Ensamblado del router de la aplicación

pub mod auth_routes;
pub mod vehicle_routes;

use axum::{response::Json, routing::get, Router};
use serde_json::json;

use crate::middleware::cors::cors_middleware;
use crate::middleware::rate_limit::rate_limit_middleware;
use crate::state::AppState;

/// Construir el router completo con middleware de rate limiting y CORS
pub fn create_router(state: AppState) -> Router {
    let api = Router::new()
        .nest("/auth", auth_routes::create_auth_router(&state))
        .nest("/vehicles", vehicle_routes::create_vehicle_router(&state));

    Router::new()
        .route("/health", get(health_check))
        .nest("/api", api)
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            rate_limit_middleware,
        ))
        .layer(cors_middleware(&state.config))
        .with_state(state)
}

/// Health check simple
async fn health_check() -> Json<serde_json::Value> {
    Json(json!({
        "service": "virtual-garage",
        "status": "ok",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
