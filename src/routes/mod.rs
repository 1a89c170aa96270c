//! Rutas de la API
//!
//! Un router por recurso, ensamblados en `create_api_router`. Las rutas
//! de administración cuelgan de /api/admin con el guard de rol aplicado.

pub mod admin_routes;
pub mod auth_routes;
pub mod booking_routes;
pub mod car_routes;
pub mod category_routes;

use axum::{response::Json, routing::get, Router};
use serde_json::json;
use tower_http::trace::TraceLayer;

use crate::middleware::cors::{cors_middleware, cors_middleware_with_origins};
use crate::state::AppState;

/// Ensamblar el router completo de la aplicación
pub fn create_api_router(state: AppState) -> Router {
    // CORS permisivo solo en desarrollo sin orígenes configurados;
    // en cualquier otro caso, solo los orígenes de la configuración
    let cors = if state.config.is_development() && state.config.cors_origins.is_empty() {
        cors_middleware()
    } else {
        cors_middleware_with_origins(state.config.cors_origins.clone())
    };

    Router::new()
        .route("/health", get(health_check))
        .nest("/api/auth", auth_routes::create_auth_router(state.clone()))
        .nest("/api/car", car_routes::create_car_router())
        .nest("/api/category", category_routes::create_category_router())
        .nest("/api/booking", booking_routes::create_booking_router(state.clone()))
        .nest("/api/admin", admin_routes::create_admin_router(state.clone()))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Health check simple
async fn health_check() -> Json<serde_json::Value> {
    Json(json!({
        "service": "car-rental-api",
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}
