pub mod appointment_routes;
pub mod customer_routes;
pub mod dashboard_routes;
pub mod event_routes;
pub mod gallery_routes;
pub mod note_routes;
pub mod rating_routes;
pub mod service_routes;
pub mod upload_routes;
pub mod vehicle_routes;

use axum::{routing::get, Json, Router};
use serde_json::json;

use crate::state::AppState;

/// Router principal de la API
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .nest("/api/appointments", appointment_routes::create_appointment_router())
        .nest("/api/customers", customer_routes::create_customer_router())
        .nest("/api/vehicles", vehicle_routes::create_vehicle_router())
        .nest("/api/notes", note_routes::create_note_router())
        .nest("/api/services", service_routes::create_service_router())
        .nest("/api/ratings", rating_routes::create_rating_router())
        .nest("/api/dashboard", dashboard_routes::create_dashboard_router())
        .nest("/api/gallery", gallery_routes::create_gallery_router())
        .nest("/api/history", gallery_routes::create_history_router())
        .nest("/api/sign-image", upload_routes::create_upload_router())
        .nest("/api/events", event_routes::create_event_router())
}

/// Liveness
async fn health() -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

#[cfg(test)]
mod tests;
