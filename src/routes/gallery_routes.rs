//! Rutas públicas de la galería y del historial del cliente

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};

use crate::controllers::{GalleryController, RatingController};
use crate::dto::dashboard_dto::HistoryQuery;
use crate::dto::rating_dto::PublicRatingRequest;
use crate::models::{GalleryView, HistoryEntry, Rating};
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::extractors::{ApiPath, ApiQuery, ValidatedJson};

pub fn create_gallery_router() -> Router<AppState> {
    Router::new()
        .route("/:gallery_id", get(get_gallery))
        .route("/:gallery_id/history", get(gallery_history))
        .route("/:gallery_id/rating", post(rate_from_gallery))
}

pub fn create_history_router() -> Router<AppState> {
    Router::new().route("/:customer_id", get(customer_history))
}

async fn get_gallery(
    State(state): State<AppState>,
    ApiPath(gallery_id): ApiPath<String>,
) -> Result<Json<GalleryView>, AppError> {
    let controller = GalleryController::new(&state);
    let response = controller.view(&gallery_id).await?;
    Ok(Json(response))
}

async fn gallery_history(
    State(state): State<AppState>,
    ApiPath(gallery_id): ApiPath<String>,
) -> Result<Json<Vec<HistoryEntry>>, AppError> {
    let controller = GalleryController::new(&state);
    let response = controller.history_by_gallery(&gallery_id).await?;
    Ok(Json(response))
}

async fn rate_from_gallery(
    State(state): State<AppState>,
    ApiPath(gallery_id): ApiPath<String>,
    ValidatedJson(request): ValidatedJson<PublicRatingRequest>,
) -> Result<(StatusCode, Json<Rating>), AppError> {
    let controller = RatingController::new(&state);
    let response = controller.create_for_gallery(&gallery_id, request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn customer_history(
    State(state): State<AppState>,
    ApiPath(customer_id): ApiPath<i32>,
    ApiQuery(query): ApiQuery<HistoryQuery>,
) -> Result<Json<Vec<HistoryEntry>>, AppError> {
    let controller = GalleryController::new(&state);
    let response = controller.history(customer_id, query).await?;
    Ok(Json(response))
}
