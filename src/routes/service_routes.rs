use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};

use crate::controllers::ServiceController;
use crate::dto::service_dto::{AssignGalleryRequest, StartServiceRequest, UpdateServiceRequest};
use crate::models::{Service, ServiceDetail};
use crate::services::ShareMessage;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::extractors::{ApiPath, ValidatedJson};

pub fn create_service_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_services).post(start_service))
        .route(
            "/:id",
            get(get_service).put(update_service).patch(assign_gallery),
        )
        .route("/:id/share", post(share_service))
}

async fn list_services(State(state): State<AppState>) -> Result<Json<Vec<ServiceDetail>>, AppError> {
    let controller = ServiceController::new(&state);
    let response = controller.list().await?;
    Ok(Json(response))
}

async fn get_service(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
) -> Result<Json<ServiceDetail>, AppError> {
    let controller = ServiceController::new(&state);
    let response = controller.get(id).await?;
    Ok(Json(response))
}

/// 201 si el servicio se creó, 200 si ya existía
async fn start_service(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<StartServiceRequest>,
) -> Result<(StatusCode, Json<Service>), AppError> {
    let controller = ServiceController::new(&state);
    let (service, created) = controller.start(request).await?;
    let status = if created { StatusCode::CREATED } else { StatusCode::OK };
    Ok((status, Json(service)))
}

async fn update_service(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
    ValidatedJson(request): ValidatedJson<UpdateServiceRequest>,
) -> Result<Json<ServiceDetail>, AppError> {
    let controller = ServiceController::new(&state);
    let response = controller.update(id, request).await?;
    Ok(Json(response))
}

async fn assign_gallery(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
    ValidatedJson(request): ValidatedJson<AssignGalleryRequest>,
) -> Result<Json<Service>, AppError> {
    let controller = ServiceController::new(&state);
    let response = controller.assign_gallery(id, request).await?;
    Ok(Json(response))
}

async fn share_service(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
) -> Result<Json<ShareMessage>, AppError> {
    let controller = ServiceController::new(&state);
    let response = controller.share(id).await?;
    Ok(Json(response))
}
