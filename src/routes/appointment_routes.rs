use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};

use crate::controllers::AppointmentController;
use crate::dto::appointment_dto::AppointmentRequest;
use crate::models::{Appointment, AppointmentDetail, AppointmentFull};
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::extractors::{ApiPath, ValidatedJson};

pub fn create_appointment_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_appointments))
        .route("/", post(create_appointment))
        .route(
            "/:id",
            get(get_appointment)
                .put(update_appointment)
                .delete(delete_appointment),
        )
}

async fn list_appointments(
    State(state): State<AppState>,
) -> Result<Json<Vec<AppointmentDetail>>, AppError> {
    let controller = AppointmentController::new(&state);
    let response = controller.list().await?;
    Ok(Json(response))
}

async fn get_appointment(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
) -> Result<Json<AppointmentFull>, AppError> {
    let controller = AppointmentController::new(&state);
    let response = controller.get(id).await?;
    Ok(Json(response))
}

async fn create_appointment(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<AppointmentRequest>,
) -> Result<(StatusCode, Json<Appointment>), AppError> {
    let controller = AppointmentController::new(&state);
    let response = controller.create(request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn update_appointment(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
    ValidatedJson(request): ValidatedJson<AppointmentRequest>,
) -> Result<Json<Appointment>, AppError> {
    let controller = AppointmentController::new(&state);
    let response = controller.update(id, request).await?;
    Ok(Json(response))
}

async fn delete_appointment(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
) -> Result<StatusCode, AppError> {
    let controller = AppointmentController::new(&state);
    controller.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
