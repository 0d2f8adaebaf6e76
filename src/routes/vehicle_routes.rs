use axum::{
    extract::State,
    http::StatusCode,
    routing::{delete, post},
    Json, Router,
};

use crate::controllers::VehicleController;
use crate::dto::customer_dto::CreateVehicleRequest;
use crate::models::Vehicle;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::extractors::{ApiPath, ValidatedJson};

pub fn create_vehicle_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_vehicle))
        .route("/:id", delete(delete_vehicle))
}

async fn create_vehicle(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<CreateVehicleRequest>,
) -> Result<(StatusCode, Json<Vehicle>), AppError> {
    let controller = VehicleController::new(&state);
    let response = controller.create(request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn delete_vehicle(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
) -> Result<StatusCode, AppError> {
    let controller = VehicleController::new(&state);
    controller.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
