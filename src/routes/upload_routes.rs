use axum::{extract::State, routing::post, Json, Router};

use crate::controllers::UploadController;
use crate::dto::upload_dto::{SignUploadRequest, SignUploadResponse};
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::extractors::ValidatedJson;

pub fn create_upload_router() -> Router<AppState> {
    Router::new().route("/", post(sign_image))
}

async fn sign_image(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<SignUploadRequest>,
) -> Result<Json<SignUploadResponse>, AppError> {
    let controller = UploadController::new(&state);
    let response = controller.sign(request)?;
    Ok(Json(response))
}
