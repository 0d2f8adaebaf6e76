use axum::{extract::State, http::StatusCode, routing::get, Json, Router};

use crate::controllers::RatingController;
use crate::dto::rating_dto::CreateRatingRequest;
use crate::models::{Rating, RatingDetail};
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::extractors::ValidatedJson;

pub fn create_rating_router() -> Router<AppState> {
    Router::new().route("/", get(list_ratings).post(create_rating))
}

async fn list_ratings(State(state): State<AppState>) -> Result<Json<Vec<RatingDetail>>, AppError> {
    let controller = RatingController::new(&state);
    let response = controller.list().await?;
    Ok(Json(response))
}

async fn create_rating(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<CreateRatingRequest>,
) -> Result<(StatusCode, Json<Rating>), AppError> {
    let controller = RatingController::new(&state);
    let response = controller.create(request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}
