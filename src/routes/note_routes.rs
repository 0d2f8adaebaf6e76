use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};

use crate::controllers::NoteController;
use crate::dto::note_dto::NoteRequest;
use crate::models::Note;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::extractors::{ApiPath, ValidatedJson};

pub fn create_note_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_notes).post(create_note))
        .route("/:id", put(update_note).delete(delete_note))
}

async fn list_notes(State(state): State<AppState>) -> Result<Json<Vec<Note>>, AppError> {
    let controller = NoteController::new(&state);
    let response = controller.list().await?;
    Ok(Json(response))
}

async fn create_note(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<NoteRequest>,
) -> Result<(StatusCode, Json<Note>), AppError> {
    let controller = NoteController::new(&state);
    let response = controller.create(request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn update_note(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
    ValidatedJson(request): ValidatedJson<NoteRequest>,
) -> Result<Json<Note>, AppError> {
    let controller = NoteController::new(&state);
    let response = controller.update(id, request).await?;
    Ok(Json(response))
}

async fn delete_note(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
) -> Result<StatusCode, AppError> {
    let controller = NoteController::new(&state);
    controller.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
