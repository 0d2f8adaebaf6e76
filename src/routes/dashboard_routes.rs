use axum::{extract::State, routing::get, Json, Router};

use crate::controllers::DashboardController;
use crate::dto::dashboard_dto::DashboardQuery;
use crate::models::{DaySummary, FullDashboard};
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::extractors::ApiQuery;

pub fn create_dashboard_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_summary))
        .route("/full", get(get_full_dashboard))
}

async fn get_summary(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<DashboardQuery>,
) -> Result<Json<DaySummary>, AppError> {
    let controller = DashboardController::new(&state);
    let response = controller.summary(query).await?;
    Ok(Json(response))
}

async fn get_full_dashboard(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<DashboardQuery>,
) -> Result<Json<FullDashboard>, AppError> {
    let controller = DashboardController::new(&state);
    let response = controller.full(query).await?;
    Ok(Json(response))
}
