use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};

use crate::controllers::CustomerController;
use crate::dto::customer_dto::{CreateCustomerRequest, CustomerQuery, UpdateCustomerRequest};
use crate::models::{Customer, CustomerWithVehicles};
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::extractors::{ApiPath, ApiQuery, ValidatedJson};

pub fn create_customer_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_customers))
        .route("/", post(create_customer))
        .route("/:id", get(get_customer).put(update_customer))
}

async fn list_customers(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<CustomerQuery>,
) -> Result<Json<Vec<CustomerWithVehicles>>, AppError> {
    let controller = CustomerController::new(&state);
    let response = controller.search(query).await?;
    Ok(Json(response))
}

async fn get_customer(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
) -> Result<Json<CustomerWithVehicles>, AppError> {
    let controller = CustomerController::new(&state);
    let response = controller.get(id).await?;
    Ok(Json(response))
}

async fn create_customer(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<CreateCustomerRequest>,
) -> Result<(StatusCode, Json<CustomerWithVehicles>), AppError> {
    let controller = CustomerController::new(&state);
    let response = controller.create(request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn update_customer(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
    ValidatedJson(request): ValidatedJson<UpdateCustomerRequest>,
) -> Result<Json<Customer>, AppError> {
    let controller = CustomerController::new(&state);
    let response = controller.update(id, request).await?;
    Ok(Json(response))
}
