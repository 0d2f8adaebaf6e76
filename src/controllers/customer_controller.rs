use tracing::{info, warn};

use crate::cache::{View, ViewNotifier};
use crate::dto::blank_to_none;
use crate::dto::customer_dto::{CreateCustomerRequest, CustomerQuery, UpdateCustomerRequest};
use crate::models::{Customer, CustomerWithVehicles};
use crate::repositories::Repositories;
use crate::state::AppState;
use crate::utils::errors::{AppError, AppResult};

const DUPLICATE_NAME: &str = "Um cliente com este nome já existe.";

pub struct CustomerController {
    repos: Repositories,
    views: ViewNotifier,
}

impl CustomerController {
    pub fn new(state: &AppState) -> Self {
        Self {
            repos: state.repos.clone(),
            views: state.views.clone(),
        }
    }

    pub async fn search(&self, query: CustomerQuery) -> AppResult<Vec<CustomerWithVehicles>> {
        let filter = blank_to_none(query.name);
        self.repos.customers.search(filter.as_deref()).await
    }

    pub async fn get(&self, id: i32) -> AppResult<CustomerWithVehicles> {
        self.repos
            .customers
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Cliente não encontrado.".to_string()))
    }

    /// Alta de cliente con su primer vehículo
    pub async fn create(&self, request: CreateCustomerRequest) -> AppResult<CustomerWithVehicles> {
        let name = request.name.trim().to_string();

        if self.repos.customers.name_exists(&name, None).await? {
            warn!("⚠️ Cliente duplicado: {}", name);
            return Err(AppError::Conflict(DUPLICATE_NAME.to_string()));
        }

        let phone = blank_to_none(request.phone);
        let plate = blank_to_none(request.vehicle_plate);
        let created = self
            .repos
            .customers
            .create_with_vehicle(
                &name,
                phone.as_deref(),
                request.vehicle_model.trim(),
                plate.as_deref(),
            )
            .await?;

        info!("👤 Cliente creado: {} (id {})", created.customer.name, created.customer.id);
        self.views.invalidate(&[View::Customers]).await;
        Ok(created)
    }

    pub async fn update(&self, id: i32, request: UpdateCustomerRequest) -> AppResult<Customer> {
        let name = request.name.trim().to_string();

        if self.repos.customers.name_exists(&name, Some(id)).await? {
            warn!("⚠️ Nombre de cliente ya usado: {}", name);
            return Err(AppError::Conflict(DUPLICATE_NAME.to_string()));
        }

        let phone = blank_to_none(request.phone);
        let customer = self
            .repos
            .customers
            .update(id, &name, phone.as_deref())
            .await?
            .ok_or_else(|| AppError::NotFound("Cliente não encontrado.".to_string()))?;

        info!("👤 Cliente {} actualizado", id);
        self.views
            .invalidate(&[View::Customers, View::Agenda, View::Services, View::Dashboard, View::Gallery])
            .await;
        Ok(customer)
    }
}
