use tracing::{info, warn};

use crate::cache::{View, ViewNotifier};
use crate::dto::blank_to_none;
use crate::dto::customer_dto::CreateVehicleRequest;
use crate::models::Vehicle;
use crate::repositories::Repositories;
use crate::state::AppState;
use crate::utils::errors::{AppError, AppResult};

pub struct VehicleController {
    repos: Repositories,
    views: ViewNotifier,
}

impl VehicleController {
    pub fn new(state: &AppState) -> Self {
        Self {
            repos: state.repos.clone(),
            views: state.views.clone(),
        }
    }

    pub async fn create(&self, request: CreateVehicleRequest) -> AppResult<Vehicle> {
        if self.repos.customers.find_by_id(request.customer_id).await?.is_none() {
            return Err(AppError::NotFound("Cliente não encontrado.".to_string()));
        }

        let plate = blank_to_none(request.plate);
        let vehicle = self
            .repos
            .vehicles
            .create(request.customer_id, request.model.trim(), plate.as_deref())
            .await?;

        info!("🚗 Carro {} agregado al cliente {}", vehicle.id, vehicle.customer_id);
        self.views.invalidate(&[View::Customers]).await;
        Ok(vehicle)
    }

    /// Borrar un vehículo sin agendamientos
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        if self.repos.vehicles.find_by_id(id).await?.is_none() {
            return Err(AppError::NotFound("Carro não encontrado.".to_string()));
        }

        let appointments = self.repos.vehicles.count_appointments(id).await?;
        if appointments > 0 {
            warn!("⚠️ Carro {} tiene {} agendamientos; no se borra", id, appointments);
            return Err(AppError::Dependency(
                "Não é possível excluir o carro, pois ele possui agendamentos vinculados.".to_string(),
            ));
        }

        if !self.repos.vehicles.delete(id).await? {
            return Err(AppError::NotFound("Carro não encontrado.".to_string()));
        }

        info!("🗑️ Carro {} eliminado", id);
        self.views.invalidate(&[View::Customers]).await;
        Ok(())
    }
}
