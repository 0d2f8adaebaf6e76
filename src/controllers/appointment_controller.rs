use tracing::{info, warn};

use crate::cache::{View, ViewNotifier};
use crate::dto::appointment_dto::AppointmentRequest;
use crate::models::{Appointment, AppointmentDetail, AppointmentFull, AppointmentInput};
use crate::repositories::Repositories;
use crate::state::AppState;
use crate::utils::errors::{AppError, AppResult};
use crate::utils::validation::validate_datetime;

const SLOT_TAKEN: &str = "Este horário já está ocupado. Por favor, escolha outro.";

/// Vistas afectadas por cualquier cambio en la agenda
const AGENDA_VIEWS: [View; 4] = [View::Agenda, View::Services, View::Dashboard, View::Gallery];

pub struct AppointmentController {
    repos: Repositories,
    views: ViewNotifier,
}

impl AppointmentController {
    pub fn new(state: &AppState) -> Self {
        Self {
            repos: state.repos.clone(),
            views: state.views.clone(),
        }
    }

    pub async fn list(&self) -> AppResult<Vec<AppointmentDetail>> {
        self.repos.appointments.list().await
    }

    pub async fn get(&self, id: i32) -> AppResult<AppointmentFull> {
        self.repos
            .appointments
            .find_full(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Agendamento não encontrado.".to_string()))
    }

    /// Validar el request: instante bien formado, cliente y carro existentes y
    /// el carro perteneciente al cliente
    async fn validated_input(&self, request: AppointmentRequest) -> AppResult<AppointmentInput> {
        let scheduled_at = validate_datetime(request.scheduled_at.trim()).map_err(|_| {
            AppError::Validation(
                "Data e hora inválidas: use o formato ISO 8601 (ex.: 2025-03-10T09:00:00-03:00)."
                    .to_string(),
            )
        })?;

        if self.repos.customers.find_by_id(request.customer_id).await?.is_none() {
            return Err(AppError::NotFound("Cliente não encontrado.".to_string()));
        }
        let vehicle = self
            .repos
            .vehicles
            .find_by_id(request.vehicle_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Carro não encontrado.".to_string()))?;
        if vehicle.customer_id != request.customer_id {
            return Err(AppError::Validation(
                "O carro informado não pertence a este cliente.".to_string(),
            ));
        }

        Ok(AppointmentInput {
            scheduled_at,
            customer_id: request.customer_id,
            vehicle_id: request.vehicle_id,
        })
    }

    /// Crear un agendamiento si el instante exacto está libre
    pub async fn create(&self, request: AppointmentRequest) -> AppResult<Appointment> {
        let input = self.validated_input(request).await?;

        if self.repos.appointments.exists_at(input.scheduled_at).await? {
            warn!("⚠️ Horario ocupado: {}", input.scheduled_at);
            return Err(AppError::Conflict(SLOT_TAKEN.to_string()));
        }

        // La constraint UNIQUE cubre la carrera entre la verificación y el INSERT
        let appointment = self.repos.appointments.create(&input).await?;

        info!("📅 Agendamiento {} creado para {}", appointment.id, appointment.scheduled_at);
        self.views.invalidate(&AGENDA_VIEWS).await;
        Ok(appointment)
    }

    /// Editar un agendamiento. No se repite la verificación de horario: una
    /// colisión exacta la rechaza la base como conflicto.
    pub async fn update(&self, id: i32, request: AppointmentRequest) -> AppResult<Appointment> {
        if self.repos.appointments.find_by_id(id).await?.is_none() {
            return Err(AppError::NotFound("Agendamento não encontrado.".to_string()));
        }
        let input = self.validated_input(request).await?;

        let appointment = self
            .repos
            .appointments
            .update(id, &input)
            .await?
            .ok_or_else(|| AppError::NotFound("Agendamento não encontrado.".to_string()))?;

        info!("📅 Agendamiento {} actualizado", id);
        self.views.invalidate(&AGENDA_VIEWS).await;
        Ok(appointment)
    }

    /// Borrar el agendamiento junto con su servicio y evaluación
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        if !self.repos.appointments.delete(id).await? {
            return Err(AppError::NotFound("Agendamento não encontrado.".to_string()));
        }

        info!("🗑️ Agendamiento {} eliminado", id);
        self.views
            .invalidate(&[View::Agenda, View::Services, View::Dashboard, View::Gallery, View::Ratings])
            .await;
        Ok(())
    }
}
