use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use crate::cache::{View, ViewNotifier};
use crate::config::EnvironmentConfig;
use crate::dto::service_dto::{
    AssignGalleryRequest, RequestedStatus, StartServiceRequest, UpdateServiceRequest,
};
use crate::models::service::default_checklist;
use crate::models::{Service, ServiceChanges, ServiceDetail, ServiceState};
use crate::repositories::Repositories;
use crate::services::notification_service::gallery_url;
use crate::services::{compose_share_message, resolve_gallery_token, ShareInput, ShareMessage};
use crate::state::AppState;
use crate::utils::errors::{AppError, AppResult};
use crate::utils::validation::{digits_only, parse_price, validate_datetime};

/// Vistas afectadas por el progreso de un servicio
const SERVICE_VIEWS: [View; 4] = [View::Services, View::Agenda, View::Dashboard, View::Gallery];

fn service_not_found() -> AppError {
    AppError::NotFound("Serviço não encontrado.".to_string())
}

/// Nuevo estado a partir del actual y del pedido. Un servicio concluido no
/// vuelve a andamento.
fn next_state(
    current: ServiceState,
    requested: Option<RequestedStatus>,
    completed_at: Option<chrono::DateTime<Utc>>,
    now: chrono::DateTime<Utc>,
) -> AppResult<ServiceState> {
    match (requested, current) {
        (None, state) => Ok(state),
        (Some(RequestedStatus::Completed), state) => Ok(state.complete(completed_at, now)),
        (Some(RequestedStatus::InProgress), ServiceState::Completed { .. }) => Err(
            AppError::Validation("Um serviço concluído não pode voltar para andamento.".to_string()),
        ),
        (Some(RequestedStatus::InProgress), _) => Ok(ServiceState::InProgress),
    }
}

pub struct ServiceController {
    repos: Repositories,
    views: ViewNotifier,
    config: Arc<EnvironmentConfig>,
}

impl ServiceController {
    pub fn new(state: &AppState) -> Self {
        Self {
            repos: state.repos.clone(),
            views: state.views.clone(),
            config: state.config.clone(),
        }
    }

    pub async fn list(&self) -> AppResult<Vec<ServiceDetail>> {
        self.repos.services.list().await
    }

    pub async fn get(&self, id: i32) -> AppResult<ServiceDetail> {
        self.repos
            .services
            .find_detail(id)
            .await?
            .ok_or_else(service_not_found)
    }

    /// Iniciar el servicio de un agendamiento. Idempotente: devuelve el
    /// servicio existente y `false` si ya había uno.
    pub async fn start(&self, request: StartServiceRequest) -> AppResult<(Service, bool)> {
        if self
            .repos
            .appointments
            .find_by_id(request.appointment_id)
            .await?
            .is_none()
        {
            return Err(AppError::NotFound("Agendamento não encontrado.".to_string()));
        }

        let (service, created) = self
            .repos
            .services
            .create_started(request.appointment_id, Utc::now(), &default_checklist())
            .await?;

        if created {
            info!("🧽 Servicio {} iniciado (agendamiento {})", service.id, request.appointment_id);
            self.views.invalidate(&SERVICE_VIEWS).await;
        }
        Ok((service, created))
    }

    /// Guardar progreso o concluir el servicio
    pub async fn update(&self, id: i32, request: UpdateServiceRequest) -> AppResult<ServiceDetail> {
        let mut service = self
            .repos
            .services
            .find_by_id(id)
            .await?
            .ok_or_else(service_not_found)?;

        let price = parse_price(request.price.as_ref()).map_err(|_| {
            AppError::Validation("Valor inválido: informe um número positivo.".to_string())
        })?;
        let completed_at = match request.completed_at.as_deref().map(str::trim) {
            Some(raw) if !raw.is_empty() => Some(validate_datetime(raw).map_err(|_| {
                AppError::Validation("Data de conclusão inválida.".to_string())
            })?),
            _ => None,
        };

        let was_completed = service.state.is_completed();
        service.state = next_state(service.state, request.status, completed_at, Utc::now())?;
        service.apply(ServiceChanges {
            notes: request.notes,
            checklist: request.checklist,
            photos: request.photos,
            price,
            additional_services: request.additional_services,
        });

        self.repos.services.save(&service).await?;

        if service.state.is_completed() && !was_completed {
            info!("✅ Servicio {} concluido", id);
        } else {
            info!("💾 Servicio {} guardado", id);
        }
        self.views.invalidate(&SERVICE_VIEWS).await;

        self.get(id).await
    }

    /// Asignar el identificador público de la galería. Una vez asignado no
    /// cambia: llamadas posteriores lo devuelven tal cual.
    pub async fn assign_gallery(&self, id: i32, request: AssignGalleryRequest) -> AppResult<Service> {
        let service = self
            .repos
            .services
            .find_by_id(id)
            .await?
            .ok_or_else(service_not_found)?;

        if service.gallery_id.is_some() {
            return Ok(service);
        }
        if !service.state.is_completed() {
            warn!("⚠️ Galería pedida para servicio {} no concluido", id);
            return Err(AppError::Validation(
                "A galeria só pode ser criada para serviços concluídos.".to_string(),
            ));
        }

        let token = resolve_gallery_token(request.gallery_id.as_deref())?;
        let service = self
            .repos
            .services
            .assign_gallery_id(id, &token)
            .await?
            .ok_or_else(service_not_found)?;

        info!("🖼️ Galería asignada al servicio {}", id);
        self.views.invalidate(&[View::Services, View::Gallery]).await;
        Ok(service)
    }

    /// Mensaje de entrega con el link de la galería (asignada si falta)
    pub async fn share(&self, id: i32) -> AppResult<ShareMessage> {
        let detail = self.get(id).await?;
        let customer = &detail.appointment.customer;

        let has_phone = customer
            .phone
            .as_deref()
            .map(|phone| !digits_only(phone).is_empty())
            .unwrap_or(false);
        if !has_phone {
            return Err(AppError::Validation(
                "Este cliente não possui um número de telefone cadastrado.".to_string(),
            ));
        }

        let gallery_id = match detail.service.gallery_id.clone() {
            Some(gallery_id) => gallery_id,
            None => self
                .assign_gallery(id, AssignGalleryRequest::default())
                .await?
                .gallery_id
                .ok_or_else(|| AppError::Internal("galería no asignada".to_string()))?,
        };

        compose_share_message(&ShareInput {
            shop_name: &self.config.shop_name,
            customer_name: &customer.name,
            phone: customer.phone.as_deref(),
            checklist: &detail.service.checklist,
            additional_services: detail.service.additional_services.as_deref(),
            price: detail.service.price,
            gallery_url: gallery_url(&self.config.gallery_base_url, &gallery_id),
        })
    }
}
