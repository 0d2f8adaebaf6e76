use crate::dto::dashboard_dto::HistoryQuery;
use crate::models::{GalleryView, HistoryEntry};
use crate::repositories::Repositories;
use crate::state::AppState;
use crate::utils::errors::{AppError, AppResult};

/// Servicios anteriores mostrados en la galería
pub const HISTORY_LIMIT: i64 = 5;

fn gallery_not_found() -> AppError {
    AppError::NotFound("Galeria não encontrada.".to_string())
}

/// Controlador de la galería pública (solo lectura)
pub struct GalleryController {
    repos: Repositories,
}

impl GalleryController {
    pub fn new(state: &AppState) -> Self {
        Self {
            repos: state.repos.clone(),
        }
    }

    pub async fn view(&self, gallery_id: &str) -> AppResult<GalleryView> {
        let detail = self
            .repos
            .services
            .find_by_gallery_id(gallery_id)
            .await?
            .ok_or_else(gallery_not_found)?;
        Ok(GalleryView::from_detail(gallery_id.to_string(), detail))
    }

    /// Historial del cliente resuelto desde la galería, sin exponer ids internos
    pub async fn history_by_gallery(&self, gallery_id: &str) -> AppResult<Vec<HistoryEntry>> {
        let detail = self
            .repos
            .services
            .find_by_gallery_id(gallery_id)
            .await?
            .ok_or_else(gallery_not_found)?;
        self.repos
            .services
            .customer_history(detail.appointment.customer.id, detail.service.id, HISTORY_LIMIT)
            .await
    }

    pub async fn history(&self, customer_id: i32, query: HistoryQuery) -> AppResult<Vec<HistoryEntry>> {
        let current = query
            .current_service_id
            .as_deref()
            .map(str::trim)
            .filter(|raw| !raw.is_empty())
            .ok_or_else(|| AppError::Validation("ID do serviço atual é obrigatório.".to_string()))?
            .parse::<i32>()
            .map_err(|_| AppError::Validation("ID do serviço atual inválido.".to_string()))?;

        self.repos
            .services
            .customer_history(customer_id, current, HISTORY_LIMIT)
            .await
    }
}
