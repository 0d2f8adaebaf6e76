use tracing::{info, warn};

use crate::cache::{View, ViewNotifier};
use crate::dto::rating_dto::{CreateRatingRequest, PublicRatingRequest};
use crate::models::{Rating, RatingDetail};
use crate::repositories::Repositories;
use crate::state::AppState;
use crate::utils::errors::{validation_error, AppError, AppResult};
use crate::utils::validation::validate_range;

const RATING_VIEWS: [View; 3] = [View::Ratings, View::Services, View::Gallery];

fn already_rated() -> AppError {
    AppError::Conflict("Este serviço já foi avaliado.".to_string())
}

fn clean_comment(comment: Option<String>) -> Option<String> {
    comment
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty())
}

pub struct RatingController {
    repos: Repositories,
    views: ViewNotifier,
}

impl RatingController {
    pub fn new(state: &AppState) -> Self {
        Self {
            repos: state.repos.clone(),
            views: state.views.clone(),
        }
    }

    pub async fn list(&self) -> AppResult<Vec<RatingDetail>> {
        self.repos.ratings.list().await
    }

    pub async fn create(&self, request: CreateRatingRequest) -> AppResult<Rating> {
        if self.repos.services.find_by_id(request.service_id).await?.is_none() {
            return Err(AppError::NotFound("Serviço não encontrado.".to_string()));
        }
        self.insert(request.service_id, request.stars, request.comment).await
    }

    /// Evaluación enviada desde la galería pública
    pub async fn create_for_gallery(
        &self,
        gallery_id: &str,
        request: PublicRatingRequest,
    ) -> AppResult<Rating> {
        let detail = self
            .repos
            .services
            .find_by_gallery_id(gallery_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Galeria não encontrada.".to_string()))?;
        self.insert(detail.service.id, request.stars, request.comment).await
    }

    async fn insert(&self, service_id: i32, stars: i64, comment: Option<String>) -> AppResult<Rating> {
        validate_range(stars, 1, 5).map_err(|_| validation_error("A nota deve ser entre 1 e 5."))?;
        let stars = stars as i16;

        if self.repos.ratings.find_by_service(service_id).await?.is_some() {
            warn!("⚠️ Servicio {} ya evaluado", service_id);
            return Err(already_rated());
        }

        let comment = clean_comment(comment);
        let rating = self
            .repos
            .ratings
            .create(service_id, stars, comment.as_deref())
            .await?;

        info!("⭐ Evaluación {} estrellas para servicio {}", stars, service_id);
        self.views.invalidate(&RATING_VIEWS).await;
        Ok(rating)
    }
}
