use async_trait::async_trait;
use sqlx::PgPool;

use super::{rows, RatingRepository};
use crate::models::{Rating, RatingDetail};
use crate::utils::errors::{AppError, AppResult};

pub struct PgRatingRepository {
    pool: PgPool,
}

impl PgRatingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RatingRepository for PgRatingRepository {
    async fn list(&self) -> AppResult<Vec<RatingDetail>> {
        let sql = format!(
            "{} WHERE r.id IS NOT NULL ORDER BY r.created_at DESC",
            rows::SERVICE_DETAIL_SELECT
        );
        let records = sqlx::query(&sql).fetch_all(&self.pool).await?;

        let mut ratings = Vec::with_capacity(records.len());
        for row in &records {
            let rating = rows::rating(row, "r_")?;
            let service = rows::service_detail(row)?;
            ratings.push(RatingDetail { rating, service });
        }
        Ok(ratings)
    }

    async fn find_by_service(&self, service_id: i32) -> AppResult<Option<Rating>> {
        let rating = sqlx::query_as::<_, Rating>("SELECT * FROM ratings WHERE service_id = $1")
            .bind(service_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(rating)
    }

    async fn create(&self, service_id: i32, stars: i16, comment: Option<&str>) -> AppResult<Rating> {
        let rating = sqlx::query_as::<_, Rating>(
            r#"
            INSERT INTO ratings (service_id, stars, comment)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(service_id)
        .bind(stars)
        .bind(comment)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::from_db(e, "Este serviço já foi avaliado.", "Serviço não encontrado.")
        })?;

        Ok(rating)
    }
}
