use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::{PgPool, Row};

use super::{rows, ServiceRepository};
use crate::models::{Checklist, CompletedService, HistoryEntry, Service, ServiceDetail};
use crate::utils::errors::{AppError, AppResult};

pub(crate) const GALLERY_TAKEN: &str = "Este identificador de galeria já está em uso.";

pub struct PgServiceRepository {
    pool: PgPool,
}

impl PgServiceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn fetch_service(&self, sql: &str, id: i32) -> AppResult<Option<Service>> {
        let row = sqlx::query(sql).bind(id).fetch_optional(&self.pool).await?;
        let service = row.as_ref().map(|row| rows::service(row, "")).transpose()?;
        Ok(service)
    }
}

#[async_trait]
impl ServiceRepository for PgServiceRepository {
    async fn list(&self) -> AppResult<Vec<ServiceDetail>> {
        let sql = format!("{} ORDER BY s.started_at DESC", rows::SERVICE_DETAIL_SELECT);
        let records = sqlx::query(&sql).fetch_all(&self.pool).await?;

        let services = records
            .iter()
            .map(rows::service_detail)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(services)
    }

    async fn find_by_id(&self, id: i32) -> AppResult<Option<Service>> {
        self.fetch_service("SELECT * FROM services WHERE id = $1", id).await
    }

    async fn find_detail(&self, id: i32) -> AppResult<Option<ServiceDetail>> {
        let sql = format!("{} WHERE s.id = $1", rows::SERVICE_DETAIL_SELECT);
        let row = sqlx::query(&sql).bind(id).fetch_optional(&self.pool).await?;
        Ok(row.as_ref().map(rows::service_detail).transpose()?)
    }

    async fn find_by_appointment(&self, appointment_id: i32) -> AppResult<Option<Service>> {
        self.fetch_service("SELECT * FROM services WHERE appointment_id = $1", appointment_id)
            .await
    }

    async fn find_by_gallery_id(&self, gallery_id: &str) -> AppResult<Option<ServiceDetail>> {
        let sql = format!("{} WHERE s.gallery_id = $1", rows::SERVICE_DETAIL_SELECT);
        let row = sqlx::query(&sql)
            .bind(gallery_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.as_ref().map(rows::service_detail).transpose()?)
    }

    async fn create_started(
        &self,
        appointment_id: i32,
        started_at: DateTime<Utc>,
        checklist: &Checklist,
    ) -> AppResult<(Service, bool)> {
        // ON CONFLICT hace que dos inicios simultáneos produzcan una sola fila
        let inserted = sqlx::query(
            r#"
            INSERT INTO services (appointment_id, status, checklist, started_at)
            VALUES ($1, 'in_progress', $2, $3)
            ON CONFLICT (appointment_id) DO NOTHING
            RETURNING *
            "#,
        )
        .bind(appointment_id)
        .bind(Json(checklist))
        .bind(started_at)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::from_db(e, "Serviço já existe.", "Agendamento não encontrado."))?;

        if let Some(row) = inserted {
            return Ok((rows::service(&row, "")?, true));
        }

        let existing = self
            .find_by_appointment(appointment_id)
            .await?
            .ok_or_else(|| AppError::Internal("serviço existente desapareceu".to_string()))?;
        Ok((existing, false))
    }

    async fn save(&self, service: &Service) -> AppResult<Service> {
        let row = sqlx::query(
            r#"
            UPDATE services SET
                status = $2,
                completed_at = $3,
                notes = $4,
                checklist = $5,
                photos = $6,
                price = $7,
                additional_services = $8
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(service.id)
        .bind(service.state.status_column())
        .bind(service.state.completed_at())
        .bind(&service.notes)
        .bind(Json(&service.checklist))
        .bind(&service.photos)
        .bind(service.price)
        .bind(&service.additional_services)
        .fetch_optional(&self.pool)
        .await?;

        let row = row.ok_or_else(|| AppError::NotFound("Serviço não encontrado.".to_string()))?;
        Ok(rows::service(&row, "")?)
    }

    async fn assign_gallery_id(&self, id: i32, gallery_id: &str) -> AppResult<Option<Service>> {
        let updated = sqlx::query(
            "UPDATE services SET gallery_id = $2 WHERE id = $1 AND gallery_id IS NULL RETURNING *",
        )
        .bind(id)
        .bind(gallery_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::from_db(e, GALLERY_TAKEN, "Serviço não encontrado."))?;

        match updated {
            Some(row) => Ok(Some(rows::service(&row, "")?)),
            // Ya tenía galería (o no existe): devolver el estado actual
            None => self.find_by_id(id).await,
        }
    }

    async fn list_completed_between(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> AppResult<Vec<CompletedService>> {
        let records = sqlx::query(
            r#"
            SELECT s.id, s.price, s.completed_at, c.name AS customer_name, v.model AS vehicle_model
            FROM services s
            JOIN appointments a ON a.id = s.appointment_id
            JOIN customers c ON c.id = a.customer_id
            JOIN vehicles v ON v.id = a.vehicle_id
            WHERE s.status = 'completed'
              AND s.completed_at >= $1
              AND s.completed_at < $2
            ORDER BY s.completed_at DESC
            "#,
        )
        .bind(from)
        .bind(to)
        .fetch_all(&self.pool)
        .await?;

        let services = records
            .iter()
            .map(|row| {
                Ok(CompletedService {
                    service_id: row.try_get("id")?,
                    customer_name: row.try_get("customer_name")?,
                    vehicle_model: row.try_get("vehicle_model")?,
                    price: row.try_get("price")?,
                    completed_at: row.try_get("completed_at")?,
                })
            })
            .collect::<Result<Vec<_>, sqlx::Error>>()?;
        Ok(services)
    }

    async fn customer_history(
        &self,
        customer_id: i32,
        exclude_service_id: i32,
        limit: i64,
    ) -> AppResult<Vec<HistoryEntry>> {
        let records = sqlx::query(
            r#"
            SELECT s.gallery_id, s.completed_at, s.photos, v.model, v.plate
            FROM services s
            JOIN appointments a ON a.id = s.appointment_id
            JOIN vehicles v ON v.id = a.vehicle_id
            WHERE s.status = 'completed'
              AND s.id <> $2
              AND a.customer_id = $1
              AND s.gallery_id IS NOT NULL
            ORDER BY s.completed_at DESC
            LIMIT $3
            "#,
        )
        .bind(customer_id)
        .bind(exclude_service_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        let history = records
            .iter()
            .map(|row| {
                Ok(HistoryEntry {
                    gallery_id: row.try_get("gallery_id")?,
                    completed_at: row.try_get("completed_at")?,
                    photos: row.try_get("photos")?,
                    vehicle_model: row.try_get("model")?,
                    vehicle_plate: row.try_get("plate")?,
                })
            })
            .collect::<Result<Vec<_>, sqlx::Error>>()?;
        Ok(history)
    }
}
