use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use super::{rows, AppointmentRepository};
use crate::models::{Appointment, AppointmentDetail, AppointmentFull, AppointmentInput, CustomerWithVehicles, Service, Vehicle};
use crate::utils::errors::{AppError, AppResult};

pub(crate) const SLOT_TAKEN: &str = "Este horário já está ocupado. Por favor, escolha outro.";
pub(crate) const MISSING_REFERENCE: &str = "Cliente ou carro não encontrado.";

pub struct PgAppointmentRepository {
    pool: PgPool,
}

impl PgAppointmentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AppointmentRepository for PgAppointmentRepository {
    async fn list(&self) -> AppResult<Vec<AppointmentDetail>> {
        let sql = format!("{} ORDER BY a.scheduled_at ASC", rows::APPOINTMENT_DETAIL_SELECT);
        let records = sqlx::query(&sql).fetch_all(&self.pool).await?;

        let appointments = records
            .iter()
            .map(rows::appointment_detail)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(appointments)
    }

    async fn list_between(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> AppResult<Vec<AppointmentDetail>> {
        let sql = format!(
            "{} WHERE a.scheduled_at >= $1 AND a.scheduled_at < $2 ORDER BY a.scheduled_at ASC",
            rows::APPOINTMENT_DETAIL_SELECT
        );
        let records = sqlx::query(&sql)
            .bind(from)
            .bind(to)
            .fetch_all(&self.pool)
            .await?;

        let appointments = records
            .iter()
            .map(rows::appointment_detail)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(appointments)
    }

    async fn find_by_id(&self, id: i32) -> AppResult<Option<Appointment>> {
        let appointment = sqlx::query_as::<_, Appointment>("SELECT * FROM appointments WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(appointment)
    }

    async fn find_full(&self, id: i32) -> AppResult<Option<AppointmentFull>> {
        let sql = format!("{} WHERE a.id = $1", rows::APPOINTMENT_DETAIL_SELECT);
        let row = sqlx::query(&sql).bind(id).fetch_optional(&self.pool).await?;

        let Some(row) = row else {
            return Ok(None);
        };
        let detail = rows::appointment_detail(&row)?;

        let vehicles = sqlx::query_as::<_, Vehicle>(
            "SELECT * FROM vehicles WHERE customer_id = $1 ORDER BY id",
        )
        .bind(detail.customer.id)
        .fetch_all(&self.pool)
        .await?;

        let service_row = sqlx::query("SELECT * FROM services WHERE appointment_id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        let service: Option<Service> = service_row
            .as_ref()
            .map(|row| rows::service(row, ""))
            .transpose()?;

        Ok(Some(AppointmentFull {
            appointment: detail.appointment,
            customer: CustomerWithVehicles {
                customer: detail.customer,
                vehicles,
            },
            vehicle: detail.vehicle,
            service,
        }))
    }

    async fn exists_at(&self, instant: DateTime<Utc>) -> AppResult<bool> {
        let result: (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM appointments WHERE scheduled_at = $1)")
                .bind(instant)
                .fetch_one(&self.pool)
                .await?;

        Ok(result.0)
    }

    async fn create(&self, input: &AppointmentInput) -> AppResult<Appointment> {
        let appointment = sqlx::query_as::<_, Appointment>(
            r#"
            INSERT INTO appointments (scheduled_at, customer_id, vehicle_id)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(input.scheduled_at)
        .bind(input.customer_id)
        .bind(input.vehicle_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::from_db(e, SLOT_TAKEN, MISSING_REFERENCE))?;

        Ok(appointment)
    }

    async fn update(&self, id: i32, input: &AppointmentInput) -> AppResult<Option<Appointment>> {
        let appointment = sqlx::query_as::<_, Appointment>(
            r#"
            UPDATE appointments
            SET scheduled_at = $2, customer_id = $3, vehicle_id = $4
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(input.scheduled_at)
        .bind(input.customer_id)
        .bind(input.vehicle_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::from_db(e, SLOT_TAKEN, MISSING_REFERENCE))?;

        Ok(appointment)
    }

    async fn delete(&self, id: i32) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM appointments WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
