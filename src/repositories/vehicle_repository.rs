use async_trait::async_trait;
use sqlx::PgPool;

use super::VehicleRepository;
use crate::models::Vehicle;
use crate::utils::errors::{AppError, AppResult};

pub struct PgVehicleRepository {
    pool: PgPool,
}

impl PgVehicleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VehicleRepository for PgVehicleRepository {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Vehicle>> {
        let vehicle = sqlx::query_as::<_, Vehicle>("SELECT * FROM vehicles WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(vehicle)
    }

    async fn create(&self, customer_id: i32, model: &str, plate: Option<&str>) -> AppResult<Vehicle> {
        let vehicle = sqlx::query_as::<_, Vehicle>(
            "INSERT INTO vehicles (customer_id, model, plate) VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(customer_id)
        .bind(model)
        .bind(plate)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::from_db(e, "Veículo duplicado.", "Cliente não encontrado."))?;

        Ok(vehicle)
    }

    async fn count_appointments(&self, id: i32) -> AppResult<i64> {
        let result: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM appointments WHERE vehicle_id = $1")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;

        Ok(result.0)
    }

    async fn delete(&self, id: i32) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM vehicles WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| match AppError::from_db(e, "Veículo duplicado.", "") {
                // Un agendamiento creado entre el conteo y el DELETE dispara la FK RESTRICT
                AppError::NotFound(_) => AppError::Dependency(
                    "Não é possível excluir o carro, pois ele possui agendamentos vinculados.".to_string(),
                ),
                other => other,
            })?;

        Ok(result.rows_affected() > 0)
    }
}
