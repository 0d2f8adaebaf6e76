use async_trait::async_trait;
use sqlx::PgPool;

use super::CustomerRepository;
use crate::models::{Customer, CustomerWithVehicles, Vehicle};
use crate::utils::errors::{AppError, AppResult};

pub(crate) const DUPLICATE_NAME: &str = "Um cliente com este nome já existe.";

pub struct PgCustomerRepository {
    pool: PgPool,
}

impl PgCustomerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn vehicles_of(&self, customer_ids: &[i32]) -> AppResult<Vec<Vehicle>> {
        let vehicles = sqlx::query_as::<_, Vehicle>(
            "SELECT * FROM vehicles WHERE customer_id = ANY($1) ORDER BY id",
        )
        .bind(customer_ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(vehicles)
    }
}

/// Escapar comodines de LIKE para buscar el texto literal
fn like_pattern(filter: &str) -> String {
    let escaped = filter
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{}%", escaped)
}

/// Agrupar vehículos bajo su cliente conservando el orden de los clientes
pub(crate) fn attach_vehicles(customers: Vec<Customer>, vehicles: Vec<Vehicle>) -> Vec<CustomerWithVehicles> {
    customers
        .into_iter()
        .map(|customer| {
            let own = vehicles
                .iter()
                .filter(|v| v.customer_id == customer.id)
                .cloned()
                .collect();
            CustomerWithVehicles { customer, vehicles: own }
        })
        .collect()
}

#[async_trait]
impl CustomerRepository for PgCustomerRepository {
    async fn search(&self, name_filter: Option<&str>) -> AppResult<Vec<CustomerWithVehicles>> {
        let pattern = like_pattern(name_filter.unwrap_or_default());
        let customers = sqlx::query_as::<_, Customer>(
            "SELECT * FROM customers WHERE name ILIKE $1 ORDER BY name",
        )
        .bind(pattern)
        .fetch_all(&self.pool)
        .await?;

        let ids: Vec<i32> = customers.iter().map(|c| c.id).collect();
        let vehicles = self.vehicles_of(&ids).await?;
        Ok(attach_vehicles(customers, vehicles))
    }

    async fn find_by_id(&self, id: i32) -> AppResult<Option<CustomerWithVehicles>> {
        let customer = sqlx::query_as::<_, Customer>("SELECT * FROM customers WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        match customer {
            Some(customer) => {
                let vehicles = self.vehicles_of(&[customer.id]).await?;
                Ok(Some(CustomerWithVehicles { customer, vehicles }))
            }
            None => Ok(None),
        }
    }

    async fn name_exists(&self, name: &str, exclude_id: Option<i32>) -> AppResult<bool> {
        let result: (bool,) = sqlx::query_as(
            "SELECT EXISTS(SELECT 1 FROM customers WHERE name = $1 AND ($2::INT IS NULL OR id <> $2))",
        )
        .bind(name)
        .bind(exclude_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(result.0)
    }

    async fn create_with_vehicle(
        &self,
        name: &str,
        phone: Option<&str>,
        model: &str,
        plate: Option<&str>,
    ) -> AppResult<CustomerWithVehicles> {
        let mut tx = self.pool.begin().await?;

        let customer = sqlx::query_as::<_, Customer>(
            "INSERT INTO customers (name, phone) VALUES ($1, $2) RETURNING *",
        )
        .bind(name)
        .bind(phone)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| AppError::from_db(e, DUPLICATE_NAME, "Cliente não encontrado."))?;

        let vehicle = sqlx::query_as::<_, Vehicle>(
            "INSERT INTO vehicles (customer_id, model, plate) VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(customer.id)
        .bind(model)
        .bind(plate)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(CustomerWithVehicles {
            customer,
            vehicles: vec![vehicle],
        })
    }

    async fn update(&self, id: i32, name: &str, phone: Option<&str>) -> AppResult<Option<Customer>> {
        let customer = sqlx::query_as::<_, Customer>(
            "UPDATE customers SET name = $2, phone = $3 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(name)
        .bind(phone)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::from_db(e, DUPLICATE_NAME, "Cliente não encontrado."))?;

        Ok(customer)
    }
}
