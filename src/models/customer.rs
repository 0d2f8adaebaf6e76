//! Modelo de Customer y Vehicle
//!
//! Un cliente es dueño de sus vehículos (1:N). El nombre del cliente actúa
//! como clave natural y es único en la tabla `customers`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Customer principal - mapea a la tabla customers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Customer {
    pub id: i32,
    pub name: String,
    pub phone: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Vehicle - mapea a la tabla vehicles
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Vehicle {
    pub id: i32,
    pub customer_id: i32,
    pub model: String,
    pub plate: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Cliente con la lista de sus vehículos
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerWithVehicles {
    #[serde(flatten)]
    pub customer: Customer,
    pub vehicles: Vec<Vehicle>,
}
