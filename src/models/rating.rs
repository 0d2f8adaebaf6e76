//! Modelo de Rating
//!
//! Evaluación del cliente (1 a 5 estrellas). A lo sumo una por servicio e
//! inmutable una vez creada.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::service::ServiceDetail;

/// Rating - mapea a la tabla ratings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Rating {
    pub id: i32,
    pub service_id: i32,
    pub stars: i16,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Evaluación con su servicio, agendamiento, cliente y vehículo
#[derive(Debug, Clone, Serialize)]
pub struct RatingDetail {
    #[serde(flatten)]
    pub rating: Rating,
    pub service: ServiceDetail,
}
