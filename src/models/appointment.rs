//! Modelo de Appointment
//!
//! Un agendamiento es un instante exacto que vincula un cliente y un vehículo.
//! No se guarda duración; el schema garantiza un único agendamiento por instante.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::customer::{Customer, CustomerWithVehicles, Vehicle};
use super::service::Service;

/// Appointment - mapea a la tabla appointments
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Appointment {
    pub id: i32,
    pub scheduled_at: DateTime<Utc>,
    pub customer_id: i32,
    pub vehicle_id: i32,
    pub created_at: DateTime<Utc>,
}

/// Agendamiento con su cliente y vehículo
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppointmentDetail {
    #[serde(flatten)]
    pub appointment: Appointment,
    pub customer: Customer,
    pub vehicle: Vehicle,
}

/// Vista completa de un agendamiento: cliente con vehículos y servicio (si existe)
#[derive(Debug, Clone, Serialize)]
pub struct AppointmentFull {
    #[serde(flatten)]
    pub appointment: Appointment,
    pub customer: CustomerWithVehicles,
    pub vehicle: Vehicle,
    pub service: Option<Service>,
}

/// Datos validados para crear o actualizar un agendamiento
#[derive(Debug, Clone, PartialEq)]
pub struct AppointmentInput {
    pub scheduled_at: DateTime<Utc>,
    pub customer_id: i32,
    pub vehicle_id: i32,
}
