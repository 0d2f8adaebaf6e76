//! Modelos de la galería pública
//!
//! La galería se expone solo por su identificador público; nunca lleva los
//! ids internos del servicio, agendamiento o cliente.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::rating::Rating;
use super::service::{Checklist, ServiceDetail};

/// Resumen público de la evaluación
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublicRating {
    pub stars: i16,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<Rating> for PublicRating {
    fn from(rating: Rating) -> Self {
        Self {
            stars: rating.stars,
            comment: rating.comment,
            created_at: rating.created_at,
        }
    }
}

/// Vista pública de un servicio
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GalleryView {
    pub gallery_id: String,
    pub customer_name: String,
    pub vehicle_model: String,
    pub vehicle_plate: Option<String>,
    pub photos: Vec<String>,
    pub notes: Option<String>,
    pub checklist: Checklist,
    pub additional_services: Option<String>,
    pub price: Option<Decimal>,
    pub completed_at: Option<DateTime<Utc>>,
    pub rating: Option<PublicRating>,
}

impl GalleryView {
    pub fn from_detail(gallery_id: String, detail: ServiceDetail) -> Self {
        let ServiceDetail { service, appointment, rating } = detail;
        Self {
            gallery_id,
            customer_name: appointment.customer.name,
            vehicle_model: appointment.vehicle.model,
            vehicle_plate: appointment.vehicle.plate,
            completed_at: service.state.completed_at(),
            photos: service.photos,
            notes: service.notes,
            checklist: service.checklist,
            additional_services: service.additional_services,
            price: service.price,
            rating: rating.map(PublicRating::from),
        }
    }
}

/// Servicio anterior del mismo cliente con galería propia
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub gallery_id: String,
    pub completed_at: DateTime<Utc>,
    pub vehicle_model: String,
    pub vehicle_plate: Option<String>,
    pub photos: Vec<String>,
}
