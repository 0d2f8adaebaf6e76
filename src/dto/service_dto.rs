use serde::Deserialize;
use validator::Validate;

use crate::models::Checklist;

#[derive(Debug, Deserialize, Validate)]
pub struct StartServiceRequest {
    #[validate(range(min = 1))]
    pub appointment_id: i32,
}

/// Estado pedido por el cliente al guardar el servicio
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestedStatus {
    InProgress,
    Completed,
}

/// Guardar progreso o concluir el servicio.
///
/// `price` acepta número o string; vacío o ausente limpia el precio.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateServiceRequest {
    pub status: Option<RequestedStatus>,
    #[validate(length(max = 5000))]
    pub notes: Option<String>,
    pub checklist: Option<Checklist>,
    #[validate(length(max = 100))]
    pub photos: Option<Vec<String>>,
    pub price: Option<serde_json::Value>,
    #[validate(length(max = 2000))]
    pub additional_services: Option<String>,
    pub completed_at: Option<String>,
}

/// Asignación del identificador público; sin `gallery_id` se genera uno
#[derive(Debug, Default, Deserialize, Validate)]
pub struct AssignGalleryRequest {
    pub gallery_id: Option<String>,
}
