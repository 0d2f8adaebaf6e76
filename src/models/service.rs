//! Modelo de Service
//!
//! Un servicio es la orden de trabajo de un agendamiento (0 o 1 por agendamiento).
//! El estado es un tipo suma: un servicio completado siempre lleva su instante
//! de conclusión y ningún otro estado lo tiene.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::appointment::AppointmentDetail;
use super::rating::Rating;

/// Checklist: nombre de la tarea → realizada
pub type Checklist = BTreeMap<String, bool>;

/// Tareas con las que nace el checklist de todo servicio nuevo
pub const DEFAULT_CHECKLIST_ITEMS: [&str; 5] = [
    "Lavagem Externa",
    "Limpeza Interna",
    "Aspirador",
    "Pretinho",
    "Cera",
];

/// Valor de la columna `status` para servicios en andamento
pub const STATUS_IN_PROGRESS: &str = "in_progress";
/// Valor de la columna `status` para servicios concluidos
pub const STATUS_COMPLETED: &str = "completed";

/// Checklist inicial con todas las tareas pendientes
pub fn default_checklist() -> Checklist {
    DEFAULT_CHECKLIST_ITEMS
        .iter()
        .map(|item| (item.to_string(), false))
        .collect()
}

/// Estado del ciclo de vida del servicio
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ServiceState {
    NotStarted,
    InProgress,
    Completed { completed_at: DateTime<Utc> },
}

impl ServiceState {
    /// Reconstruir el estado desde las columnas `status` y `completed_at`
    pub fn from_columns(
        status: Option<&str>,
        completed_at: Option<DateTime<Utc>>,
    ) -> Result<Self, String> {
        match (status, completed_at) {
            (None, None) => Ok(ServiceState::NotStarted),
            (Some(STATUS_IN_PROGRESS), None) => Ok(ServiceState::InProgress),
            (Some(STATUS_COMPLETED), Some(completed_at)) => {
                Ok(ServiceState::Completed { completed_at })
            }
            (status, completed_at) => Err(format!(
                "estado de serviço inconsistente: status={:?} completed_at={:?}",
                status, completed_at
            )),
        }
    }

    /// Valor persistido en la columna `status`
    pub fn status_column(&self) -> Option<&'static str> {
        match self {
            ServiceState::NotStarted => None,
            ServiceState::InProgress => Some(STATUS_IN_PROGRESS),
            ServiceState::Completed { .. } => Some(STATUS_COMPLETED),
        }
    }

    /// Instante de conclusión, presente solo si el servicio está completado
    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        match self {
            ServiceState::Completed { completed_at } => Some(*completed_at),
            _ => None,
        }
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, ServiceState::Completed { .. })
    }

    /// Transición a completado.
    ///
    /// Un servicio ya completado conserva su instante original salvo que se
    /// informe uno explícito.
    pub fn complete(self, supplied: Option<DateTime<Utc>>, now: DateTime<Utc>) -> Self {
        let completed_at = match (self, supplied) {
            (_, Some(instant)) => instant,
            (ServiceState::Completed { completed_at }, None) => completed_at,
            (_, None) => now,
        };
        ServiceState::Completed { completed_at }
    }
}

/// Service - mapea a la tabla services
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Service {
    pub id: i32,
    pub appointment_id: i32,
    #[serde(flatten)]
    pub state: ServiceState,
    pub notes: Option<String>,
    pub checklist: Checklist,
    pub photos: Vec<String>,
    pub price: Option<Decimal>,
    pub additional_services: Option<String>,
    pub started_at: DateTime<Utc>,
    pub gallery_id: Option<String>,
}

/// Servicio con agendamiento, cliente, vehículo y evaluación
#[derive(Debug, Clone, Serialize)]
pub struct ServiceDetail {
    #[serde(flatten)]
    pub service: Service,
    pub appointment: AppointmentDetail,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<Rating>,
}

/// Cambios de progreso ya validados
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ServiceChanges {
    pub notes: Option<String>,
    pub checklist: Option<Checklist>,
    pub photos: Option<Vec<String>>,
    pub price: Option<Decimal>,
    pub additional_services: Option<String>,
}

impl Service {
    /// Aplicar cambios de progreso: campos ausentes se conservan excepto el
    /// precio, que se limpia cuando no viene informado.
    pub fn apply(&mut self, changes: ServiceChanges) {
        if let Some(notes) = changes.notes {
            self.notes = Some(notes);
        }
        if let Some(checklist) = changes.checklist {
            self.checklist = checklist;
        }
        if let Some(photos) = changes.photos {
            self.photos = photos;
        }
        if let Some(additional) = changes.additional_services {
            self.additional_services = Some(additional);
        }
        self.price = changes.price;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn instant(h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 10, h, 0, 0).unwrap()
    }

    #[test]
    fn test_state_from_columns() {
        assert_eq!(ServiceState::from_columns(None, None), Ok(ServiceState::NotStarted));
        assert_eq!(
            ServiceState::from_columns(Some("in_progress"), None),
            Ok(ServiceState::InProgress)
        );
        assert_eq!(
            ServiceState::from_columns(Some("completed"), Some(instant(9))),
            Ok(ServiceState::Completed { completed_at: instant(9) })
        );
        assert!(ServiceState::from_columns(Some("completed"), None).is_err());
        assert!(ServiceState::from_columns(Some("in_progress"), Some(instant(9))).is_err());
        assert!(ServiceState::from_columns(None, Some(instant(9))).is_err());
    }

    #[test]
    fn test_completion_keeps_original_instant() {
        let done = ServiceState::InProgress.complete(None, instant(10));
        assert_eq!(done.completed_at(), Some(instant(10)));

        let again = done.complete(None, instant(15));
        assert_eq!(again.completed_at(), Some(instant(10)));

        let overridden = again.complete(Some(instant(8)), instant(15));
        assert_eq!(overridden.completed_at(), Some(instant(8)));
    }

    #[test]
    fn test_status_serialization_is_flat() {
        let service = Service {
            id: 1,
            appointment_id: 7,
            state: ServiceState::Completed { completed_at: instant(11) },
            notes: None,
            checklist: default_checklist(),
            photos: vec![],
            price: None,
            additional_services: None,
            started_at: instant(9),
            gallery_id: None,
        };
        let json = serde_json::to_value(&service).unwrap();
        assert_eq!(json["status"], "completed");
        assert_eq!(json["completed_at"], "2025-03-10T11:00:00Z");
        assert_eq!(json["checklist"]["Cera"], false);
    }

    #[test]
    fn test_apply_clears_missing_price() {
        let mut service = Service {
            id: 1,
            appointment_id: 7,
            state: ServiceState::InProgress,
            notes: Some("riscos na porta".into()),
            checklist: default_checklist(),
            photos: vec!["a.jpg".into()],
            price: Some(Decimal::new(50, 0)),
            additional_services: None,
            started_at: instant(9),
            gallery_id: None,
        };
        service.apply(ServiceChanges {
            photos: Some(vec!["a.jpg".into(), "b.jpg".into()]),
            ..Default::default()
        });
        assert_eq!(service.notes.as_deref(), Some("riscos na porta"));
        assert_eq!(service.photos.len(), 2);
        assert_eq!(service.price, None);
    }
}
