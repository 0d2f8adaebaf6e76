//! DTOs de request y response
//!
//! Los requests se deserializan y validan con `ValidatedJson`; los strings
//! opcionales vacíos se normalizan a `None` antes de llegar a los repositorios.

pub mod appointment_dto;
pub mod customer_dto;
pub mod dashboard_dto;
pub mod note_dto;
pub mod rating_dto;
pub mod service_dto;
pub mod upload_dto;

use validator::ValidationError;

use crate::utils::validation::{validate_not_empty, validate_phone};

/// Recortar espacios; vacío significa ausente
pub fn blank_to_none(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Texto obligatorio (no vacío tras recortar)
pub fn required_text(value: &str) -> Result<(), ValidationError> {
    validate_not_empty(value)
}

/// Teléfono opcional: vacío se acepta, cualquier otro valor debe ser válido
pub fn optional_phone(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Ok(());
    }
    validate_phone(value)
}
