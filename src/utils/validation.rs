//! Utilidades de validación
//!
//! Este módulo contiene funciones helper para validación de datos
//! y conversión de tipos.

use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use lazy_static::lazy_static;
use regex::Regex;
use rust_decimal::Decimal;
use serde::Serialize;
use validator::ValidationError;

lazy_static! {
    /// Identificadores de galería aceptados: minúsculas y dígitos, 8 a 32 caracteres
    static ref GALLERY_ID_RE: Regex = Regex::new(r"^[a-z0-9]{8,32}$").expect("regex válida");
}

/// Validar y convertir string a fecha
pub fn validate_date(value: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| {
        let mut error = ValidationError::new("date");
        error.add_param("value".into(), &value.to_string());
        error.add_param("format".into(), &"YYYY-MM-DD".to_string());
        error
    })
}

/// Validar y convertir string a datetime
pub fn validate_datetime(value: &str) -> Result<DateTime<Utc>, ValidationError> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| {
            let mut error = ValidationError::new("datetime");
            error.add_param("value".into(), &value.to_string());
            error.add_param("format".into(), &"RFC3339".to_string());
            error
        })
}

/// Validar que un string no esté vacío
pub fn validate_not_empty(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("not_empty");
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

/// Validar que un valor esté en un rango específico
pub fn validate_range<T: PartialOrd + std::fmt::Display + Serialize>(
    value: T,
    min: T,
    max: T,
) -> Result<(), ValidationError> {
    if value < min || value > max {
        let mut error = ValidationError::new("range");
        error.add_param("min".into(), &min);
        error.add_param("max".into(), &max);
        error.add_param("actual".into(), &value);
        return Err(error);
    }
    Ok(())
}

/// Validar formato de teléfono (básico)
pub fn validate_phone(value: &str) -> Result<(), ValidationError> {
    let clean_phone = digits_only(value);
    if clean_phone.len() < 10 || clean_phone.len() > 15 {
        let mut error = ValidationError::new("phone");
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

/// Validar que un valor sea no negativo
pub fn validate_non_negative<T: PartialOrd + std::fmt::Display + num_traits::Zero + Serialize>(
    value: T,
) -> Result<(), ValidationError> {
    if value < T::zero() {
        let mut error = ValidationError::new("non_negative");
        error.add_param("value".into(), &value);
        return Err(error);
    }
    Ok(())
}

/// Validar formato de identificador público de galería
pub fn validate_gallery_id(value: &str) -> Result<(), ValidationError> {
    if !GALLERY_ID_RE.is_match(value) {
        let mut error = ValidationError::new("gallery_id");
        error.add_param("value".into(), &value.to_string());
        error.add_param("format".into(), &"[a-z0-9]{8,32}".to_string());
        return Err(error);
    }
    Ok(())
}

/// Conservar solo los dígitos de un string
pub fn digits_only(value: &str) -> String {
    value.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Primer valor que no cabe en NUMERIC(10, 2)
fn max_price() -> Decimal {
    Decimal::new(100_000_000, 0)
}

/// Interpretar el precio enviado por el cliente (redondeado a centavos).
///
/// Acepta número JSON o string (con punto o coma decimal). `null`, string vacío
/// o ausente significan "sin precio".
pub fn parse_price(value: Option<&serde_json::Value>) -> Result<Option<Decimal>, ValidationError> {
    let raw = match value {
        None | Some(serde_json::Value::Null) => return Ok(None),
        Some(serde_json::Value::Number(n)) => n.to_string(),
        Some(serde_json::Value::String(s)) if s.trim().is_empty() => return Ok(None),
        Some(serde_json::Value::String(s)) => s.trim().replace(',', "."),
        Some(_) => return Err(ValidationError::new("price")),
    };

    let price = Decimal::from_str(&raw)
        .or_else(|_| Decimal::from_scientific(&raw))
        .map_err(|_| {
            let mut error = ValidationError::new("price");
            error.add_param("value".into(), &raw);
            error
        })?;
    validate_non_negative(price)?;

    // Mismo formato que la columna NUMERIC(10, 2)
    let mut price = price.round_dp(2);
    if price >= max_price() {
        let mut error = ValidationError::new("price_too_large");
        error.add_param("value".into(), &raw);
        return Err(error);
    }
    price.rescale(2);
    Ok(Some(price))
}
