//! Firma de uploads de imágenes
//!
//! El navegador sube las fotos directo al host de imágenes; el servidor solo
//! firma los parámetros con el secreto de la API.

use serde_json::{Map, Value};
use sha2::{Digest, Sha256};

/// Parámetros que el host de imágenes no incluye en la firma
const UNSIGNED_KEYS: [&str; 4] = ["file", "cloud_name", "resource_type", "api_key"];

pub const SIGNATURE_ALGORITHM: &str = "sha256";

/// Representación textual de un parámetro; `None` si no participa de la firma
fn param_value(value: &Value) -> Option<String> {
    let text = match value {
        Value::Null => return None,
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Array(items) => items
            .iter()
            .filter_map(param_value)
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => value.to_string(),
    };
    (!text.is_empty()).then_some(text)
}

/// String a firmar: `k=v` ordenado por clave y unido con `&`
pub fn string_to_sign(params: &Map<String, Value>) -> String {
    let mut pairs: Vec<(&String, String)> = params
        .iter()
        .filter(|(key, _)| !UNSIGNED_KEYS.contains(&key.as_str()))
        .filter_map(|(key, value)| param_value(value).map(|v| (key, v)))
        .collect();
    pairs.sort_by(|a, b| a.0.cmp(b.0));

    pairs
        .iter()
        .map(|(key, value)| format!("{}={}", key, value))
        .collect::<Vec<_>>()
        .join("&")
}

/// Firma SHA-256 en hexadecimal minúsculo
pub fn sign_params(params: &Map<String, Value>, api_secret: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(string_to_sign(params).as_bytes());
    hasher.update(api_secret.as_bytes());
    hex::encode(hasher.finalize())
}
