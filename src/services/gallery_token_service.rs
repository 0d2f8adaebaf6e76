//! Identificadores públicos de galería

use rand::rngs::OsRng;
use rand::RngCore;

use crate::utils::errors::{AppError, AppResult};
use crate::utils::validation::validate_gallery_id;

/// Bytes aleatorios de un identificador generado (16 caracteres hex)
const GENERATED_TOKEN_BYTES: usize = 8;

/// Generar un identificador con el CSPRNG del sistema operativo
pub fn generate_gallery_token() -> String {
    let mut bytes = [0u8; GENERATED_TOKEN_BYTES];
    OsRng.fill_bytes(&mut bytes);
    hex::encode(bytes)
}

/// Token informado por el cliente (validado) o uno nuevo si no vino
pub fn resolve_gallery_token(supplied: Option<&str>) -> AppResult<String> {
    match supplied.map(str::trim).filter(|token| !token.is_empty()) {
        Some(token) => {
            validate_gallery_id(token).map_err(|_| {
                AppError::Validation(
                    "Identificador de galeria inválido: use de 8 a 32 letras minúsculas ou dígitos."
                        .to_string(),
                )
            })?;
            Ok(token.to_string())
        }
        None => Ok(generate_gallery_token()),
    }
}
