//! Sistema de manejo de errores
//!
//! Este módulo define todos los tipos de errores del sistema
//! y su conversión a respuestas HTTP apropiadas.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::{error, warn};

/// Código SQLSTATE de PostgreSQL para violación de UNIQUE
const PG_UNIQUE_VIOLATION: &str = "23505";
/// Código SQLSTATE de PostgreSQL para violación de FOREIGN KEY
const PG_FOREIGN_KEY_VIOLATION: &str = "23503";

/// Errores principales de la aplicación
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid fields: {0}")]
    InvalidFields(#[from] validator::ValidationErrors),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Dependency error: {0}")]
    Dependency(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Cache error: {0}")]
    Cache(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    /// Traducir un error de sqlx considerando las constraints del schema.
    ///
    /// Las violaciones de UNIQUE se reportan como conflicto con `conflict_message`;
    /// las de FOREIGN KEY como recurso inexistente con `missing_message`.
    pub fn from_db(e: sqlx::Error, conflict_message: &str, missing_message: &str) -> Self {
        if let sqlx::Error::Database(db) = &e {
            match db.code().as_deref() {
                Some(PG_UNIQUE_VIOLATION) => return AppError::Conflict(conflict_message.to_string()),
                Some(PG_FOREIGN_KEY_VIOLATION) => return AppError::NotFound(missing_message.to_string()),
                _ => {}
            }
        }
        AppError::Database(e)
    }

    /// Código de estado HTTP asociado al error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::InvalidFields(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) | AppError::Dependency(_) => StatusCode::CONFLICT,
            AppError::Database(_) | AppError::Cache(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

/// Respuesta de error para la API
#[derive(Debug, serde::Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<serde_json::Value>,
    code: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let error_response = match self {
            AppError::Validation(msg) => {
                warn!("⚠️ Validation error: {}", msg);
                ErrorResponse {
                    error: "Validation Error".to_string(),
                    message: msg,
                    details: None,
                    code: "VALIDATION_ERROR".to_string(),
                }
            }

            AppError::InvalidFields(e) => {
                warn!("⚠️ Invalid fields: {}", e);
                ErrorResponse {
                    error: "Validation Error".to_string(),
                    message: "Os dados enviados são inválidos.".to_string(),
                    details: Some(json!(e)),
                    code: "VALIDATION_ERROR".to_string(),
                }
            }

            AppError::NotFound(msg) => {
                warn!("🔍 Resource not found: {}", msg);
                ErrorResponse {
                    error: "Not Found".to_string(),
                    message: msg,
                    details: None,
                    code: "NOT_FOUND".to_string(),
                }
            }

            AppError::Conflict(msg) => {
                warn!("⚠️ Conflict: {}", msg);
                ErrorResponse {
                    error: "Conflict".to_string(),
                    message: msg,
                    details: None,
                    code: "CONFLICT".to_string(),
                }
            }

            AppError::Dependency(msg) => {
                warn!("⚠️ Dependency error: {}", msg);
                ErrorResponse {
                    error: "Conflict".to_string(),
                    message: msg,
                    details: None,
                    code: "DEPENDENCY_ERROR".to_string(),
                }
            }

            AppError::Database(e) => {
                error!("❌ Database error: {}", e);
                ErrorResponse {
                    error: "Internal Server Error".to_string(),
                    message: "Erro interno do servidor.".to_string(),
                    details: None,
                    code: "DB_ERROR".to_string(),
                }
            }

            AppError::Cache(msg) => {
                error!("❌ Cache error: {}", msg);
                ErrorResponse {
                    error: "Internal Server Error".to_string(),
                    message: "Erro interno do servidor.".to_string(),
                    details: None,
                    code: "CACHE_ERROR".to_string(),
                }
            }

            AppError::Internal(msg) => {
                error!("❌ Internal error: {}", msg);
                ErrorResponse {
                    error: "Internal Server Error".to_string(),
                    message: "Erro interno do servidor.".to_string(),
                    details: None,
                    code: "INTERNAL_ERROR".to_string(),
                }
            }
        };

        (status, Json(error_response)).into_response()
    }
}

/// Resultado tipado para operaciones que pueden fallar
pub type AppResult<T> = Result<T, AppError>;

/// Función helper para crear errores de validación
pub fn validation_error(message: &str) -> AppError {
    AppError::Validation(message.to_string())
}

/// Función helper para crear errores internos
pub fn internal_error(message: &str) -> AppError {
    AppError::Internal(message.to_string())
}
