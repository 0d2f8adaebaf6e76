use std::sync::Arc;

use tracing::error;

use crate::config::EnvironmentConfig;
use crate::dto::upload_dto::{SignUploadRequest, SignUploadResponse};
use crate::services::{sign_params, SIGNATURE_ALGORITHM};
use crate::state::AppState;
use crate::utils::errors::{internal_error, AppResult};

/// Firma de parámetros para subir fotos directo al host de imágenes
pub struct UploadController {
    config: Arc<EnvironmentConfig>,
}

impl UploadController {
    pub fn new(state: &AppState) -> Self {
        Self {
            config: state.config.clone(),
        }
    }

    pub fn sign(&self, request: SignUploadRequest) -> AppResult<SignUploadResponse> {
        let cloudinary = &self.config.cloudinary;
        let secret = cloudinary.api_secret.as_deref().ok_or_else(|| {
            error!("❌ CLOUDINARY_API_SECRET no configurado");
            internal_error("CLOUDINARY_API_SECRET ausente")
        })?;

        Ok(SignUploadResponse {
            signature: sign_params(&request.params_to_sign, secret),
            signature_algorithm: SIGNATURE_ALGORITHM,
            api_key: cloudinary.api_key.clone(),
            cloud_name: cloudinary.cloud_name.clone(),
        })
    }
}
