use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct SignUploadRequest {
    #[serde(alias = "paramsToSign")]
    pub params_to_sign: Map<String, Value>,
}

#[derive(Debug, Serialize)]
pub struct SignUploadResponse {
    pub signature: String,
    pub signature_algorithm: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cloud_name: Option<String>,
}
