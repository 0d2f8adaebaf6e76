//! Configuración de cache
//!
//! Parámetros del cache de lectura de vistas (Redis).

use serde::{Deserialize, Serialize};

/// Configuración del cache
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    pub redis_url: String,
    pub key_prefix: String,
    pub dashboard_ttl: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            redis_url: "redis://localhost:6379".to_string(),
            key_prefix: "carwash".to_string(),
            dashboard_ttl: 300, // 5 minutos
        }
    }
}
