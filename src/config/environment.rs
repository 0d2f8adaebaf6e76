//! Configuración de variables de entorno
//!
//! Este módulo maneja la configuración del entorno y variables de configuración.
//! Las variables ausentes toman su valor por defecto; un valor inválido es un
//! error de arranque.

use std::env;
use std::fmt::Display;
use std::str::FromStr;

use anyhow::{anyhow, Result};

/// Credenciales del host de imágenes
#[derive(Debug, Clone, Default)]
pub struct CloudinaryConfig {
    pub cloud_name: Option<String>,
    pub api_key: Option<String>,
    pub api_secret: Option<String>,
}

/// Configuración del entorno
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub environment: String,
    pub host: String,
    pub port: u16,
    pub cors_origins: Vec<String>,
    pub redis_url: Option<String>,
    pub dashboard_cache_ttl: u64,
    pub gallery_base_url: String,
    pub shop_name: String,
    pub cloudinary: CloudinaryConfig,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            host: "0.0.0.0".to_string(),
            port: 3000,
            cors_origins: Vec::new(),
            redis_url: None,
            dashboard_cache_ttl: 300,
            gallery_base_url: "https://galeria-lavacar.vercel.app".to_string(),
            shop_name: "Garage Wier".to_string(),
            cloudinary: CloudinaryConfig::default(),
        }
    }
}

/// Interpretar una variable numérica o usar el valor por defecto
pub(crate) fn parse_or<T>(key: &str, value: Option<String>, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: Display,
{
    match value {
        Some(raw) => raw
            .parse()
            .map_err(|e| anyhow!("{} must be a valid number (got '{}'): {}", key, raw, e)),
        None => Ok(default),
    }
}

impl EnvironmentConfig {
    /// Leer la configuración de las variables de entorno del proceso
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Leer la configuración desde una función de búsqueda de variables
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };
        let defaults = Self::default();

        Ok(Self {
            environment: get("ENVIRONMENT").unwrap_or(defaults.environment),
            host: get("HOST").unwrap_or(defaults.host),
            port: parse_or("PORT", get("PORT"), defaults.port)?,
            cors_origins: get("CORS_ORIGINS")
                .map(|origins| {
                    origins
                        .split(',')
                        .map(|s| s.trim().to_string())
                        .filter(|s| !s.is_empty())
                        .collect()
                })
                .unwrap_or_default(),
            redis_url: get("REDIS_URL"),
            dashboard_cache_ttl: parse_or(
                "DASHBOARD_CACHE_TTL",
                get("DASHBOARD_CACHE_TTL"),
                defaults.dashboard_cache_ttl,
            )?,
            gallery_base_url: get("GALLERY_BASE_URL").unwrap_or(defaults.gallery_base_url),
            shop_name: get("SHOP_NAME").unwrap_or(defaults.shop_name),
            cloudinary: CloudinaryConfig {
                cloud_name: get("CLOUDINARY_CLOUD_NAME"),
                api_key: get("CLOUDINARY_API_KEY"),
                api_secret: get("CLOUDINARY_API_SECRET"),
            },
        })
    }

    /// Verificar si estamos en modo desarrollo
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// Verificar si estamos en modo producción
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// Obtener la dirección del servidor
    pub fn server_url(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = EnvironmentConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.server_url(), "0.0.0.0:3000");
        assert!(config.is_development());
        assert!(config.cors_origins.is_empty());
        assert_eq!(config.redis_url, None);
        assert_eq!(config.shop_name, "Garage Wier");
    }

    #[test]
    fn test_values_are_read_and_trimmed() {
        let config = EnvironmentConfig::from_lookup(lookup(&[
            ("PORT", "8080"),
            ("ENVIRONMENT", "production"),
            ("CORS_ORIGINS", "https://a.example, https://b.example,"),
            ("REDIS_URL", "redis://cache:6379"),
            ("CLOUDINARY_API_SECRET", "  segredo "),
        ]))
        .unwrap();

        assert_eq!(config.port, 8080);
        assert!(config.is_production());
        assert_eq!(config.cors_origins, vec!["https://a.example", "https://b.example"]);
        assert_eq!(config.redis_url.as_deref(), Some("redis://cache:6379"));
        assert_eq!(config.cloudinary.api_secret.as_deref(), Some("segredo"));
    }

    #[test]
    fn test_invalid_number_is_an_error() {
        let result = EnvironmentConfig::from_lookup(lookup(&[("PORT", "oitenta")]));
        assert!(result.is_err());
    }
}
