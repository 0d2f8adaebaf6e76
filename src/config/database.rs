//! Configuración de base de datos
//!
//! Este módulo maneja la conexión y configuración de PostgreSQL con SQLx.

use std::env;
use std::time::Duration;

use anyhow::{anyhow, Result};
use sqlx::postgres::{PgPool, PgPoolOptions};

use super::environment::parse_or;

/// Configuración de la base de datos
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub connect_timeout: Duration,
    pub idle_timeout: Duration,
    pub max_lifetime: Duration,
}

impl DatabaseConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            max_connections: 10,
            min_connections: 1,
            connect_timeout: Duration::from_secs(30),
            idle_timeout: Duration::from_secs(300),
            max_lifetime: Duration::from_secs(3600),
        }
    }

    /// `DATABASE_URL` es obligatoria; `DATABASE_MAX_CONNECTIONS` opcional
    pub fn from_env() -> Result<Self> {
        let url = env::var("DATABASE_URL")
            .ok()
            .filter(|url| !url.trim().is_empty())
            .ok_or_else(|| anyhow!("DATABASE_URL must be set in environment variables"))?;

        let mut config = Self::new(url);
        config.max_connections = parse_or(
            "DATABASE_MAX_CONNECTIONS",
            env::var("DATABASE_MAX_CONNECTIONS").ok(),
            config.max_connections,
        )?;
        config.min_connections = config.min_connections.min(config.max_connections);
        Ok(config)
    }

    /// Crear un nuevo pool de conexiones
    pub async fn create_pool(&self) -> Result<PgPool, sqlx::Error> {
        PgPoolOptions::new()
            .max_connections(self.max_connections)
            .min_connections(self.min_connections)
            .acquire_timeout(self.connect_timeout)
            .idle_timeout(self.idle_timeout)
            .max_lifetime(self.max_lifetime)
            .connect(&self.url)
            .await
    }
}
