//! Configuración de conexión a PostgreSQL
//!
//! Crea el pool y aplica las migraciones de `migrations/` al arrancar.

use anyhow::{Context, Result};
use sqlx::PgPool;
use tracing::info;

use crate::config::DatabaseConfig;

/// Crear el pool y dejar el schema al día
pub async fn connect(config: &DatabaseConfig) -> Result<PgPool> {
    info!(
        "🗄️ Conectando a PostgreSQL: {} (max {} conexiones)",
        mask_database_url(&config.url),
        config.max_connections
    );

    let pool = config
        .create_pool()
        .await
        .context("no se pudo conectar a PostgreSQL")?;
    run_migrations(&pool).await?;

    info!("✅ Base de datos lista");
    Ok(pool)
}

/// Ejecutar migraciones de la base de datos
pub async fn run_migrations(pool: &PgPool) -> Result<()> {
    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .context("error ejecutando migraciones")?;
    Ok(())
}

/// Función helper para enmascarar la URL de la base de datos en logs
pub fn mask_database_url(url: &str) -> String {
    match (url.find("://"), url.rfind('@')) {
        (Some(scheme_end), Some(at_pos)) if at_pos > scheme_end => {
            format!("{}***:***@{}", &url[..scheme_end + 3], &url[at_pos + 1..])
        }
        _ => url.to_string(),
    }
}
