use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use dotenvy::dotenv;
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use carwash_backend::build_router;
use carwash_backend::cache::{CacheConfig, RedisClient, RedisViewCache, ViewNotifier};
use carwash_backend::config::{DatabaseConfig, EnvironmentConfig};
use carwash_backend::database;
use carwash_backend::repositories::Repositories;
use carwash_backend::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    // Configurar logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("carwash_backend=debug,tower_http=info")),
        )
        .init();

    info!("🧽 Lava-car Backend - API");
    info!("==========================");

    let config = EnvironmentConfig::from_env()?;
    info!("⚙️ Entorno: {}", config.environment);

    // Inicializar base de datos
    let db_config = DatabaseConfig::from_env()?;
    let pool = match database::connect(&db_config).await {
        Ok(pool) => pool,
        Err(e) => {
            error!("❌ Error conectando a la base de datos: {}", e);
            return Err(e);
        }
    };

    // Cache de vistas: Redis opcional
    let views = match &config.redis_url {
        Some(redis_url) => {
            let cache_config = CacheConfig {
                redis_url: redis_url.clone(),
                dashboard_ttl: config.dashboard_cache_ttl,
                ..CacheConfig::default()
            };
            match RedisClient::new(cache_config).await {
                Ok(client) => ViewNotifier::new(Arc::new(RedisViewCache::new(client))),
                Err(e) => {
                    warn!("⚠️ Redis no disponible, dashboard sin cache: {}", e);
                    ViewNotifier::without_cache()
                }
            }
        }
        None => {
            info!("ℹ️ REDIS_URL no configurado, dashboard sin cache");
            ViewNotifier::without_cache()
        }
    };

    if config.cloudinary.api_secret.is_none() {
        warn!("⚠️ CLOUDINARY_API_SECRET no configurado: /api/sign-image responderá 500");
    }

    let addr: SocketAddr = config.server_url().parse()?;
    let state = AppState::new(Repositories::postgres(pool), views, config);
    let app = build_router(state);

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET  /health - Liveness");
    info!("   /api/appointments, /api/customers, /api/vehicles, /api/notes");
    info!("   /api/services, /api/ratings, /api/dashboard, /api/dashboard/full");
    info!("   /api/gallery/:gallery_id, /api/history/:customer_id");
    info!("   POST /api/sign-image - Firma de upload");
    info!("   GET  /api/events - Eventos de invalidación (SSE)");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!("❌ Error del servidor: {}", e);
        return Err(e.into());
    }

    info!("👋 Servidor terminado");
    Ok(())
}

/// Señal de apagado graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("❌ No se pudo escuchar Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("❌ No se pudo instalar el handler de SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("🛑 Señal Ctrl+C recibida, apagando servidor...");
        },
        _ = terminate => {
            info!("🛑 Señal de terminación recibida, apagando servidor...");
        },
    }
}
