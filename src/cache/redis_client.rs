use anyhow::Result;
use redis::{aio::ConnectionManager, AsyncCommands, RedisResult};
use tracing::{debug, info};

use super::CacheConfig;

/// Cliente Redis con connection manager y operaciones async
#[derive(Clone)]
pub struct RedisClient {
    manager: ConnectionManager,
    config: CacheConfig,
}

impl RedisClient {
    /// Crear nuevo cliente Redis
    pub async fn new(config: CacheConfig) -> Result<Self> {
        info!("🔗 Conectando a Redis...");

        let client = redis::Client::open(config.redis_url.clone())?;
        let manager = ConnectionManager::new(client).await?;

        // Test de conexión usando un comando simple
        let mut conn = manager.clone();
        let _: () = redis::cmd("PING").query_async(&mut conn).await?;

        info!("✅ Redis conectado exitosamente");

        Ok(Self { manager, config })
    }

    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// Generar clave de cache con prefijo
    pub fn make_key(&self, prefix: &str, identifier: &str) -> String {
        format!("{}:{}:{}", self.config.key_prefix, prefix, identifier)
    }

    /// Leer un valor; los errores de Redis se propagan al llamador
    pub async fn try_get(&self, key: &str) -> Result<Option<String>> {
        let mut conn = self.manager.clone();

        let value: Option<String> = conn
            .get(key)
            .await
            .map_err(|e| anyhow::anyhow!("Error de Redis leyendo {}: {}", key, e))?;
        match &value {
            Some(_) => debug!("📥 Cache HIT para clave: {}", key),
            None => debug!("❌ Cache MISS para clave: {}", key),
        }
        Ok(value)
    }

    pub async fn set(&self, key: &str, value: String, ttl: u64) -> Result<()> {
        let mut conn = self.manager.clone();

        let result: RedisResult<()> = conn.set_ex(key, value, ttl).await;
        match result {
            Ok(()) => {
                debug!("💾 Cache SET para clave: {} (TTL: {}s)", key, ttl);
                Ok(())
            }
            Err(e) => Err(anyhow::anyhow!("Error de Redis: {}", e)),
        }
    }

    /// Incrementar un contador y devolver el nuevo valor
    pub async fn incr(&self, key: &str) -> Result<u64> {
        let mut conn = self.manager.clone();
        let value: u64 = conn.incr(key, 1u64).await?;
        debug!("🔢 Cache INCR para clave: {} -> {}", key, value);
        Ok(value)
    }
}
