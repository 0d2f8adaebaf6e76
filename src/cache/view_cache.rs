//! Cache de lectura de vistas e invalidación
//!
//! Cada vista tiene un contador de generación. Las claves cacheadas incluyen la
//! generación vigente, así que invalidar una vista es un `INCR`: las claves
//! viejas nunca se vuelven a leer y expiran por TTL.

use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tokio::sync::broadcast;
use tracing::{debug, warn};

use super::redis_client::RedisClient;
use crate::utils::errors::{AppError, AppResult};

/// Capacidad del canal de eventos; los suscriptores lentos pierden eventos viejos
const EVENT_CHANNEL_CAPACITY: usize = 64;

/// Vistas de la UI que dependen de los datos persistidos
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum View {
    Agenda,
    Customers,
    Services,
    Ratings,
    Notes,
    Dashboard,
    Gallery,
}

impl View {
    pub fn as_str(&self) -> &'static str {
        match self {
            View::Agenda => "agenda",
            View::Customers => "customers",
            View::Services => "services",
            View::Ratings => "ratings",
            View::Notes => "notes",
            View::Dashboard => "dashboard",
            View::Gallery => "gallery",
        }
    }
}

/// Evento emitido cuando una vista queda desactualizada
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewInvalidated {
    pub view: View,
    pub at: DateTime<Utc>,
}

#[async_trait]
pub trait ViewCache: Send + Sync {
    async fn generation(&self, view: View) -> AppResult<u64>;
    async fn get(&self, view: View, generation: u64, key: &str) -> AppResult<Option<String>>;
    async fn put(&self, view: View, generation: u64, key: &str, value: String) -> AppResult<()>;
    async fn bump(&self, view: View) -> AppResult<()>;
}

/// Cache respaldado por Redis
pub struct RedisViewCache {
    client: RedisClient,
}

impl RedisViewCache {
    pub fn new(client: RedisClient) -> Self {
        Self { client }
    }

    fn generation_key(&self, view: View) -> String {
        self.client.make_key("generation", view.as_str())
    }

    fn entry_key(&self, view: View, generation: u64, key: &str) -> String {
        self.client
            .make_key(view.as_str(), &format!("g{}:{}", generation, key))
    }
}

#[async_trait]
impl ViewCache for RedisViewCache {
    async fn generation(&self, view: View) -> AppResult<u64> {
        let key = self.generation_key(view);
        match self.client.try_get(&key).await {
            Ok(None) => Ok(0),
            Ok(Some(raw)) => raw
                .parse()
                .map_err(|_| AppError::Cache(format!("Generación inválida en {}: {}", key, raw))),
            Err(e) => Err(AppError::Cache(e.to_string())),
        }
    }

    async fn get(&self, view: View, generation: u64, key: &str) -> AppResult<Option<String>> {
        self.client
            .try_get(&self.entry_key(view, generation, key))
            .await
            .map_err(|e| AppError::Cache(e.to_string()))
    }

    async fn put(&self, view: View, generation: u64, key: &str, value: String) -> AppResult<()> {
        let ttl = self.client.config().dashboard_ttl;
        self.client
            .set(&self.entry_key(view, generation, key), value, ttl)
            .await
            .map_err(|e| AppError::Cache(e.to_string()))
    }

    async fn bump(&self, view: View) -> AppResult<()> {
        self.client
            .incr(&self.generation_key(view))
            .await
            .map(|_| ())
            .map_err(|e| AppError::Cache(e.to_string()))
    }
}

/// Sin cache configurado: siempre MISS
pub struct NoopViewCache;

#[async_trait]
impl ViewCache for NoopViewCache {
    async fn generation(&self, _view: View) -> AppResult<u64> {
        Ok(0)
    }

    async fn get(&self, _view: View, _generation: u64, _key: &str) -> AppResult<Option<String>> {
        Ok(None)
    }

    async fn put(&self, _view: View, _generation: u64, _key: &str, _value: String) -> AppResult<()> {
        Ok(())
    }

    async fn bump(&self, _view: View) -> AppResult<()> {
        Ok(())
    }
}

/// Cache de vistas + canal de eventos de invalidación
#[derive(Clone)]
pub struct ViewNotifier {
    cache: Arc<dyn ViewCache>,
    sender: broadcast::Sender<ViewInvalidated>,
}

impl ViewNotifier {
    pub fn new(cache: Arc<dyn ViewCache>) -> Self {
        let (sender, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self { cache, sender }
    }

    pub fn without_cache() -> Self {
        Self::new(Arc::new(NoopViewCache))
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ViewInvalidated> {
        self.sender.subscribe()
    }

    /// Marcar vistas como desactualizadas. Los fallos del cache solo se registran.
    pub async fn invalidate(&self, views: &[View]) {
        let at = Utc::now();
        for &view in views {
            if let Err(e) = self.cache.bump(view).await {
                warn!("⚠️ No se pudo invalidar la vista {}: {}", view.as_str(), e);
            }
            // Sin suscriptores el envío falla; no es un error
            let _ = self.sender.send(ViewInvalidated { view, at });
            debug!("🔄 Vista invalidada: {}", view.as_str());
        }
    }

    /// Leer la vista del cache o calcularla y guardarla.
    ///
    /// La generación se lee antes de calcular: un resultado calculado durante
    /// una invalidación queda guardado bajo la generación vieja.
    pub async fn load_or_compute<T, F, Fut>(&self, view: View, key: &str, compute: F) -> AppResult<T>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = AppResult<T>>,
    {
        let generation = match self.cache.generation(view).await {
            Ok(generation) => Some(generation),
            Err(e) => {
                warn!("⚠️ Cache no disponible para {}: {}", view.as_str(), e);
                None
            }
        };

        if let Some(generation) = generation {
            match self.cache.get(view, generation, key).await {
                Ok(Some(raw)) => match serde_json::from_str(&raw) {
                    Ok(value) => return Ok(value),
                    Err(e) => warn!("⚠️ Entrada de cache inválida para {}: {}", key, e),
                },
                Ok(None) => {}
                Err(e) => warn!("⚠️ Error leyendo cache para {}: {}", key, e),
            }
        }

        let value = compute().await?;

        if let Some(generation) = generation {
            match serde_json::to_string(&value) {
                Ok(raw) => {
                    if let Err(e) = self.cache.put(view, generation, key, raw).await {
                        warn!("⚠️ Error guardando cache para {}: {}", key, e);
                    }
                }
                Err(e) => warn!("⚠️ No se pudo serializar {}: {}", key, e),
            }
        }

        Ok(value)
    }
}

/// Cache en memoria para tests
#[cfg(test)]
#[derive(Default)]
pub struct MemoryViewCache {
    generations: std::sync::Mutex<std::collections::HashMap<View, u64>>,
    entries: std::sync::Mutex<std::collections::HashMap<String, String>>,
}

#[cfg(test)]
#[async_trait]
impl ViewCache for MemoryViewCache {
    async fn generation(&self, view: View) -> AppResult<u64> {
        Ok(*self.generations.lock().unwrap().get(&view).unwrap_or(&0))
    }

    async fn get(&self, view: View, generation: u64, key: &str) -> AppResult<Option<String>> {
        let full = format!("{}:g{}:{}", view.as_str(), generation, key);
        Ok(self.entries.lock().unwrap().get(&full).cloned())
    }

    async fn put(&self, view: View, generation: u64, key: &str, value: String) -> AppResult<()> {
        let full = format!("{}:g{}:{}", view.as_str(), generation, key);
        self.entries.lock().unwrap().insert(full, value);
        Ok(())
    }

    async fn bump(&self, view: View) -> AppResult<()> {
        *self.generations.lock().unwrap().entry(view).or_insert(0) += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[tokio::test]
    async fn test_cached_value_is_reused_until_invalidated() {
        let notifier = ViewNotifier::new(Arc::new(MemoryViewCache::default()));
        let counter = AtomicUsize::new(0);
        let calls = &counter;

        let compute = move || async move {
            Ok::<_, AppError>(calls.fetch_add(1, Ordering::SeqCst) + 1)
        };

        let first: usize = notifier.load_or_compute(View::Dashboard, "2025-03-10", compute).await.unwrap();
        let second: usize = notifier.load_or_compute(View::Dashboard, "2025-03-10", compute).await.unwrap();
        assert_eq!((first, second), (1, 1));

        notifier.invalidate(&[View::Dashboard]).await;
        let third: usize = notifier.load_or_compute(View::Dashboard, "2025-03-10", compute).await.unwrap();
        assert_eq!(third, 2);
    }

    #[tokio::test]
    async fn test_without_cache_always_computes() {
        let notifier = ViewNotifier::without_cache();
        let counter = AtomicUsize::new(0);
        let calls = &counter;
        for _ in 0..3 {
            let _: usize = notifier
                .load_or_compute(View::Dashboard, "k", move || async move {
                    Ok(calls.fetch_add(1, Ordering::SeqCst))
                })
                .await
                .unwrap();
        }
        assert_eq!(counter.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_invalidate_broadcasts_events() {
        let notifier = ViewNotifier::without_cache();
        let mut events = notifier.subscribe();

        notifier.invalidate(&[View::Agenda, View::Dashboard]).await;

        assert_eq!(events.recv().await.unwrap().view, View::Agenda);
        assert_eq!(events.recv().await.unwrap().view, View::Dashboard);
    }

    /// Cache cuyo contador no responde pero que conserva entradas viejas
    struct UnreachableGenerations {
        puts: AtomicUsize,
    }

    #[async_trait]
    impl ViewCache for UnreachableGenerations {
        async fn generation(&self, _view: View) -> AppResult<u64> {
            Err(AppError::Cache("connection refused".to_string()))
        }

        async fn get(&self, _view: View, _generation: u64, _key: &str) -> AppResult<Option<String>> {
            Ok(Some("999".to_string()))
        }

        async fn put(&self, _view: View, _generation: u64, _key: &str, _value: String) -> AppResult<()> {
            self.puts.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }

        async fn bump(&self, _view: View) -> AppResult<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_unknown_generation_bypasses_cache() {
        let cache = Arc::new(UnreachableGenerations { puts: AtomicUsize::new(0) });
        let notifier = ViewNotifier::new(cache.clone());

        let value: usize = notifier
            .load_or_compute(View::Dashboard, "2025-03-10", || async { Ok(7) })
            .await
            .unwrap();

        assert_eq!(value, 7);
        assert_eq!(cache.puts.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_view_serializes_snake_case() {
        let event = ViewInvalidated { view: View::Dashboard, at: Utc::now() };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["view"], "dashboard");
    }
}
