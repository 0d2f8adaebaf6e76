//! Cache
//!
//! Cliente Redis y cache de lectura de vistas con invalidación explícita.

pub mod cache_config;
pub mod redis_client;
pub mod view_cache;

pub use cache_config::CacheConfig;
pub use redis_client::RedisClient;
pub use view_cache::{NoopViewCache, RedisViewCache, View, ViewCache, ViewInvalidated, ViewNotifier};
