//! Shared application state
//!
//! Este módulo define el estado compartido de la aplicación que se pasa
//! a través del router de Axum.

use std::sync::Arc;

use crate::cache::ViewNotifier;
use crate::config::EnvironmentConfig;
use crate::repositories::Repositories;

#[derive(Clone)]
pub struct AppState {
    pub repos: Repositories,
    pub views: ViewNotifier,
    pub config: Arc<EnvironmentConfig>,
}

impl AppState {
    pub fn new(repos: Repositories, views: ViewNotifier, config: EnvironmentConfig) -> Self {
        Self {
            repos,
            views,
            config: Arc::new(config),
        }
    }
}
