//! Backend del lava-car
//!
//! API JSON para agenda, servicios, clientes, faturamento y galería pública.

pub mod cache;
pub mod config;
pub mod controllers;
pub mod database;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;

use axum::Router;

use crate::middleware::{cors_layer, trace_layer};
use crate::state::AppState;

/// Router completo con CORS y trazas, listo para servir
pub fn build_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config.cors_origins);
    routes::create_api_router()
        .layer(trace_layer())
        .layer(cors)
        .with_state(state)
}
