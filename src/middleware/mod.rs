//! Middleware del sistema
//!
//! CORS para la UI y trazas por request.

pub mod cors;
pub mod trace;

pub use cors::cors_layer;
pub use trace::trace_layer;
