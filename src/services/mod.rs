//! Services module
//!
//! Cálculos de dominio sin I/O: períodos y totales de faturamento,
//! identificadores de galería, mensaje de entrega y firma de uploads.

pub mod gallery_token_service;
pub mod notification_service;
pub mod revenue_service;
pub mod upload_signature_service;

pub use gallery_token_service::{generate_gallery_token, resolve_gallery_token};
pub use notification_service::{compose_share_message, ShareInput, ShareMessage};
pub use revenue_service::{compute_dashboard, day_summary, DashboardWindows};
pub use upload_signature_service::{sign_params, SIGNATURE_ALGORITHM};
