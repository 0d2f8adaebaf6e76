//! Controladores
//!
//! Reglas de dominio por recurso. Cada controlador se construye por request a
//! partir del `AppState` y trabaja solo contra los traits de repositorio.

pub mod appointment_controller;
pub mod customer_controller;
pub mod dashboard_controller;
pub mod gallery_controller;
pub mod note_controller;
pub mod rating_controller;
pub mod service_controller;
pub mod upload_controller;
pub mod vehicle_controller;

pub use appointment_controller::AppointmentController;
pub use customer_controller::CustomerController;
pub use dashboard_controller::DashboardController;
pub use gallery_controller::GalleryController;
pub use note_controller::NoteController;
pub use rating_controller::RatingController;
pub use service_controller::ServiceController;
pub use upload_controller::UploadController;
pub use vehicle_controller::VehicleController;
