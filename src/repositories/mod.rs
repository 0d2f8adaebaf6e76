//! Repositorios (Persistence Gateway)
//!
//! Cada recurso expone un trait async con sus consultas CRUD y joins; la
//! implementación PostgreSQL vive en el archivo del recurso. Los repositorios
//! no contienen reglas de negocio: filtros, includes y orden los decide quien
//! llama.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::models::{
    Appointment, AppointmentDetail, AppointmentFull, AppointmentInput, Checklist,
    CompletedService, Customer, CustomerWithVehicles, HistoryEntry, Note, Rating, RatingDetail,
    Service, ServiceDetail, Vehicle,
};
use crate::utils::errors::AppResult;

pub mod appointment_repository;
pub mod customer_repository;
#[cfg(test)]
pub mod memory;
pub mod note_repository;
pub mod rating_repository;
mod rows;
pub mod service_repository;
pub mod vehicle_repository;

pub use appointment_repository::PgAppointmentRepository;
pub use customer_repository::PgCustomerRepository;
pub use note_repository::PgNoteRepository;
pub use rating_repository::PgRatingRepository;
pub use service_repository::PgServiceRepository;
pub use vehicle_repository::PgVehicleRepository;

#[async_trait]
pub trait CustomerRepository: Send + Sync {
    /// Clientes cuyo nombre contiene `name_filter` (sin distinguir mayúsculas), con vehículos
    async fn search(&self, name_filter: Option<&str>) -> AppResult<Vec<CustomerWithVehicles>>;
    async fn find_by_id(&self, id: i32) -> AppResult<Option<CustomerWithVehicles>>;
    async fn name_exists(&self, name: &str, exclude_id: Option<i32>) -> AppResult<bool>;
    /// Crear cliente y primer vehículo en una sola transacción
    async fn create_with_vehicle(
        &self,
        name: &str,
        phone: Option<&str>,
        model: &str,
        plate: Option<&str>,
    ) -> AppResult<CustomerWithVehicles>;
    async fn update(&self, id: i32, name: &str, phone: Option<&str>) -> AppResult<Option<Customer>>;
}

#[async_trait]
pub trait VehicleRepository: Send + Sync {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Vehicle>>;
    async fn create(&self, customer_id: i32, model: &str, plate: Option<&str>) -> AppResult<Vehicle>;
    async fn count_appointments(&self, id: i32) -> AppResult<i64>;
    async fn delete(&self, id: i32) -> AppResult<bool>;
}

#[async_trait]
pub trait AppointmentRepository: Send + Sync {
    /// Todos los agendamientos en orden cronológico, con cliente y vehículo
    async fn list(&self) -> AppResult<Vec<AppointmentDetail>>;
    /// Agendamientos en `[from, to)` en orden cronológico
    async fn list_between(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> AppResult<Vec<AppointmentDetail>>;
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Appointment>>;
    async fn find_full(&self, id: i32) -> AppResult<Option<AppointmentFull>>;
    async fn exists_at(&self, instant: DateTime<Utc>) -> AppResult<bool>;
    async fn create(&self, input: &AppointmentInput) -> AppResult<Appointment>;
    async fn update(&self, id: i32, input: &AppointmentInput) -> AppResult<Option<Appointment>>;
    /// Borra el agendamiento; servicio y evaluación caen en cascada
    async fn delete(&self, id: i32) -> AppResult<bool>;
}

#[async_trait]
pub trait ServiceRepository: Send + Sync {
    /// Todos los servicios, los iniciados más recientemente primero
    async fn list(&self) -> AppResult<Vec<ServiceDetail>>;
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Service>>;
    async fn find_detail(&self, id: i32) -> AppResult<Option<ServiceDetail>>;
    async fn find_by_appointment(&self, appointment_id: i32) -> AppResult<Option<Service>>;
    async fn find_by_gallery_id(&self, gallery_id: &str) -> AppResult<Option<ServiceDetail>>;
    /// Crear el servicio en andamento; si ya existe devuelve el existente y `false`
    async fn create_started(
        &self,
        appointment_id: i32,
        started_at: DateTime<Utc>,
        checklist: &Checklist,
    ) -> AppResult<(Service, bool)>;
    /// Persistir estado, notas, checklist, fotos, precio y servicios adicionales
    async fn save(&self, service: &Service) -> AppResult<Service>;
    /// Asignar la galería solo si todavía no tiene una; devuelve el servicio resultante
    async fn assign_gallery_id(&self, id: i32, gallery_id: &str) -> AppResult<Option<Service>>;
    /// Servicios concluidos en `[from, to)`, más recientes primero
    async fn list_completed_between(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> AppResult<Vec<CompletedService>>;
    /// Otros servicios concluidos del cliente que tienen galería
    async fn customer_history(
        &self,
        customer_id: i32,
        exclude_service_id: i32,
        limit: i64,
    ) -> AppResult<Vec<HistoryEntry>>;
}

#[async_trait]
pub trait RatingRepository: Send + Sync {
    /// Todas las evaluaciones, más recientes primero, con servicio anidado
    async fn list(&self) -> AppResult<Vec<RatingDetail>>;
    async fn find_by_service(&self, service_id: i32) -> AppResult<Option<Rating>>;
    async fn create(&self, service_id: i32, stars: i16, comment: Option<&str>) -> AppResult<Rating>;
}

#[async_trait]
pub trait NoteRepository: Send + Sync {
    async fn list(&self) -> AppResult<Vec<Note>>;
    async fn create(&self, content: &str) -> AppResult<Note>;
    async fn update(&self, id: i32, content: &str) -> AppResult<Option<Note>>;
    async fn delete(&self, id: i32) -> AppResult<bool>;
}

/// Conjunto de repositorios inyectado en el estado de la aplicación
#[derive(Clone)]
pub struct Repositories {
    pub customers: Arc<dyn CustomerRepository>,
    pub vehicles: Arc<dyn VehicleRepository>,
    pub appointments: Arc<dyn AppointmentRepository>,
    pub services: Arc<dyn ServiceRepository>,
    pub ratings: Arc<dyn RatingRepository>,
    pub notes: Arc<dyn NoteRepository>,
}

impl Repositories {
    /// Repositorios PostgreSQL compartiendo el mismo pool
    pub fn postgres(pool: PgPool) -> Self {
        Self {
            customers: Arc::new(PgCustomerRepository::new(pool.clone())),
            vehicles: Arc::new(PgVehicleRepository::new(pool.clone())),
            appointments: Arc::new(PgAppointmentRepository::new(pool.clone())),
            services: Arc::new(PgServiceRepository::new(pool.clone())),
            ratings: Arc::new(PgRatingRepository::new(pool.clone())),
            notes: Arc::new(PgNoteRepository::new(pool)),
        }
    }
}
