//! Modelos del sistema
//!
//! Este módulo contiene todos los modelos de datos que mapean al schema
//! PostgreSQL y los tipos de dominio derivados de ellos.

pub mod appointment;
pub mod customer;
pub mod dashboard;
pub mod gallery;
pub mod note;
pub mod rating;
pub mod service;

pub use appointment::{Appointment, AppointmentDetail, AppointmentFull, AppointmentInput};
pub use customer::{Customer, CustomerWithVehicles, Vehicle};
pub use dashboard::{CompletedService, DaySummary, FullDashboard, NextCustomer, RecentActivity, RevenueBucket};
pub use gallery::{GalleryView, HistoryEntry, PublicRating};
pub use note::Note;
pub use rating::{Rating, RatingDetail};
pub use service::{Checklist, Service, ServiceChanges, ServiceDetail, ServiceState};
