//! Repositorios en memoria para tests
//!
//! Emulan las constraints del schema (nombres únicos, un agendamiento por
//! instante, un servicio por agendamiento, galería única, una evaluación por
//! servicio) y el borrado en cascada de los agendamientos.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::appointment_repository::{MISSING_REFERENCE, SLOT_TAKEN};
use super::customer_repository::{attach_vehicles, DUPLICATE_NAME};
use super::service_repository::GALLERY_TAKEN;
use super::{
    AppointmentRepository, CustomerRepository, NoteRepository, RatingRepository, Repositories,
    ServiceRepository, VehicleRepository,
};
use crate::models::{
    Appointment, AppointmentDetail, AppointmentFull, AppointmentInput, Checklist,
    CompletedService, Customer, CustomerWithVehicles, HistoryEntry, Note, Rating, RatingDetail,
    Service, ServiceDetail, ServiceState, Vehicle,
};
use crate::utils::errors::{AppError, AppResult};

#[derive(Default)]
struct Tables {
    next_id: i32,
    customers: Vec<Customer>,
    vehicles: Vec<Vehicle>,
    appointments: Vec<Appointment>,
    services: Vec<Service>,
    ratings: Vec<Rating>,
    notes: Vec<Note>,
}

impl Tables {
    fn next_id(&mut self) -> i32 {
        self.next_id += 1;
        self.next_id
    }

    fn vehicles_of(&self, customer_id: i32) -> Vec<Vehicle> {
        self.vehicles
            .iter()
            .filter(|v| v.customer_id == customer_id)
            .cloned()
            .collect()
    }

    fn appointment_detail(&self, appointment: &Appointment) -> Option<AppointmentDetail> {
        let customer = self.customers.iter().find(|c| c.id == appointment.customer_id)?;
        let vehicle = self.vehicles.iter().find(|v| v.id == appointment.vehicle_id)?;
        Some(AppointmentDetail {
            appointment: appointment.clone(),
            customer: customer.clone(),
            vehicle: vehicle.clone(),
        })
    }

    fn service_detail(&self, service: &Service) -> Option<ServiceDetail> {
        let appointment = self
            .appointments
            .iter()
            .find(|a| a.id == service.appointment_id)?;
        Some(ServiceDetail {
            service: service.clone(),
            appointment: self.appointment_detail(appointment)?,
            rating: self.ratings.iter().find(|r| r.service_id == service.id).cloned(),
        })
    }

    fn check_references(&self, input: &AppointmentInput) -> AppResult<()> {
        let customer_ok = self.customers.iter().any(|c| c.id == input.customer_id);
        let vehicle_ok = self.vehicles.iter().any(|v| v.id == input.vehicle_id);
        if customer_ok && vehicle_ok {
            Ok(())
        } else {
            Err(AppError::NotFound(MISSING_REFERENCE.to_string()))
        }
    }
}

/// Base de datos en memoria compartida por todos los repositorios
#[derive(Default)]
pub struct InMemoryStore {
    tables: Mutex<Tables>,
}

impl InMemoryStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Repositorios que comparten este almacén
    pub fn repositories(self: &Arc<Self>) -> Repositories {
        Repositories {
            customers: self.clone(),
            vehicles: self.clone(),
            appointments: self.clone(),
            services: self.clone(),
            ratings: self.clone(),
            notes: self.clone(),
        }
    }
}

#[async_trait]
impl CustomerRepository for InMemoryStore {
    async fn search(&self, name_filter: Option<&str>) -> AppResult<Vec<CustomerWithVehicles>> {
        let tables = self.tables.lock().unwrap();
        let needle = name_filter.unwrap_or_default().to_lowercase();
        let mut customers: Vec<Customer> = tables
            .customers
            .iter()
            .filter(|c| c.name.to_lowercase().contains(&needle))
            .cloned()
            .collect();
        customers.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(attach_vehicles(customers, tables.vehicles.clone()))
    }

    async fn find_by_id(&self, id: i32) -> AppResult<Option<CustomerWithVehicles>> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .customers
            .iter()
            .find(|c| c.id == id)
            .map(|c| CustomerWithVehicles {
                customer: c.clone(),
                vehicles: tables.vehicles_of(c.id),
            }))
    }

    async fn name_exists(&self, name: &str, exclude_id: Option<i32>) -> AppResult<bool> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .customers
            .iter()
            .any(|c| c.name == name && Some(c.id) != exclude_id))
    }

    async fn create_with_vehicle(
        &self,
        name: &str,
        phone: Option<&str>,
        model: &str,
        plate: Option<&str>,
    ) -> AppResult<CustomerWithVehicles> {
        let mut tables = self.tables.lock().unwrap();
        if tables.customers.iter().any(|c| c.name == name) {
            return Err(AppError::Conflict(DUPLICATE_NAME.to_string()));
        }

        let customer = Customer {
            id: tables.next_id(),
            name: name.to_string(),
            phone: phone.map(str::to_string),
            created_at: Utc::now(),
        };
        let vehicle = Vehicle {
            id: tables.next_id(),
            customer_id: customer.id,
            model: model.to_string(),
            plate: plate.map(str::to_string),
            created_at: Utc::now(),
        };
        tables.customers.push(customer.clone());
        tables.vehicles.push(vehicle.clone());

        Ok(CustomerWithVehicles {
            customer,
            vehicles: vec![vehicle],
        })
    }

    async fn update(&self, id: i32, name: &str, phone: Option<&str>) -> AppResult<Option<Customer>> {
        let mut tables = self.tables.lock().unwrap();
        if tables.customers.iter().any(|c| c.name == name && c.id != id) {
            return Err(AppError::Conflict(DUPLICATE_NAME.to_string()));
        }

        Ok(tables.customers.iter_mut().find(|c| c.id == id).map(|c| {
            c.name = name.to_string();
            c.phone = phone.map(str::to_string);
            c.clone()
        }))
    }
}

#[async_trait]
impl VehicleRepository for InMemoryStore {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Vehicle>> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.vehicles.iter().find(|v| v.id == id).cloned())
    }

    async fn create(&self, customer_id: i32, model: &str, plate: Option<&str>) -> AppResult<Vehicle> {
        let mut tables = self.tables.lock().unwrap();
        if !tables.customers.iter().any(|c| c.id == customer_id) {
            return Err(AppError::NotFound("Cliente não encontrado.".to_string()));
        }

        let vehicle = Vehicle {
            id: tables.next_id(),
            customer_id,
            model: model.to_string(),
            plate: plate.map(str::to_string),
            created_at: Utc::now(),
        };
        tables.vehicles.push(vehicle.clone());
        Ok(vehicle)
    }

    async fn count_appointments(&self, id: i32) -> AppResult<i64> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.appointments.iter().filter(|a| a.vehicle_id == id).count() as i64)
    }

    async fn delete(&self, id: i32) -> AppResult<bool> {
        let mut tables = self.tables.lock().unwrap();
        if tables.appointments.iter().any(|a| a.vehicle_id == id) {
            return Err(AppError::Dependency(
                "Não é possível excluir o carro, pois ele possui agendamentos vinculados.".to_string(),
            ));
        }
        let before = tables.vehicles.len();
        tables.vehicles.retain(|v| v.id != id);
        Ok(tables.vehicles.len() < before)
    }
}

#[async_trait]
impl AppointmentRepository for InMemoryStore {
    async fn list(&self) -> AppResult<Vec<AppointmentDetail>> {
        let tables = self.tables.lock().unwrap();
        let mut details: Vec<AppointmentDetail> = tables
            .appointments
            .iter()
            .filter_map(|a| tables.appointment_detail(a))
            .collect();
        details.sort_by_key(|d| d.appointment.scheduled_at);
        Ok(details)
    }

    async fn list_between(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> AppResult<Vec<AppointmentDetail>> {
        let tables = self.tables.lock().unwrap();
        let mut details: Vec<AppointmentDetail> = tables
            .appointments
            .iter()
            .filter(|a| a.scheduled_at >= from && a.scheduled_at < to)
            .filter_map(|a| tables.appointment_detail(a))
            .collect();
        details.sort_by_key(|d| d.appointment.scheduled_at);
        Ok(details)
    }

    async fn find_by_id(&self, id: i32) -> AppResult<Option<Appointment>> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.appointments.iter().find(|a| a.id == id).cloned())
    }

    async fn find_full(&self, id: i32) -> AppResult<Option<AppointmentFull>> {
        let tables = self.tables.lock().unwrap();
        let Some(detail) = tables
            .appointments
            .iter()
            .find(|a| a.id == id)
            .and_then(|a| tables.appointment_detail(a))
        else {
            return Ok(None);
        };

        let vehicles = tables.vehicles_of(detail.customer.id);
        let service = tables.services.iter().find(|s| s.appointment_id == id).cloned();
        Ok(Some(AppointmentFull {
            appointment: detail.appointment,
            customer: CustomerWithVehicles {
                customer: detail.customer,
                vehicles,
            },
            vehicle: detail.vehicle,
            service,
        }))
    }

    async fn exists_at(&self, instant: DateTime<Utc>) -> AppResult<bool> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.appointments.iter().any(|a| a.scheduled_at == instant))
    }

    async fn create(&self, input: &AppointmentInput) -> AppResult<Appointment> {
        let mut tables = self.tables.lock().unwrap();
        if tables.appointments.iter().any(|a| a.scheduled_at == input.scheduled_at) {
            return Err(AppError::Conflict(SLOT_TAKEN.to_string()));
        }
        tables.check_references(input)?;

        let appointment = Appointment {
            id: tables.next_id(),
            scheduled_at: input.scheduled_at,
            customer_id: input.customer_id,
            vehicle_id: input.vehicle_id,
            created_at: Utc::now(),
        };
        tables.appointments.push(appointment.clone());
        Ok(appointment)
    }

    async fn update(&self, id: i32, input: &AppointmentInput) -> AppResult<Option<Appointment>> {
        let mut tables = self.tables.lock().unwrap();
        if !tables.appointments.iter().any(|a| a.id == id) {
            return Ok(None);
        }
        if tables
            .appointments
            .iter()
            .any(|a| a.scheduled_at == input.scheduled_at && a.id != id)
        {
            return Err(AppError::Conflict(SLOT_TAKEN.to_string()));
        }
        tables.check_references(input)?;

        Ok(tables.appointments.iter_mut().find(|a| a.id == id).map(|a| {
            a.scheduled_at = input.scheduled_at;
            a.customer_id = input.customer_id;
            a.vehicle_id = input.vehicle_id;
            a.clone()
        }))
    }

    async fn delete(&self, id: i32) -> AppResult<bool> {
        let mut tables = self.tables.lock().unwrap();
        let before = tables.appointments.len();
        tables.appointments.retain(|a| a.id != id);
        if tables.appointments.len() == before {
            return Ok(false);
        }

        let removed: Vec<i32> = tables
            .services
            .iter()
            .filter(|s| s.appointment_id == id)
            .map(|s| s.id)
            .collect();
        tables.services.retain(|s| s.appointment_id != id);
        tables.ratings.retain(|r| !removed.contains(&r.service_id));
        Ok(true)
    }
}

#[async_trait]
impl ServiceRepository for InMemoryStore {
    async fn list(&self) -> AppResult<Vec<ServiceDetail>> {
        let tables = self.tables.lock().unwrap();
        let mut details: Vec<ServiceDetail> = tables
            .services
            .iter()
            .filter_map(|s| tables.service_detail(s))
            .collect();
        details.sort_by(|a, b| b.service.started_at.cmp(&a.service.started_at));
        Ok(details)
    }

    async fn find_by_id(&self, id: i32) -> AppResult<Option<Service>> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.services.iter().find(|s| s.id == id).cloned())
    }

    async fn find_detail(&self, id: i32) -> AppResult<Option<ServiceDetail>> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .services
            .iter()
            .find(|s| s.id == id)
            .and_then(|s| tables.service_detail(s)))
    }

    async fn find_by_appointment(&self, appointment_id: i32) -> AppResult<Option<Service>> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .services
            .iter()
            .find(|s| s.appointment_id == appointment_id)
            .cloned())
    }

    async fn find_by_gallery_id(&self, gallery_id: &str) -> AppResult<Option<ServiceDetail>> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .services
            .iter()
            .find(|s| s.gallery_id.as_deref() == Some(gallery_id))
            .and_then(|s| tables.service_detail(s)))
    }

    async fn create_started(
        &self,
        appointment_id: i32,
        started_at: DateTime<Utc>,
        checklist: &Checklist,
    ) -> AppResult<(Service, bool)> {
        let mut tables = self.tables.lock().unwrap();
        if let Some(existing) = tables.services.iter().find(|s| s.appointment_id == appointment_id) {
            return Ok((existing.clone(), false));
        }
        if !tables.appointments.iter().any(|a| a.id == appointment_id) {
            return Err(AppError::NotFound("Agendamento não encontrado.".to_string()));
        }

        let service = Service {
            id: tables.next_id(),
            appointment_id,
            state: ServiceState::InProgress,
            notes: None,
            checklist: checklist.clone(),
            photos: Vec::new(),
            price: None,
            additional_services: None,
            started_at,
            gallery_id: None,
        };
        tables.services.push(service.clone());
        Ok((service, true))
    }

    async fn save(&self, service: &Service) -> AppResult<Service> {
        let mut tables = self.tables.lock().unwrap();
        let stored = tables
            .services
            .iter_mut()
            .find(|s| s.id == service.id)
            .ok_or_else(|| AppError::NotFound("Serviço não encontrado.".to_string()))?;

        // gallery_id y started_at no se modifican al guardar
        let gallery_id = stored.gallery_id.clone();
        let started_at = stored.started_at;
        *stored = service.clone();
        stored.gallery_id = gallery_id;
        stored.started_at = started_at;
        Ok(stored.clone())
    }

    async fn assign_gallery_id(&self, id: i32, gallery_id: &str) -> AppResult<Option<Service>> {
        let mut tables = self.tables.lock().unwrap();
        if tables
            .services
            .iter()
            .any(|s| s.id != id && s.gallery_id.as_deref() == Some(gallery_id))
        {
            return Err(AppError::Conflict(GALLERY_TAKEN.to_string()));
        }

        Ok(tables.services.iter_mut().find(|s| s.id == id).map(|s| {
            if s.gallery_id.is_none() {
                s.gallery_id = Some(gallery_id.to_string());
            }
            s.clone()
        }))
    }

    async fn list_completed_between(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> AppResult<Vec<CompletedService>> {
        let tables = self.tables.lock().unwrap();
        let mut completed: Vec<CompletedService> = tables
            .services
            .iter()
            .filter_map(|s| {
                let completed_at = s.state.completed_at()?;
                if completed_at < from || completed_at >= to {
                    return None;
                }
                let detail = tables.service_detail(s)?;
                Some(CompletedService {
                    service_id: s.id,
                    customer_name: detail.appointment.customer.name,
                    vehicle_model: detail.appointment.vehicle.model,
                    price: s.price,
                    completed_at,
                })
            })
            .collect();
        completed.sort_by(|a, b| b.completed_at.cmp(&a.completed_at));
        Ok(completed)
    }

    async fn customer_history(
        &self,
        customer_id: i32,
        exclude_service_id: i32,
        limit: i64,
    ) -> AppResult<Vec<HistoryEntry>> {
        let tables = self.tables.lock().unwrap();
        let mut history: Vec<HistoryEntry> = tables
            .services
            .iter()
            .filter(|s| s.id != exclude_service_id)
            .filter_map(|s| {
                let completed_at = s.state.completed_at()?;
                let gallery_id = s.gallery_id.clone()?;
                let detail = tables.service_detail(s)?;
                if detail.appointment.customer.id != customer_id {
                    return None;
                }
                Some(HistoryEntry {
                    gallery_id,
                    completed_at,
                    vehicle_model: detail.appointment.vehicle.model,
                    vehicle_plate: detail.appointment.vehicle.plate,
                    photos: s.photos.clone(),
                })
            })
            .collect();
        history.sort_by(|a, b| b.completed_at.cmp(&a.completed_at));
        history.truncate(limit.max(0) as usize);
        Ok(history)
    }
}

#[async_trait]
impl RatingRepository for InMemoryStore {
    async fn list(&self) -> AppResult<Vec<RatingDetail>> {
        let tables = self.tables.lock().unwrap();
        let mut ratings: Vec<RatingDetail> = tables
            .ratings
            .iter()
            .filter_map(|r| {
                let service = tables.services.iter().find(|s| s.id == r.service_id)?;
                Some(RatingDetail {
                    rating: r.clone(),
                    service: tables.service_detail(service)?,
                })
            })
            .collect();
        ratings.sort_by(|a, b| {
            (b.rating.created_at, b.rating.id).cmp(&(a.rating.created_at, a.rating.id))
        });
        Ok(ratings)
    }

    async fn find_by_service(&self, service_id: i32) -> AppResult<Option<Rating>> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.ratings.iter().find(|r| r.service_id == service_id).cloned())
    }

    async fn create(&self, service_id: i32, stars: i16, comment: Option<&str>) -> AppResult<Rating> {
        let mut tables = self.tables.lock().unwrap();
        if tables.ratings.iter().any(|r| r.service_id == service_id) {
            return Err(AppError::Conflict("Este serviço já foi avaliado.".to_string()));
        }
        if !tables.services.iter().any(|s| s.id == service_id) {
            return Err(AppError::NotFound("Serviço não encontrado.".to_string()));
        }

        let rating = Rating {
            id: tables.next_id(),
            service_id,
            stars,
            comment: comment.map(str::to_string),
            created_at: Utc::now(),
        };
        tables.ratings.push(rating.clone());
        Ok(rating)
    }
}

#[async_trait]
impl NoteRepository for InMemoryStore {
    async fn list(&self) -> AppResult<Vec<Note>> {
        let tables = self.tables.lock().unwrap();
        let mut notes = tables.notes.clone();
        notes.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));
        Ok(notes)
    }

    async fn create(&self, content: &str) -> AppResult<Note> {
        let mut tables = self.tables.lock().unwrap();
        let note = Note {
            id: tables.next_id(),
            content: content.to_string(),
            created_at: Utc::now(),
        };
        tables.notes.push(note.clone());
        Ok(note)
    }

    async fn update(&self, id: i32, content: &str) -> AppResult<Option<Note>> {
        let mut tables = self.tables.lock().unwrap();
        Ok(tables.notes.iter_mut().find(|n| n.id == id).map(|n| {
            n.content = content.to_string();
            n.clone()
        }))
    }

    async fn delete(&self, id: i32) -> AppResult<bool> {
        let mut tables = self.tables.lock().unwrap();
        let before = tables.notes.len();
        tables.notes.retain(|n| n.id != id);
        Ok(tables.notes.len() < before)
    }
}
