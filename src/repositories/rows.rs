//! Conversión de filas PostgreSQL a modelos
//!
//! Las consultas con joins devuelven las columnas de cada tabla con un prefijo
//! (`s_`, `a_`, `c_`, `v_`, `r_`); las consultas de una sola tabla usan prefijo vacío.

use sqlx::postgres::PgRow;
use sqlx::types::Json;
use sqlx::Row;

use crate::models::{
    Appointment, AppointmentDetail, Checklist, Customer, Rating, Service, ServiceDetail,
    ServiceState, Vehicle,
};

/// Columnas de servicio + agendamiento + cliente + vehículo + evaluación
pub const SERVICE_DETAIL_SELECT: &str = r#"
    SELECT
        s.id AS s_id, s.appointment_id AS s_appointment_id, s.status AS s_status,
        s.notes AS s_notes, s.checklist AS s_checklist, s.photos AS s_photos,
        s.price AS s_price, s.additional_services AS s_additional_services,
        s.started_at AS s_started_at, s.completed_at AS s_completed_at,
        s.gallery_id AS s_gallery_id,
        a.id AS a_id, a.scheduled_at AS a_scheduled_at, a.customer_id AS a_customer_id,
        a.vehicle_id AS a_vehicle_id, a.created_at AS a_created_at,
        c.id AS c_id, c.name AS c_name, c.phone AS c_phone, c.created_at AS c_created_at,
        v.id AS v_id, v.customer_id AS v_customer_id, v.model AS v_model,
        v.plate AS v_plate, v.created_at AS v_created_at,
        r.id AS r_id, r.service_id AS r_service_id, r.stars AS r_stars,
        r.comment AS r_comment, r.created_at AS r_created_at
    FROM services s
    JOIN appointments a ON a.id = s.appointment_id
    JOIN customers c ON c.id = a.customer_id
    JOIN vehicles v ON v.id = a.vehicle_id
    LEFT JOIN ratings r ON r.service_id = s.id
"#;

/// Columnas de agendamiento + cliente + vehículo
pub const APPOINTMENT_DETAIL_SELECT: &str = r#"
    SELECT
        a.id AS a_id, a.scheduled_at AS a_scheduled_at, a.customer_id AS a_customer_id,
        a.vehicle_id AS a_vehicle_id, a.created_at AS a_created_at,
        c.id AS c_id, c.name AS c_name, c.phone AS c_phone, c.created_at AS c_created_at,
        v.id AS v_id, v.customer_id AS v_customer_id, v.model AS v_model,
        v.plate AS v_plate, v.created_at AS v_created_at
    FROM appointments a
    JOIN customers c ON c.id = a.customer_id
    JOIN vehicles v ON v.id = a.vehicle_id
"#;

fn col(prefix: &str, name: &str) -> String {
    format!("{}{}", prefix, name)
}

pub fn customer(row: &PgRow, prefix: &str) -> Result<Customer, sqlx::Error> {
    Ok(Customer {
        id: row.try_get(col(prefix, "id").as_str())?,
        name: row.try_get(col(prefix, "name").as_str())?,
        phone: row.try_get(col(prefix, "phone").as_str())?,
        created_at: row.try_get(col(prefix, "created_at").as_str())?,
    })
}

pub fn vehicle(row: &PgRow, prefix: &str) -> Result<Vehicle, sqlx::Error> {
    Ok(Vehicle {
        id: row.try_get(col(prefix, "id").as_str())?,
        customer_id: row.try_get(col(prefix, "customer_id").as_str())?,
        model: row.try_get(col(prefix, "model").as_str())?,
        plate: row.try_get(col(prefix, "plate").as_str())?,
        created_at: row.try_get(col(prefix, "created_at").as_str())?,
    })
}

pub fn appointment(row: &PgRow, prefix: &str) -> Result<Appointment, sqlx::Error> {
    Ok(Appointment {
        id: row.try_get(col(prefix, "id").as_str())?,
        scheduled_at: row.try_get(col(prefix, "scheduled_at").as_str())?,
        customer_id: row.try_get(col(prefix, "customer_id").as_str())?,
        vehicle_id: row.try_get(col(prefix, "vehicle_id").as_str())?,
        created_at: row.try_get(col(prefix, "created_at").as_str())?,
    })
}

pub fn service(row: &PgRow, prefix: &str) -> Result<Service, sqlx::Error> {
    let status: Option<String> = row.try_get(col(prefix, "status").as_str())?;
    let completed_at = row.try_get(col(prefix, "completed_at").as_str())?;
    let state = ServiceState::from_columns(status.as_deref(), completed_at)
        .map_err(|e| sqlx::Error::Decode(e.into()))?;
    let checklist: Json<Checklist> = row.try_get(col(prefix, "checklist").as_str())?;

    Ok(Service {
        id: row.try_get(col(prefix, "id").as_str())?,
        appointment_id: row.try_get(col(prefix, "appointment_id").as_str())?,
        state,
        notes: row.try_get(col(prefix, "notes").as_str())?,
        checklist: checklist.0,
        photos: row.try_get(col(prefix, "photos").as_str())?,
        price: row.try_get(col(prefix, "price").as_str())?,
        additional_services: row.try_get(col(prefix, "additional_services").as_str())?,
        started_at: row.try_get(col(prefix, "started_at").as_str())?,
        gallery_id: row.try_get(col(prefix, "gallery_id").as_str())?,
    })
}

pub fn rating(row: &PgRow, prefix: &str) -> Result<Rating, sqlx::Error> {
    Ok(Rating {
        id: row.try_get(col(prefix, "id").as_str())?,
        service_id: row.try_get(col(prefix, "service_id").as_str())?,
        stars: row.try_get(col(prefix, "stars").as_str())?,
        comment: row.try_get(col(prefix, "comment").as_str())?,
        created_at: row.try_get(col(prefix, "created_at").as_str())?,
    })
}

/// Evaluación opcional de un LEFT JOIN
pub fn optional_rating(row: &PgRow, prefix: &str) -> Result<Option<Rating>, sqlx::Error> {
    let id: Option<i32> = row.try_get(col(prefix, "id").as_str())?;
    match id {
        Some(_) => rating(row, prefix).map(Some),
        None => Ok(None),
    }
}

pub fn appointment_detail(row: &PgRow) -> Result<AppointmentDetail, sqlx::Error> {
    Ok(AppointmentDetail {
        appointment: appointment(row, "a_")?,
        customer: customer(row, "c_")?,
        vehicle: vehicle(row, "v_")?,
    })
}

pub fn service_detail(row: &PgRow) -> Result<ServiceDetail, sqlx::Error> {
    Ok(ServiceDetail {
        service: service(row, "s_")?,
        appointment: appointment_detail(row)?,
        rating: optional_rating(row, "r_")?,
    })
}
