//! Agregación de faturamento
//!
//! Los períodos se calculan en la zona horaria local del taller y son
//! semiabiertos `[inicio, inicio_siguiente)`. La semana empieza en domingo.
//! El mes es el universo: día y semana se filtran sobre los servicios del mes.

use chrono::{DateTime, Datelike, Duration, Months, NaiveDate, NaiveTime, TimeZone, Utc};
use rust_decimal::Decimal;

use crate::models::{
    AppointmentDetail, CompletedService, DaySummary, FullDashboard, NextCustomer, RecentActivity,
    RevenueBucket,
};

/// Cantidad de servicios listados como actividad reciente
pub const RECENT_ACTIVITY_LIMIT: usize = 5;

/// Intervalo semiabierto en UTC
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl Window {
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        instant >= self.start && instant < self.end
    }
}

/// Períodos del dashboard para una fecha de referencia
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DashboardWindows {
    pub day: Window,
    pub week: Window,
    pub month: Window,
}

impl DashboardWindows {
    pub fn for_date<Tz: TimeZone>(tz: &Tz, date: NaiveDate) -> Self {
        let week_start = date - Duration::days(date.weekday().num_days_from_sunday() as i64);
        let month_start = date - Duration::days(date.day0() as i64);
        let next_month = month_start
            .checked_add_months(Months::new(1))
            .unwrap_or(NaiveDate::MAX);

        Self {
            day: local_window(tz, date, date + Duration::days(1)),
            week: local_window(tz, week_start, week_start + Duration::days(7)),
            month: local_window(tz, month_start, next_month),
        }
    }
}

/// Ventana de un día local
pub fn day_window<Tz: TimeZone>(tz: &Tz, date: NaiveDate) -> Window {
    local_window(tz, date, date + Duration::days(1))
}

fn local_window<Tz: TimeZone>(tz: &Tz, from: NaiveDate, to: NaiveDate) -> Window {
    Window {
        start: start_of_local_day(tz, from),
        end: start_of_local_day(tz, to),
    }
}

/// Primer instante del día local. Si la medianoche no existe (cambio de
/// horario) el día empieza una hora después.
pub fn start_of_local_day<Tz: TimeZone>(tz: &Tz, date: NaiveDate) -> DateTime<Utc> {
    let midnight = date.and_time(NaiveTime::MIN);
    tz.from_local_datetime(&midnight)
        .earliest()
        .or_else(|| tz.from_local_datetime(&(midnight + Duration::hours(1))).earliest())
        .map(|instant| instant.with_timezone(&Utc))
        .unwrap_or_else(|| Utc.from_utc_datetime(&midnight))
}

/// Servicio sin precio cuenta como cero
pub fn price_or_zero(price: Option<Decimal>) -> Decimal {
    price.unwrap_or(Decimal::ZERO)
}

fn bucket<'a>(services: impl Iterator<Item = &'a CompletedService>) -> RevenueBucket {
    services.fold(RevenueBucket::default(), |acc, service| RevenueBucket {
        revenue: acc.revenue + price_or_zero(service.price),
        count: acc.count + 1,
    })
}

/// Calcular el dashboard de faturamento a partir de los servicios concluidos.
///
/// Servicios fuera del mes de referencia se ignoran aunque vengan en la lista.
pub fn compute_dashboard(
    reference_date: NaiveDate,
    windows: &DashboardWindows,
    completed: Vec<CompletedService>,
) -> FullDashboard {
    let mut month: Vec<CompletedService> = completed
        .into_iter()
        .filter(|s| windows.month.contains(s.completed_at))
        .collect();
    month.sort_by(|a, b| b.completed_at.cmp(&a.completed_at));

    let today = bucket(month.iter().filter(|s| windows.day.contains(s.completed_at)));
    let week = bucket(month.iter().filter(|s| windows.week.contains(s.completed_at)));
    let month_total = bucket(month.iter());

    let recent_activity = month
        .iter()
        .take(RECENT_ACTIVITY_LIMIT)
        .map(|s| RecentActivity {
            service_id: s.service_id,
            customer_name: s.customer_name.clone(),
            vehicle_model: s.vehicle_model.clone(),
            price: price_or_zero(s.price),
            completed_at: s.completed_at,
        })
        .collect();

    FullDashboard {
        reference_date,
        today,
        week,
        month: month_total,
        recent_activity,
    }
}

/// Resumen de la agenda: total del día y el primer cliente después de `now`
pub fn day_summary(
    date: NaiveDate,
    appointments: &[AppointmentDetail],
    now: DateTime<Utc>,
) -> DaySummary {
    let next_customer = appointments
        .iter()
        .filter(|a| a.appointment.scheduled_at > now)
        .min_by_key(|a| a.appointment.scheduled_at)
        .map(|a| NextCustomer {
            name: a.customer.name.clone(),
            scheduled_at: a.appointment.scheduled_at,
        });

    DaySummary {
        date,
        appointments_today: appointments.len(),
        next_customer,
    }
}
