//! Modelos del dashboard
//!
//! Resumen del día (agenda) y dashboard de faturamento por día, semana y mes.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Servicio concluido tal como lo necesita el agregador de faturamento
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletedService {
    pub service_id: i32,
    pub customer_name: String,
    pub vehicle_model: String,
    pub price: Option<Decimal>,
    pub completed_at: DateTime<Utc>,
}

/// Próximo cliente del día
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NextCustomer {
    pub name: String,
    pub scheduled_at: DateTime<Utc>,
}

/// Resumen de la agenda de un día
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DaySummary {
    pub date: NaiveDate,
    pub appointments_today: usize,
    pub next_customer: Option<NextCustomer>,
}

/// Totales de un período
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RevenueBucket {
    pub revenue: Decimal,
    pub count: usize,
}

/// Actividad reciente (servicio concluido)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecentActivity {
    pub service_id: i32,
    pub customer_name: String,
    pub vehicle_model: String,
    pub price: Decimal,
    pub completed_at: DateTime<Utc>,
}

/// Dashboard de faturamento completo
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FullDashboard {
    pub reference_date: NaiveDate,
    pub today: RevenueBucket,
    pub week: RevenueBucket,
    pub month: RevenueBucket,
    pub recent_activity: Vec<RecentActivity>,
}
