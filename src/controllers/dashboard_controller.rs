use chrono::{Local, NaiveDate, TimeZone, Utc};
use tracing::debug;

use crate::cache::{View, ViewNotifier};
use crate::dto::dashboard_dto::DashboardQuery;
use crate::models::{DaySummary, FullDashboard};
use crate::repositories::Repositories;
use crate::services::revenue_service::day_window;
use crate::services::{compute_dashboard, day_summary, DashboardWindows};
use crate::state::AppState;
use crate::utils::errors::{AppError, AppResult};
use crate::utils::validation::validate_date;

/// Fecha de referencia: la informada o el día actual en la zona del taller
fn reference_date<Tz: TimeZone>(tz: &Tz, query: &DashboardQuery) -> AppResult<NaiveDate> {
    match query.date.as_deref().map(str::trim) {
        Some(raw) if !raw.is_empty() => validate_date(raw)
            .map_err(|_| AppError::Validation("Data inválida, use AAAA-MM-DD.".to_string())),
        _ => Ok(Utc::now().with_timezone(tz).date_naive()),
    }
}

pub struct DashboardController {
    repos: Repositories,
    views: ViewNotifier,
}

impl DashboardController {
    pub fn new(state: &AppState) -> Self {
        Self {
            repos: state.repos.clone(),
            views: state.views.clone(),
        }
    }

    /// Resumen de la agenda del día
    pub async fn summary(&self, query: DashboardQuery) -> AppResult<DaySummary> {
        self.summary_in(&Local, query).await
    }

    pub async fn summary_in<Tz: TimeZone>(&self, tz: &Tz, query: DashboardQuery) -> AppResult<DaySummary> {
        let date = reference_date(tz, &query)?;
        let window = day_window(tz, date);
        let appointments = self
            .repos
            .appointments
            .list_between(window.start, window.end)
            .await?;
        Ok(day_summary(date, &appointments, Utc::now()))
    }

    /// Dashboard de faturamento (cacheado por fecha local)
    pub async fn full(&self, query: DashboardQuery) -> AppResult<FullDashboard> {
        self.full_in(&Local, query).await
    }

    pub async fn full_in<Tz: TimeZone>(&self, tz: &Tz, query: DashboardQuery) -> AppResult<FullDashboard> {
        let date = reference_date(tz, &query)?;
        let windows = DashboardWindows::for_date(tz, date);
        let key = date.format("%Y-%m-%d").to_string();
        let repos = self.repos.clone();

        self.views
            .load_or_compute(View::Dashboard, &key, move || async move {
                let completed = repos
                    .services
                    .list_completed_between(windows.month.start, windows.month.end)
                    .await?;
                debug!("📊 Dashboard {}: {} servicios en el mes", date, completed.len());
                Ok(compute_dashboard(date, &windows, completed))
            })
            .await
    }
}
