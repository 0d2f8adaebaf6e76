use serde::Deserialize;

/// `?date=YYYY-MM-DD`; sin fecha se usa el día local actual
#[derive(Debug, Default, Deserialize)]
pub struct DashboardQuery {
    pub date: Option<String>,
}

/// `?current_service_id=` del historial por cliente
#[derive(Debug, Default, Deserialize)]
pub struct HistoryQuery {
    pub current_service_id: Option<String>,
}
