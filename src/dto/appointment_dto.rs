use serde::Deserialize;
use validator::Validate;

use super::required_text;

/// Alta o edición de agendamiento; `scheduled_at` en RFC 3339
#[derive(Debug, Deserialize, Validate)]
pub struct AppointmentRequest {
    #[validate(custom = "required_text")]
    pub scheduled_at: String,
    #[validate(range(min = 1))]
    pub customer_id: i32,
    #[validate(range(min = 1))]
    pub vehicle_id: i32,
}
