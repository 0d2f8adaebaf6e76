use serde::Deserialize;
use validator::Validate;

use super::{optional_phone, required_text};

/// Alta de cliente con su primer vehículo
#[derive(Debug, Deserialize, Validate)]
pub struct CreateCustomerRequest {
    #[validate(custom = "required_text", length(max = 120))]
    pub name: String,
    #[validate(custom = "optional_phone")]
    pub phone: Option<String>,
    #[validate(custom = "required_text", length(max = 120))]
    pub vehicle_model: String,
    #[validate(length(max = 20))]
    pub vehicle_plate: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateCustomerRequest {
    #[validate(custom = "required_text", length(max = 120))]
    pub name: String,
    #[validate(custom = "optional_phone")]
    pub phone: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct CustomerQuery {
    pub name: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateVehicleRequest {
    #[validate(range(min = 1))]
    pub customer_id: i32,
    #[validate(custom = "required_text", length(max = 120))]
    pub model: String,
    #[validate(length(max = 20))]
    pub plate: Option<String>,
}
