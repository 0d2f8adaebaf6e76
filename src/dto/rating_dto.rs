use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateRatingRequest {
    #[validate(range(min = 1))]
    pub service_id: i32,
    #[validate(range(min = 1, max = 5))]
    pub stars: i64,
    #[validate(length(max = 1000))]
    pub comment: Option<String>,
}

/// Evaluación enviada desde la galería pública
#[derive(Debug, Deserialize, Validate)]
pub struct PublicRatingRequest {
    #[validate(range(min = 1, max = 5))]
    pub stars: i64,
    #[validate(length(max = 1000))]
    pub comment: Option<String>,
}
