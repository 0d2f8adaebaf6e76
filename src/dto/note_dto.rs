use serde::Deserialize;
use validator::Validate;

use super::required_text;

#[derive(Debug, Deserialize, Validate)]
pub struct NoteRequest {
    #[validate(custom = "required_text", length(max = 5000))]
    pub content: String,
}
