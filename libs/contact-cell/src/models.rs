use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use shared_models::error::AppError;

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ContactRequest {
    #[schema(example = "Jane Doe")]
    pub full_name: Option<String>,
    #[schema(example = "jane@example.com")]
    pub email: Option<String>,
    #[schema(example = "Inquiry about an appointment")]
    pub subject: Option<String>,
    #[schema(example = "Hello, can I book a consultation for next week?")]
    pub message: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum ContactError {
    #[error("All fields are required")]
    MissingFields,

    #[error("Invalid email address")]
    InvalidEmail,

    #[error("Contact message not found")]
    NotFound,

    #[error(transparent)]
    Store(#[from] anyhow::Error),
}

impl ContactError {
    pub fn into_app_error(self, failure: &str) -> AppError {
        match self {
            ContactError::MissingFields | ContactError::InvalidEmail => AppError::BadRequest(self.to_string()),
            ContactError::NotFound => AppError::NotFound(self.to_string()),
            ContactError::Store(e) => AppError::store(failure, e),
        }
    }
}
