use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use shared_models::error::AppError;

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatePropertyRequest {
    #[schema(example = "Luxury Villa in Banana Island")]
    pub title: Option<String>,
    #[schema(example = "A beautiful modern villa with ocean views.")]
    pub description: Option<String>,
    #[schema(example = 250000000)]
    pub price: Option<f64>,
    #[schema(example = "Ikoyi, Lagos, Nigeria")]
    pub location: Option<String>,
    #[schema(example = json!(["Swimming Pool", "24/7 Security", "Gym"]))]
    pub features: Option<Vec<String>>,
    pub bedrooms: Option<u32>,
    pub bathrooms: Option<u32>,
    #[schema(example = 3)]
    pub garage: Option<u32>,
    #[schema(example = "Villa")]
    pub property_type: Option<String>,
    /// Image objects as stored, passed through untouched.
    #[schema(value_type = Option<Vec<Object>>)]
    pub images: Option<Vec<serde_json::Value>>,
}

#[derive(Debug, thiserror::Error)]
pub enum PropertyError {
    #[error("title, price, location, features and description are required")]
    MissingFields,

    #[error("Property not found")]
    NotFound,

    #[error(transparent)]
    Store(#[from] anyhow::Error),
}

impl PropertyError {
    pub fn into_app_error(self, failure: &str) -> AppError {
        match self {
            PropertyError::MissingFields => AppError::BadRequest(self.to_string()),
            PropertyError::NotFound => AppError::NotFound(self.to_string()),
            PropertyError::Store(e) => AppError::store(failure, e),
        }
    }
}
