use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use shared_models::error::AppError;

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateDoctorRequest {
    #[schema(example = "John")]
    pub first_name: Option<String>,
    #[schema(example = "Doe")]
    pub last_name: Option<String>,
    #[schema(example = "Cardiology")]
    pub specialization: Option<String>,
    #[schema(example = 10)]
    pub experience: Option<u32>,
    pub bio: Option<String>,
    /// Public URL of the doctor's portrait.
    pub image: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub hospital: Option<String>,
    pub available_days: Option<Vec<String>>,
    pub available_times: Option<Vec<String>>,
}

/// Fields an admin may change on a doctor. Anything else in the body is dropped.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDoctorRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub specialization: Option<String>,
    pub experience: Option<u32>,
    pub bio: Option<String>,
    pub image: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub hospital: Option<String>,
    pub available_days: Option<Vec<String>>,
    pub available_times: Option<Vec<String>>,
}

#[derive(Debug, thiserror::Error)]
pub enum DoctorError {
    #[error("Doctor not found")]
    NotFound,

    #[error("No doctors found for this specialization")]
    NoneForSpecialization,

    #[error("No matching doctors found")]
    NoMatches,

    #[error("{0}")]
    ValidationError(String),

    #[error(transparent)]
    Store(#[from] anyhow::Error),
}

impl DoctorError {
    /// Maps to an HTTP error; store failures surface as `failure`.
    pub fn into_app_error(self, failure: &str) -> AppError {
        match self {
            DoctorError::NotFound
            | DoctorError::NoneForSpecialization
            | DoctorError::NoMatches => AppError::NotFound(self.to_string()),
            DoctorError::ValidationError(msg) => AppError::BadRequest(msg),
            DoctorError::Store(e) => AppError::store(failure, e),
        }
    }
}
