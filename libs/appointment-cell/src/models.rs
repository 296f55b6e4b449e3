use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use shared_models::error::AppError;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    Pending,
    Confirmed,
    Cancelled,
    Completed,
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppointmentStatus::Pending => write!(f, "pending"),
            AppointmentStatus::Confirmed => write!(f, "confirmed"),
            AppointmentStatus::Cancelled => write!(f, "cancelled"),
            AppointmentStatus::Completed => write!(f, "completed"),
        }
    }
}

impl FromStr for AppointmentStatus {
    type Err = AppointmentError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "pending" => Ok(AppointmentStatus::Pending),
            "confirmed" => Ok(AppointmentStatus::Confirmed),
            "cancelled" => Ok(AppointmentStatus::Cancelled),
            "completed" => Ok(AppointmentStatus::Completed),
            _ => Err(AppointmentError::InvalidStatus),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateAppointmentRequest {
    #[schema(example = "doctor_123")]
    pub doctor_id: Option<String>,
    #[schema(example = "2025-10-20T14:00:00Z")]
    pub date: Option<String>,
    #[schema(example = "Consultation")]
    pub appointment_type: Option<String>,
    #[schema(example = "Cardiology")]
    pub service: Option<String>,
    #[schema(example = "Lagos")]
    pub state: Option<String>,
    #[schema(example = "Ikeja")]
    pub city: Option<String>,
    #[schema(example = "St. Mary Hospital")]
    pub hospital: Option<String>,
    #[schema(example = "2:00 PM")]
    pub appointment_time: Option<String>,
    pub recommended_date_time: Option<String>,
    pub notes: Option<String>,
    #[schema(example = "card")]
    pub payment_method: Option<String>,
    #[schema(example = "paid")]
    pub payment_status: Option<String>,
    pub transaction_id: Option<String>,
    #[schema(example = 5000)]
    pub amount_paid: Option<f64>,
}

/// Payment details stored on the appointment as a nested object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount_paid: Option<f64>,
}

impl CreateAppointmentRequest {
    /// `None` when the caller sent no payment fields at all.
    pub fn payment(&self) -> Option<PaymentRecord> {
        let payment = PaymentRecord {
            method: self.payment_method.clone(),
            status: self.payment_status.clone(),
            transaction_id: self.transaction_id.clone(),
            amount_paid: self.amount_paid,
        };
        (payment != PaymentRecord::default()).then_some(payment)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateStatusRequest {
    /// Kept untyped so a non-string value is reported as an invalid status.
    #[schema(value_type = Option<String>, example = "confirmed")]
    pub status: Option<serde_json::Value>,
}

#[derive(Debug, thiserror::Error)]
pub enum AppointmentError {
    #[error("doctorId and date are required")]
    MissingFields,

    #[error("Invalid status")]
    InvalidStatus,

    #[error("Not found")]
    NotFound,

    #[error("Not allowed")]
    NotOwner,

    #[error(transparent)]
    Store(#[from] anyhow::Error),
}

impl From<AppointmentError> for AppError {
    fn from(err: AppointmentError) -> Self {
        match err {
            AppointmentError::MissingFields | AppointmentError::InvalidStatus => {
                AppError::BadRequest(err.to_string())
            }
            AppointmentError::NotFound => AppError::NotFound(err.to_string()),
            AppointmentError::NotOwner => AppError::Forbidden(err.to_string()),
            AppointmentError::Store(e) => AppError::store("Server error", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_parsing_is_exact() {
        assert_eq!("confirmed".parse::<AppointmentStatus>().unwrap(), AppointmentStatus::Confirmed);
        assert!("Confirmed".parse::<AppointmentStatus>().is_err());
        assert!("rescheduled".parse::<AppointmentStatus>().is_err());
        assert_eq!(AppointmentStatus::Cancelled.to_string(), "cancelled");
    }

    #[test]
    fn test_payment_only_when_supplied() {
        let mut request = CreateAppointmentRequest::default();
        assert!(request.payment().is_none());

        request.amount_paid = Some(5000.0);
        request.payment_method = Some("card".to_string());
        let payment = request.payment().unwrap();
        assert_eq!(payment.method.as_deref(), Some("card"));
        assert_eq!(payment.amount_paid, Some(5000.0));
        assert!(payment.status.is_none());
    }
}
