use serde_json::{json, Map, Value};
use tracing::debug;

use shared_config::AppConfig;
use shared_database::SanityClient;
use shared_models::auth::Identity;

use crate::models::{AppointmentError, AppointmentStatus, CreateAppointmentRequest};

const DOCTOR_APPOINTMENTS_QUERY: &str = r#"*[_type == "appointment" && doctor._ref == $userId] { ..., patient->{name,email}, doctor->{name,email} }"#;
const PATIENT_APPOINTMENTS_QUERY: &str = r#"*[_type == "appointment" && patient._ref == $userId] { ..., patient->{name,email}, doctor->{name,email} }"#;

pub struct AppointmentService {
    sanity: SanityClient,
}

impl AppointmentService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            sanity: SanityClient::new(config),
        }
    }

    /// Books an appointment for `patient_id` with status `pending`.
    pub async fn create_appointment(
        &self,
        patient_id: &str,
        request: CreateAppointmentRequest,
    ) -> Result<Value, AppointmentError> {
        let doc = build_appointment(patient_id, request)?;
        debug!("Creating appointment for patient {}", patient_id);

        Ok(self.sanity.create(doc).await?)
    }

    /// Doctors see the appointments booked with them; everyone else sees their own bookings.
    pub async fn list_appointments(&self, user: &Identity) -> Result<Vec<Value>, AppointmentError> {
        let query = if user.has_role("doctor") {
            DOCTOR_APPOINTMENTS_QUERY
        } else {
            PATIENT_APPOINTMENTS_QUERY
        };

        debug!("Listing appointments for {} ({})", user.id, user.role);
        Ok(self.sanity.fetch_list(query, json!({ "userId": user.id })).await?)
    }

    /// Reads the appointment, checks the caller is its doctor, then patches the
    /// status. Another writer can change the document between the two calls.
    pub async fn update_status(
        &self,
        user: &Identity,
        appointment_id: &str,
        status: Option<&str>,
    ) -> Result<Value, AppointmentError> {
        let status: AppointmentStatus = status.unwrap_or_default().parse()?;

        let appointment = self.sanity.fetch_one(
            r#"*[_type == "appointment" && _id == $id][0]"#,
            json!({ "id": appointment_id }),
        ).await?.ok_or(AppointmentError::NotFound)?;

        let doctor_ref = appointment
            .get("doctor")
            .and_then(|doctor| doctor.get("_ref"))
            .and_then(Value::as_str);
        if doctor_ref != Some(user.id.as_str()) {
            debug!("User {} does not own appointment {}", user.id, appointment_id);
            return Err(AppointmentError::NotOwner);
        }

        debug!("Setting appointment {} status to {}", appointment_id, status);
        Ok(self.sanity.patch_set(appointment_id, json!({ "status": status })).await?)
    }
}

fn build_appointment(patient_id: &str, request: CreateAppointmentRequest) -> Result<Value, AppointmentError> {
    let present = |value: &Option<String>| value.as_deref().is_some_and(|v| !v.trim().is_empty());
    if !present(&request.doctor_id) || !present(&request.date) {
        return Err(AppointmentError::MissingFields);
    }

    let payment = request.payment();

    let mut doc = Map::new();
    doc.insert("_type".to_string(), json!("appointment"));
    doc.insert("patient".to_string(), json!({ "_type": "reference", "_ref": patient_id }));
    doc.insert("doctor".to_string(), json!({ "_type": "reference", "_ref": request.doctor_id }));
    doc.insert("date".to_string(), json!(request.date));
    doc.insert("status".to_string(), json!(AppointmentStatus::Pending));
    doc.insert("notes".to_string(), json!(request.notes.unwrap_or_default()));

    let optional = [
        ("appointmentType", request.appointment_type),
        ("service", request.service),
        ("state", request.state),
        ("city", request.city),
        ("hospital", request.hospital),
        ("appointmentTime", request.appointment_time),
        ("recommendedDateTime", request.recommended_date_time),
    ];
    for (key, value) in optional {
        if let Some(value) = value {
            doc.insert(key.to_string(), json!(value));
        }
    }

    if let Some(payment) = payment {
        doc.insert("payment".to_string(), json!(payment));
    }

    Ok(Value::Object(doc))
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn request(doctor_id: Option<&str>, date: Option<&str>) -> CreateAppointmentRequest {
        CreateAppointmentRequest {
            doctor_id: doctor_id.map(str::to_string),
            date: date.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn test_build_requires_doctor_and_date() {
        assert_matches!(build_appointment("p1", request(None, Some("2025-10-20"))), Err(AppointmentError::MissingFields));
        assert_matches!(build_appointment("p1", request(Some("d1"), None)), Err(AppointmentError::MissingFields));
        assert_matches!(build_appointment("p1", request(Some(""), Some("2025-10-20"))), Err(AppointmentError::MissingFields));
    }

    #[test]
    fn test_build_references_and_defaults() {
        let mut req = request(Some("doctor-1"), Some("2025-10-20T14:00:00Z"));
        req.city = Some("Ikeja".to_string());
        req.payment_status = Some("paid".to_string());

        let doc = build_appointment("patient-1", req).unwrap();

        assert_eq!(doc["patient"]["_ref"], "patient-1");
        assert_eq!(doc["doctor"]["_ref"], "doctor-1");
        assert_eq!(doc["status"], "pending");
        assert_eq!(doc["notes"], "");
        assert_eq!(doc["city"], "Ikeja");
        assert_eq!(doc["payment"], json!({ "status": "paid" }));
        assert!(doc.get("hospital").is_none());
    }
}
