use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use shared_models::error::AppError;

const BIOLOGICAL_SEXES: &[&str] = &["male", "female", "other"];
const BLOOD_TYPES: &[&str] = &["A+", "A-", "B+", "B-", "AB+", "AB-", "O+", "O-"];
const HEIGHT_UNITS: &[&str] = &["cm", "ft_in"];
const WEIGHT_UNITS: &[&str] = &["kg", "lbs"];
const CONDITION_SEVERITIES: &[&str] = &["mild", "moderate", "severe"];
const ALLERGY_SEVERITIES: &[&str] = &["mild", "moderate", "severe", "life_threatening"];
const NOTE_CATEGORIES: &[&str] = &["genetic", "certification", "dnr", "advance_directive", "other"];

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct Measurement {
    #[schema(example = 180)]
    pub value: Option<f64>,
    #[schema(example = "cm")]
    pub unit: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BasicInfo {
    #[schema(example = "Tristan Peter")]
    pub first_name: Option<String>,
    #[schema(example = "Marcelino")]
    pub last_name: Option<String>,
    /// One of `male`, `female`, `other`.
    #[schema(example = "male")]
    pub biological_sex: Option<String>,
    pub preferred_pronouns: Option<String>,
    #[schema(example = "1990-01-01")]
    pub birthday: Option<String>,
    pub height: Option<Measurement>,
    pub weight: Option<Measurement>,
    /// One of `A+`, `A-`, `B+`, `B-`, `AB+`, `AB-`, `O+`, `O-`.
    #[schema(example = "A+")]
    pub blood_type: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ContactInfo {
    #[schema(example = "+63 9175045005")]
    pub mobile_number1: Option<String>,
    pub mobile_number2: Option<String>,
    #[schema(example = "123 Main Street")]
    pub address_line1: Option<String>,
    pub address_line2: Option<String>,
    #[schema(example = "United States of America")]
    pub country: Option<String>,
    pub state: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MedicalCondition {
    pub condition: Option<String>,
    pub diagnosis_date: Option<String>,
    pub severity: Option<String>,
    pub is_active: Option<bool>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct Allergy {
    pub allergen: Option<String>,
    pub reaction: Option<String>,
    pub severity: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Medication {
    pub medication: Option<String>,
    pub dosage: Option<String>,
    pub frequency: Option<String>,
    pub purpose: Option<String>,
    pub start_date: Option<String>,
    pub prescribing_doctor: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct MedicalOperation {
    pub operation: Option<String>,
    pub date: Option<String>,
    pub surgeon: Option<String>,
    pub reason: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct PatientNote {
    pub category: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MedicalInfo {
    pub medical_conditions: Option<Vec<MedicalCondition>>,
    pub allergies: Option<Vec<Allergy>>,
    pub current_medications: Option<Vec<Medication>>,
    pub medical_operations: Option<Vec<MedicalOperation>>,
    pub patient_notes: Option<Vec<PatientNote>>,
}

/// Every section at once. Keys outside these sections are dropped.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserProfileUpdate {
    #[serde(flatten)]
    pub basic: BasicInfo,
    pub contact_info: Option<ContactInfo>,
    #[serde(flatten)]
    pub medical: MedicalInfo,
}

fn present(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|v| !v.trim().is_empty())
}

fn check_enum(field: &str, value: &Option<String>, allowed: &[&str]) -> Result<(), UserError> {
    match value.as_deref() {
        Some(v) if !allowed.contains(&v) => Err(UserError::ValidationError(format!(
            "{} must be one of: {}",
            field,
            allowed.join(", ")
        ))),
        _ => Ok(()),
    }
}

impl BasicInfo {
    pub fn validate_required(&self) -> Result<(), UserError> {
        if !present(&self.first_name) || !present(&self.biological_sex) || !present(&self.birthday) {
            return Err(UserError::ValidationError(
                "firstName, biologicalSex and birthday are required".to_string(),
            ));
        }
        self.validate_values()
    }

    pub fn validate_values(&self) -> Result<(), UserError> {
        check_enum("biologicalSex", &self.biological_sex, BIOLOGICAL_SEXES)?;
        check_enum("bloodType", &self.blood_type, BLOOD_TYPES)?;
        if let Some(height) = &self.height {
            check_enum("height.unit", &height.unit, HEIGHT_UNITS)?;
        }
        if let Some(weight) = &self.weight {
            check_enum("weight.unit", &weight.unit, WEIGHT_UNITS)?;
        }
        Ok(())
    }
}

impl ContactInfo {
    pub fn validate(&self) -> Result<(), UserError> {
        if !present(&self.mobile_number1) || !present(&self.address_line1) || !present(&self.country) {
            return Err(UserError::ValidationError(
                "mobileNumber1, addressLine1 and country are required".to_string(),
            ));
        }
        Ok(())
    }
}

impl MedicalInfo {
    pub fn validate(&self) -> Result<(), UserError> {
        for condition in self.medical_conditions.iter().flatten() {
            check_enum("medicalConditions.severity", &condition.severity, CONDITION_SEVERITIES)?;
        }
        for allergy in self.allergies.iter().flatten() {
            check_enum("allergies.severity", &allergy.severity, ALLERGY_SEVERITIES)?;
        }
        for note in self.patient_notes.iter().flatten() {
            check_enum("patientNotes.category", &note.category, NOTE_CATEGORIES)?;
        }
        Ok(())
    }
}

impl UserProfileUpdate {
    pub fn validate(&self) -> Result<(), UserError> {
        self.basic.validate_values()?;
        if let Some(contact) = &self.contact_info {
            contact.validate()?;
        }
        self.medical.validate()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum UserError {
    #[error("User not found")]
    NotFound,

    #[error("{0}")]
    ValidationError(String),

    #[error(transparent)]
    Store(#[from] anyhow::Error),
}

impl UserError {
    pub fn into_app_error(self, failure: &str) -> AppError {
        match self {
            UserError::NotFound => AppError::NotFound(self.to_string()),
            UserError::ValidationError(msg) => AppError::ValidationError(msg),
            UserError::Store(e) => AppError::store(failure, e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn basic() -> BasicInfo {
        BasicInfo {
            first_name: Some("Tristan".to_string()),
            biological_sex: Some("male".to_string()),
            birthday: Some("1990-01-01".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_basic_requires_fields() {
        assert!(basic().validate_required().is_ok());

        let mut missing = basic();
        missing.birthday = None;
        assert_matches!(missing.validate_required(), Err(UserError::ValidationError(_)));
    }

    #[test]
    fn test_basic_enum_values() {
        let mut info = basic();
        info.blood_type = Some("C+".to_string());
        assert_matches!(info.validate_required(), Err(UserError::ValidationError(msg)) if msg.starts_with("bloodType"));

        let mut info = basic();
        info.height = Some(Measurement { value: Some(6.0), unit: Some("feet".to_string()) });
        assert_matches!(info.validate_values(), Err(UserError::ValidationError(_)));

        let mut info = basic();
        info.weight = Some(Measurement { value: Some(59.0), unit: Some("kg".to_string()) });
        info.blood_type = Some("AB-".to_string());
        assert!(info.validate_values().is_ok());
    }

    #[test]
    fn test_medical_enum_values() {
        let info = MedicalInfo {
            allergies: Some(vec![Allergy {
                allergen: Some("Penicillin".to_string()),
                severity: Some("life_threatening".to_string()),
                ..Default::default()
            }]),
            patient_notes: Some(vec![PatientNote {
                category: Some("dnr".to_string()),
                ..Default::default()
            }]),
            ..Default::default()
        };
        assert!(info.validate().is_ok());

        let info = MedicalInfo {
            medical_conditions: Some(vec![MedicalCondition {
                severity: Some("life_threatening".to_string()),
                ..Default::default()
            }]),
            ..Default::default()
        };
        assert_matches!(info.validate(), Err(UserError::ValidationError(_)));
    }

    #[test]
    fn test_profile_update_flattens_sections() {
        let update: UserProfileUpdate = serde_json::from_value(serde_json::json!({
            "firstName": "Tristan",
            "contactInfo": { "mobileNumber1": "1", "addressLine1": "2", "country": "3" },
            "allergies": [],
            "isAdmin": true
        }))
        .unwrap();

        assert_eq!(update.basic.first_name.as_deref(), Some("Tristan"));
        assert!(update.contact_info.is_some());
        assert_eq!(update.medical.allergies.as_ref().map(Vec::len), Some(0));
        assert!(update.validate().is_ok());
    }
}
