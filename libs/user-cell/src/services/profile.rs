use serde::Serialize;
use serde_json::{json, Map, Value};
use tracing::debug;

use shared_config::AppConfig;
use shared_database::SanityClient;

use crate::models::{BasicInfo, ContactInfo, MedicalInfo, UserError, UserProfileUpdate};

const FIND_USER_QUERY: &str = r#"*[_type == "user" && (_id == $userId || userId == $userId)][0]"#;

const PROFILE_QUERY: &str = r#"*[_type == "user" && (_id == $userId || userId == $userId)][0]{
  _id,
  userId,
  firstName,
  lastName,
  biologicalSex,
  preferredPronouns,
  birthday,
  height,
  weight,
  bloodType,
  contactInfo,
  medicalConditions,
  allergies,
  currentMedications,
  medicalOperations,
  patientNotes,
  profileCompleted
}"#;

const REQUIRED_BASIC: &[&str] = &["firstName", "lastName", "biologicalSex", "birthday"];
const REQUIRED_CONTACT: &[&str] = &["mobileNumber1", "addressLine1", "country"];

/// Whether the stored profile has every basic and contact field a booking needs.
pub fn profile_completed(doc: &Value) -> bool {
    let filled = |value: Option<&Value>| {
        value.and_then(Value::as_str).is_some_and(|v| !v.trim().is_empty())
    };

    REQUIRED_BASIC.iter().all(|key| filled(doc.get(key)))
        && REQUIRED_CONTACT
            .iter()
            .all(|key| filled(doc.get("contactInfo").and_then(|contact| contact.get(key))))
}

/// Serializes a section, dropping unset fields so they don't overwrite stored values.
fn section_fields<T: Serialize>(section: &T) -> Map<String, Value> {
    match serde_json::to_value(section) {
        Ok(Value::Object(fields)) => fields
            .into_iter()
            .filter(|(_, value)| !value.is_null())
            .map(|(key, value)| (key, strip_nulls(value)))
            .collect(),
        _ => Map::new(),
    }
}

fn strip_nulls(value: Value) -> Value {
    match value {
        Value::Object(fields) => Value::Object(
            fields
                .into_iter()
                .filter(|(_, v)| !v.is_null())
                .map(|(k, v)| (k, strip_nulls(v)))
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.into_iter().map(strip_nulls).collect()),
        other => other,
    }
}

fn medical_fields(medical: MedicalInfo) -> Map<String, Value> {
    let mut set = Map::new();
    set.insert("medicalConditions".to_string(), json!(medical.medical_conditions.unwrap_or_default()));
    set.insert("allergies".to_string(), json!(medical.allergies.unwrap_or_default()));
    set.insert("currentMedications".to_string(), json!(medical.current_medications.unwrap_or_default()));
    set.insert("medicalOperations".to_string(), json!(medical.medical_operations.unwrap_or_default()));
    set.insert("patientNotes".to_string(), json!(medical.patient_notes.unwrap_or_default()));
    set.into_iter().map(|(key, value)| (key, strip_nulls(value))).collect()
}

pub struct UserService {
    sanity: SanityClient,
}

impl UserService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            sanity: SanityClient::new(config),
        }
    }

    pub async fn get_profile(&self, user_id: &str) -> Result<Value, UserError> {
        debug!("Fetching profile for user: {}", user_id);

        self.sanity
            .fetch_one(PROFILE_QUERY, json!({ "userId": user_id }))
            .await?
            .ok_or(UserError::NotFound)
    }

    pub async fn update_basic_info(&self, user_id: &str, basic: BasicInfo) -> Result<Value, UserError> {
        basic.validate_required()?;
        self.apply(user_id, section_fields(&basic)).await
    }

    pub async fn update_contact_info(&self, user_id: &str, contact: ContactInfo) -> Result<Value, UserError> {
        contact.validate()?;

        let mut set = Map::new();
        set.insert("contactInfo".to_string(), Value::Object(section_fields(&contact)));
        self.apply(user_id, set).await
    }

    pub async fn update_medical_info(&self, user_id: &str, medical: MedicalInfo) -> Result<Value, UserError> {
        medical.validate()?;
        self.apply(user_id, medical_fields(medical)).await
    }

    pub async fn update_profile(&self, user_id: &str, update: UserProfileUpdate) -> Result<Value, UserError> {
        update.validate()?;

        let mut set = section_fields(&update.basic);
        if let Some(contact) = &update.contact_info {
            set.insert("contactInfo".to_string(), Value::Object(section_fields(contact)));
        }
        set.extend(section_fields(&update.medical));

        self.apply(user_id, set).await
    }

    /// Finds the caller's document, then patches `set` plus the recomputed
    /// completion flag. Lookup and patch are separate store calls.
    async fn apply(&self, user_id: &str, mut set: Map<String, Value>) -> Result<Value, UserError> {
        let existing = self.sanity
            .fetch_one(FIND_USER_QUERY, json!({ "userId": user_id }))
            .await?
            .ok_or(UserError::NotFound)?;

        let doc_id = existing
            .get("_id")
            .and_then(Value::as_str)
            .ok_or(UserError::NotFound)?
            .to_string();

        let mut merged = existing;
        if let Value::Object(fields) = &mut merged {
            for (key, value) in &set {
                fields.insert(key.clone(), value.clone());
            }
        }
        set.insert("profileCompleted".to_string(), json!(profile_completed(&merged)));

        debug!("Updating user {} fields: {:?}", doc_id, set.keys().collect::<Vec<_>>());
        Ok(self.sanity.patch_set(&doc_id, Value::Object(set)).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Measurement;

    #[test]
    fn test_profile_completed() {
        let mut doc = json!({
            "firstName": "Tristan",
            "lastName": "Marcelino",
            "biologicalSex": "male",
            "birthday": "1990-01-01",
            "contactInfo": {
                "mobileNumber1": "+63 9175045005",
                "addressLine1": "123 Main Street",
                "country": "USA"
            }
        });
        assert!(profile_completed(&doc));

        doc["contactInfo"]["country"] = json!("  ");
        assert!(!profile_completed(&doc));

        doc["contactInfo"] = Value::Null;
        assert!(!profile_completed(&doc));
    }

    #[test]
    fn test_section_fields_skips_unset() {
        let basic = BasicInfo {
            first_name: Some("Tristan".to_string()),
            height: Some(Measurement { value: Some(180.0), unit: None }),
            ..Default::default()
        };

        let fields = section_fields(&basic);
        assert_eq!(fields.len(), 2);
        assert_eq!(fields["firstName"], "Tristan");
        assert_eq!(fields["height"], json!({ "value": 180.0 }));
    }

    #[test]
    fn test_medical_fields_default_to_empty_lists() {
        let fields = medical_fields(MedicalInfo::default());
        assert_eq!(fields.len(), 5);
        assert!(fields.values().all(|v| v == &json!([])));
    }
}
