use std::sync::LazyLock;

use regex::Regex;
use serde_json::{json, Map, Value};
use tracing::debug;

use shared_config::AppConfig;
use shared_database::SanityClient;

use crate::models::{CreateDoctorRequest, DoctorError, UpdateDoctorRequest};

static NON_SLUG_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-Za-z0-9_\s-]").expect("valid slug pattern"));
static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid whitespace pattern"));

/// Lowercases, strips punctuation and joins words with `-`.
pub fn slugify(name: &str) -> String {
    let lowered = name.to_lowercase();
    let stripped = NON_SLUG_CHARS.replace_all(&lowered, "");
    WHITESPACE_RUN.replace_all(stripped.trim(), "-").into_owned()
}

pub struct DoctorService {
    sanity: SanityClient,
}

impl DoctorService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            sanity: SanityClient::new(config),
        }
    }

    pub async fn list_doctors(&self) -> Result<Vec<Value>, DoctorError> {
        debug!("Fetching all doctors");

        let doctors = self.sanity.fetch_list(
            r#"*[_type == "doctor"] | order(_createdAt desc)"#,
            json!({}),
        ).await?;

        Ok(doctors.into_iter().map(|doc| self.with_image_url(doc)).collect())
    }

    pub async fn get_doctor(&self, doctor_id: &str) -> Result<Value, DoctorError> {
        debug!("Fetching doctor: {}", doctor_id);

        self.find_doctor(doctor_id)
            .await?
            .map(|doc| self.with_image_url(doc))
            .ok_or(DoctorError::NotFound)
    }

    pub async fn doctors_by_specialization(&self, specialization: &str) -> Result<Vec<Value>, DoctorError> {
        debug!("Fetching doctors with specialization: {}", specialization);

        let doctors = self.sanity.fetch_list(
            r#"*[_type == "doctor" && specialization == $specialization] | order(name asc)"#,
            json!({ "specialization": specialization }),
        ).await?;

        if doctors.is_empty() {
            return Err(DoctorError::NoneForSpecialization);
        }

        Ok(doctors.into_iter().map(|doc| self.with_image_url(doc)).collect())
    }

    pub async fn search_doctors(&self, term: &str) -> Result<Vec<Value>, DoctorError> {
        let term = term.trim();
        if term.chars().count() < 2 {
            return Err(DoctorError::ValidationError("Please provide a valid search term".to_string()));
        }

        debug!("Searching doctors for: {}", term);

        let doctors = self.sanity.fetch_list(
            r#"*[_type == "doctor" && (name match $q || specialization match $q)] | order(name asc)"#,
            json!({ "q": format!("*{}*", term) }),
        ).await?;

        if doctors.is_empty() {
            return Err(DoctorError::NoMatches);
        }

        Ok(doctors.into_iter().map(|doc| self.with_image_url(doc)).collect())
    }

    pub async fn create_doctor(&self, request: CreateDoctorRequest) -> Result<Value, DoctorError> {
        let (first_name, last_name) = match (non_blank(&request.first_name), non_blank(&request.last_name)) {
            (Some(first), Some(last)) => (first.to_string(), last.to_string()),
            _ => {
                return Err(DoctorError::ValidationError(
                    "First name and last name are required".to_string(),
                ))
            }
        };

        let full_name = format!("{} {}", first_name, last_name).trim().to_string();
        let slug = self.generate_slug(&full_name).await?;
        debug!("Creating doctor '{}' with slug '{}'", full_name, slug);

        let mut doc = json!({
            "_type": "doctor",
            "slug": { "_type": "slug", "current": slug },
            "name": full_name,
            "firstName": first_name,
            "lastName": last_name,
            "specialization": request.specialization.unwrap_or_else(|| "General".to_string()),
            "experience": request.experience.unwrap_or(0),
            "bio": request.bio.unwrap_or_default(),
            "imageUrl": request.image,
        });

        if let Value::Object(fields) = &mut doc {
            insert_contact_fields(
                fields,
                request.email,
                request.phone,
                request.hospital,
                request.available_days,
                request.available_times,
            );
        }

        Ok(self.sanity.create(doc).await?)
    }

    /// Looks the doctor up, then patches it. The two calls are not atomic.
    pub async fn update_doctor(&self, doctor_id: &str, request: UpdateDoctorRequest) -> Result<Value, DoctorError> {
        let existing = self.find_doctor(doctor_id).await?.ok_or(DoctorError::NotFound)?;

        let mut set = Map::new();

        if request.first_name.is_some() || request.last_name.is_some() {
            let first = request.first_name
                .or_else(|| stored_string(&existing, "firstName"))
                .unwrap_or_default();
            let last = request.last_name
                .or_else(|| stored_string(&existing, "lastName"))
                .unwrap_or_default();

            set.insert("name".to_string(), json!(format!("{} {}", first, last).trim()));
            set.insert("firstName".to_string(), json!(first));
            set.insert("lastName".to_string(), json!(last));
        }
        if let Some(image) = request.image {
            set.insert("imageUrl".to_string(), json!(image));
        }
        if let Some(specialization) = request.specialization {
            set.insert("specialization".to_string(), json!(specialization));
        }
        if let Some(experience) = request.experience {
            set.insert("experience".to_string(), json!(experience));
        }
        if let Some(bio) = request.bio {
            set.insert("bio".to_string(), json!(bio));
        }
        insert_contact_fields(
            &mut set,
            request.email,
            request.phone,
            request.hospital,
            request.available_days,
            request.available_times,
        );

        if set.is_empty() {
            debug!("No changes for doctor {}", doctor_id);
            return Ok(existing);
        }

        debug!("Updating doctor {} fields: {:?}", doctor_id, set.keys().collect::<Vec<_>>());
        Ok(self.sanity.patch_set(doctor_id, Value::Object(set)).await?)
    }

    pub async fn delete_doctor(&self, doctor_id: &str) -> Result<(), DoctorError> {
        self.find_doctor(doctor_id).await?.ok_or(DoctorError::NotFound)?;

        debug!("Deleting doctor: {}", doctor_id);
        self.sanity.delete(doctor_id).await?;
        Ok(())
    }

    async fn find_doctor(&self, doctor_id: &str) -> Result<Option<Value>, DoctorError> {
        let doc = self.sanity.get_document(doctor_id).await?;
        Ok(doc.filter(|doc| doc.get("_type").and_then(Value::as_str) == Some("doctor")))
    }

    /// `<base>` when unused, otherwise `<base>-<n+1>` for `n` existing matches.
    async fn generate_slug(&self, name: &str) -> Result<String, DoctorError> {
        let base = slugify(name);

        let existing = self.sanity.fetch_list(
            r#"*[_type == "doctor" && slug.current match $slugPattern]{slug}"#,
            json!({ "slugPattern": format!("{}*", base) }),
        ).await?;

        Ok(next_slug(&base, existing.len()))
    }

    fn with_image_url(&self, mut doc: Value) -> Value {
        let has_url = doc.get("imageUrl").is_some_and(|url| !url.is_null());
        if has_url {
            return doc;
        }

        let resolved = doc.get("image").and_then(|image| self.sanity.image_url(image));
        if let (Some(url), Value::Object(fields)) = (resolved, &mut doc) {
            fields.insert("imageUrl".to_string(), json!(url));
        }
        doc
    }
}

fn next_slug(base: &str, existing: usize) -> String {
    if existing == 0 {
        base.to_string()
    } else {
        format!("{}-{}", base, existing + 1)
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn stored_string(doc: &Value, key: &str) -> Option<String> {
    doc.get(key).and_then(Value::as_str).map(str::to_string)
}

fn insert_contact_fields(
    fields: &mut Map<String, Value>,
    email: Option<String>,
    phone: Option<String>,
    hospital: Option<String>,
    available_days: Option<Vec<String>>,
    available_times: Option<Vec<String>>,
) {
    if let Some(email) = email {
        fields.insert("email".to_string(), json!(email));
    }
    if let Some(phone) = phone {
        fields.insert("phone".to_string(), json!(phone));
    }
    if let Some(hospital) = hospital {
        fields.insert("hospital".to_string(), json!(hospital));
    }
    if let Some(days) = available_days {
        fields.insert("availableDays".to_string(), json!(days));
    }
    if let Some(times) = available_times {
        fields.insert("availableTimes".to_string(), json!(times));
    }
}
