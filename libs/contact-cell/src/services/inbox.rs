use std::sync::LazyLock;

use chrono::{SecondsFormat, Utc};
use regex::Regex;
use serde_json::{json, Value};
use tracing::debug;

use shared_config::AppConfig;
use shared_database::SanityClient;

use crate::models::{ContactError, ContactRequest};

static EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email pattern"));

pub fn is_valid_email(email: &str) -> bool {
    EMAIL.is_match(email)
}

pub struct ContactService {
    sanity: SanityClient,
}

impl ContactService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            sanity: SanityClient::new(config),
        }
    }

    pub async fn submit(&self, request: ContactRequest) -> Result<Value, ContactError> {
        let field = |value: Option<String>| {
            value
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .ok_or(ContactError::MissingFields)
        };

        let full_name = field(request.full_name)?;
        let email = field(request.email)?;
        let subject = field(request.subject)?;
        let message = field(request.message)?;

        if !is_valid_email(&email) {
            return Err(ContactError::InvalidEmail);
        }

        debug!("Storing contact submission from {}", email);
        Ok(self.sanity.create(json!({
            "_type": "contact",
            "fullName": full_name,
            "email": email,
            "subject": subject,
            "message": message,
            "submittedAt": Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        })).await?)
    }

    pub async fn list(&self) -> Result<Vec<Value>, ContactError> {
        Ok(self.sanity
            .fetch_list(r#"*[_type == "contact"] | order(submittedAt desc)"#, json!({}))
            .await?)
    }

    pub async fn get(&self, id: &str) -> Result<Value, ContactError> {
        self.sanity
            .fetch_one(r#"*[_type == "contact" && _id == $id][0]"#, json!({ "id": id }))
            .await?
            .ok_or(ContactError::NotFound)
    }
}
