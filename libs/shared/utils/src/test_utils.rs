use std::sync::Arc;

use chrono::{Duration, Utc};
use jsonwebtoken::{encode, EncodingKey, Header};
use serde_json::{json, Value};
use uuid::Uuid;

use shared_config::AppConfig;
use shared_models::auth::Identity;

pub struct TestConfig {
    pub jwt_secret: String,
    pub sanity_api_host: String,
    pub sanity_project_id: String,
    pub sanity_dataset: String,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            jwt_secret: "test-secret-key-for-jwt-validation-must-be-long-enough".to_string(),
            sanity_api_host: "http://localhost:3333".to_string(),
            sanity_project_id: "testproj".to_string(),
            sanity_dataset: "test".to_string(),
        }
    }
}

impl TestConfig {
    /// Points the store client at a mock server.
    pub fn with_store(uri: &str) -> Self {
        Self {
            sanity_api_host: uri.to_string(),
            ..Self::default()
        }
    }

    pub fn to_app_config(&self) -> AppConfig {
        AppConfig {
            sanity_project_id: self.sanity_project_id.clone(),
            sanity_dataset: self.sanity_dataset.clone(),
            sanity_api_version: "2024-01-01".to_string(),
            sanity_token: "test-store-token".to_string(),
            sanity_api_host: Some(self.sanity_api_host.clone()),
            jwt_secret: self.jwt_secret.clone(),
            port: 4000,
        }
    }

    pub fn to_arc(&self) -> Arc<AppConfig> {
        Arc::new(self.to_app_config())
    }

    pub fn query_path(&self) -> String {
        format!("/v2024-01-01/data/query/{}", self.sanity_dataset)
    }

    pub fn mutate_path(&self) -> String {
        format!("/v2024-01-01/data/mutate/{}", self.sanity_dataset)
    }

    pub fn doc_path(&self, id: &str) -> String {
        format!("/v2024-01-01/data/doc/{}/{}", self.sanity_dataset, id)
    }
}

pub struct TestUser {
    pub id: String,
    pub email: String,
    pub role: String,
}

impl Default for TestUser {
    fn default() -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            email: "test@example.com".to_string(),
            role: "patient".to_string(),
        }
    }
}

impl TestUser {
    pub fn new(email: &str, role: &str) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            email: email.to_string(),
            role: role.to_string(),
        }
    }

    pub fn doctor(email: &str) -> Self {
        Self::new(email, "doctor")
    }

    pub fn patient(email: &str) -> Self {
        Self::new(email, "patient")
    }

    pub fn admin(email: &str) -> Self {
        Self::new(email, "admin")
    }

    pub fn to_identity(&self) -> Identity {
        Identity {
            id: self.id.clone(),
            role: self.role.clone(),
            email: Some(self.email.clone()),
        }
    }
}

pub struct JwtTestUtils;

impl JwtTestUtils {
    pub fn create_test_token(user: &TestUser, secret: &str, exp_hours: Option<i64>) -> String {
        let now = Utc::now();
        let exp = now + Duration::hours(exp_hours.unwrap_or(24));

        let claims = json!({
            "id": user.id,
            "email": user.email,
            "role": user.role,
            "iat": now.timestamp(),
            "exp": exp.timestamp()
        });

        encode(&Header::default(), &claims, &EncodingKey::from_secret(secret.as_bytes()))
            .expect("HS256 encoding accepts any key")
    }

    pub fn create_expired_token(user: &TestUser, secret: &str) -> String {
        Self::create_test_token(user, secret, Some(-1))
    }

    pub fn create_invalid_signature_token(user: &TestUser) -> String {
        Self::create_test_token(user, "wrong-secret", Some(24))
    }

    pub fn create_malformed_token() -> String {
        "invalid.token.format".to_string()
    }
}

/// Canned store payloads in the shape the data API returns them.
pub struct MockSanityResponses;

impl MockSanityResponses {
    pub fn query_result(result: Value) -> Value {
        json!({ "ms": 1, "query": "", "result": result })
    }

    pub fn mutation_result(id: &str, operation: &str, document: Value) -> Value {
        json!({
            "transactionId": Uuid::new_v4().to_string(),
            "results": [{ "id": id, "operation": operation, "document": document }]
        })
    }

    pub fn documents(documents: Vec<Value>) -> Value {
        json!({ "documents": documents })
    }

    pub fn doctor(id: &str, name: &str, specialization: &str) -> Value {
        json!({
            "_id": id,
            "_type": "doctor",
            "_createdAt": "2024-01-01T00:00:00Z",
            "name": name,
            "slug": { "_type": "slug", "current": name.to_lowercase().replace(' ', "-") },
            "specialization": specialization,
            "experience": 10,
            "bio": "Experienced physician",
            "imageUrl": null
        })
    }

    pub fn appointment(id: &str, patient_id: &str, doctor_id: &str, status: &str) -> Value {
        json!({
            "_id": id,
            "_type": "appointment",
            "patient": { "_type": "reference", "_ref": patient_id },
            "doctor": { "_type": "reference", "_ref": doctor_id },
            "date": "2025-10-20T14:00:00Z",
            "status": status,
            "notes": ""
        })
    }

    pub fn user(id: &str) -> Value {
        json!({
            "_id": id,
            "_type": "user",
            "userId": id,
            "firstName": "Tristan Peter",
            "lastName": "Marcelino",
            "biologicalSex": "male",
            "birthday": "1990-01-01",
            "contactInfo": {
                "mobileNumber1": "+63 9175045005",
                "addressLine1": "123 Main Street",
                "country": "United States of America"
            },
            "profileCompleted": true
        })
    }

    pub fn property(id: &str, title: &str) -> Value {
        json!({
            "_id": id,
            "_type": "property",
            "title": title,
            "description": "A beautiful modern villa with ocean views.",
            "price": 250000000,
            "location": "Ikoyi, Lagos, Nigeria",
            "features": ["Swimming Pool", "Gym"],
            "createdAt": "2024-01-01T00:00:00Z"
        })
    }

    pub fn error_response(message: &str) -> Value {
        json!({
            "error": {
                "description": message,
                "type": "httpError"
            }
        })
    }
}
