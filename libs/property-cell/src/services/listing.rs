use chrono::{SecondsFormat, Utc};
use serde_json::{json, Value};
use tracing::debug;

use shared_config::AppConfig;
use shared_database::SanityClient;

use crate::models::{CreatePropertyRequest, PropertyError};

const LIST_QUERY: &str = r#"*[_type == "property"] | order(createdAt desc) {
  _id,
  title,
  description,
  price,
  location,
  features,
  bedrooms,
  bathrooms,
  garage,
  propertyType,
  images
}"#;

const BY_ID_QUERY: &str = r#"*[_type == "property" && _id == $id][0]"#;

fn build_property(request: CreatePropertyRequest) -> Result<Value, PropertyError> {
    let text = |value: &Option<String>| value.as_deref().is_some_and(|v| !v.trim().is_empty());
    let has_features = request.features.as_ref().is_some_and(|f| !f.is_empty());

    if !text(&request.title)
        || !text(&request.location)
        || !text(&request.description)
        || request.price.is_none()
        || !has_features
    {
        return Err(PropertyError::MissingFields);
    }

    let mut doc = json!({
        "_type": "property",
        "title": request.title,
        "description": request.description,
        "price": request.price,
        "location": request.location,
        "features": request.features,
        "createdAt": Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
    });

    let optional = [
        ("bedrooms", request.bedrooms.map(Value::from)),
        ("bathrooms", request.bathrooms.map(Value::from)),
        ("garage", request.garage.map(Value::from)),
        ("propertyType", request.property_type.map(Value::from)),
        ("images", request.images.map(Value::from)),
    ];
    if let Value::Object(fields) = &mut doc {
        for (key, value) in optional {
            if let Some(value) = value {
                fields.insert(key.to_string(), value);
            }
        }
    }

    Ok(doc)
}

pub struct PropertyService {
    sanity: SanityClient,
}

impl PropertyService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            sanity: SanityClient::new(config),
        }
    }

    pub async fn list_properties(&self) -> Result<Vec<Value>, PropertyError> {
        Ok(self.sanity.fetch_list(LIST_QUERY, json!({})).await?)
    }

    pub async fn get_property(&self, id: &str) -> Result<Value, PropertyError> {
        self.sanity
            .fetch_one(BY_ID_QUERY, json!({ "id": id }))
            .await?
            .ok_or(PropertyError::NotFound)
    }

    pub async fn create_property(&self, request: CreatePropertyRequest) -> Result<Value, PropertyError> {
        let doc = build_property(request)?;
        debug!("Creating property listing");

        Ok(self.sanity.create(doc).await?)
    }

    /// Checks the listing exists before deleting so a missing id reports 404.
    pub async fn delete_property(&self, id: &str) -> Result<(), PropertyError> {
        self.get_property(id).await?;

        debug!("Deleting property {}", id);
        Ok(self.sanity.delete(id).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn valid() -> CreatePropertyRequest {
        CreatePropertyRequest {
            title: Some("Luxury Villa".to_string()),
            description: Some("Ocean views".to_string()),
            price: Some(250_000_000.0),
            location: Some("Ikoyi, Lagos".to_string()),
            features: Some(vec!["Gym".to_string()]),
            ..Default::default()
        }
    }

    #[test]
    fn test_build_property_requires_core_fields() {
        let mut request = valid();
        request.features = Some(vec![]);
        assert_matches!(build_property(request), Err(PropertyError::MissingFields));

        let mut request = valid();
        request.price = None;
        assert_matches!(build_property(request), Err(PropertyError::MissingFields));
    }

    #[test]
    fn test_build_property_keeps_optional_fields_when_set() {
        let mut request = valid();
        request.garage = Some(3);

        let doc = build_property(request).unwrap();
        assert_eq!(doc["_type"], "property");
        assert_eq!(doc["garage"], 3);
        assert!(doc.get("bedrooms").is_none());
        assert!(doc["createdAt"].as_str().is_some_and(|t| t.ends_with('Z')));
    }
}
