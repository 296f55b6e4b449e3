use std::sync::LazyLock;
use std::time::Duration;

use anyhow::{anyhow, Result};
use reqwest::{
    header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE},
    Client, Method, Url,
};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use tracing::{debug, error};

use shared_config::AppConfig;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const IMAGE_CDN_URL: &str = "https://cdn.sanity.io/images";

// One connection pool for the whole process; `Client` clones share it.
static HTTP_CLIENT: LazyLock<Client> = LazyLock::new(|| {
    Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .build()
        .unwrap_or_else(|_| Client::new())
});

/// HTTP client for the content store's query, mutation and document endpoints.
///
/// Every call is a single round trip. Callers that read a document and then
/// patch it get no isolation between the two requests.
pub struct SanityClient {
    client: Client,
    api_url: String,
    project_id: String,
    dataset: String,
    token: String,
}

impl SanityClient {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            client: HTTP_CLIENT.clone(),
            api_url: config.sanity_api_url(),
            project_id: config.sanity_project_id.clone(),
            dataset: config.sanity_dataset.clone(),
            token: config.sanity_token.clone(),
        }
    }

    fn get_headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        if !self.token.is_empty() {
            let value = HeaderValue::from_str(&format!("Bearer {}", self.token))
                .map_err(|_| anyhow!("Store token contains invalid header characters"))?;
            headers.insert(AUTHORIZATION, value);
        }

        Ok(headers)
    }

    /// API URL with `segments` appended, each percent-encoded as one path segment.
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = Url::parse(&self.api_url)?;
        url.path_segments_mut()
            .map_err(|_| anyhow!("Store API URL cannot take path segments: {}", self.api_url))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn request<T>(&self, method: Method, segments: &[&str],
                        query: &[(&str, &str)], body: Option<Value>)
                        -> Result<T>
    where T: DeserializeOwned {
        let url = self.endpoint(segments)?;
        debug!("Making {} request to {}", method, url);

        let mut req = self.client.request(method, url)
            .headers(self.get_headers()?);

        if !query.is_empty() {
            req = req.query(query);
        }

        if let Some(body_data) = body {
            req = req.json(&body_data);
        }

        let response = req.send().await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await?;
            error!("Store API error ({}): {}", status, error_text);

            return Err(match status.as_u16() {
                401 | 403 => anyhow!("Store authentication error: {}", error_text),
                404 => anyhow!("Store resource not found: {}", error_text),
                _ => anyhow!("Store API error ({}): {}", status, error_text),
            });
        }

        let data = response.json::<T>().await?;
        Ok(data)
    }

    /// Runs a GROQ query and returns its `result`. A query ending in `[0]`
    /// that matches nothing yields `Value::Null`.
    pub async fn fetch(&self, query: &str, params: Value) -> Result<Value> {
        debug!("Running query: {}", query);

        let response: Value = self.request(
            Method::POST,
            &["data", "query", &self.dataset],
            &[],
            Some(json!({ "query": query, "params": params })),
        ).await?;

        match response {
            Value::Object(mut body) => Ok(body.remove("result").unwrap_or(Value::Null)),
            _ => Err(anyhow!("Unexpected query response shape")),
        }
    }

    /// Like [`fetch`](Self::fetch) but returns `None` for a null result.
    pub async fn fetch_one(&self, query: &str, params: Value) -> Result<Option<Value>> {
        let result = self.fetch(query, params).await?;
        Ok(if result.is_null() { None } else { Some(result) })
    }

    /// Like [`fetch`](Self::fetch) for queries that return a list.
    pub async fn fetch_list(&self, query: &str, params: Value) -> Result<Vec<Value>> {
        match self.fetch(query, params).await? {
            Value::Array(items) => Ok(items),
            Value::Null => Ok(Vec::new()),
            other => Err(anyhow!("Expected a list result, got {}", other)),
        }
    }

    pub async fn get_document(&self, id: &str) -> Result<Option<Value>> {
        debug!("Fetching document: {}", id);

        let response: Value = self.request(
            Method::GET,
            &["data", "doc", &self.dataset, id],
            &[],
            None,
        ).await?;

        Ok(response
            .get("documents")
            .and_then(Value::as_array)
            .and_then(|docs| docs.first())
            .cloned())
    }

    pub async fn create(&self, document: Value) -> Result<Value> {
        self.mutate(json!({ "create": document })).await
    }

    pub async fn patch_set(&self, id: &str, set: Value) -> Result<Value> {
        self.mutate(json!({ "patch": { "id": id, "set": set } })).await
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        self.mutate(json!({ "delete": { "id": id } })).await?;
        Ok(())
    }

    async fn mutate(&self, mutation: Value) -> Result<Value> {
        let response: Value = self.request(
            Method::POST,
            &["data", "mutate", &self.dataset],
            &[("returnIds", "true"), ("returnDocuments", "true"), ("visibility", "sync")],
            Some(json!({ "mutations": [mutation] })),
        ).await?;

        let result = response
            .get("results")
            .and_then(Value::as_array)
            .and_then(|results| results.first())
            .ok_or_else(|| anyhow!("Mutation returned no results"))?;

        let operation = result.get("operation").and_then(|op| op.as_str()).unwrap_or("unknown");
        let id = result.get("id").and_then(|id| id.as_str()).unwrap_or("unknown");
        debug!("Mutation {} applied to {}", operation, id);

        Ok(result.get("document").cloned().unwrap_or(Value::Null))
    }

    /// CDN URL for an image field shaped `{ asset: { _ref: "image-<id>-<WxH>-<fmt>" } }`.
    pub fn image_url(&self, image: &Value) -> Option<String> {
        let asset_ref = image.get("asset")?.get("_ref")?.as_str()?;
        image_url_from_ref(&self.project_id, &self.dataset, asset_ref)
    }
}

pub fn image_url_from_ref(project_id: &str, dataset: &str, asset_ref: &str) -> Option<String> {
    let mut parts = asset_ref.split('-');
    if parts.next()? != "image" {
        return None;
    }
    let id = parts.next()?;
    let dimensions = parts.next()?;
    let format = parts.next()?;

    Some(format!("{}/{}/{}/{}-{}.{}", IMAGE_CDN_URL, project_id, dataset, id, dimensions, format))
}
