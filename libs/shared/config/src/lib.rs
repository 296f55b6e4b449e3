use std::env;
use tracing::warn;

pub const DEFAULT_DATASET: &str = "production";
pub const DEFAULT_API_VERSION: &str = "2024-01-01";
pub const DEFAULT_PORT: u16 = 4000;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub sanity_project_id: String,
    pub sanity_dataset: String,
    pub sanity_api_version: String,
    pub sanity_token: String,
    /// Overrides `https://<project>.api.sanity.io` when set.
    pub sanity_api_host: Option<String>,
    pub jwt_secret: String,
    pub port: u16,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let config = Self {
            sanity_project_id: env::var("SANITY_PROJECT_ID")
                .unwrap_or_else(|_| {
                    warn!("SANITY_PROJECT_ID not set, using empty value");
                    String::new()
                }),
            sanity_dataset: env::var("SANITY_DATASET")
                .unwrap_or_else(|_| {
                    warn!("SANITY_DATASET not set, using default");
                    DEFAULT_DATASET.to_string()
                }),
            sanity_api_version: env::var("SANITY_API_VERSION")
                .unwrap_or_else(|_| {
                    warn!("SANITY_API_VERSION not set, using default");
                    DEFAULT_API_VERSION.to_string()
                }),
            sanity_token: env::var("SANITY_TOKEN")
                .unwrap_or_else(|_| {
                    warn!("SANITY_TOKEN not set, using empty value");
                    String::new()
                }),
            sanity_api_host: env::var("SANITY_API_HOST")
                .ok()
                .filter(|host| !host.is_empty()),
            jwt_secret: env::var("JWT_SECRET")
                .unwrap_or_else(|_| {
                    warn!("JWT_SECRET not set, using empty value");
                    String::new()
                }),
            port: match env::var("PORT") {
                Ok(value) => value.parse().unwrap_or_else(|_| {
                    warn!("PORT '{}' is not a valid port, using default", value);
                    DEFAULT_PORT
                }),
                Err(_) => DEFAULT_PORT,
            },
        };

        if !config.is_configured() {
            warn!("Application not fully configured - missing environment variables");
        }

        config
    }

    pub fn is_configured(&self) -> bool {
        !self.sanity_project_id.is_empty()
            && !self.sanity_dataset.is_empty()
            && !self.jwt_secret.is_empty()
    }

    /// Base URL of the versioned data API, e.g. `https://abc123.api.sanity.io/v2024-01-01`.
    pub fn sanity_api_url(&self) -> String {
        let host = match &self.sanity_api_host {
            Some(host) => host.trim_end_matches('/').to_string(),
            None => format!("https://{}.api.sanity.io", self.sanity_project_id),
        };
        format!("{}/v{}", host, self.sanity_api_version.trim_start_matches('v'))
    }
}
