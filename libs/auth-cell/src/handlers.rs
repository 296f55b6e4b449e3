use std::sync::Arc;

use axum::{
    extract::{Extension, State},
    http::HeaderMap,
    Json,
};
use serde_json::{json, Value};
use tracing::debug;

use shared_config::AppConfig;
use shared_models::auth::{Identity, TokenResponse};
use shared_models::error::AppError;
use shared_utils::extractor::bearer_token;
use shared_utils::jwt;

/// Validate the bearer token and describe the caller.
#[utoipa::path(
    post,
    path = "/api/auth/validate",
    tag = "Auth",
    security(("bearerAuth" = [])),
    responses(
        (status = 200, description = "Token is valid", body = TokenResponse),
        (status = 401, description = "Missing, malformed or expired token"),
    )
)]
pub async fn validate_token(
    State(config): State<Arc<AppConfig>>,
    headers: HeaderMap,
) -> Result<Json<TokenResponse>, AppError> {
    debug!("Validating token");

    let token = bearer_token(&headers)?;

    let identity = jwt::validate_token(token, &config.jwt_secret)
        .map_err(|_| AppError::Auth("Invalid or expired token".to_string()))?;

    Ok(Json(identity.into()))
}

/// Report whether the bearer token is valid without failing the request.
#[utoipa::path(
    post,
    path = "/api/auth/verify",
    tag = "Auth",
    responses((status = 200, description = "`{ valid: bool }`"))
)]
pub async fn verify_token(
    State(config): State<Arc<AppConfig>>,
    headers: HeaderMap,
) -> Json<Value> {
    debug!("Verifying token");

    let valid = bearer_token(&headers)
        .ok()
        .map(|token| jwt::validate_token(token, &config.jwt_secret).is_ok())
        .unwrap_or(false);

    Json(json!({ "valid": valid }))
}

#[utoipa::path(
    get,
    path = "/api/auth/me",
    tag = "Auth",
    security(("bearerAuth" = [])),
    responses(
        (status = 200, description = "The authenticated caller", body = Identity),
        (status = 401, description = "Not authenticated"),
    )
)]
pub async fn get_identity(Extension(identity): Extension<Identity>) -> Json<Identity> {
    debug!("Returning identity for user: {}", identity.id);
    Json(identity)
}
