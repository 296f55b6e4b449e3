use std::sync::Arc;

use axum::{
    body::Body,
    extract::{FromRequest, State},
    http::{header::AUTHORIZATION, HeaderMap, Request},
    middleware::Next,
    response::Response,
    Json,
};
use serde::de::DeserializeOwned;
use tracing::debug;

use shared_config::AppConfig;
use shared_models::auth::Identity;
use shared_models::error::AppError;

use crate::jwt::validate_token;

/// Pulls the token out of an `Authorization: Bearer <token>` header.
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, AppError> {
    let auth_header = headers
        .get(AUTHORIZATION)
        .ok_or_else(|| AppError::Auth("Missing Authorization header".to_string()))?;

    let auth_value = auth_header
        .to_str()
        .map_err(|_| AppError::Auth("Invalid Authorization format".to_string()))?;

    match auth_value.split_once(' ') {
        Some(("Bearer", token)) if !token.trim().is_empty() => Ok(token.trim()),
        _ => Err(AppError::Auth("Invalid Authorization format".to_string())),
    }
}

/// Verifies the bearer token and stores the caller's [`Identity`] in the
/// request extensions.
pub async fn auth_middleware(
    State(config): State<Arc<AppConfig>>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let token = bearer_token(request.headers())?;

    let identity = validate_token(token, &config.jwt_secret)
        .map_err(|_| AppError::Auth("Invalid or expired token".to_string()))?;

    request.extensions_mut().insert(identity);

    Ok(next.run(request).await)
}

/// Role required by [`require_role`]. Layer it inside [`auth_middleware`].
#[derive(Debug, Clone, Copy)]
pub struct RequiredRole(pub &'static str);

pub async fn require_role(
    State(RequiredRole(role)): State<RequiredRole>,
    request: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let identity = request
        .extensions()
        .get::<Identity>()
        .ok_or_else(|| AppError::Auth("Not authenticated".to_string()))?;

    if !identity.has_role(role) {
        debug!("User {} with role '{}' denied, '{}' required", identity.id, identity.role, role);
        return Err(AppError::Forbidden("Forbidden".to_string()));
    }

    Ok(next.run(request).await)
}

/// JSON request body whose rejections (missing content type, unreadable or
/// mistyped JSON) surface as a 400 `{ "error": ... }` like any other bad input.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(request: Request<Body>, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(request, state).await {
            Ok(Json(value)) => Ok(JsonBody(value)),
            Err(rejection) => {
                debug!("Rejected request body: {}", rejection.body_text());
                Err(AppError::BadRequest(rejection.body_text()))
            }
        }
    }
}
