use jsonwebtoken::{decode, errors::ErrorKind, Algorithm, DecodingKey, Validation};
use thiserror::Error;
use tracing::debug;

use shared_models::auth::{Identity, TokenClaims};

#[derive(Error, Debug, PartialEq, Eq)]
pub enum TokenError {
    #[error("JWT secret is not set")]
    MissingSecret,

    #[error("Token expired")]
    Expired,

    #[error("Invalid token signature")]
    InvalidSignature,

    #[error("Token carries no subject")]
    MissingSubject,

    #[error("Invalid token: {0}")]
    Malformed(String),
}

/// Verifies an HS256 token and returns the caller it identifies.
///
/// `exp` is enforced when present; tokens without it are accepted. The subject
/// is the `id` claim, falling back to `sub`.
pub fn validate_token(token: &str, jwt_secret: &str) -> Result<Identity, TokenError> {
    if jwt_secret.is_empty() {
        return Err(TokenError::MissingSecret);
    }

    let mut validation = Validation::new(Algorithm::HS256);
    validation.required_spec_claims.clear();
    validation.validate_aud = false;

    let data = decode::<TokenClaims>(
        token,
        &DecodingKey::from_secret(jwt_secret.as_bytes()),
        &validation,
    )
    .map_err(|e| {
        debug!("Token verification failed: {}", e);
        match e.kind() {
            ErrorKind::ExpiredSignature => TokenError::Expired,
            ErrorKind::InvalidSignature => TokenError::InvalidSignature,
            _ => TokenError::Malformed(e.to_string()),
        }
    })?;

    let claims = data.claims;
    let id = claims
        .id
        .or(claims.sub)
        .filter(|id| !id.is_empty())
        .ok_or(TokenError::MissingSubject)?;

    let identity = Identity {
        id,
        role: claims.role.unwrap_or_default(),
        email: claims.email,
    };

    debug!("Token validated successfully for user: {}", identity.id);
    Ok(identity)
}
