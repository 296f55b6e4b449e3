use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Claims carried by an access token. Tokens minted by the booking frontend put
/// the store document id in `id`; standard issuers use `sub`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub sub: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub exp: Option<u64>,
    #[serde(default)]
    pub iat: Option<u64>,
}

/// The verified caller, attached to request extensions by the auth middleware.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Identity {
    pub id: String,
    pub role: String,
    pub email: Option<String>,
}

impl Identity {
    pub fn has_role(&self, role: &str) -> bool {
        self.role.eq_ignore_ascii_case(role)
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TokenResponse {
    pub valid: bool,
    pub user_id: String,
    pub role: String,
    pub email: Option<String>,
}

impl From<Identity> for TokenResponse {
    fn from(identity: Identity) -> Self {
        Self {
            valid: true,
            user_id: identity.id,
            role: identity.role,
            email: identity.email,
        }
    }
}
