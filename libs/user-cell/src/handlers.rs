use std::sync::Arc;

use axum::{
    extract::{Extension, State},
    Json,
};
use serde_json::Value;
use tracing::info;

use shared_config::AppConfig;
use shared_models::auth::Identity;
use shared_models::error::AppError;
use shared_utils::extractor::JsonBody;

use crate::models::{BasicInfo, ContactInfo, MedicalInfo, UserProfileUpdate};
use crate::services::UserService;

#[utoipa::path(
    get,
    path = "/api/user/me",
    tag = "User",
    security(("bearerAuth" = [])),
    responses(
        (status = 200, description = "Profile of the caller"),
        (status = 401, description = "Missing or invalid token"),
        (status = 404, description = "User not found"),
    )
)]
pub async fn get_user_profile(
    State(state): State<Arc<AppConfig>>,
    Extension(user): Extension<Identity>,
) -> Result<Json<Value>, AppError> {
    let profile = UserService::new(&state)
        .get_profile(&user.id)
        .await
        .map_err(|e| e.into_app_error("Failed to fetch user"))?;

    Ok(Json(profile))
}

#[utoipa::path(
    put,
    path = "/api/user/basic",
    tag = "User",
    security(("bearerAuth" = [])),
    request_body = BasicInfo,
    responses(
        (status = 200, description = "Basic information updated"),
        (status = 400, description = "Missing or invalid fields"),
        (status = 404, description = "User not found"),
    )
)]
pub async fn update_user_basic_info(
    State(state): State<Arc<AppConfig>>,
    Extension(user): Extension<Identity>,
    JsonBody(request): JsonBody<BasicInfo>,
) -> Result<Json<Value>, AppError> {
    let updated = UserService::new(&state)
        .update_basic_info(&user.id, request)
        .await
        .map_err(|e| e.into_app_error("Failed to update basic information"))?;

    info!("Basic information updated for user {}", user.id);
    Ok(Json(updated))
}

#[utoipa::path(
    put,
    path = "/api/user/contact",
    tag = "User",
    security(("bearerAuth" = [])),
    request_body = ContactInfo,
    responses(
        (status = 200, description = "Contact information updated"),
        (status = 400, description = "mobileNumber1, addressLine1 and country are required"),
        (status = 404, description = "User not found"),
    )
)]
pub async fn update_user_contact_info(
    State(state): State<Arc<AppConfig>>,
    Extension(user): Extension<Identity>,
    JsonBody(request): JsonBody<ContactInfo>,
) -> Result<Json<Value>, AppError> {
    let updated = UserService::new(&state)
        .update_contact_info(&user.id, request)
        .await
        .map_err(|e| e.into_app_error("Failed to update contact information"))?;

    info!("Contact information updated for user {}", user.id);
    Ok(Json(updated))
}

#[utoipa::path(
    put,
    path = "/api/user/medical",
    tag = "User",
    security(("bearerAuth" = [])),
    request_body = MedicalInfo,
    responses(
        (status = 200, description = "Medical information updated"),
        (status = 400, description = "Invalid severity or category"),
        (status = 404, description = "User not found"),
    )
)]
pub async fn update_user_medical_info(
    State(state): State<Arc<AppConfig>>,
    Extension(user): Extension<Identity>,
    JsonBody(request): JsonBody<MedicalInfo>,
) -> Result<Json<Value>, AppError> {
    let updated = UserService::new(&state)
        .update_medical_info(&user.id, request)
        .await
        .map_err(|e| e.into_app_error("Failed to update medical information"))?;

    info!("Medical information updated for user {}", user.id);
    Ok(Json(updated))
}

#[utoipa::path(
    put,
    path = "/api/user",
    tag = "User",
    security(("bearerAuth" = [])),
    request_body = UserProfileUpdate,
    responses(
        (status = 200, description = "Profile updated"),
        (status = 400, description = "Invalid fields"),
        (status = 404, description = "User not found"),
    )
)]
pub async fn update_user_profile(
    State(state): State<Arc<AppConfig>>,
    Extension(user): Extension<Identity>,
    JsonBody(request): JsonBody<UserProfileUpdate>,
) -> Result<Json<Value>, AppError> {
    let updated = UserService::new(&state)
        .update_profile(&user.id, request)
        .await
        .map_err(|e| e.into_app_error("Failed to update user profile"))?;

    info!("Profile updated for user {}", user.id);
    Ok(Json(updated))
}
