use std::sync::Arc;

use axum::{
    extract::{Extension, Path, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};
use tracing::info;

use shared_config::AppConfig;
use shared_models::auth::Identity;
use shared_models::error::AppError;
use shared_utils::extractor::JsonBody;

use crate::models::ContactRequest;
use crate::services::ContactService;

#[utoipa::path(
    post,
    path = "/api/contact",
    tag = "Contact",
    request_body = ContactRequest,
    responses(
        (status = 201, description = "Contact form submitted successfully"),
        (status = 400, description = "All fields are required"),
        (status = 500, description = "Server error"),
    )
)]
pub async fn create_contact(
    State(state): State<Arc<AppConfig>>,
    JsonBody(request): JsonBody<ContactRequest>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let contact = ContactService::new(&state)
        .submit(request)
        .await
        .map_err(|e| e.into_app_error("Failed to submit contact form"))?;

    info!("Contact form submitted");
    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "Contact form submitted successfully", "data": contact })),
    ))
}

#[utoipa::path(
    get,
    path = "/api/contact",
    tag = "Contact",
    security(("bearerAuth" = [])),
    responses(
        (status = 200, description = "Submissions, newest first"),
        (status = 403, description = "Access denied"),
        (status = 500, description = "Server error"),
    )
)]
pub async fn get_all_contacts(
    State(state): State<Arc<AppConfig>>,
    Extension(_user): Extension<Identity>,
) -> Result<Json<Value>, AppError> {
    let contacts = ContactService::new(&state)
        .list()
        .await
        .map_err(|e| e.into_app_error("Failed to fetch contact submissions"))?;

    Ok(Json(json!(contacts)))
}

#[utoipa::path(
    get,
    path = "/api/contact/{id}",
    tag = "Contact",
    security(("bearerAuth" = [])),
    params(("id" = String, Path, description = "Contact document id")),
    responses(
        (status = 200, description = "Submission found"),
        (status = 403, description = "Access denied"),
        (status = 404, description = "Contact message not found"),
    )
)]
pub async fn get_contact_by_id(
    State(state): State<Arc<AppConfig>>,
    Extension(_user): Extension<Identity>,
    Path(contact_id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let contact = ContactService::new(&state)
        .get(&contact_id)
        .await
        .map_err(|e| e.into_app_error("Failed to fetch contact message"))?;

    Ok(Json(contact))
}
