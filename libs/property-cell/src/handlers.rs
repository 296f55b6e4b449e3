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

use crate::models::CreatePropertyRequest;
use crate::services::PropertyService;

#[utoipa::path(
    get,
    path = "/api/properties",
    tag = "Property",
    responses(
        (status = 200, description = "Listings, newest first"),
        (status = 500, description = "Server error"),
    )
)]
pub async fn get_all_properties(
    State(state): State<Arc<AppConfig>>,
) -> Result<Json<Value>, AppError> {
    let properties = PropertyService::new(&state)
        .list_properties()
        .await
        .map_err(|e| e.into_app_error("Failed to fetch properties"))?;

    Ok(Json(json!(properties)))
}

#[utoipa::path(
    get,
    path = "/api/properties/{id}",
    tag = "Property",
    params(("id" = String, Path, description = "Property document id")),
    responses(
        (status = 200, description = "Listing found"),
        (status = 404, description = "Property not found"),
        (status = 500, description = "Server error"),
    )
)]
pub async fn get_property_by_id(
    State(state): State<Arc<AppConfig>>,
    Path(property_id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let property = PropertyService::new(&state)
        .get_property(&property_id)
        .await
        .map_err(|e| e.into_app_error("Failed to fetch property"))?;

    Ok(Json(property))
}

#[utoipa::path(
    post,
    path = "/api/properties",
    tag = "Property",
    security(("bearerAuth" = [])),
    request_body = CreatePropertyRequest,
    responses(
        (status = 201, description = "Listing created"),
        (status = 400, description = "Missing required fields"),
        (status = 403, description = "Access denied"),
    )
)]
pub async fn create_property(
    State(state): State<Arc<AppConfig>>,
    Extension(user): Extension<Identity>,
    JsonBody(request): JsonBody<CreatePropertyRequest>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let property = PropertyService::new(&state)
        .create_property(request)
        .await
        .map_err(|e| e.into_app_error("Failed to create property"))?;

    info!("Property created by admin {}", user.id);
    Ok((StatusCode::CREATED, Json(property)))
}

#[utoipa::path(
    delete,
    path = "/api/properties/{id}",
    tag = "Property",
    security(("bearerAuth" = [])),
    params(("id" = String, Path, description = "Property document id")),
    responses(
        (status = 200, description = "Listing deleted"),
        (status = 403, description = "Access denied"),
        (status = 404, description = "Property not found"),
    )
)]
pub async fn delete_property(
    State(state): State<Arc<AppConfig>>,
    Extension(user): Extension<Identity>,
    Path(property_id): Path<String>,
) -> Result<Json<Value>, AppError> {
    PropertyService::new(&state)
        .delete_property(&property_id)
        .await
        .map_err(|e| e.into_app_error("Failed to delete property"))?;

    info!("Property {} deleted by admin {}", property_id, user.id);
    Ok(Json(json!({ "message": "Property deleted successfully" })))
}
