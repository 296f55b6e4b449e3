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

use crate::models::{CreateDoctorRequest, UpdateDoctorRequest};
use crate::services::DoctorService;

// ==============================================================================
// PUBLIC HANDLERS
// ==============================================================================

#[utoipa::path(
    get,
    path = "/api/doctors",
    tag = "Doctors",
    responses(
        (status = 200, description = "List of doctors, newest first"),
        (status = 500, description = "Server error"),
    )
)]
pub async fn get_all_doctors(
    State(state): State<Arc<AppConfig>>,
) -> Result<Json<Value>, AppError> {
    let doctors = DoctorService::new(&state)
        .list_doctors()
        .await
        .map_err(|e| e.into_app_error("Failed to fetch doctors"))?;

    Ok(Json(json!(doctors)))
}

#[utoipa::path(
    get,
    path = "/api/doctors/{id}",
    tag = "Doctors",
    params(("id" = String, Path, description = "Doctor document id")),
    responses(
        (status = 200, description = "Doctor found"),
        (status = 404, description = "Doctor not found"),
        (status = 500, description = "Server error"),
    )
)]
pub async fn get_doctor_by_id(
    State(state): State<Arc<AppConfig>>,
    Path(doctor_id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let doctor = DoctorService::new(&state)
        .get_doctor(&doctor_id)
        .await
        .map_err(|e| e.into_app_error("Failed to fetch doctor"))?;

    Ok(Json(doctor))
}

#[utoipa::path(
    get,
    path = "/api/doctors/specialization/{specialization}",
    tag = "Doctors",
    params(("specialization" = String, Path, description = "Exact specialization, e.g. Cardiology")),
    responses(
        (status = 200, description = "Doctors ordered by name"),
        (status = 404, description = "No doctors found for this specialization"),
    )
)]
pub async fn get_doctors_by_specialization(
    State(state): State<Arc<AppConfig>>,
    Path(specialization): Path<String>,
) -> Result<Json<Value>, AppError> {
    let doctors = DoctorService::new(&state)
        .doctors_by_specialization(&specialization)
        .await
        .map_err(|e| e.into_app_error("Failed to fetch doctors"))?;

    Ok(Json(json!(doctors)))
}

#[utoipa::path(
    get,
    path = "/api/doctors/search/{q}",
    tag = "Doctors",
    params(("q" = String, Path, description = "Name or specialization fragment, at least 2 characters")),
    responses(
        (status = 200, description = "Matching doctors ordered by name"),
        (status = 400, description = "Search term too short"),
        (status = 404, description = "No matching doctors found"),
    )
)]
pub async fn search_doctors(
    State(state): State<Arc<AppConfig>>,
    Path(term): Path<String>,
) -> Result<Json<Value>, AppError> {
    let doctors = DoctorService::new(&state)
        .search_doctors(&term)
        .await
        .map_err(|e| e.into_app_error("Failed to search doctors"))?;

    Ok(Json(json!(doctors)))
}

// ==============================================================================
// ADMIN HANDLERS
// ==============================================================================

#[utoipa::path(
    post,
    path = "/api/doctors",
    tag = "Doctors",
    security(("bearerAuth" = [])),
    request_body = CreateDoctorRequest,
    responses(
        (status = 201, description = "Doctor created"),
        (status = 400, description = "First name and last name are required"),
        (status = 403, description = "Access denied"),
        (status = 500, description = "Server error"),
    )
)]
pub async fn create_doctor(
    State(state): State<Arc<AppConfig>>,
    Extension(user): Extension<Identity>,
    JsonBody(request): JsonBody<CreateDoctorRequest>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let doctor = DoctorService::new(&state)
        .create_doctor(request)
        .await
        .map_err(|e| e.into_app_error("Failed to create doctor"))?;

    info!("Doctor created by admin {}", user.id);
    Ok((StatusCode::CREATED, Json(doctor)))
}

#[utoipa::path(
    put,
    path = "/api/doctors/{id}",
    tag = "Doctors",
    security(("bearerAuth" = [])),
    params(("id" = String, Path, description = "Doctor document id")),
    request_body = UpdateDoctorRequest,
    responses(
        (status = 200, description = "Doctor updated"),
        (status = 403, description = "Access denied"),
        (status = 404, description = "Doctor not found"),
    )
)]
pub async fn update_doctor(
    State(state): State<Arc<AppConfig>>,
    Extension(user): Extension<Identity>,
    Path(doctor_id): Path<String>,
    JsonBody(request): JsonBody<UpdateDoctorRequest>,
) -> Result<Json<Value>, AppError> {
    let doctor = DoctorService::new(&state)
        .update_doctor(&doctor_id, request)
        .await
        .map_err(|e| e.into_app_error("Failed to update doctor"))?;

    info!("Doctor {} updated by admin {}", doctor_id, user.id);
    Ok(Json(doctor))
}

#[utoipa::path(
    delete,
    path = "/api/doctors/{id}",
    tag = "Doctors",
    security(("bearerAuth" = [])),
    params(("id" = String, Path, description = "Doctor document id")),
    responses(
        (status = 200, description = "Doctor deleted"),
        (status = 403, description = "Access denied"),
        (status = 404, description = "Doctor not found"),
    )
)]
pub async fn delete_doctor(
    State(state): State<Arc<AppConfig>>,
    Extension(user): Extension<Identity>,
    Path(doctor_id): Path<String>,
) -> Result<Json<Value>, AppError> {
    DoctorService::new(&state)
        .delete_doctor(&doctor_id)
        .await
        .map_err(|e| e.into_app_error("Failed to delete doctor"))?;

    info!("Doctor {} deleted by admin {}", doctor_id, user.id);
    Ok(Json(json!({ "message": "Doctor deleted successfully" })))
}
