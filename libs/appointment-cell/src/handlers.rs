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

use crate::models::{CreateAppointmentRequest, UpdateStatusRequest};
use crate::services::AppointmentService;

#[utoipa::path(
    post,
    path = "/api/appointments",
    tag = "Appointments",
    security(("bearerAuth" = [])),
    request_body = CreateAppointmentRequest,
    responses(
        (status = 201, description = "Appointment created successfully"),
        (status = 400, description = "Missing or invalid fields"),
        (status = 401, description = "Not authenticated"),
        (status = 500, description = "Server error"),
    )
)]
pub async fn create_appointment(
    State(state): State<Arc<AppConfig>>,
    Extension(user): Extension<Identity>,
    JsonBody(request): JsonBody<CreateAppointmentRequest>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let appointment = AppointmentService::new(&state)
        .create_appointment(&user.id, request)
        .await?;

    info!("Appointment booked by patient {}", user.id);
    Ok((StatusCode::CREATED, Json(json!({ "appointment": appointment }))))
}

#[utoipa::path(
    get,
    path = "/api/appointments",
    tag = "Appointments",
    security(("bearerAuth" = [])),
    responses(
        (status = 200, description = "Appointments for the logged-in user"),
        (status = 401, description = "Not authenticated"),
        (status = 500, description = "Server error"),
    )
)]
pub async fn get_appointments(
    State(state): State<Arc<AppConfig>>,
    Extension(user): Extension<Identity>,
) -> Result<Json<Value>, AppError> {
    let appointments = AppointmentService::new(&state)
        .list_appointments(&user)
        .await?;

    Ok(Json(json!({ "appointments": appointments })))
}

#[utoipa::path(
    patch,
    path = "/api/appointments/{id}/status",
    tag = "Appointments",
    security(("bearerAuth" = [])),
    params(("id" = String, Path, description = "Appointment id")),
    request_body = UpdateStatusRequest,
    responses(
        (status = 200, description = "Appointment status updated"),
        (status = 400, description = "Invalid status"),
        (status = 403, description = "Not allowed"),
        (status = 404, description = "Appointment not found"),
        (status = 500, description = "Server error"),
    )
)]
pub async fn update_appointment_status(
    State(state): State<Arc<AppConfig>>,
    Extension(user): Extension<Identity>,
    Path(appointment_id): Path<String>,
    JsonBody(request): JsonBody<UpdateStatusRequest>,
) -> Result<Json<Value>, AppError> {
    let appointment = AppointmentService::new(&state)
        .update_status(&user, &appointment_id, request.status.as_ref().and_then(Value::as_str))
        .await?;

    info!("Appointment {} status changed by doctor {}", appointment_id, user.id);
    Ok(Json(json!({ "appointment": appointment })))
}
