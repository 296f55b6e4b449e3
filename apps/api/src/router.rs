use std::sync::Arc;

use axum::{
    Json, Router,
    routing::get,
};
use chrono::Utc;
use serde_json::{json, Value};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use appointment_cell::router::appointment_routes;
use auth_cell::router::auth_routes;
use contact_cell::router::contact_routes;
use doctor_cell::router::doctor_routes;
use property_cell::router::property_routes;
use shared_config::AppConfig;
use user_cell::router::user_routes;

use crate::docs::ApiDoc;

#[utoipa::path(
    get,
    path = "/",
    tag = "Health",
    responses((status = 200, description = "Service is up"))
)]
pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok", "timestamp": Utc::now().to_rfc3339() }))
}

pub fn create_router(state: Arc<AppConfig>) -> Router {
    Router::new()
        .route("/", get(health))
        .nest("/api/auth", auth_routes(state.clone()))
        .nest("/api/appointments", appointment_routes(state.clone()))
        .nest("/api/doctors", doctor_routes(state.clone()))
        .nest("/api/user", user_routes(state.clone()))
        .nest("/api/contact", contact_routes(state.clone()))
        .nest("/api/properties", property_routes(state))
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()))
}
