use std::sync::Arc;

use axum::{
    Router,
    routing::{patch, post},
    middleware,
};

use shared_config::AppConfig;
use shared_utils::extractor::{auth_middleware, require_role, RequiredRole};

use crate::handlers;

pub fn appointment_routes(state: Arc<AppConfig>) -> Router {
    // Only doctors change status; ownership is checked in the service
    let doctor_routes = Router::new()
        .route("/{id}/status", patch(handlers::update_appointment_status))
        .layer(middleware::from_fn_with_state(RequiredRole("doctor"), require_role));

    // All appointment operations require authentication
    Router::new()
        .route("/", post(handlers::create_appointment).get(handlers::get_appointments))
        .merge(doctor_routes)
        .layer(middleware::from_fn_with_state(state.clone(), auth_middleware))
        .with_state(state)
}
