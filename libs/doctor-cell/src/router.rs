use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post, put},
    middleware,
};

use shared_config::AppConfig;
use shared_utils::extractor::{auth_middleware, require_role, RequiredRole};

use crate::handlers;

pub fn doctor_routes(state: Arc<AppConfig>) -> Router {
    // Public routes (no authentication required)
    let public_routes = Router::new()
        .route("/", get(handlers::get_all_doctors))
        .route("/specialization/{specialization}", get(handlers::get_doctors_by_specialization))
        .route("/search/{q}", get(handlers::search_doctors))
        .route("/{id}", get(handlers::get_doctor_by_id));

    // Admin only; the role gate runs after the token is verified
    let admin_routes = Router::new()
        .route("/", post(handlers::create_doctor))
        .route("/{id}", put(handlers::update_doctor).delete(handlers::delete_doctor))
        .layer(middleware::from_fn_with_state(RequiredRole("admin"), require_role))
        .layer(middleware::from_fn_with_state(state.clone(), auth_middleware));

    Router::new()
        .merge(public_routes)
        .merge(admin_routes)
        .with_state(state)
}
