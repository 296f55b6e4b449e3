use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
    middleware,
};

use shared_config::AppConfig;
use shared_utils::extractor::{auth_middleware, require_role, RequiredRole};

use crate::handlers;

pub fn contact_routes(state: Arc<AppConfig>) -> Router {
    let public_routes = Router::new()
        .route("/", post(handlers::create_contact));

    // Reading submissions is admin only
    let admin_routes = Router::new()
        .route("/", get(handlers::get_all_contacts))
        .route("/{id}", get(handlers::get_contact_by_id))
        .layer(middleware::from_fn_with_state(RequiredRole("admin"), require_role))
        .layer(middleware::from_fn_with_state(state.clone(), auth_middleware));

    Router::new()
        .merge(public_routes)
        .merge(admin_routes)
        .with_state(state)
}
