use std::sync::Arc;

use axum::{
    Router,
    routing::{delete, get, post},
    middleware,
};

use shared_config::AppConfig;
use shared_utils::extractor::{auth_middleware, require_role, RequiredRole};

use crate::handlers;

pub fn property_routes(state: Arc<AppConfig>) -> Router {
    let public_routes = Router::new()
        .route("/", get(handlers::get_all_properties))
        .route("/{id}", get(handlers::get_property_by_id));

    let admin_routes = Router::new()
        .route("/", post(handlers::create_property))
        .route("/{id}", delete(handlers::delete_property))
        .layer(middleware::from_fn_with_state(RequiredRole("admin"), require_role))
        .layer(middleware::from_fn_with_state(state.clone(), auth_middleware));

    Router::new()
        .merge(public_routes)
        .merge(admin_routes)
        .with_state(state)
}
