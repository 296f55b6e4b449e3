use std::sync::Arc;

use axum::{
    Router,
    routing::{get, put},
    middleware,
};

use shared_config::AppConfig;
use shared_utils::extractor::auth_middleware;

use crate::handlers;

pub fn user_routes(state: Arc<AppConfig>) -> Router {
    // Every route acts on the caller's own document
    Router::new()
        .route("/", put(handlers::update_user_profile))
        .route("/me", get(handlers::get_user_profile))
        .route("/basic", put(handlers::update_user_basic_info))
        .route("/contact", put(handlers::update_user_contact_info))
        .route("/medical", put(handlers::update_user_medical_info))
        .layer(middleware::from_fn_with_state(state.clone(), auth_middleware))
        .with_state(state)
}
