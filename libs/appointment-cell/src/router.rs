// libs/appointment-cell/src/router.rs
use std::sync::Arc;

use axum::{
    middleware,
    routing::{delete, get, post, put},
    Router,
};

use shared_config::AppConfig;
use shared_utils::extractor::auth_middleware;

use crate::handlers;

/// Routes mounted at `/api/appoinment` (historical spelling kept for the
/// existing client). Booking and rejection require a JWT; everything else
/// is open, matching the original route guards.
pub fn appointment_routes(state: Arc<AppConfig>) -> Router {
    let protected_routes = Router::new()
        .route("/", post(handlers::create_appointment))
        .route("/{appointment_id}/reject", post(handlers::reject_appointment))
        .layer(middleware::from_fn_with_state(state.clone(), auth_middleware));

    let public_routes = Router::new()
        .route("/", get(handlers::get_appointments))
        .route("/stats/dashboard", get(handlers::get_dashboard_stats))
        .route(
            "/{appointment_id}",
            get(handlers::get_appointment)
                .put(handlers::update_appointment)
                .delete(handlers::delete_appointment),
        )
        .route("/{appointment_id}/status", put(handlers::update_appointment_status));

    Router::new()
        .merge(protected_routes)
        .merge(public_routes)
        .with_state(state)
}

/// Routes mounted at `/api/rejected-appointments`.
pub fn rejected_appointment_routes(state: Arc<AppConfig>) -> Router {
    Router::new()
        .route("/", get(handlers::get_rejected_appointments))
        .route("/{rejected_id}", delete(handlers::delete_rejected_appointment))
        .with_state(state)
}
