// libs/leave-cell/src/router.rs
use std::sync::Arc;

use axum::{
    routing::{get, put},
    Router,
};

use shared_config::AppConfig;

use crate::handlers;

/// Routes mounted at `/api/doctorLeave` (legacy casing preserved).
pub fn leave_routes(state: Arc<AppConfig>) -> Router {
    Router::new()
        .route("/", get(handlers::get_leaves).post(handlers::create_leave))
        .route("/filterBydoc/{doctor_id}", get(handlers::get_leaves_by_doctor))
        .route("/{leave_id}", get(handlers::get_leave).delete(handlers::delete_leave))
        .route("/{leave_id}/status", put(handlers::update_leave_status))
        .route("/{leave_id}/update", put(handlers::update_leave_dates))
        .with_state(state)
}
