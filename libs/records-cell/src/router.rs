// libs/records-cell/src/router.rs
use std::sync::Arc;

use axum::{
    routing::{get, post, put},
    Router,
};

use shared_config::AppConfig;

use crate::handlers;

/// Routes mounted at `/api/diagnosis`.
pub fn diagnosis_routes(state: Arc<AppConfig>) -> Router {
    Router::new()
        .route("/", get(handlers::get_diagnoses).post(handlers::create_diagnosis))
        .route(
            "/{diagnosis_id}",
            get(handlers::get_diagnosis).delete(handlers::delete_diagnosis),
        )
        .route("/{diagnosis_id}/status", put(handlers::update_diagnosis_status))
        .with_state(state)
}

/// Routes mounted at `/api/prescription`.
pub fn prescription_routes(state: Arc<AppConfig>) -> Router {
    Router::new()
        .route(
            "/",
            get(handlers::get_prescriptions).post(handlers::create_prescription),
        )
        .route("/{prescription_id}", get(handlers::get_prescription))
        .route("/{prescription_id}/void", put(handlers::void_prescription))
        .route("/{prescription_id}/correct", post(handlers::correct_prescription))
        .with_state(state)
}
