use std::sync::Arc;

use axum::{routing::get, Router};

use appointment_cell::router::{appointment_routes, rejected_appointment_routes};
use leave_cell::router::leave_routes;
use records_cell::router::{diagnosis_routes, prescription_routes};
use shared_config::AppConfig;
use triage_cell::router::novelty_routes;

// Path spellings match the legacy client, including "appoinment".
pub fn create_router(state: Arc<AppConfig>) -> Router {
    Router::new()
        .route("/", get(|| async { "Medi Flow API is running!" }))
        .nest("/api/appoinment", appointment_routes(state.clone()))
        .nest("/api/rejected-appointments", rejected_appointment_routes(state.clone()))
        .nest("/api/doctorLeave", leave_routes(state.clone()))
        .nest("/api/diagnosis", diagnosis_routes(state.clone()))
        .nest("/api/prescription", prescription_routes(state))
        .nest("/api/novelty", novelty_routes())
}
