// libs/triage-cell/src/router.rs
use axum::{routing::post, Router};

use crate::handlers;

/// Routes mounted at `/api/novelty`. Analysis is pure computation, so the
/// router carries no store state.
pub fn novelty_routes() -> Router {
    Router::new().route("/analyze", post(handlers::analyze_symptoms))
}
