// libs/appointment-cell/src/handlers.rs
use std::sync::Arc;

use axum::{
    extract::{Extension, Path, Query, State},
    Json,
};
use axum_extra::TypedHeader;
use headers::{authorization::Bearer, Authorization};
use serde_json::{json, Value};
use uuid::Uuid;

use shared_config::AppConfig;
use shared_models::auth::User;
use shared_models::error::AppError;

use crate::models::{
    AppointmentError, AppointmentQueryParams, CreateAppointmentRequest, RejectAppointmentRequest,
    UpdateAppointmentRequest, UpdateStatusRequest,
};
use crate::services::appointments::AppointmentService;

fn into_app_error(e: AppointmentError) -> AppError {
    match e {
        AppointmentError::NotFound => AppError::NotFound("Appointment not found".to_string()),
        AppointmentError::RejectedNotFound => {
            AppError::NotFound("Rejected appointment not found".to_string())
        }
        AppointmentError::PatientNotFound => AppError::NotFound("Patient not found".to_string()),
        AppointmentError::ValidationError(msg) => AppError::ValidationError(msg),
        AppointmentError::InvalidStatusTransition(status) => {
            AppError::BadRequest(format!("Cannot transition from current status: {}", status))
        }
        AppointmentError::PartialFailure(msg) => AppError::PartialFailure(msg),
        AppointmentError::StoreError(msg) => AppError::Internal(msg),
    }
}

#[axum::debug_handler]
pub async fn create_appointment(
    State(state): State<Arc<AppConfig>>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
    Extension(_user): Extension<User>,
    Json(request): Json<CreateAppointmentRequest>,
) -> Result<Json<Value>, AppError> {
    let service = AppointmentService::new(&state);

    let appointment = service
        .create(request, auth.token())
        .await
        .map_err(into_app_error)?;

    Ok(Json(json!({
        "message": "Appointment created successfully",
        "appointment": appointment
    })))
}

#[axum::debug_handler]
pub async fn get_appointments(
    State(state): State<Arc<AppConfig>>,
    Query(params): Query<AppointmentQueryParams>,
) -> Result<Json<Value>, AppError> {
    let service = AppointmentService::new(&state);

    let appointments = service
        .list(params.doctor_id)
        .await
        .map_err(into_app_error)?;

    // Historical response key, kept for wire compatibility.
    Ok(Json(json!({ "appoinments": appointments })))
}

#[axum::debug_handler]
pub async fn get_appointment(
    State(state): State<Arc<AppConfig>>,
    Path(appointment_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let service = AppointmentService::new(&state);

    let appointment = service.get(appointment_id).await.map_err(into_app_error)?;

    Ok(Json(json!(appointment)))
}

#[axum::debug_handler]
pub async fn update_appointment(
    State(state): State<Arc<AppConfig>>,
    Path(appointment_id): Path<Uuid>,
    Json(request): Json<UpdateAppointmentRequest>,
) -> Result<Json<Value>, AppError> {
    let service = AppointmentService::new(&state);

    let appointment = service
        .update(appointment_id, request)
        .await
        .map_err(into_app_error)?;

    Ok(Json(json!({
        "message": "Appointment updated successfully",
        "appointment": appointment
    })))
}

#[axum::debug_handler]
pub async fn delete_appointment(
    State(state): State<Arc<AppConfig>>,
    Path(appointment_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let service = AppointmentService::new(&state);

    service.delete(appointment_id).await.map_err(into_app_error)?;

    Ok(Json(json!({ "message": "Appointment deleted successfully" })))
}

#[axum::debug_handler]
pub async fn update_appointment_status(
    State(state): State<Arc<AppConfig>>,
    Path(appointment_id): Path<Uuid>,
    Json(request): Json<UpdateStatusRequest>,
) -> Result<Json<Value>, AppError> {
    let service = AppointmentService::new(&state);

    let appointment = service
        .update_status(appointment_id, request.status)
        .await
        .map_err(into_app_error)?;

    Ok(Json(json!({
        "message": "Appointment status updated successfully",
        "appointment": appointment
    })))
}

#[axum::debug_handler]
pub async fn reject_appointment(
    State(state): State<Arc<AppConfig>>,
    Path(appointment_id): Path<Uuid>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
    Extension(_user): Extension<User>,
    Json(request): Json<RejectAppointmentRequest>,
) -> Result<Json<Value>, AppError> {
    let service = AppointmentService::new(&state);

    let rejected = service
        .reject(appointment_id, &request.rejection_reason, auth.token())
        .await
        .map_err(into_app_error)?;

    Ok(Json(json!({
        "message": "Appointment rejected successfully",
        "rejectedAppointment": rejected
    })))
}

#[axum::debug_handler]
pub async fn get_dashboard_stats(
    State(state): State<Arc<AppConfig>>,
    Query(params): Query<AppointmentQueryParams>,
) -> Result<Json<Value>, AppError> {
    let service = AppointmentService::new(&state);

    let stats = service
        .dashboard(params.doctor_id)
        .await
        .map_err(into_app_error)?;

    Ok(Json(json!(stats)))
}

#[axum::debug_handler]
pub async fn get_rejected_appointments(
    State(state): State<Arc<AppConfig>>,
) -> Result<Json<Value>, AppError> {
    let service = AppointmentService::new(&state);

    let rejected = service.list_rejected().await.map_err(into_app_error)?;

    Ok(Json(json!(rejected)))
}

#[axum::debug_handler]
pub async fn delete_rejected_appointment(
    State(state): State<Arc<AppConfig>>,
    Path(rejected_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let service = AppointmentService::new(&state);

    service
        .delete_rejected(rejected_id)
        .await
        .map_err(into_app_error)?;

    Ok(Json(json!({ "message": "Appointment deleted successfully" })))
}
