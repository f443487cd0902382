// libs/leave-cell/src/handlers.rs
use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::{json, Value};
use uuid::Uuid;

use shared_config::AppConfig;
use shared_models::error::AppError;

use crate::models::{
    CreateLeaveRequest, LeaveError, UpdateLeaveDatesRequest, UpdateLeaveStatusRequest,
};
use crate::services::leaves::LeaveService;

fn into_app_error(e: LeaveError) -> AppError {
    match e {
        LeaveError::NotFound => AppError::NotFound("Leave request not found".to_string()),
        LeaveError::StartsInPast | LeaveError::InvalidRange => {
            AppError::ValidationError(e.to_string())
        }
        LeaveError::Overlap => AppError::ValidationError(e.to_string()),
        LeaveError::ValidationError(msg) => AppError::ValidationError(msg),
        LeaveError::StoreError(msg) => AppError::Internal(msg),
    }
}

#[axum::debug_handler]
pub async fn get_leaves(State(state): State<Arc<AppConfig>>) -> Result<Json<Value>, AppError> {
    let service = LeaveService::new(&state);
    let leaves = service.list().await.map_err(into_app_error)?;
    Ok(Json(json!(leaves)))
}

#[axum::debug_handler]
pub async fn get_leave(
    State(state): State<Arc<AppConfig>>,
    Path(leave_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let service = LeaveService::new(&state);
    let leave = service.get(leave_id).await.map_err(into_app_error)?;
    Ok(Json(json!(leave)))
}

#[axum::debug_handler]
pub async fn get_leaves_by_doctor(
    State(state): State<Arc<AppConfig>>,
    Path(doctor_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let service = LeaveService::new(&state);
    let leaves = service
        .list_for_doctor(doctor_id)
        .await
        .map_err(into_app_error)?;
    Ok(Json(json!(leaves)))
}

#[axum::debug_handler]
pub async fn create_leave(
    State(state): State<Arc<AppConfig>>,
    Json(request): Json<CreateLeaveRequest>,
) -> Result<Json<Value>, AppError> {
    let service = LeaveService::new(&state);
    let leave = service.create(request).await.map_err(into_app_error)?;
    Ok(Json(json!(leave)))
}

#[axum::debug_handler]
pub async fn update_leave_dates(
    State(state): State<Arc<AppConfig>>,
    Path(leave_id): Path<Uuid>,
    Json(request): Json<UpdateLeaveDatesRequest>,
) -> Result<Json<Value>, AppError> {
    let service = LeaveService::new(&state);
    let leave = service
        .update_dates(leave_id, request)
        .await
        .map_err(into_app_error)?;
    Ok(Json(json!({ "message": "Leave request updated", "leave": leave })))
}

#[axum::debug_handler]
pub async fn update_leave_status(
    State(state): State<Arc<AppConfig>>,
    Path(leave_id): Path<Uuid>,
    Json(request): Json<UpdateLeaveStatusRequest>,
) -> Result<Json<Value>, AppError> {
    let service = LeaveService::new(&state);
    let leave = service
        .update_status(leave_id, request.status)
        .await
        .map_err(into_app_error)?;
    Ok(Json(json!({ "message": "Leave status updated", "leave": leave })))
}

#[axum::debug_handler]
pub async fn delete_leave(
    State(state): State<Arc<AppConfig>>,
    Path(leave_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let service = LeaveService::new(&state);
    service.delete(leave_id).await.map_err(into_app_error)?;
    Ok(Json(json!({ "message": "Leave request deleted" })))
}
