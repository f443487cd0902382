// libs/records-cell/src/handlers.rs
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
    CreateDiagnosisRequest, CreatePrescriptionRequest, RecordsError, UpdateDiagnosisStatusRequest,
    VoidPrescriptionRequest,
};
use crate::services::diagnoses::DiagnosisService;
use crate::services::prescriptions::PrescriptionService;

fn into_app_error(e: RecordsError) -> AppError {
    match e {
        RecordsError::DiagnosisNotFound => AppError::NotFound("Diagnosis not found".to_string()),
        RecordsError::PrescriptionNotFound => {
            AppError::NotFound("Prescription not found".to_string())
        }
        RecordsError::ValidationError(msg) => AppError::ValidationError(msg),
        RecordsError::StoreError(msg) => AppError::Internal(msg),
    }
}

#[axum::debug_handler]
pub async fn get_diagnoses(State(state): State<Arc<AppConfig>>) -> Result<Json<Value>, AppError> {
    let service = DiagnosisService::new(&state);
    let diagnoses = service.list().await.map_err(into_app_error)?;
    Ok(Json(json!(diagnoses)))
}

#[axum::debug_handler]
pub async fn get_diagnosis(
    State(state): State<Arc<AppConfig>>,
    Path(diagnosis_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let service = DiagnosisService::new(&state);
    let diagnosis = service.get(diagnosis_id).await.map_err(into_app_error)?;
    Ok(Json(json!(diagnosis)))
}

#[axum::debug_handler]
pub async fn create_diagnosis(
    State(state): State<Arc<AppConfig>>,
    Json(request): Json<CreateDiagnosisRequest>,
) -> Result<Json<Value>, AppError> {
    let service = DiagnosisService::new(&state);
    let diagnosis = service.create(request).await.map_err(into_app_error)?;
    Ok(Json(json!(diagnosis)))
}

#[axum::debug_handler]
pub async fn update_diagnosis_status(
    State(state): State<Arc<AppConfig>>,
    Path(diagnosis_id): Path<Uuid>,
    Json(request): Json<UpdateDiagnosisStatusRequest>,
) -> Result<Json<Value>, AppError> {
    let service = DiagnosisService::new(&state);
    let diagnosis = service
        .update_status(diagnosis_id, request.status)
        .await
        .map_err(into_app_error)?;
    Ok(Json(json!({ "message": "Diagnosis status updated", "diagnosis": diagnosis })))
}

#[axum::debug_handler]
pub async fn delete_diagnosis(
    State(state): State<Arc<AppConfig>>,
    Path(diagnosis_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let service = DiagnosisService::new(&state);
    service.delete(diagnosis_id).await.map_err(into_app_error)?;
    Ok(Json(json!({ "message": "Diagnosis deleted successfully" })))
}

#[axum::debug_handler]
pub async fn get_prescriptions(
    State(state): State<Arc<AppConfig>>,
) -> Result<Json<Value>, AppError> {
    let service = PrescriptionService::new(&state);
    let prescriptions = service.list().await.map_err(into_app_error)?;
    Ok(Json(json!(prescriptions)))
}

#[axum::debug_handler]
pub async fn get_prescription(
    State(state): State<Arc<AppConfig>>,
    Path(prescription_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let service = PrescriptionService::new(&state);
    let prescription = service
        .get(prescription_id)
        .await
        .map_err(into_app_error)?;
    Ok(Json(json!(prescription)))
}

#[axum::debug_handler]
pub async fn create_prescription(
    State(state): State<Arc<AppConfig>>,
    Json(request): Json<CreatePrescriptionRequest>,
) -> Result<Json<Value>, AppError> {
    let service = PrescriptionService::new(&state);
    let prescription = service.create(request).await.map_err(into_app_error)?;
    Ok(Json(json!(prescription)))
}

#[axum::debug_handler]
pub async fn void_prescription(
    State(state): State<Arc<AppConfig>>,
    Path(prescription_id): Path<Uuid>,
    Json(request): Json<VoidPrescriptionRequest>,
) -> Result<Json<Value>, AppError> {
    let service = PrescriptionService::new(&state);
    let prescription = service
        .void(prescription_id, request.void_reason)
        .await
        .map_err(into_app_error)?;
    Ok(Json(json!({ "message": "Prescription voided", "prescription": prescription })))
}

#[axum::debug_handler]
pub async fn correct_prescription(
    State(state): State<Arc<AppConfig>>,
    Path(prescription_id): Path<Uuid>,
    Json(request): Json<CreatePrescriptionRequest>,
) -> Result<Json<Value>, AppError> {
    let service = PrescriptionService::new(&state);
    let prescription = service
        .correct(prescription_id, request)
        .await
        .map_err(into_app_error)?;
    Ok(Json(json!({ "message": "New prescription issued", "prescription": prescription })))
}
