// libs/leave-cell/src/services/leaves.rs
use chrono::Utc;
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::Method;
use serde_json::json;
use tracing::{debug, info};
use uuid::Uuid;

use shared_config::AppConfig;
use shared_database::store::StoreClient;

use crate::models::{
    CreateLeaveRequest, DoctorLeave, LeaveError, LeaveStatus, UpdateLeaveDatesRequest,
};
use crate::services::conflict;

pub struct LeaveService {
    store: StoreClient,
}

impl LeaveService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            store: StoreClient::new(config),
        }
    }

    fn representation_headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert("Prefer", HeaderValue::from_static("return=representation"));
        headers
    }

    pub async fn list(&self) -> Result<Vec<DoctorLeave>, LeaveError> {
        self.store
            .request(
                Method::GET,
                "/rest/v1/doctor_leaves?order=start_date.asc",
                None,
                None,
            )
            .await
            .map_err(|e| LeaveError::StoreError(e.to_string()))
    }

    pub async fn get(&self, id: Uuid) -> Result<DoctorLeave, LeaveError> {
        let rows: Vec<DoctorLeave> = self
            .store
            .request(
                Method::GET,
                &format!("/rest/v1/doctor_leaves?id=eq.{}", id),
                None,
                None,
            )
            .await
            .map_err(|e| LeaveError::StoreError(e.to_string()))?;

        rows.into_iter().next().ok_or(LeaveError::NotFound)
    }

    /// Leaves for one doctor; an unknown doctor yields an empty list, not
    /// a 404.
    pub async fn list_for_doctor(&self, doctor_id: Uuid) -> Result<Vec<DoctorLeave>, LeaveError> {
        self.store
            .request(
                Method::GET,
                &format!(
                    "/rest/v1/doctor_leaves?doctor_id=eq.{}&order=start_date.asc",
                    doctor_id
                ),
                None,
                None,
            )
            .await
            .map_err(|e| LeaveError::StoreError(e.to_string()))
    }

    /// Submit a new leave request. The candidate window is validated against
    /// every existing leave of the same doctor before the write; admissible
    /// requests start out Pending.
    pub async fn create(&self, request: CreateLeaveRequest) -> Result<DoctorLeave, LeaveError> {
        debug!(
            "Creating leave request for doctor {}: {}..{}",
            request.doctor_id, request.start_date, request.end_date
        );

        conflict::validate_reason(request.leave_type, &request.reason)?;

        let existing = self.list_for_doctor(request.doctor_id).await?;
        conflict::validate_window(
            &existing,
            request.start_date,
            request.end_date,
            None,
            Utc::now().date_naive(),
        )?;

        let body = json!({
            "doctor_id": request.doctor_id,
            "leave_type": request.leave_type,
            "start_date": request.start_date,
            "end_date": request.end_date,
            "reason": request.reason,
            "status": LeaveStatus::Pending,
        });

        let created: Vec<DoctorLeave> = self
            .store
            .request_with_headers(
                Method::POST,
                "/rest/v1/doctor_leaves",
                None,
                Some(body),
                Some(Self::representation_headers()),
            )
            .await
            .map_err(|e| LeaveError::StoreError(e.to_string()))?;

        created
            .into_iter()
            .next()
            .ok_or_else(|| LeaveError::StoreError("Insert returned no row".to_string()))
    }

    /// Edit the window of an existing leave. Revalidated against the
    /// doctor's other leaves with the edited record excluded, so a request
    /// can always be shrunk or shifted within its own former interval.
    pub async fn update_dates(
        &self,
        id: Uuid,
        request: UpdateLeaveDatesRequest,
    ) -> Result<DoctorLeave, LeaveError> {
        let leave = self.get(id).await?;

        let existing = self.list_for_doctor(leave.doctor_id).await?;
        conflict::validate_window(
            &existing,
            request.start_date,
            request.end_date,
            Some(id),
            Utc::now().date_naive(),
        )?;

        let updated: Vec<DoctorLeave> = self
            .store
            .request_with_headers(
                Method::PATCH,
                &format!("/rest/v1/doctor_leaves?id=eq.{}", id),
                None,
                Some(json!({
                    "start_date": request.start_date,
                    "end_date": request.end_date,
                })),
                Some(Self::representation_headers()),
            )
            .await
            .map_err(|e| LeaveError::StoreError(e.to_string()))?;

        updated.into_iter().next().ok_or(LeaveError::NotFound)
    }

    /// Status transitions (approve, reject, start -> Ongoing, end -> Taken)
    /// are unconditional writes; only a vanished record is an error.
    pub async fn update_status(
        &self,
        id: Uuid,
        status: LeaveStatus,
    ) -> Result<DoctorLeave, LeaveError> {
        info!("Updating leave {} status to {}", id, status);

        let updated: Vec<DoctorLeave> = self
            .store
            .request_with_headers(
                Method::PATCH,
                &format!("/rest/v1/doctor_leaves?id=eq.{}", id),
                None,
                Some(json!({ "status": status })),
                Some(Self::representation_headers()),
            )
            .await
            .map_err(|e| LeaveError::StoreError(e.to_string()))?;

        updated.into_iter().next().ok_or(LeaveError::NotFound)
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), LeaveError> {
        let deleted: Vec<DoctorLeave> = self
            .store
            .request_with_headers(
                Method::DELETE,
                &format!("/rest/v1/doctor_leaves?id=eq.{}", id),
                None,
                None,
                Some(Self::representation_headers()),
            )
            .await
            .map_err(|e| LeaveError::StoreError(e.to_string()))?;

        if deleted.is_empty() {
            return Err(LeaveError::NotFound);
        }
        Ok(())
    }
}
