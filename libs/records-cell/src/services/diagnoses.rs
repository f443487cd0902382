// libs/records-cell/src/services/diagnoses.rs
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::Method;
use serde_json::json;
use tracing::{debug, info};
use uuid::Uuid;

use shared_config::AppConfig;
use shared_database::store::StoreClient;

use crate::models::{CreateDiagnosisRequest, Diagnosis, DiagnosisStatus, RecordsError};

pub struct DiagnosisService {
    store: StoreClient,
}

impl DiagnosisService {
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

    pub async fn list(&self) -> Result<Vec<Diagnosis>, RecordsError> {
        self.store
            .request(Method::GET, "/rest/v1/diagnoses", None, None)
            .await
            .map_err(|e| RecordsError::StoreError(e.to_string()))
    }

    pub async fn get(&self, id: Uuid) -> Result<Diagnosis, RecordsError> {
        let rows: Vec<Diagnosis> = self
            .store
            .request(
                Method::GET,
                &format!("/rest/v1/diagnoses?id=eq.{}", id),
                None,
                None,
            )
            .await
            .map_err(|e| RecordsError::StoreError(e.to_string()))?;

        rows.into_iter().next().ok_or(RecordsError::DiagnosisNotFound)
    }

    /// New diagnoses start Pending; confirmation is a separate status write.
    pub async fn create(&self, request: CreateDiagnosisRequest) -> Result<Diagnosis, RecordsError> {
        debug!(
            "Recording diagnosis for appointment {}: {}",
            request.appointment_id, request.assumed_illness
        );

        let body = json!({
            "appointment_id": request.appointment_id,
            "patient_id": request.patient_id,
            "doctor_id": request.doctor_id,
            "symptoms": request.symptoms,
            "assumed_illness": request.assumed_illness,
            "description": request.description,
            "notes": request.notes,
            "status": DiagnosisStatus::Pending,
        });

        let created: Vec<Diagnosis> = self
            .store
            .request_with_headers(
                Method::POST,
                "/rest/v1/diagnoses",
                None,
                Some(body),
                Some(Self::representation_headers()),
            )
            .await
            .map_err(|e| RecordsError::StoreError(e.to_string()))?;

        created
            .into_iter()
            .next()
            .ok_or_else(|| RecordsError::StoreError("Insert returned no row".to_string()))
    }

    pub async fn update_status(
        &self,
        id: Uuid,
        status: DiagnosisStatus,
    ) -> Result<Diagnosis, RecordsError> {
        info!("Updating diagnosis {} status to {}", id, status);

        let updated: Vec<Diagnosis> = self
            .store
            .request_with_headers(
                Method::PATCH,
                &format!("/rest/v1/diagnoses?id=eq.{}", id),
                None,
                Some(json!({ "status": status })),
                Some(Self::representation_headers()),
            )
            .await
            .map_err(|e| RecordsError::StoreError(e.to_string()))?;

        updated.into_iter().next().ok_or(RecordsError::DiagnosisNotFound)
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), RecordsError> {
        let deleted: Vec<Diagnosis> = self
            .store
            .request_with_headers(
                Method::DELETE,
                &format!("/rest/v1/diagnoses?id=eq.{}", id),
                None,
                None,
                Some(Self::representation_headers()),
            )
            .await
            .map_err(|e| RecordsError::StoreError(e.to_string()))?;

        if deleted.is_empty() {
            return Err(RecordsError::DiagnosisNotFound);
        }
        Ok(())
    }
}
