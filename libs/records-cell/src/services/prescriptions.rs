// libs/records-cell/src/services/prescriptions.rs
use chrono::Utc;
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::Method;
use serde_json::json;
use tracing::{debug, info};
use uuid::Uuid;

use shared_config::AppConfig;
use shared_database::store::StoreClient;

use crate::models::{CreatePrescriptionRequest, Prescription, RecordsError};

const CORRECTION_VOID_REASON: &str = "Corrected by a new prescription";
const DEFAULT_VOID_REASON: &str = "No reason provided";

pub struct PrescriptionService {
    store: StoreClient,
}

impl PrescriptionService {
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

    fn validate_medicine(request: &CreatePrescriptionRequest) -> Result<(), RecordsError> {
        if request.medicine.is_empty() {
            return Err(RecordsError::ValidationError(
                "A prescription requires at least one medicine entry".to_string(),
            ));
        }
        for entry in &request.medicine {
            if entry.medicine_name.trim().is_empty() || entry.dosage.trim().is_empty() {
                return Err(RecordsError::ValidationError(
                    "Each medicine entry requires a name and a dosage".to_string(),
                ));
            }
        }
        Ok(())
    }

    pub async fn list(&self) -> Result<Vec<Prescription>, RecordsError> {
        self.store
            .request(
                Method::GET,
                "/rest/v1/prescriptions?order=date_issued.desc",
                None,
                None,
            )
            .await
            .map_err(|e| RecordsError::StoreError(e.to_string()))
    }

    pub async fn get(&self, id: Uuid) -> Result<Prescription, RecordsError> {
        let rows: Vec<Prescription> = self
            .store
            .request(
                Method::GET,
                &format!("/rest/v1/prescriptions?id=eq.{}", id),
                None,
                None,
            )
            .await
            .map_err(|e| RecordsError::StoreError(e.to_string()))?;

        rows.into_iter()
            .next()
            .ok_or(RecordsError::PrescriptionNotFound)
    }

    pub async fn create(
        &self,
        request: CreatePrescriptionRequest,
    ) -> Result<Prescription, RecordsError> {
        Self::validate_medicine(&request)?;
        self.insert(&request, None).await
    }

    /// Mark a prescription invalid without destroying the record.
    pub async fn void(
        &self,
        id: Uuid,
        reason: Option<String>,
    ) -> Result<Prescription, RecordsError> {
        let reason = reason
            .filter(|r| !r.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_VOID_REASON.to_string());
        info!("Voiding prescription {}: {}", id, reason);

        self.mark_voided(id, &reason).await
    }

    /// Void the old prescription and issue a replacement linked back to it.
    /// The void lands first so the chain never shows two live records for
    /// the same correction.
    pub async fn correct(
        &self,
        id: Uuid,
        request: CreatePrescriptionRequest,
    ) -> Result<Prescription, RecordsError> {
        Self::validate_medicine(&request)?;

        let old = self.get(id).await?;
        debug!("Correcting prescription {}", old.id);

        self.mark_voided(old.id, CORRECTION_VOID_REASON).await?;
        self.insert(&request, Some(old.id)).await
    }

    async fn insert(
        &self,
        request: &CreatePrescriptionRequest,
        corrected_by: Option<Uuid>,
    ) -> Result<Prescription, RecordsError> {
        let body = json!({
            "appointment_id": request.appointment_id,
            "doctor_id": request.doctor_id,
            "patient_id": request.patient_id,
            "medicine": request.medicine,
            "notes": request.notes,
            "date_issued": Utc::now(),
            "is_voided": false,
            "void_reason": Option::<String>::None,
            "corrected_by": corrected_by,
        });

        let created: Vec<Prescription> = self
            .store
            .request_with_headers(
                Method::POST,
                "/rest/v1/prescriptions",
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

    async fn mark_voided(&self, id: Uuid, reason: &str) -> Result<Prescription, RecordsError> {
        let updated: Vec<Prescription> = self
            .store
            .request_with_headers(
                Method::PATCH,
                &format!("/rest/v1/prescriptions?id=eq.{}", id),
                None,
                Some(json!({ "is_voided": true, "void_reason": reason })),
                Some(Self::representation_headers()),
            )
            .await
            .map_err(|e| RecordsError::StoreError(e.to_string()))?;

        updated
            .into_iter()
            .next()
            .ok_or(RecordsError::PrescriptionNotFound)
    }
}
