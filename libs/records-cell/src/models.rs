// libs/records-cell/src/models.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use uuid::Uuid;

/// A doctor's written assessment of an appointment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Diagnosis {
    pub id: Uuid,
    pub appointment_id: Uuid,
    pub patient_id: Uuid,
    pub doctor_id: Uuid,
    pub symptoms: Vec<String>,
    pub assumed_illness: String,
    pub description: String,
    #[serde(default)]
    pub notes: String,
    pub status: DiagnosisStatus,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum DiagnosisStatus {
    Pending,
    Confirmed,
    Rejected,
}

impl fmt::Display for DiagnosisStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosisStatus::Pending => write!(f, "Pending"),
            DiagnosisStatus::Confirmed => write!(f, "Confirmed"),
            DiagnosisStatus::Rejected => write!(f, "Rejected"),
        }
    }
}

/// One line on a prescription. A prescription carries at least one of these.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MedicineEntry {
    #[serde(alias = "medicineName")]
    pub medicine_name: String,
    pub dosage: String,
    #[serde(default)]
    pub description: String,
}

/// Prescriptions are never destroyed once issued. A bad one is voided in
/// place, and a correction issues a fresh record pointing back at the old
/// one through `corrected_by`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Prescription {
    pub id: Uuid,
    pub appointment_id: Uuid,
    pub doctor_id: Uuid,
    pub patient_id: Uuid,
    pub medicine: Vec<MedicineEntry>,
    #[serde(default)]
    pub notes: String,
    pub date_issued: DateTime<Utc>,
    pub is_voided: bool,
    pub void_reason: Option<String>,
    pub corrected_by: Option<Uuid>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateDiagnosisRequest {
    #[serde(alias = "appointmentId")]
    pub appointment_id: Uuid,
    #[serde(alias = "patientId")]
    pub patient_id: Uuid,
    #[serde(alias = "doctorId")]
    pub doctor_id: Uuid,
    pub symptoms: Vec<String>,
    #[serde(alias = "assumedIllness")]
    pub assumed_illness: String,
    #[serde(alias = "diagnosisDescription")]
    pub description: String,
    #[serde(default)]
    pub notes: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateDiagnosisStatusRequest {
    pub status: DiagnosisStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePrescriptionRequest {
    #[serde(alias = "appointmentId")]
    pub appointment_id: Uuid,
    #[serde(alias = "doctorId")]
    pub doctor_id: Uuid,
    #[serde(alias = "patientId")]
    pub patient_id: Uuid,
    pub medicine: Vec<MedicineEntry>,
    #[serde(default)]
    pub notes: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoidPrescriptionRequest {
    #[serde(alias = "voidReason")]
    pub void_reason: Option<String>,
}

#[derive(Error, Debug)]
pub enum RecordsError {
    #[error("Diagnosis not found")]
    DiagnosisNotFound,

    #[error("Prescription not found")]
    PrescriptionNotFound,

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Store error: {0}")]
    StoreError(String),
}
