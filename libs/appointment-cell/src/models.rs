// libs/appointment-cell/src/models.rs
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use uuid::Uuid;

// ==============================================================================
// CORE APPOINTMENT MODELS
// ==============================================================================

/// An active appointment row. `date` is a calendar date and `time` stays the
/// display string the booking form collects ("10:30 AM") - it never takes
/// part in date comparisons.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Appointment {
    pub id: Uuid,
    pub index_no: String,
    pub name: String,
    pub address: String,
    pub nic: Option<String>,
    pub phone: String,
    pub email: String,
    pub doctor_name: String,
    pub doctor_id: Uuid,
    pub specialization: String,
    pub date: NaiveDate,
    pub time: String,
    pub patient_id: Uuid,
    pub appointment_type: Option<String>,
    pub status: AppointmentStatus,
}

impl Appointment {
    /// Category used by the dashboard breakdown; absent values display as
    /// the legacy default.
    pub fn type_label(&self) -> &str {
        self.appointment_type.as_deref().unwrap_or("General Checkup")
    }
}

/// Closed set of active-appointment statuses. Rejection is not a status:
/// rejected appointments are moved to their own collection (see
/// `RejectedAppointment`), and `Cancelled` is a status the reporting
/// engine deliberately counts in none of the named buckets.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum AppointmentStatus {
    Pending,
    Reviewed,
    Completed,
    Cancelled,
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppointmentStatus::Pending => write!(f, "Pending"),
            AppointmentStatus::Reviewed => write!(f, "Reviewed"),
            AppointmentStatus::Completed => write!(f, "Completed"),
            AppointmentStatus::Cancelled => write!(f, "Cancelled"),
        }
    }
}

/// Denormalized snapshot taken when an appointment is rejected. Not a
/// foreign-keyed child of the original row - the original is deleted after
/// the snapshot is written.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RejectedAppointment {
    pub id: Uuid,
    pub index_no: String,
    pub name: String,
    pub address: String,
    pub nic: Option<String>,
    pub phone: String,
    pub email: String,
    pub doctor_name: String,
    pub doctor_id: Uuid,
    pub specialization: String,
    pub date: NaiveDate,
    pub time: String,
    pub patient_id: Uuid,
    pub status: String,
    pub rejection_reason: String,
    pub rejected_at: DateTime<Utc>,
    pub original_appointment_id: Uuid,
}

// ==============================================================================
// REQUEST/RESPONSE MODELS
// ==============================================================================

/// Booking payload. Aliases keep the legacy client's camelCase field names
/// working against the snake_case store columns.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAppointmentRequest {
    pub name: String,
    pub address: String,
    pub nic: Option<String>,
    pub phone: String,
    pub email: String,
    #[serde(alias = "doctorName")]
    pub doctor_name: String,
    #[serde(alias = "doctorId")]
    pub doctor_id: Uuid,
    pub specialization: String,
    pub date: NaiveDate,
    pub time: String,
    #[serde(alias = "user_id")]
    pub patient_id: Uuid,
    #[serde(alias = "type")]
    pub appointment_type: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateAppointmentRequest {
    pub name: Option<String>,
    pub address: Option<String>,
    pub nic: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    #[serde(alias = "doctorName")]
    pub doctor_name: Option<String>,
    #[serde(alias = "doctorId")]
    pub doctor_id: Option<Uuid>,
    pub specialization: Option<String>,
    pub date: Option<NaiveDate>,
    pub time: Option<String>,
    #[serde(alias = "type")]
    pub appointment_type: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: AppointmentStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RejectAppointmentRequest {
    #[serde(alias = "rejectionReason")]
    pub rejection_reason: String,
}

#[derive(Debug, Deserialize)]
pub struct AppointmentQueryParams {
    #[serde(alias = "doctorId")]
    pub doctor_id: Option<Uuid>,
}

// ==============================================================================
// REPORTING MODELS
// ==============================================================================

/// Status tallies for the dashboards. `rejected` comes from the rejected
/// collection's length, never from a status field on active rows.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StatusCounts {
    pub pending: usize,
    pub reviewed: usize,
    pub completed: usize,
    pub rejected: usize,
    pub total: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct DashboardStats {
    pub counts: StatusCounts,
    pub today: usize,
    pub weekday_histogram: [u32; 7],
    pub by_specialization: Vec<(String, u32)>,
    pub by_type: Vec<(String, u32)>,
    pub upcoming: Vec<Appointment>,
    pub recent_rejections: Vec<RejectedAppointment>,
}

// ==============================================================================
// ERRORS
// ==============================================================================

#[derive(Error, Debug)]
pub enum AppointmentError {
    #[error("Appointment not found")]
    NotFound,

    #[error("Rejected appointment not found")]
    RejectedNotFound,

    #[error("Patient not found")]
    PatientNotFound,

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Appointment cannot be modified in current status: {0}")]
    InvalidStatusTransition(AppointmentStatus),

    #[error("Partial failure during rejection: {0}")]
    PartialFailure(String),

    #[error("Store error: {0}")]
    StoreError(String),
}
