// libs/leave-cell/src/models.rs
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use uuid::Uuid;

/// A doctor's declared unavailability window. Closed calendar-day interval;
/// `reason` is only required for the Other leave type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DoctorLeave {
    pub id: Uuid,
    pub doctor_id: Uuid,
    pub leave_type: LeaveType,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default)]
    pub reason: String,
    pub status: LeaveStatus,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum LeaveType {
    #[serde(rename = "Sick Leave")]
    SickLeave,
    #[serde(rename = "Annual Leave")]
    AnnualLeave,
    #[serde(rename = "Emergency Leave")]
    EmergencyLeave,
    Other,
}

impl fmt::Display for LeaveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LeaveType::SickLeave => write!(f, "Sick Leave"),
            LeaveType::AnnualLeave => write!(f, "Annual Leave"),
            LeaveType::EmergencyLeave => write!(f, "Emergency Leave"),
            LeaveType::Other => write!(f, "Other"),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum LeaveStatus {
    Pending,
    Approved,
    Rejected,
    Ongoing,
    Taken,
}

impl fmt::Display for LeaveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LeaveStatus::Pending => write!(f, "Pending"),
            LeaveStatus::Approved => write!(f, "Approved"),
            LeaveStatus::Rejected => write!(f, "Rejected"),
            LeaveStatus::Ongoing => write!(f, "Ongoing"),
            LeaveStatus::Taken => write!(f, "Taken"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateLeaveRequest {
    #[serde(alias = "doctorId")]
    pub doctor_id: Uuid,
    #[serde(alias = "leaveType")]
    pub leave_type: LeaveType,
    #[serde(alias = "startDate")]
    pub start_date: NaiveDate,
    #[serde(alias = "endDate")]
    pub end_date: NaiveDate,
    #[serde(default)]
    pub reason: String,
}

/// The edit form only ever changes the window, never the type or owner.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateLeaveDatesRequest {
    #[serde(alias = "startDate")]
    pub start_date: NaiveDate,
    #[serde(alias = "endDate")]
    pub end_date: NaiveDate,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateLeaveStatusRequest {
    pub status: LeaveStatus,
}

#[derive(Error, Debug)]
pub enum LeaveError {
    #[error("Leave request not found")]
    NotFound,

    #[error("Start date cannot be before today's date")]
    StartsInPast,

    #[error("End date must be after start date")]
    InvalidRange,

    #[error("The leave period overlaps with an existing leave request")]
    Overlap,

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Store error: {0}")]
    StoreError(String),
}
