// libs/appointment-cell/src/services/appointments.rs
use chrono::Utc;
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::Method;
use serde_json::{json, Value};
use tracing::{debug, error, info};
use uuid::Uuid;

use shared_config::AppConfig;
use shared_database::store::StoreClient;

use crate::models::{
    Appointment, AppointmentError, AppointmentStatus, CreateAppointmentRequest, DashboardStats,
    RejectedAppointment, UpdateAppointmentRequest,
};
use crate::services::{lifecycle, reporting};

pub struct AppointmentService {
    store: StoreClient,
}

impl AppointmentService {
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

    pub async fn create(
        &self,
        request: CreateAppointmentRequest,
        auth_token: &str,
    ) -> Result<Appointment, AppointmentError> {
        debug!("Creating appointment for patient {}", request.patient_id);

        for (field, value) in [
            ("name", &request.name),
            ("address", &request.address),
            ("phone", &request.phone),
            ("email", &request.email),
            ("doctorName", &request.doctor_name),
            ("specialization", &request.specialization),
            ("time", &request.time),
        ] {
            if value.trim().is_empty() {
                return Err(AppointmentError::ValidationError(format!(
                    "Please fill all required fields: {} is missing",
                    field
                )));
            }
        }

        // The booking form only accepts registered patients.
        let patients: Vec<Value> = self
            .store
            .request(
                Method::GET,
                &format!("/rest/v1/patients?id=eq.{}&select=id", request.patient_id),
                Some(auth_token),
                None,
            )
            .await
            .map_err(|e| AppointmentError::StoreError(e.to_string()))?;

        if patients.is_empty() {
            return Err(AppointmentError::PatientNotFound);
        }

        let index_no = self.next_index_no(auth_token).await?;

        let body = json!({
            "index_no": index_no,
            "name": request.name,
            "address": request.address,
            "nic": request.nic,
            "phone": request.phone,
            "email": request.email,
            "doctor_name": request.doctor_name,
            "doctor_id": request.doctor_id,
            "specialization": request.specialization,
            "date": request.date,
            "time": request.time,
            "patient_id": request.patient_id,
            "appointment_type": request.appointment_type,
            "status": AppointmentStatus::Pending,
        });

        let created: Vec<Appointment> = self
            .store
            .request_with_headers(
                Method::POST,
                "/rest/v1/appointments",
                Some(auth_token),
                Some(body),
                Some(Self::representation_headers()),
            )
            .await
            .map_err(|e| AppointmentError::StoreError(e.to_string()))?;

        created
            .into_iter()
            .next()
            .ok_or_else(|| AppointmentError::StoreError("Insert returned no row".to_string()))
    }

    /// Legacy index numbers are count-based with a historical +2 offset,
    /// zero-padded to four digits (APP0002, APP0003, ...).
    async fn next_index_no(&self, auth_token: &str) -> Result<String, AppointmentError> {
        let rows: Vec<Value> = self
            .store
            .request(
                Method::GET,
                "/rest/v1/appointments?select=id",
                Some(auth_token),
                None,
            )
            .await
            .map_err(|e| AppointmentError::StoreError(e.to_string()))?;

        Ok(format!("APP{:04}", rows.len() + 2))
    }

    pub async fn list(&self, doctor_id: Option<Uuid>) -> Result<Vec<Appointment>, AppointmentError> {
        let path = match doctor_id {
            Some(id) => format!("/rest/v1/appointments?doctor_id=eq.{}&order=date.asc", id),
            None => "/rest/v1/appointments?order=date.asc".to_string(),
        };

        self.store
            .request(Method::GET, &path, None, None)
            .await
            .map_err(|e| AppointmentError::StoreError(e.to_string()))
    }

    pub async fn get(&self, id: Uuid) -> Result<Appointment, AppointmentError> {
        let rows: Vec<Appointment> = self
            .store
            .request(
                Method::GET,
                &format!("/rest/v1/appointments?id=eq.{}", id),
                None,
                None,
            )
            .await
            .map_err(|e| AppointmentError::StoreError(e.to_string()))?;

        rows.into_iter().next().ok_or(AppointmentError::NotFound)
    }

    pub async fn update(
        &self,
        id: Uuid,
        request: UpdateAppointmentRequest,
    ) -> Result<Appointment, AppointmentError> {
        debug!("Updating appointment {}", id);

        let mut fields = serde_json::Map::new();
        if let Some(v) = request.name { fields.insert("name".to_string(), json!(v)); }
        if let Some(v) = request.address { fields.insert("address".to_string(), json!(v)); }
        if let Some(v) = request.nic { fields.insert("nic".to_string(), json!(v)); }
        if let Some(v) = request.phone { fields.insert("phone".to_string(), json!(v)); }
        if let Some(v) = request.email { fields.insert("email".to_string(), json!(v)); }
        if let Some(v) = request.doctor_name { fields.insert("doctor_name".to_string(), json!(v)); }
        if let Some(v) = request.doctor_id { fields.insert("doctor_id".to_string(), json!(v)); }
        if let Some(v) = request.specialization { fields.insert("specialization".to_string(), json!(v)); }
        if let Some(v) = request.date { fields.insert("date".to_string(), json!(v)); }
        if let Some(v) = request.time { fields.insert("time".to_string(), json!(v)); }
        if let Some(v) = request.appointment_type { fields.insert("appointment_type".to_string(), json!(v)); }

        if fields.is_empty() {
            return self.get(id).await;
        }

        let updated: Vec<Appointment> = self
            .store
            .request_with_headers(
                Method::PATCH,
                &format!("/rest/v1/appointments?id=eq.{}", id),
                None,
                Some(Value::Object(fields)),
                Some(Self::representation_headers()),
            )
            .await
            .map_err(|e| AppointmentError::StoreError(e.to_string()))?;

        updated.into_iter().next().ok_or(AppointmentError::NotFound)
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppointmentError> {
        let deleted: Vec<Appointment> = self
            .store
            .request_with_headers(
                Method::DELETE,
                &format!("/rest/v1/appointments?id=eq.{}", id),
                None,
                None,
                Some(Self::representation_headers()),
            )
            .await
            .map_err(|e| AppointmentError::StoreError(e.to_string()))?;

        if deleted.is_empty() {
            return Err(AppointmentError::NotFound);
        }
        Ok(())
    }

    /// Status change path, also the completion path. The lifecycle rules
    /// decide whether the transition is admissible; re-completion short
    /// circuits into a no-op success.
    pub async fn update_status(
        &self,
        id: Uuid,
        status: AppointmentStatus,
    ) -> Result<Appointment, AppointmentError> {
        let current = self.get(id).await?;

        lifecycle::validate_transition(current.status, status)?;

        if current.status == AppointmentStatus::Completed && status == AppointmentStatus::Completed {
            debug!("Appointment {} already Completed, treating as no-op", id);
            return Ok(current);
        }

        let updated: Vec<Appointment> = self
            .store
            .request_with_headers(
                Method::PATCH,
                &format!("/rest/v1/appointments?id=eq.{}", id),
                None,
                Some(json!({ "status": status })),
                Some(Self::representation_headers()),
            )
            .await
            .map_err(|e| AppointmentError::StoreError(e.to_string()))?;

        updated.into_iter().next().ok_or(AppointmentError::NotFound)
    }

    /// Move an appointment into the rejected collection: write the snapshot,
    /// then delete the original. The two writes are not transactional; if the
    /// delete fails we roll the snapshot back, and if that also fails the
    /// split state is surfaced as a partial failure.
    pub async fn reject(
        &self,
        id: Uuid,
        reason: &str,
        auth_token: &str,
    ) -> Result<RejectedAppointment, AppointmentError> {
        let reason = lifecycle::validate_rejection_reason(reason)?;
        let appointment = self.get(id).await?;

        info!("Rejecting appointment {} ({})", id, appointment.index_no);

        let snapshot = json!({
            "index_no": appointment.index_no,
            "name": appointment.name,
            "address": appointment.address,
            "nic": appointment.nic,
            "phone": appointment.phone,
            "email": appointment.email,
            "doctor_name": appointment.doctor_name,
            "doctor_id": appointment.doctor_id,
            "specialization": appointment.specialization,
            "date": appointment.date,
            "time": appointment.time,
            "patient_id": appointment.patient_id,
            "status": "Rejected",
            "rejection_reason": reason,
            "rejected_at": Utc::now(),
            "original_appointment_id": appointment.id,
        });

        let written: Vec<RejectedAppointment> = self
            .store
            .request_with_headers(
                Method::POST,
                "/rest/v1/rejected_appointments",
                Some(auth_token),
                Some(snapshot),
                Some(Self::representation_headers()),
            )
            .await
            .map_err(|e| AppointmentError::StoreError(e.to_string()))?;

        let rejected = written
            .into_iter()
            .next()
            .ok_or_else(|| AppointmentError::StoreError("Snapshot insert returned no row".to_string()))?;

        if let Err(delete_err) = self.delete(id).await {
            error!(
                "Rejection of appointment {} wrote snapshot {} but failed to delete the original: {}",
                id, rejected.id, delete_err
            );

            // Compensating action: take the snapshot back out so the record
            // does not exist in both collections.
            let rollback = self
                .store
                .request_no_content(
                    Method::DELETE,
                    &format!("/rest/v1/rejected_appointments?id=eq.{}", rejected.id),
                    Some(auth_token),
                    None,
                )
                .await;

            return match rollback {
                Ok(()) => Err(AppointmentError::StoreError(format!(
                    "Failed to delete original appointment, snapshot rolled back: {}",
                    delete_err
                ))),
                Err(rollback_err) => Err(AppointmentError::PartialFailure(format!(
                    "appointment {} exists in both collections (delete failed: {}, rollback failed: {})",
                    id, delete_err, rollback_err
                ))),
            };
        }

        Ok(rejected)
    }

    pub async fn list_rejected(&self) -> Result<Vec<RejectedAppointment>, AppointmentError> {
        self.store
            .request(
                Method::GET,
                "/rest/v1/rejected_appointments?order=rejected_at.desc",
                None,
                None,
            )
            .await
            .map_err(|e| AppointmentError::StoreError(e.to_string()))
    }

    pub async fn delete_rejected(&self, id: Uuid) -> Result<(), AppointmentError> {
        let deleted: Vec<RejectedAppointment> = self
            .store
            .request_with_headers(
                Method::DELETE,
                &format!("/rest/v1/rejected_appointments?id=eq.{}", id),
                None,
                None,
                Some(Self::representation_headers()),
            )
            .await
            .map_err(|e| AppointmentError::StoreError(e.to_string()))?;

        if deleted.is_empty() {
            return Err(AppointmentError::RejectedNotFound);
        }
        Ok(())
    }

    /// Server-side rendition of the dashboard numbers the admin and doctor
    /// views derive: fetch both collections once, aggregate in-process.
    pub async fn dashboard(&self, doctor_id: Option<Uuid>) -> Result<DashboardStats, AppointmentError> {
        let appointments = self.list(doctor_id).await?;
        let mut rejected = self.list_rejected().await?;

        if let Some(id) = doctor_id {
            rejected.retain(|r| r.doctor_id == id);
        }

        let today = Utc::now().date_naive();

        let counts = reporting::count_by_status(&appointments, rejected.len());
        let today_total = lifecycle::today_count(&appointments, today);
        let weekday_histogram = reporting::weekday_histogram(&appointments, |a| Some(a.date));
        let by_specialization =
            reporting::distribution_by(&appointments, |a| Some(a.specialization.clone()), "Unknown");
        let by_type =
            reporting::distribution_by(&appointments, |a| a.appointment_type.clone(), "General Checkup");
        let upcoming = lifecycle::upcoming_window(&appointments, today, 5, 5);

        rejected.sort_by(|a, b| b.rejected_at.cmp(&a.rejected_at));
        rejected.truncate(5);

        Ok(DashboardStats {
            counts,
            today: today_total,
            weekday_histogram,
            by_specialization,
            by_type,
            upcoming,
            recent_rejections: rejected,
        })
    }
}
