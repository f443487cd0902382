// libs/appointment-cell/src/services/lifecycle.rs
//
// Pure status-machine rules for the appointment lifecycle:
// Pending -> Reviewed -> Completed, with Cancelled as a side branch and
// rejection handled as a collection move (see services::appointments).
// Completed is terminal; everything else transitions permissively because
// the legacy data carries rows in every intermediate combination.

use chrono::{Duration, NaiveDate};
use tracing::{debug, warn};

use crate::models::{Appointment, AppointmentError, AppointmentStatus};

/// Validate a requested status change. Re-completing an already Completed
/// appointment is a successful no-op so that double-submitted requests
/// (network retries) do not surface errors; any other way out of Completed
/// is refused.
pub fn validate_transition(
    current: AppointmentStatus,
    next: AppointmentStatus,
) -> Result<(), AppointmentError> {
    debug!("Validating status transition {} -> {}", current, next);

    if current == AppointmentStatus::Completed && next != AppointmentStatus::Completed {
        warn!("Refusing transition out of Completed: {} -> {}", current, next);
        return Err(AppointmentError::InvalidStatusTransition(current));
    }

    Ok(())
}

/// Apply completion. Idempotent: a second call leaves the record unchanged.
pub fn mark_completed(mut appointment: Appointment) -> Appointment {
    if appointment.status != AppointmentStatus::Completed {
        appointment.status = AppointmentStatus::Completed;
    }
    appointment
}

/// A rejection must carry a reason; whitespace does not count.
pub fn validate_rejection_reason(reason: &str) -> Result<String, AppointmentError> {
    let trimmed = reason.trim();
    if trimmed.is_empty() {
        return Err(AppointmentError::ValidationError(
            "Rejection reason is required".to_string(),
        ));
    }
    Ok(trimmed.to_string())
}

/// Count appointments falling on `today`. Only the calendar date takes part
/// in the comparison - the display `time` string is ignored entirely.
pub fn today_count(appointments: &[Appointment], today: NaiveDate) -> usize {
    appointments.iter().filter(|a| a.date == today).count()
}

/// Appointments inside `[today, today + window_days]` inclusive, excluding
/// Completed ones, ascending by date, truncated to `limit`.
pub fn upcoming_window(
    appointments: &[Appointment],
    today: NaiveDate,
    window_days: i64,
    limit: usize,
) -> Vec<Appointment> {
    let window_end = today + Duration::days(window_days);

    let mut upcoming: Vec<Appointment> = appointments
        .iter()
        .filter(|a| a.date >= today && a.date <= window_end)
        .filter(|a| a.status != AppointmentStatus::Completed)
        .cloned()
        .collect();

    upcoming.sort_by_key(|a| a.date);
    upcoming.truncate(limit);
    upcoming
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use uuid::Uuid;

    fn appointment(date: &str, time: &str, status: AppointmentStatus) -> Appointment {
        Appointment {
            id: Uuid::new_v4(),
            index_no: "APP0002".to_string(),
            name: "Test Patient".to_string(),
            address: "12 Lake Road".to_string(),
            nic: None,
            phone: "0771234567".to_string(),
            email: "patient@example.com".to_string(),
            doctor_name: "Dr. Test".to_string(),
            doctor_id: Uuid::new_v4(),
            specialization: "Cardiology".to_string(),
            date: date.parse().unwrap(),
            time: time.to_string(),
            patient_id: Uuid::new_v4(),
            appointment_type: None,
            status,
        }
    }

    #[test]
    fn completed_is_terminal_except_for_itself() {
        assert_matches!(
            validate_transition(AppointmentStatus::Completed, AppointmentStatus::Pending),
            Err(AppointmentError::InvalidStatusTransition(_))
        );
        assert_matches!(
            validate_transition(AppointmentStatus::Completed, AppointmentStatus::Reviewed),
            Err(AppointmentError::InvalidStatusTransition(_))
        );
        assert!(validate_transition(AppointmentStatus::Completed, AppointmentStatus::Completed).is_ok());
    }

    #[test]
    fn non_terminal_transitions_are_permissive() {
        assert!(validate_transition(AppointmentStatus::Pending, AppointmentStatus::Reviewed).is_ok());
        assert!(validate_transition(AppointmentStatus::Reviewed, AppointmentStatus::Pending).is_ok());
        assert!(validate_transition(AppointmentStatus::Pending, AppointmentStatus::Cancelled).is_ok());
        assert!(validate_transition(AppointmentStatus::Cancelled, AppointmentStatus::Pending).is_ok());
    }

    #[test]
    fn mark_completed_is_idempotent() {
        let pending = appointment("2025-06-01", "10:30 AM", AppointmentStatus::Pending);

        let once = mark_completed(pending);
        assert_eq!(once.status, AppointmentStatus::Completed);

        let twice = mark_completed(once.clone());
        assert_eq!(twice.status, once.status);
    }

    #[test]
    fn rejection_reason_must_not_be_blank() {
        assert_matches!(
            validate_rejection_reason("   "),
            Err(AppointmentError::ValidationError(_))
        );
        assert_eq!(
            validate_rejection_reason("  doctor unavailable ").unwrap(),
            "doctor unavailable"
        );
    }

    #[test]
    fn today_count_ignores_time_of_day() {
        let today: NaiveDate = "2025-06-10".parse().unwrap();
        let appointments = vec![
            appointment("2025-06-10", "8:00 AM", AppointmentStatus::Pending),
            appointment("2025-06-10", "4:45 PM", AppointmentStatus::Reviewed),
            appointment("2025-06-11", "8:00 AM", AppointmentStatus::Pending),
        ];

        assert_eq!(today_count(&appointments, today), 2);
    }

    #[test]
    fn upcoming_window_is_inclusive_sorted_and_skips_completed() {
        let today: NaiveDate = "2025-06-10".parse().unwrap();
        let appointments = vec![
            appointment("2025-06-15", "9:00 AM", AppointmentStatus::Pending),
            appointment("2025-06-10", "9:00 AM", AppointmentStatus::Pending),
            appointment("2025-06-12", "9:00 AM", AppointmentStatus::Completed),
            appointment("2025-06-13", "9:00 AM", AppointmentStatus::Reviewed),
            appointment("2025-06-16", "9:00 AM", AppointmentStatus::Pending),
            appointment("2025-06-09", "9:00 AM", AppointmentStatus::Pending),
        ];

        let upcoming = upcoming_window(&appointments, today, 5, 5);
        let dates: Vec<String> = upcoming.iter().map(|a| a.date.to_string()).collect();
        assert_eq!(dates, vec!["2025-06-10", "2025-06-13", "2025-06-15"]);
    }

    #[test]
    fn upcoming_window_truncates_to_limit() {
        let today: NaiveDate = "2025-06-10".parse().unwrap();
        let appointments: Vec<Appointment> = (10..16)
            .map(|d| appointment(&format!("2025-06-{:02}", d), "9:00 AM", AppointmentStatus::Pending))
            .collect();

        let upcoming = upcoming_window(&appointments, today, 5, 3);
        assert_eq!(upcoming.len(), 3);
        assert_eq!(upcoming[0].date.to_string(), "2025-06-10");
    }
}
