// libs/leave-cell/src/services/conflict.rs
//
// Admissibility rules for a candidate leave window against a doctor's
// existing leave set. Pure functions; the service fetches the rows and
// calls in here before any write.

use chrono::NaiveDate;
use tracing::debug;
use uuid::Uuid;

use crate::models::{DoctorLeave, LeaveError, LeaveType};

/// Closed-interval intersection. Touching endpoints count as overlap:
/// a leave ending on the 5th conflicts with one starting on the 5th.
fn intervals_overlap(
    new_start: NaiveDate,
    new_end: NaiveDate,
    start: NaiveDate,
    end: NaiveDate,
) -> bool {
    new_start <= end && new_end >= start
}

/// Validate a candidate window `[start_date, end_date]`:
/// 1. it must not start before `today`,
/// 2. the end must be strictly after the start (same-day leave is invalid),
/// 3. it must not intersect any other leave of the same doctor.
///
/// On update, `exclude` carries the id of the leave being edited so a record
/// never conflicts with its own prior interval.
pub fn validate_window(
    existing: &[DoctorLeave],
    start_date: NaiveDate,
    end_date: NaiveDate,
    exclude: Option<Uuid>,
    today: NaiveDate,
) -> Result<(), LeaveError> {
    if start_date < today {
        return Err(LeaveError::StartsInPast);
    }

    if end_date <= start_date {
        return Err(LeaveError::InvalidRange);
    }

    for leave in existing {
        if Some(leave.id) == exclude {
            continue;
        }
        if intervals_overlap(start_date, end_date, leave.start_date, leave.end_date) {
            debug!(
                "Leave window {}..{} collides with existing leave {} ({}..{})",
                start_date, end_date, leave.id, leave.start_date, leave.end_date
            );
            return Err(LeaveError::Overlap);
        }
    }

    Ok(())
}

/// A free-text reason is mandatory only for the Other leave type.
pub fn validate_reason(leave_type: LeaveType, reason: &str) -> Result<(), LeaveError> {
    if leave_type == LeaveType::Other && reason.trim().is_empty() {
        return Err(LeaveError::ValidationError(
            "Reason is required when leave type is Other".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::LeaveStatus;
    use assert_matches::assert_matches;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn leave(id: Uuid, start: &str, end: &str) -> DoctorLeave {
        DoctorLeave {
            id,
            doctor_id: Uuid::new_v4(),
            leave_type: LeaveType::AnnualLeave,
            start_date: date(start),
            end_date: date(end),
            reason: String::new(),
            status: LeaveStatus::Approved,
        }
    }

    #[test]
    fn window_cannot_start_in_the_past() {
        let result = validate_window(&[], date("2025-06-09"), date("2025-06-12"), None, date("2025-06-10"));
        assert_matches!(result, Err(LeaveError::StartsInPast));
    }

    #[test]
    fn same_day_leave_is_invalid() {
        let today = date("2025-06-01");
        assert_matches!(
            validate_window(&[], date("2025-06-05"), date("2025-06-05"), None, today),
            Err(LeaveError::InvalidRange)
        );
        assert_matches!(
            validate_window(&[], date("2025-06-05"), date("2025-06-04"), None, today),
            Err(LeaveError::InvalidRange)
        );
    }

    #[test]
    fn overlapping_window_is_rejected() {
        let today = date("2025-05-01");
        let existing = vec![leave(Uuid::new_v4(), "2025-06-01", "2025-06-05")];

        // Straddles the tail of the approved leave.
        assert_matches!(
            validate_window(&existing, date("2025-06-04"), date("2025-06-08"), None, today),
            Err(LeaveError::Overlap)
        );

        // Starts the day after it ends: admissible.
        assert!(validate_window(&existing, date("2025-06-06"), date("2025-06-10"), None, today).is_ok());
    }

    #[test]
    fn rejects_iff_closed_intervals_intersect() {
        let today = date("2025-01-01");
        let existing_windows = [
            ("2025-03-01", "2025-03-10"),
            ("2025-04-01", "2025-04-02"),
            ("2025-06-15", "2025-06-20"),
        ];
        let candidates = [
            ("2025-02-01", "2025-02-28"),
            ("2025-02-20", "2025-03-01"), // touches a start
            ("2025-03-05", "2025-03-07"), // fully contained
            ("2025-02-25", "2025-03-15"), // fully contains
            ("2025-03-10", "2025-03-12"), // touches an end
            ("2025-05-01", "2025-06-14"),
            ("2025-06-21", "2025-06-30"),
        ];

        let existing: Vec<DoctorLeave> = existing_windows
            .iter()
            .map(|(s, e)| leave(Uuid::new_v4(), s, e))
            .collect();

        for (s, e) in candidates {
            let (new_start, new_end) = (date(s), date(e));
            let expect_conflict = existing
                .iter()
                .any(|l| new_start <= l.end_date && new_end >= l.start_date);

            let result = validate_window(&existing, new_start, new_end, None, today);
            if expect_conflict {
                assert_matches!(result, Err(LeaveError::Overlap), "candidate {}..{}", s, e);
            } else {
                assert!(result.is_ok(), "candidate {}..{}", s, e);
            }
        }
    }

    #[test]
    fn edited_leave_does_not_conflict_with_itself() {
        let today = date("2025-05-01");
        let id = Uuid::new_v4();
        let existing = vec![leave(id, "2025-06-01", "2025-06-05")];

        // Shrinking the same record stays admissible.
        assert!(validate_window(&existing, date("2025-06-02"), date("2025-06-04"), Some(id), today).is_ok());

        // But it still collides with other records.
        let other = vec![leave(Uuid::new_v4(), "2025-06-01", "2025-06-05")];
        assert_matches!(
            validate_window(&other, date("2025-06-02"), date("2025-06-04"), Some(id), today),
            Err(LeaveError::Overlap)
        );
    }

    #[test]
    fn other_leave_type_needs_a_reason() {
        assert_matches!(
            validate_reason(LeaveType::Other, "  "),
            Err(LeaveError::ValidationError(_))
        );
        assert!(validate_reason(LeaveType::Other, "family matter").is_ok());
        assert!(validate_reason(LeaveType::SickLeave, "").is_ok());
    }
}
