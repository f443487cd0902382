// libs/appointment-cell/src/services/reporting.rs
//
// Pure aggregation over already-fetched collections. No I/O here: the
// handlers fetch the raw rows and these functions derive the dashboard view
// state, which is also the contract the unit tests pin down.

use chrono::{Datelike, NaiveDate};

use crate::models::{Appointment, AppointmentStatus, StatusCounts};

/// Tally active appointments by status. The rejected count is the size of
/// the rejected collection - rejection is collection membership, not a
/// status value, and Cancelled rows land in `total` only.
pub fn count_by_status(appointments: &[Appointment], rejected_count: usize) -> StatusCounts {
    let mut counts = StatusCounts {
        pending: 0,
        reviewed: 0,
        completed: 0,
        rejected: rejected_count,
        total: appointments.len() + rejected_count,
    };

    for appointment in appointments {
        match appointment.status {
            AppointmentStatus::Pending => counts.pending += 1,
            AppointmentStatus::Reviewed => counts.reviewed += 1,
            AppointmentStatus::Completed => counts.completed += 1,
            AppointmentStatus::Cancelled => {}
        }
    }

    counts
}

/// Bucket items into calendar weekdays, Sunday = 0. Items without a usable
/// date are skipped, not errored.
pub fn weekday_histogram<T>(items: &[T], date_of: impl Fn(&T) -> Option<NaiveDate>) -> [u32; 7] {
    let mut histogram = [0u32; 7];

    for item in items {
        if let Some(date) = date_of(item) {
            histogram[date.weekday().num_days_from_sunday() as usize] += 1;
        }
    }

    histogram
}

/// Generic categorical histogram in first-occurrence order. Missing keys
/// fall back to `default_label`.
pub fn distribution_by<T>(
    items: &[T],
    key_of: impl Fn(&T) -> Option<String>,
    default_label: &str,
) -> Vec<(String, u32)> {
    let mut distribution: Vec<(String, u32)> = Vec::new();

    for item in items {
        let key = key_of(item).unwrap_or_else(|| default_label.to_string());
        match distribution.iter_mut().find(|(label, _)| *label == key) {
            Some((_, count)) => *count += 1,
            None => distribution.push((key, 1)),
        }
    }

    distribution
}

/// Case-insensitive substring search across the field values the caller
/// extracts. A blank term returns the collection unchanged.
pub fn filter_by_search<T: Clone>(
    items: &[T],
    term: &str,
    field_values: impl Fn(&T) -> Vec<String>,
) -> Vec<T> {
    let needle = term.trim().to_lowercase();
    if needle.is_empty() {
        return items.to_vec();
    }

    items
        .iter()
        .filter(|item| {
            field_values(item)
                .iter()
                .any(|value| value.to_lowercase().contains(&needle))
        })
        .cloned()
        .collect()
}

/// Calendar-day buckets used by the appointment tables. `Specific` carries
/// its date by construction, so the "explicit date required" rule holds at
/// the type level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateBucket {
    All,
    Today,
    Upcoming,
    Past,
    Specific(NaiveDate),
}

pub fn filter_by_date_bucket<T: Clone>(
    items: &[T],
    bucket: DateBucket,
    reference: NaiveDate,
    date_of: impl Fn(&T) -> Option<NaiveDate>,
) -> Vec<T> {
    items
        .iter()
        .filter(|item| match (bucket, date_of(item)) {
            (DateBucket::All, _) => true,
            (_, None) => false,
            (DateBucket::Today, Some(date)) => date == reference,
            (DateBucket::Upcoming, Some(date)) => date > reference,
            (DateBucket::Past, Some(date)) => date < reference,
            (DateBucket::Specific(wanted), Some(date)) => date == wanted,
        })
        .cloned()
        .collect()
}
