use chrono::{DateTime, Utc};
use crate::error::AppError;

/// Validates the time range submitted with a booking or event.
///
/// The start must come strictly before the end, and the start's calendar
/// date must lie strictly after today's calendar date. Time-of-day is
/// ignored for the second rule: a request for later today is rejected,
/// one for tomorrow morning passes.
pub fn validate_range(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<(), AppError> {
    if start >= end {
        return Err(AppError::Validation("Start date must be before end date.".into()));
    }

    if start.date_naive() <= Utc::now().date_naive() {
        return Err(AppError::Validation("Start date must be later than the current date.".into()));
    }

    Ok(())
}
