//! Incident dates are collected as calendar dates but the backend expects a full
//! datetime.

use crate::api::AppError;
use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};

pub const INVALID_INCIDENT_DATE: &str = "Incident date must be a valid date";

/// Normalizes a date or datetime string to UTC ISO 8601 with milliseconds.
///
/// `2024-01-15` becomes `2024-01-15T00:00:00.000Z`. RFC 3339 input is
/// converted to UTC; an offset-less datetime is taken as UTC.
///
/// # Errors
/// Returns `AppError::Validation` when the input is not a recognizable date.
pub fn to_iso_datetime(input: &str) -> Result<String, AppError> {
    let input = input.trim();

    let parsed = if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        date.and_hms_opt(0, 0, 0).map(|naive| naive.and_utc())
    } else if let Ok(datetime) = DateTime::parse_from_rfc3339(input) {
        Some(datetime.with_timezone(&Utc))
    } else {
        ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"]
            .iter()
            .find_map(|format| NaiveDateTime::parse_from_str(input, format).ok())
            .map(|naive| naive.and_utc())
    };

    parsed
        .map(|datetime: DateTime<Utc>| datetime.to_rfc3339_opts(SecondsFormat::Millis, true))
        .ok_or_else(|| AppError::Validation(INVALID_INCIDENT_DATE.to_string()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn date_only_becomes_midnight_utc() {
        assert_eq!(
            to_iso_datetime("2024-01-15").unwrap(),
            "2024-01-15T00:00:00.000Z"
        );
    }

    #[test]
    fn rfc3339_is_converted_to_utc() {
        assert_eq!(
            to_iso_datetime("2024-01-15T10:30:00+05:30").unwrap(),
            "2024-01-15T05:00:00.000Z"
        );
        assert_eq!(
            to_iso_datetime("2024-01-15T10:30:00.123456Z").unwrap(),
            "2024-01-15T10:30:00.123Z"
        );
    }

    #[test]
    fn naive_datetime_is_taken_as_utc() {
        assert_eq!(
            to_iso_datetime("2024-01-15T08:15:00").unwrap(),
            "2024-01-15T08:15:00.000Z"
        );
    }

    #[test]
    fn garbage_is_rejected() {
        let err = to_iso_datetime("15/01/2024").unwrap_err();
        assert_eq!(err.user_message(), INVALID_INCIDENT_DATE);
        assert!(to_iso_datetime("").is_err());
        assert!(to_iso_datetime("2024-02-30").is_err());
    }
}
