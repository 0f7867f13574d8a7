//! Date parsing and year-window validation.
//!
//! Pure functions: the caller supplies the current year (from a
//! [`super::Clock`]) so the upper bound can be tested deterministically.

use chrono::{Datelike, NaiveDate};

use crate::error::ServiceError;

/// Canonical external date format.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parses a strict `YYYY-MM-DD` date.
///
/// `chrono` alone accepts unpadded fields such as `2025-1-1`, so the shape
/// is checked first: exactly ten ASCII characters, digits everywhere except
/// hyphens at positions 4 and 7.
///
/// # Errors
///
/// Returns [`ServiceError::InvalidFormat`] for any other shape or for an
/// impossible calendar date.
pub fn parse(text: &str) -> Result<NaiveDate, ServiceError> {
    let bytes = text.as_bytes();
    let well_formed = bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        });
    if !well_formed {
        return Err(ServiceError::InvalidFormat(text.to_string()));
    }
    NaiveDate::parse_from_str(text, DATE_FORMAT)
        .map_err(|_| ServiceError::InvalidFormat(text.to_string()))
}

/// Checks `min_year <= year <= current_year + max_offset`.
///
/// # Errors
///
/// Returns [`ServiceError::YearOutOfRange`] when the year falls outside the
/// window.
pub fn check_year_in_range(
    year: i32,
    current_year: i32,
    min_year: i32,
    max_offset: i32,
) -> Result<(), ServiceError> {
    let max = current_year.saturating_add(max_offset);
    if year < min_year || year > max {
        return Err(ServiceError::YearOutOfRange {
            year,
            min: min_year,
            max,
        });
    }
    Ok(())
}

/// Checks that the date is not before January 1st of `min_year`.
///
/// # Errors
///
/// Returns [`ServiceError::DateTooEarly`] otherwise.
pub fn check_not_before_min_year(date: NaiveDate, min_year: i32) -> Result<(), ServiceError> {
    if date.year() < min_year {
        return Err(ServiceError::DateTooEarly {
            date: date.format(DATE_FORMAT).to_string(),
            min_year,
        });
    }
    Ok(())
}

/// Trims a holiday name and rejects blank ones.
///
/// # Errors
///
/// Returns [`ServiceError::InvalidRequest`] when nothing is left after
/// trimming.
pub fn check_name(name: &str) -> Result<String, ServiceError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ServiceError::InvalidRequest(
            "holiday name must not be empty".to_string(),
        ));
    }
    Ok(trimmed.to_string())
}
