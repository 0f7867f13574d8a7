//! A single holiday entry as stored in the calendar document.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::dates::DATE_FORMAT;

/// One holiday: a civil date and its name.
///
/// The date is kept in its `YYYY-MM-DD` text form. Records written through
/// the store always carry a valid date, but a hand-edited document may not,
/// and those records must still load (the upcoming query skips them).
/// Lexicographic order on the text equals chronological order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct HolidayRecord {
    /// Date in `YYYY-MM-DD` form.
    #[serde(rename = "fecha")]
    #[schema(example = "2025-01-01")]
    pub date: String,

    /// Human-readable holiday name.
    #[serde(rename = "nombre")]
    #[schema(example = "Año Nuevo")]
    pub name: String,
}

impl HolidayRecord {
    /// Builds a record from an already validated date.
    #[must_use]
    pub fn new(date: NaiveDate, name: impl Into<String>) -> Self {
        Self {
            date: date.format(DATE_FORMAT).to_string(),
            name: name.into(),
        }
    }

    /// Returns the parsed date, or `None` if the stored text is malformed.
    #[must_use]
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        super::dates::parse(&self.date).ok()
    }

    /// Returns the year of the stored date, if it parses.
    #[must_use]
    pub fn year(&self) -> Option<i32> {
        self.parsed_date().map(|d| d.year())
    }
}
