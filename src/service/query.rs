//! Stateless queries over a calendar snapshot.

use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::{DateLookup, HolidayCalendar, YearLedger};
use crate::error::ServiceError;

/// A holiday on or after the reference date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpcomingHoliday {
    /// Holiday date.
    pub date: NaiveDate,
    /// Holiday name.
    pub name: String,
    /// Whole days from the reference date; zero when it is today.
    pub days_remaining: i64,
}

/// Result of [`upcoming`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpcomingReport {
    /// Entries in ascending date order, at most `count` of them.
    pub entries: Vec<UpcomingHoliday>,
    /// Stored records ignored because their date did not parse.
    pub skipped: usize,
}

/// Whether a date is a holiday, derived from [`DateLookup`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HolidayCheck {
    /// `true` when the date is a holiday.
    pub matched: bool,
    /// Holiday name when matched.
    pub name: Option<String>,
    /// `false` when the date's year has no ledger at all.
    pub year_has_data: bool,
}

impl From<DateLookup> for HolidayCheck {
    fn from(lookup: DateLookup) -> Self {
        match lookup {
            DateLookup::Holiday(record) => Self {
                matched: true,
                name: Some(record.name),
                year_has_data: true,
            },
            DateLookup::NotHoliday => Self {
                matched: false,
                name: None,
                year_has_data: true,
            },
            DateLookup::NoDataForYear => Self {
                matched: false,
                name: None,
                year_has_data: false,
            },
        }
    }
}

/// Returns the next `count` holidays on or after `reference`.
///
/// Scans every ledger. Records whose date does not parse are skipped and
/// counted rather than failing the query. `count` is not clamped here; the
/// HTTP layer bounds it.
#[must_use]
pub fn upcoming(calendar: &HolidayCalendar, reference: NaiveDate, count: usize) -> UpcomingReport {
    let mut report = UpcomingReport::default();
    for ledger in calendar.years().values() {
        for record in ledger.records() {
            let Some(date) = record.parsed_date() else {
                report.skipped += 1;
                continue;
            };
            if date >= reference {
                report.entries.push(UpcomingHoliday {
                    date,
                    name: record.name.clone(),
                    days_remaining: (date - reference).num_days(),
                });
            }
        }
    }
    report.entries.sort_by_key(|h| h.date);
    report.entries.truncate(count);
    report
}

/// Returns the ledger for `year`.
///
/// # Errors
///
/// Returns [`ServiceError::YearNotFound`] when the year has no ledger.
pub fn by_year(calendar: &HolidayCalendar, year: i32) -> Result<&YearLedger, ServiceError> {
    calendar.get(year).ok_or(ServiceError::YearNotFound(year))
}

/// Checks whether `date` is a holiday.
#[must_use]
pub fn by_date(calendar: &HolidayCalendar, date: NaiveDate) -> HolidayCheck {
    HolidayCheck::from(calendar.lookup(date))
}
